use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while seeding or reading the grocery catalog
///
/// Every variant is fatal at startup: the server never begins serving
/// without a usable catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog workbook {path} could not be read: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("catalog csv {path} could not be read: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("catalog workbook could not be written: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("bundled default catalog is invalid: {0}")]
    Bundled(#[from] serde_json::Error),

    #[error("catalog {path} has no worksheets")]
    NoWorksheet { path: PathBuf },

    #[error("catalog {path} has no sections")]
    Empty { path: PathBuf },

    #[error("catalog {path} lists section '{section}' more than once")]
    DuplicateSection { path: PathBuf, section: String },

    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised by the section name table
#[derive(Debug, Error)]
pub enum NameError {
    #[error("section '{0}' has no short name")]
    Unmapped(String),

    #[error("sections missing from the short name table: {}", .0.join(", "))]
    UnmappedSections(Vec<String>),

    #[error("short name '{short}' for section '{section}' is not URL safe")]
    InvalidShortName { section: String, short: String },

    #[error("short name '{short}' is used by both '{first}' and '{second}'")]
    DuplicateShortName {
        short: String,
        first: String,
        second: String,
    },

    #[error("section '{0}' appears more than once in the short name table")]
    DuplicateSection(String),

    #[error("short name '{0}' is reserved")]
    Reserved(String),

    #[error("section table {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("section table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while resolving settings
///
/// Flag and environment parsing errors are reported by clap itself.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no home directory available to place the catalog in; pass --catalog")]
    NoHomeDirectory,
}

/// Problems with a posted packing list that the client has to fix
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("family_size is required")]
    MissingFamilySize,

    #[error("unknown family size '{0}'")]
    UnknownFamilySize(String),

    #[error("unknown section field '{0}'")]
    UnknownSection(String),
}

/// Failures of the HTML to PDF to printer pipeline
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("temporary print file could not be written: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("could not run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}")]
    CommandFailed { program: String, status: String },

    #[error("print task was aborted: {0}")]
    Aborted(String),
}

/// Template registration and rendering failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template could not be registered: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("template could not be rendered: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("printing failed: {0}")]
    Print(#[from] PrintError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Submission(_) => StatusCode::BAD_REQUEST,
            AppError::Render(_) | AppError::Print(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            log::error!("request failed: {}", self);
        } else {
            log::warn!("rejected submission: {}", self);
        }

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_errors_are_client_errors() {
        let response = AppError::from(SubmissionError::UnknownFamilySize("x".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn print_errors_are_server_errors() {
        let err = PrintError::CommandFailed {
            program: "lp".into(),
            status: "exit status: 1".into(),
        };
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unmapped_sections_are_listed() {
        let err = NameError::UnmappedSections(vec!["Fresh Food".into(), "Rice".into()]);
        assert_eq!(
            err.to_string(),
            "sections missing from the short name table: Fresh Food, Rice"
        );
    }
}
