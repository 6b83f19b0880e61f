use crate::catalog::default_catalog_path;
use crate::error::ConfigError;
use clap::{Parser, ValueEnum};
use std::net::IpAddr;
use std::path::PathBuf;

/// Port the volunteer tablets have bookmarked
pub const DEFAULT_PORT: u16 = 5000;

/// Which print command to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrinterChoice {
    /// Pick from the operating system
    Auto,
    /// `lp`
    Lp,
    /// `PDFtoPrinter.exe`
    #[value(name = "pdftoprinter")]
    PdfToPrinter,
    /// Never print; useful for trying the form out
    #[value(name = "none")]
    Disabled,
}

/// Runtime settings
///
/// Every flag can also be set through its `PANTRY_*` environment variable;
/// a flag on the command line wins over the variable.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "pantry-drive-up",
    version,
    about = "Drive-up grocery order form that prints packing lists"
)]
pub struct Settings {
    /// Catalog spreadsheet (.xlsx or .csv) [default: ~/Desktop/DriveThruGroceryList.xlsx]
    #[arg(long = "catalog", env = "PANTRY_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Section table JSON; the bundled table when unset
    #[arg(long = "sections", env = "PANTRY_SECTIONS")]
    pub sections_path: Option<PathBuf>,

    /// Bind address; discovered at startup when unset
    #[arg(long, env = "PANTRY_HOST")]
    pub host: Option<IpAddr>,

    #[arg(long, env = "PANTRY_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory served under /static
    #[arg(long, env = "PANTRY_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// HTML to PDF converter
    #[arg(long, env = "PANTRY_WKHTMLTOPDF", default_value = "wkhtmltopdf")]
    pub wkhtmltopdf: String,

    #[arg(long, env = "PANTRY_PRINTER", value_enum, default_value_t = PrinterChoice::Auto)]
    pub printer: PrinterChoice,

    /// Answer 500 instead of "Success" when printing fails
    #[arg(long, env = "PANTRY_REPORT_PRINT_FAILURES")]
    pub report_print_failures: bool,
}

impl Settings {
    /// Where the catalog lives: the configured path or the desktop default
    ///
    /// # Returns
    /// * `Result<PathBuf, ConfigError>` - The catalog path, or an error when
    ///   nothing is configured and there is no home directory to default to
    pub fn catalog_path(&self) -> Result<PathBuf, ConfigError> {
        self.catalog
            .clone()
            .or_else(default_catalog_path)
            .ok_or(ConfigError::NoHomeDirectory)
    }
}
