use crate::error::PrintError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// wkhtmltopdf options for a Letter page that fits a packing list on one sheet
const PAGE_OPTIONS: [(&str, &str); 5] = [
    ("--page-size", "Letter"),
    ("--zoom", "1.22"),
    ("--margin-bottom", "0"),
    ("--margin-left", "5"),
    ("--margin-right", "2"),
];

/// How a finished PDF reaches the printer
///
/// Windows cannot print a PDF on its own, so the PDFtoPrinter helper
/// (http://www.columbia.edu/~em36/PDFtoPrinter.exe) must be on the PATH there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterBackend {
    /// `lp` on Linux, macOS and other Unix systems
    Lp,
    /// `PDFtoPrinter.exe` on Windows
    PdfToPrinter,
    /// Platforms with no known print command; printing is skipped
    Unsupported,
}

impl PrinterBackend {
    /// Backend for the platform this binary runs on
    pub fn detect() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    pub fn for_os(os: &str) -> Self {
        match os {
            "linux" | "macos" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" | "solaris"
            | "illumos" => PrinterBackend::Lp,
            "windows" => PrinterBackend::PdfToPrinter,
            _ => PrinterBackend::Unsupported,
        }
    }

    pub fn program(self) -> Option<&'static str> {
        match self {
            PrinterBackend::Lp => Some("lp"),
            PrinterBackend::PdfToPrinter => Some("PDFtoPrinter.exe"),
            PrinterBackend::Unsupported => None,
        }
    }

    /// Send a PDF to the default printer
    ///
    /// # Arguments
    /// * `pdf` - The finished document; it must outlive the print command
    ///
    /// # Returns
    /// * `Result<PrintOutcome, PrintError>` - `Submitted` once the print
    ///   command exits successfully, `Skipped` on platforms without one
    ///
    /// # Examples
    /// ```
    /// use pantry::printer::{PrintOutcome, PrinterBackend};
    /// use std::path::Path;
    ///
    /// let outcome = PrinterBackend::Unsupported
    ///     .dispatch(Path::new("packing_list.pdf"))
    ///     .unwrap();
    /// assert_eq!(outcome, PrintOutcome::Skipped);
    /// ```
    pub fn dispatch(self, pdf: &Path) -> Result<PrintOutcome, PrintError> {
        match self.program() {
            Some(program) => {
                run(Command::new(program).arg(pdf), program)?;
                Ok(PrintOutcome::Submitted)
            }
            None => {
                log::warn!(
                    "printing is not supported on {}; skipped {}",
                    std::env::consts::OS,
                    pdf.display()
                );
                Ok(PrintOutcome::Skipped)
            }
        }
    }
}

/// What happened to a print request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintOutcome {
    /// Handed to the OS print spooler
    Submitted,
    /// No print command exists for this platform
    Skipped,
}

/// Something that can turn a packing list into paper
///
/// The web handlers only see this trait, so tests can swap in a spooler
/// that records documents instead of printing them.
pub trait Spooler: Send + Sync {
    fn print_html(&self, html: &str) -> Result<PrintOutcome, PrintError>;
}

/// Converts HTML to PDF with wkhtmltopdf and hands it to a [`PrinterBackend`]
#[derive(Debug, Clone)]
pub struct PdfPrintSpooler {
    converter: OsString,
    backend: PrinterBackend,
    scratch_root: Option<PathBuf>,
}

impl PdfPrintSpooler {
    pub fn new(converter: impl Into<OsString>, backend: PrinterBackend) -> Self {
        Self {
            converter: converter.into(),
            backend,
            scratch_root: None,
        }
    }

    /// Create scratch directories under `root` instead of the system temp dir
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    pub fn backend(&self) -> PrinterBackend {
        self.backend
    }

    /// Render `html` into `dir/packing_list.pdf`
    fn convert(&self, html: &str, dir: &Path) -> Result<PathBuf, PrintError> {
        let source = dir.join("packing_list.html");
        let pdf = dir.join("packing_list.pdf");
        std::fs::write(&source, html).map_err(PrintError::TempFile)?;

        let mut command = Command::new(&self.converter);
        command.arg("--quiet");
        for (flag, value) in PAGE_OPTIONS {
            command.arg(flag).arg(value);
        }
        command.arg(&source).arg(&pdf);

        run(&mut command, &self.converter.to_string_lossy())?;
        Ok(pdf)
    }
}

impl Spooler for PdfPrintSpooler {
    fn print_html(&self, html: &str) -> Result<PrintOutcome, PrintError> {
        // Dropping the TempDir removes the HTML and PDF on every return path
        let dir = match &self.scratch_root {
            Some(root) => TempDir::new_in(root),
            None => TempDir::new(),
        }
        .map_err(PrintError::TempFile)?;
        let pdf = self.convert(html, dir.path())?;
        let outcome = self.backend.dispatch(&pdf)?;
        log::info!("packing list print {:?} via {:?}", outcome, self.backend);
        Ok(outcome)
    }
}

fn run(command: &mut Command, program: &str) -> Result<(), PrintError> {
    log::debug!("running {:?}", command);
    let output = command.output().map_err(|source| PrintError::Spawn {
        program: program.to_string(),
        source,
    })?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            log::error!("{}: {}", program, stderr.trim());
        }
        Err(PrintError::CommandFailed {
            program: program.to_string(),
            status: output.status.to_string(),
        })
    }
}
