use clap::Parser;
use pantry::app::{self, AppState};
use pantry::catalog::{ensure_catalog, load_catalog, Catalog};
use pantry::config::{PrinterChoice, Settings};
use pantry::names::SectionNames;
use pantry::network::discover_local_address;
use pantry::printer::{PdfPrintSpooler, PrinterBackend};
use pantry::render::Renderer;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::parse();
    let catalog_path = settings.catalog_path()?;

    // The catalog and section table are checked before anything is served
    ensure_catalog(&catalog_path, &Catalog::bundled()?)?;
    let catalog = load_catalog(&catalog_path)?;

    let names = match &settings.sections_path {
        Some(path) => SectionNames::from_file(path)?,
        None => SectionNames::bundled()?,
    };
    names.validate(&catalog)?;

    let backend = match settings.printer {
        PrinterChoice::Auto => PrinterBackend::detect(),
        PrinterChoice::Lp => PrinterBackend::Lp,
        PrinterChoice::PdfToPrinter => PrinterBackend::PdfToPrinter,
        PrinterChoice::Disabled => PrinterBackend::Unsupported,
    };
    let spooler = PdfPrintSpooler::new(&settings.wkhtmltopdf, backend);
    log::info!("printing with {:?}", spooler.backend());

    let state = Arc::new(AppState {
        catalog,
        names,
        renderer: Renderer::new()?,
        spooler: Arc::new(spooler),
        report_print_failures: settings.report_print_failures,
    });

    let host = settings.host.unwrap_or_else(discover_local_address);
    app::run(state, SocketAddr::new(host, settings.port), &settings.static_dir).await?;

    Ok(())
}
