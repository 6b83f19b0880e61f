use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;
use crate::error::{AppError, PrintError};
use crate::names::SectionNames;
use crate::packing::{PackingList, Submission};
use crate::printer::Spooler;
use crate::render::Renderer;

pub const REPRINT_MESSAGE: &str = "This feature is currently not implemented.";

/// Everything a request needs; built once at startup and never mutated
pub struct AppState {
    pub catalog: Catalog,
    pub names: SectionNames,
    pub renderer: Renderer,
    pub spooler: Arc<dyn Spooler>,
    /// Answer 500 instead of "Success" when printing fails
    pub report_print_failures: bool,
}

/// Build the router
///
/// # Routes
/// * `GET /` - order form
/// * `POST /print` - print a packing list for the posted order
/// * `GET|POST /reprint` - placeholder
/// * `/static/*` - files under `static_dir`
pub fn router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(serve_form))
        .route("/print", post(print_form))
        .route("/reprint", get(reprint_form).post(reprint_form))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(state: Arc<AppState>, addr: SocketAddr, static_dir: &Path) -> std::io::Result<()> {
    let app = router(state, static_dir);

    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}

async fn serve_form(State(state): State<Arc<AppState>>) -> Response {
    match state.renderer.render_form(&state.catalog, &state.names) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            log::error!("order form could not be rendered: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Receive the grocery list, prepare a packing list, and print it
///
/// The response waits until printing has been attempted.
async fn print_form(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<&'static str, AppError> {
    let submission = Submission::from_pairs(fields, &state.names)?;
    let list = PackingList::new(
        submission,
        &state.catalog,
        chrono::Local::now().naive_local(),
    );
    let html = state.renderer.render_packing_list(&list)?;

    log::info!(
        "printing packing list for family size {} with {} sections",
        list.family_size,
        list.sections.len()
    );

    let spooler = Arc::clone(&state.spooler);
    let printed = tokio::task::spawn_blocking(move || spooler.print_html(&html))
        .await
        .unwrap_or_else(|e| Err(PrintError::Aborted(e.to_string())));

    if let Err(e) = printed {
        log::error!("packing list was not printed: {}", e);
        if state.report_print_failures {
            return Err(e.into());
        }
    }

    Ok("Success")
}

async fn reprint_form() -> &'static str {
    REPRINT_MESSAGE
}
