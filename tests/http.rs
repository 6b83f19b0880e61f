use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use pantry::app::{router, AppState, REPRINT_MESSAGE};
use pantry::catalog::{Catalog, CatalogEntry};
use pantry::names::SectionNames;
use pantry::printer::{PrintOutcome, Spooler};
use pantry::render::Renderer;
use pantry::PrintError;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

/// Keeps every packing list instead of printing it
#[derive(Default)]
struct RecordingSpooler {
    printed: Mutex<Vec<String>>,
}

impl Spooler for RecordingSpooler {
    fn print_html(&self, html: &str) -> Result<PrintOutcome, PrintError> {
        self.printed.lock().unwrap().push(html.to_string());
        Ok(PrintOutcome::Submitted)
    }
}

struct JammedSpooler;

impl Spooler for JammedSpooler {
    fn print_html(&self, _html: &str) -> Result<PrintOutcome, PrintError> {
        Err(PrintError::CommandFailed {
            program: "lp".into(),
            status: "exit status: 1".into(),
        })
    }
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        CatalogEntry {
            section: "Fresh Food".into(),
            items: vec!["Apples".into(), "Bananas".into()],
        },
        CatalogEntry {
            section: "Canned Soup".into(),
            items: vec!["Tomato Soup".into()],
        },
    ])
}

fn app_with(spooler: Arc<dyn Spooler>, report_print_failures: bool, static_dir: &TempDir) -> Router {
    let state = AppState {
        catalog: catalog(),
        names: SectionNames::bundled().unwrap(),
        renderer: Renderer::new().unwrap(),
        spooler,
        report_print_failures,
    };
    router(Arc::new(state), static_dir.path())
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn order_form_lists_catalog() {
    let dir = TempDir::new().unwrap();
    let app = app_with(Arc::new(RecordingSpooler::default()), false, &dir);

    let (status, body) = send(app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Fresh Food"));
    assert!(body.contains(r#"name="fresh-food" value="Apples""#));
    assert!(body.contains(r#"name="canned-soup" value="Tomato Soup""#));
    assert!(body.contains(r#"value="2-4: Blue""#));
}

#[tokio::test]
async fn print_returns_success_and_prints_list() {
    let dir = TempDir::new().unwrap();
    let spooler = Arc::new(RecordingSpooler::default());
    let app = app_with(spooler.clone(), false, &dir);

    let (status, body) = send(
        app,
        post_form(
            "/print",
            "family_size=1%3A+Yellow&fresh-food=Apples&fresh-food=Bananas",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Success");

    let printed = spooler.printed.lock().unwrap();
    assert_eq!(printed.len(), 1);
    assert!(printed[0].contains("#ffff00"));
    assert!(printed[0].contains("Fresh Food"));
    assert!(printed[0].contains("Apples, Bananas"));
    assert!(!printed[0].contains("Canned Soup"));
}

#[tokio::test]
async fn unknown_family_size_is_a_client_error() {
    let dir = TempDir::new().unwrap();
    let spooler = Arc::new(RecordingSpooler::default());
    let app = app_with(spooler.clone(), false, &dir);

    let (status, body) = send(app, post_form("/print", "family_size=unknown&fresh-food=Apples")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("unknown"));
    assert!(spooler.printed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_family_size_is_a_client_error() {
    let dir = TempDir::new().unwrap();
    let app = app_with(Arc::new(RecordingSpooler::default()), false, &dir);

    let (status, _) = send(app, post_form("/print", "fresh-food=Apples")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_section_is_a_client_error() {
    let dir = TempDir::new().unwrap();
    let app = app_with(Arc::new(RecordingSpooler::default()), false, &dir);

    let (status, body) = send(app, post_form("/print", "family_size=5%2B%3A+Pink&pet-food=Kibble")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("pet-food"));
}

#[tokio::test]
async fn print_failures_are_swallowed_by_default() {
    let dir = TempDir::new().unwrap();
    let app = app_with(Arc::new(JammedSpooler), false, &dir);

    let (status, body) = send(app, post_form("/print", "family_size=2-4%3A+Blue")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Success");
}

#[tokio::test]
async fn print_failures_can_be_reported() {
    let dir = TempDir::new().unwrap();
    let app = app_with(Arc::new(JammedSpooler), true, &dir);

    let (status, body) = send(app, post_form("/print", "family_size=2-4%3A+Blue")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("printing failed"));
}

#[tokio::test]
async fn reprint_is_not_implemented() {
    let dir = TempDir::new().unwrap();
    let app = app_with(Arc::new(RecordingSpooler::default()), false, &dir);

    let (status, body) = send(app.clone(), get("/reprint")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "This feature is currently not implemented.");

    let (status, body) = send(app, post_form("/reprint", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, REPRINT_MESSAGE);
}

#[tokio::test]
async fn static_files_are_served() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("style.css"), "body { margin: 0; }").unwrap();
    let app = app_with(Arc::new(RecordingSpooler::default()), false, &dir);

    let (status, body) = send(app, get("/static/style.css")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "body { margin: 0; }");
}
