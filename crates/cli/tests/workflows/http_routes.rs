//! HTTP routes against stub scripts

use crate::common::{StubOutcome, TestSite};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use cli_lib::config::Config;
use cli_lib::http::{build_router, AppState, LIVENESS};
use tower::ServiceExt;

async fn get(site: &TestSite, uri: &str) -> (StatusCode, String) {
    get_with(&site.config(), uri).await
}

async fn get_with(config: &Config, uri: &str) -> (StatusCode, String) {
    let router = build_router(AppState::from_config(config));
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn liveness_does_not_run_anything() {
    let site = TestSite::new(StubOutcome::Succeed, StubOutcome::Succeed);

    let (status, body) = get(&site, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, LIVENESS);
    assert_eq!(site.runs("generate"), 0);
    assert_eq!(site.runs("initialize"), 0);
}

#[tokio::test]
async fn ejecutar_runs_generation_inline() {
    let site = TestSite::new(StubOutcome::Succeed, StubOutcome::Succeed);

    let (status, body) = get(&site, "/ejecutar").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "✅ Archivos HTML actualizados con éxito.");
    // The response is only sent after the script finished
    assert_eq!(site.runs("generate"), 1);
    assert_eq!(site.runs("initialize"), 0);
}

#[tokio::test]
async fn ejecutar_reports_failure_in_body() {
    let site = TestSite::new(StubOutcome::Fail(1), StubOutcome::Succeed);

    let (status, body) = get(&site, "/ejecutar").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("❌"));
    assert!(body.contains("generar.sh"));
    assert!(body.contains("exit status 1"));
}

#[tokio::test]
async fn inicializar_runs_initialization_inline() {
    let site = TestSite::new(StubOutcome::Fail(1), StubOutcome::Succeed);

    let (status, body) = get(&site, "/inicializar").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "✅ Proyecto inicializado correctamente respetando los días existentes."
    );
    assert_eq!(site.runs("initialize"), 1);
    assert_eq!(site.runs("generate"), 0);
}

#[tokio::test]
async fn inicializar_reports_failure_in_body() {
    let site = TestSite::new(StubOutcome::Succeed, StubOutcome::Fail(4));

    let (status, body) = get(&site, "/inicializar").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("❌ Error al inicializar el proyecto: "));
    assert!(body.contains("exit status 4"));
}

#[tokio::test]
async fn missing_script_is_reported_in_body() {
    let site = TestSite::new(StubOutcome::Succeed, StubOutcome::Succeed);
    std::fs::remove_file(site.root().join("generar.sh")).unwrap();

    let (status, body) = get(&site, "/ejecutar").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("❌ Error al generar HTML: failed to start"));
}

#[tokio::test]
async fn site_dir_serves_pages_next_to_the_routes() {
    let site = TestSite::new(StubOutcome::Succeed, StubOutcome::Succeed);
    std::fs::write(site.root().join("index.html"), "<h1>Proyectos</h1>").unwrap();
    let mut config = site.config();
    config.server.site_dir = Some(site.root().to_path_buf());

    let (status, body) = get_with(&config, "/index").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>Proyectos</h1>");

    let (status, body) = get_with(&config, "/ejecutar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "✅ Archivos HTML actualizados con éxito.");

    let (status, body) = get_with(&config, "/pilares/salud").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Archivo /pilares/salud no encontrado.");
}
