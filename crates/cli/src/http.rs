//! HTTP front door
//!
//! Routes:
//! - `GET /`            liveness (plain text)
//! - `GET /ejecutar`    run the generation job and report the outcome
//! - `GET /inicializar` run the initialization job and report the outcome
//! - `GET /api/test`    JSON status report
//!
//! Job failures are reported in the body with status 200. When
//! `server.site_dir` is set, every other path is served from that directory.

use crate::config::Config;
use crate::jobs::Jobs;
use anyhow::{Context, Result};
use axum::{
    extract::{Request, State},
    handler::HandlerWithoutStateExt,
    http::{header, HeaderValue, StatusCode, Uri},
    middleware,
    response::Response,
    routing::get,
    Json, Router,
};
use runner::JobRunner;
use serde::Serialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{debug, info};

/// Body returned by `GET /`
pub const LIVENESS: &str = "🚀 Servidor en ejecución.";

/// `Cache-Control` sent with site assets (pages are regenerated, so they get none)
pub const ASSET_CACHE_CONTROL: &str = "public, max-age=86400";

/// Router state
#[derive(Clone)]
pub struct AppState {
    pub jobs: Jobs,
    /// Port reported by `GET /api/test`
    pub port: u16,
    pub site_dir: Option<PathBuf>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            jobs: Jobs::from_config(config),
            port: config.server.port,
            site_dir: config.server.site_dir.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ServerStatus {
    #[serde(rename = "mensaje")]
    message: &'static str,
    timestamp: String,
    port: u16,
    status: &'static str,
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(home))
        .route("/ejecutar", get(generate))
        .route("/inicializar", get(initialize))
        .route("/api/test", get(status));

    let router = match &state.site_dir {
        Some(root) => {
            let files = ServeDir::new(root)
                .append_index_html_on_directories(true)
                .not_found_service(missing_page.into_service());
            let site = ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    asset_cache_control,
                ))
                .layer(middleware::map_request_with_state(
                    Arc::new(root.clone()),
                    resolve_page,
                ))
                .service(files);
            router.fallback_service(site)
        }
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Serve `router` on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")
}

async fn home() -> &'static str {
    LIVENESS
}

async fn generate(State(state): State<AppState>) -> String {
    run_job(&state.jobs.generate).await
}

async fn initialize(State(state): State<AppState>) -> String {
    run_job(&state.jobs.initialize).await
}

async fn status(State(state): State<AppState>) -> Json<ServerStatus> {
    Json(ServerStatus {
        message: "Servidor funcionando correctamente",
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        port: state.port,
        status: "OK",
    })
}

// Detached so a client hanging up mid-request cannot cut the script short
async fn run_job(job: &Arc<JobRunner>) -> String {
    info!("Manual {} requested: {}", job.name(), job.command());
    match job.run_detached().await {
        Ok(()) => job.messages().success_line(),
        Err(e) => job.messages().failure_line(&e),
    }
}

async fn missing_page(uri: Uri) -> (StatusCode, String) {
    debug!("No site file for {}", uri.path());
    (
        StatusCode::NOT_FOUND,
        format!("Archivo {} no encontrado.", uri.path()),
    )
}

/// Map an extension-less path like `/reporte` to `/reporte.html` when that page exists
async fn resolve_page(State(root): State<Arc<PathBuf>>, request: Request) -> Request {
    let path = request.uri().path().trim_matches('/').to_string();
    if path.is_empty()
        || path.split('/').any(|segment| segment == "..")
        || Path::new(&path).extension().is_some()
    {
        return request;
    }

    let page = format!("{}.html", path);
    let exists = tokio::fs::metadata(root.join(&page))
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !exists {
        return request;
    }

    let (mut parts, body) = request.into_parts();
    if let Ok(uri) = format!("/{}", page).parse::<Uri>() {
        debug!("Serving {} for /{}", page, path);
        parts.uri = uri;
    }
    Request::from_parts(parts, body)
}

fn asset_cache_control(response: &Response) -> Option<HeaderValue> {
    let is_page = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"));

    (response.status().is_success() && !is_page)
        .then(|| HeaderValue::from_static(ASSET_CACHE_CONTROL))
}
