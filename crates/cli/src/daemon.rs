//! Daemon lifecycle: file watcher + HTTP server

use crate::config::Config;
use crate::http::{self, AppState};
use anyhow::{Context, Result};
use runner::JobRunner;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{info, warn};
use watcher::{ChangeWatcher, DebounceGuard, Trigger, WatchSet};

/// Forward accepted triggers to the generation job
///
/// Returns once the watcher side of the channel is gone.
pub async fn dispatch(mut triggers: mpsc::UnboundedReceiver<Trigger>, job: Arc<JobRunner>) {
    while let Some(trigger) = triggers.recv().await {
        println!(
            "🔄 Se detectó un cambio en {}. Generando HTML...",
            trigger.path.display()
        );
        job.schedule();
    }
}

/// Start watching the configured files
///
/// Fails if any watched file's directory does not exist.
pub fn start_watcher(config: &Config, job: Arc<JobRunner>) -> Result<ChangeWatcher> {
    let targets = WatchSet::from_paths(&config.watch.files).context("Invalid watch.files")?;
    let guard = Arc::new(DebounceGuard::new(config.watch.cooldown()));

    let (change_watcher, triggers) =
        ChangeWatcher::start(targets, guard).context("Failed to start file watcher")?;
    tokio::spawn(dispatch(triggers, job));

    Ok(change_watcher)
}

/// Run the daemon in the foreground until Ctrl-C
pub async fn start(config: &Config, watch: bool) -> Result<()> {
    if let Some(dir) = &config.server.site_dir {
        if !dir.is_dir() {
            anyhow::bail!("Site directory not found: {}", dir.display());
        }
        info!("Serving site from {}", dir.display());
    }

    let state = AppState::from_config(config);

    let change_watcher = if watch {
        Some(start_watcher(config, state.jobs.generate.clone())?)
    } else {
        info!("File watching disabled");
        None
    };

    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!("🚀 Servidor corriendo en http://{}", addr);
    info!("Listening on http://{}", addr);

    http::serve(listener, http::build_router(state), shutdown_signal()).await?;

    if let Some(change_watcher) = change_watcher {
        change_watcher.stop()?;
    }
    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
    }
}
