//! File system watching for sheetwatch
//!
//! This crate provides:
//! - Directory-scoped, non-recursive watching of individual files
//! - A cool-down guard that collapses bursts of modify events
//! - A channel of accepted triggers for the dispatcher to act on

pub mod debounce;
pub mod target;

pub use debounce::{DebounceGuard, DEFAULT_COOLDOWN};
pub use target::{WatchSet, WatchTarget};

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// An accepted change to a watched file
#[derive(Debug, Clone)]
pub struct Trigger {
    /// Watched file that changed
    pub path: PathBuf,
    /// When the change was accepted
    pub at: Instant,
}

/// Turns raw notify events into debounced triggers
pub struct TriggerFilter {
    targets: WatchSet,
    guard: Arc<DebounceGuard>,
}

impl TriggerFilter {
    pub fn new(targets: WatchSet, guard: Arc<DebounceGuard>) -> Self {
        Self { targets, guard }
    }

    /// Only modifications count (content, metadata, rename into place)
    pub fn is_qualifying(kind: &EventKind) -> bool {
        matches!(kind, EventKind::Modify(_))
    }

    /// Filter one event at the current time
    pub fn handle(&self, event: &Event) -> Option<Trigger> {
        self.handle_at(event, Instant::now())
    }

    /// Filter one event observed at `now`
    ///
    /// The guard is consulted only for events on watched files, so noise in
    /// the same directory never consumes the cool-down window.
    pub fn handle_at(&self, event: &Event, now: Instant) -> Option<Trigger> {
        if !Self::is_qualifying(&event.kind) {
            return None;
        }

        let path = event.paths.iter().find(|p| self.targets.matches(p))?;

        if !self.guard.should_trigger(now) {
            debug!("Change to {} within cool-down, skipping", path.display());
            return None;
        }

        Some(Trigger {
            path: path.clone(),
            at: now,
        })
    }
}

/// Running file system watcher
///
/// Dropping the watcher stops event delivery and closes the trigger channel.
pub struct ChangeWatcher {
    watcher: RecommendedWatcher,
    dirs: Vec<PathBuf>,
}

// The backend watcher is not `Debug` on every platform
impl std::fmt::Debug for ChangeWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeWatcher")
            .field("dirs", &self.dirs)
            .finish_non_exhaustive()
    }
}

impl ChangeWatcher {
    /// Start watching every parent directory in `targets`
    ///
    /// Accepted triggers are delivered on the returned channel. Events are
    /// filtered on the notify thread, so the receiver only sees changes that
    /// passed the guard.
    pub fn start(
        targets: WatchSet,
        guard: Arc<DebounceGuard>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Trigger>)> {
        if targets.is_empty() {
            anyhow::bail!("No files to watch");
        }

        let dirs: Vec<PathBuf> = targets
            .directories()
            .into_iter()
            .map(Path::to_path_buf)
            .collect();

        let (tx, rx) = mpsc::unbounded_channel();
        let filter = TriggerFilter::new(targets, guard);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    if let Some(trigger) = filter.handle(&event) {
                        info!("Detected change in {}", trigger.path.display());
                        if tx.send(trigger).is_err() {
                            debug!("Trigger receiver closed, dropping change");
                        }
                    }
                }
                Err(e) => warn!("File watch error: {}", e),
            }
        })
        .context("Failed to create filesystem watcher")?;

        for dir in &dirs {
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .with_context(|| format!("Failed to watch directory: {}", dir.display()))?;
            info!("Watching {}", dir.display());
        }

        Ok((Self { watcher, dirs }, rx))
    }

    /// Directories currently registered with the OS watcher
    pub fn directories(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Unregister every directory and drop the watcher
    pub fn stop(mut self) -> Result<()> {
        for dir in &self.dirs {
            self.watcher
                .unwatch(dir)
                .with_context(|| format!("Failed to unwatch directory: {}", dir.display()))?;
        }
        info!("File watcher stopped");
        Ok(())
    }
}
