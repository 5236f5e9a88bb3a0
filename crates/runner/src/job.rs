//! Named jobs with serialized runs and coalesced background scheduling

use crate::command::ScriptCommand;
use crate::error::TaskError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Status texts printed after each run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobMessages {
    /// Shown when the script exits successfully
    pub success: String,
    /// Prefix of the line shown when the script fails
    pub failure: String,
}

impl JobMessages {
    pub fn new(success: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            success: success.into(),
            failure: failure.into(),
        }
    }

    pub fn success_line(&self) -> String {
        format!("✅ {}", self.success)
    }

    pub fn failure_line(&self, err: &TaskError) -> String {
        format!("❌ {}: {}", self.failure, err)
    }
}

/// An external script that can be run on demand or scheduled in the background
///
/// Runs of the same job never overlap: `run` waits for any in-progress run to
/// finish first. `schedule` keeps at most one run queued behind the current
/// one, so a burst of requests collapses into a single extra run.
pub struct JobRunner {
    name: String,
    command: ScriptCommand,
    messages: JobMessages,
    lock: Mutex<()>,
    queued: AtomicBool,
}

impl JobRunner {
    pub fn new(name: impl Into<String>, command: ScriptCommand, messages: JobMessages) -> Self {
        Self {
            name: name.into(),
            command,
            messages,
            lock: Mutex::new(()),
            queued: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &ScriptCommand {
        &self.command
    }

    pub fn messages(&self) -> &JobMessages {
        &self.messages
    }

    /// Whether a scheduled run is waiting to start
    pub fn is_queued(&self) -> bool {
        self.queued.load(Ordering::Acquire)
    }

    /// Run the job now and report the outcome
    pub async fn run(&self) -> Result<(), TaskError> {
        let _running = self.lock.lock().await;
        self.execute().await
    }

    /// Run the job on its own task and wait for the outcome
    ///
    /// The run keeps going if the caller stops waiting, so a dropped request
    /// never leaves a half-finished script behind.
    pub async fn run_detached(self: &Arc<Self>) -> Result<(), TaskError> {
        let job = Arc::clone(self);
        tokio::spawn(async move { job.run().await })
            .await
            .unwrap_or_else(|e| {
                Err(TaskError::Interrupted {
                    command: self.command.to_string(),
                    reason: e.to_string(),
                })
            })
    }

    /// Run the job on a background task without waiting for it
    ///
    /// Returns `None` when a run is already queued; the queued run will pick
    /// up the latest state of the inputs anyway. Failures are reported on the
    /// console and otherwise dropped.
    pub fn schedule(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if self.queued.swap(true, Ordering::AcqRel) {
            debug!("{} job already queued, coalescing", self.name);
            return None;
        }

        let job = Arc::clone(self);
        Some(tokio::spawn(async move {
            let _running = job.lock.lock().await;
            job.queued.store(false, Ordering::Release);
            let _ = job.execute().await;
        }))
    }

    async fn execute(&self) -> Result<(), TaskError> {
        info!("Running {} job: {}", self.name, self.command);
        debug!(
            cwd = ?self.command.current_dir(),
            timeout = ?self.command.time_limit(),
            "{} job settings",
            self.name
        );

        let result = self.command.run().await;
        match &result {
            Ok(()) => {
                println!("{}", self.messages.success_line());
                info!("{} job finished", self.name);
            }
            Err(e) => {
                println!("{}", self.messages.failure_line(e));
                warn!(command = e.command(), "{} job failed: {}", self.name, e);
            }
        }
        result
    }
}
