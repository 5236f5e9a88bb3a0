//! External script invocation

use crate::error::TaskError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// How to launch an external script
///
/// The child inherits stdout/stderr so the script's own output lands on the
/// same console as ours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCommand {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl ScriptCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            timeout: None,
        }
    }

    /// Append arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the child in `dir` instead of the current directory
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Kill the child if it runs longer than `limit` (None waits forever)
    pub fn timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.timeout
    }

    /// Spawn the script and wait for it to exit
    ///
    /// Dropping the returned future stops the wait but leaves the child
    /// running to completion. Only an expired time limit kills it.
    pub async fn run(&self) -> Result<(), TaskError> {
        let rendered = self.to_string();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!("Spawning `{}`", rendered);
        let mut child = cmd.spawn().map_err(|source| TaskError::Spawn {
            command: rendered.clone(),
            source,
        })?;

        let waited = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(waited) => waited,
                Err(_) => {
                    // Reap the child so it does not linger as a zombie
                    let _ = child.kill().await;
                    return Err(TaskError::TimedOut {
                        command: rendered,
                        after: limit,
                    });
                }
            },
            None => child.wait().await,
        };

        let status = waited.map_err(|source| TaskError::Wait {
            command: rendered.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(TaskError::ExitStatus {
                command: rendered,
                code: status.code(),
            })
        }
    }
}

impl fmt::Display for ScriptCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
