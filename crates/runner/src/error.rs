//! Script execution errors

use std::time::Duration;
use thiserror::Error;

/// Ways an external script run can fail
#[derive(Debug, Error)]
pub enum TaskError {
    /// The program could not be started (missing, not executable, bad cwd)
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The child started but waiting on it failed
    #[error("failed to wait for `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The child exited unsuccessfully
    #[error("command `{command}` returned non-zero exit status {}", describe_code(.code))]
    ExitStatus { command: String, code: Option<i32> },

    /// The child ran past its time limit and was killed
    #[error("command `{command}` timed out after {}s", .after.as_secs_f64())]
    TimedOut { command: String, after: Duration },

    /// The task driving the run panicked or was cancelled
    #[error("run of `{command}` ended abnormally: {reason}")]
    Interrupted { command: String, reason: String },
}

impl TaskError {
    /// Rendered command line of the failed run
    pub fn command(&self) -> &str {
        match self {
            TaskError::Spawn { command, .. }
            | TaskError::Wait { command, .. }
            | TaskError::ExitStatus { command, .. }
            | TaskError::TimedOut { command, .. }
            | TaskError::Interrupted { command, .. } => command,
        }
    }

    /// Exit code, when the child exited on its own
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            TaskError::ExitStatus { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "(terminated by signal)".to_string(),
    }
}
