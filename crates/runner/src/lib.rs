//! External script runner for sheetwatch
//!
//! This crate provides:
//! - `ScriptCommand`: spawn a script, wait for it, map its exit to a result
//! - `JobRunner`: a named script with serialized runs and coalesced
//!   background scheduling
//! - `TaskError`: what went wrong when a script did not succeed

pub mod command;
pub mod error;
pub mod job;

// Re-exports
pub use command::ScriptCommand;
pub use error::TaskError;
pub use job::{JobMessages, JobRunner};
