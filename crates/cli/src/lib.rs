//! sheetwatch library surface shared by the binary and integration tests

pub mod config;
pub mod daemon;
pub mod http;
pub mod jobs;

pub use config::Config;
pub use jobs::Jobs;
