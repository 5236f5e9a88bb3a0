//! Workflow integration tests
//!
//! Each module exercises one outer surface end to end against stub scripts.

pub mod http_routes;
pub mod one_shot;
pub mod watching;
