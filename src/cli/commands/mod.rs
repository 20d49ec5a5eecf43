//! CLI command implementations.

pub mod get;
pub mod log;
