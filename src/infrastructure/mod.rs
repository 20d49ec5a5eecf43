//! Infrastructure layer module
//!
//! - Configuration loading and dotted-path access
//! - Channel logging with file rotation

pub mod config;
pub mod logging;
