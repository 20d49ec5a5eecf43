//! Domain layer: configuration values, logging settings and errors.

pub mod errors;
pub mod models;

pub use errors::{ConfigError, LogError};
