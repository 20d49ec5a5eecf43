//! Domain models

pub mod log_config;
pub mod value;

pub use log_config::{LogConfig, LogFormat, LogLevel, LogOverrides, MEGABYTE};
pub use value::{ConfigNode, ConfigValue};
