//! Confkit - YAML configuration by dotted key path, and channel logging
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): configuration values, logging settings, errors
//! - **Infrastructure Layer** (`infrastructure`): config loading and access,
//!   channel loggers with file rotation
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use confkit::{LogConfigLoader, LoggerRegistry, SharedConfig};
//!
//! let config = SharedConfig::new();
//! let store = config.load("config.yaml")?;
//! let port = store.get_int("server.port");
//!
//! let registry = LoggerRegistry::new(LogConfigLoader::from_store(store)?);
//! registry.channel("server", &["http"])?.info(format!("listening on {port}"));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::errors::{ConfigError, LogError};
pub use domain::models::{
    ConfigNode, ConfigValue, LogConfig, LogFormat, LogLevel, LogOverrides,
};
pub use infrastructure::config::{ConfigStore, LogConfigLoader, SharedConfig};
pub use infrastructure::logging::{ChannelLogger, LoggerRegistry};
