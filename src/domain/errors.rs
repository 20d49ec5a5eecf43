//! Domain errors for configuration access and channel logging.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or reading configuration.
///
/// Only [`ConfigError::Bind`] is recoverable. Every other variant means the
/// program is misconfigured and the embedding binary is expected to stop;
/// see [`ConfigError::is_fatal`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration loaded: the config file was not specified or does not exist")]
    NotLoaded,

    #[error("configuration already loaded")]
    AlreadyLoaded,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(String),

    #[error("failed to bind `{key}`: {source}")]
    Bind {
        key: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ConfigError {
    /// Whether the error should terminate the program.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Bind { .. })
    }
}

/// Errors raised while creating a channel logger.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
