use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use super::channel::ChannelLogger;
use crate::domain::errors::LogError;
use crate::domain::models::{LogConfig, LogLevel};

/// Channel used when the caller passes an empty name.
pub const DEFAULT_CHANNEL: &str = "server";

/// Channel loggers keyed by `(channel, subdirectory)`.
///
/// Loggers are created on first use and kept for the registry's lifetime.
/// The map lock is held across lookup and construction, so every key is
/// built exactly once even under concurrent first access.
pub struct LoggerRegistry {
    config: LogConfig,
    channels: Mutex<HashMap<ChannelKey, Arc<ChannelLogger>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ChannelKey {
    channel: String,
    subdir: String,
}

impl ChannelKey {
    fn new<S: AsRef<str>>(name: &str, subdirs: &[S]) -> Self {
        let channel = match name.trim_matches('/') {
            "" => DEFAULT_CHANNEL,
            trimmed => trimmed,
        };
        let subdir = subdirs
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Self {
            channel: channel.to_string(),
            subdir,
        }
    }
}

impl LoggerRegistry {
    pub fn new(config: LogConfig) -> Self {
        Self {
            config,
            channels: Mutex::new(HashMap::new()),
        }
    }

    pub const fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Logger for `name`, optionally nested under `subdirs` of the base
    /// directory.
    pub fn channel<S: AsRef<str>>(
        &self,
        name: &str,
        subdirs: &[S],
    ) -> Result<Arc<ChannelLogger>, LogError> {
        let key = ChannelKey::new(name, subdirs);

        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(logger) = channels.get(&key) {
            return Ok(Arc::clone(logger));
        }

        let path = self.key_path(&key);
        let logger = Arc::new(ChannelLogger::open(&key.channel, &path, &self.config)?);
        debug!(channel = %key.channel, path = %path.display(), "created channel logger");

        channels.insert(key, Arc::clone(&logger));
        Ok(logger)
    }

    /// File a channel writes to: `<log_path>/<subdirs>/<channel>.log`.
    pub fn file_path<S: AsRef<str>>(&self, name: &str, subdirs: &[S]) -> PathBuf {
        self.key_path(&ChannelKey::new(name, subdirs))
    }

    fn key_path(&self, key: &ChannelKey) -> PathBuf {
        let mut path = self.config.log_path.clone();
        if !key.subdir.is_empty() {
            path.push(&key.subdir);
        }
        path.push(format!("{}.log", key.channel));
        path
    }

    /// Number of channels created so far.
    pub fn len(&self) -> usize {
        self.channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write `msg` to the channel named after `level`.
    #[track_caller]
    pub fn log(
        &self,
        level: LogLevel,
        msg: impl fmt::Display,
    ) -> Result<Arc<ChannelLogger>, LogError> {
        let logger = self.channel::<&str>(level.as_str(), &[])?;
        logger.log(level, msg);
        Ok(logger)
    }

    /// Write to the `info` channel.
    #[track_caller]
    pub fn info(&self, msg: impl fmt::Display) -> Result<Arc<ChannelLogger>, LogError> {
        self.log(LogLevel::Info, msg)
    }

    /// Write to the `debug` channel.
    #[track_caller]
    pub fn debug(&self, msg: impl fmt::Display) -> Result<Arc<ChannelLogger>, LogError> {
        self.log(LogLevel::Debug, msg)
    }

    /// Write to the `warn` channel.
    #[track_caller]
    pub fn warn(&self, msg: impl fmt::Display) -> Result<Arc<ChannelLogger>, LogError> {
        self.log(LogLevel::Warn, msg)
    }

    /// Write to the `error` channel.
    #[track_caller]
    pub fn error(&self, msg: impl fmt::Display) -> Result<Arc<ChannelLogger>, LogError> {
        self.log(LogLevel::Error, msg)
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("config", &self.config)
            .field("channels", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn registry(dir: &Path) -> LoggerRegistry {
        LoggerRegistry::new(LogConfig {
            log_path: dir.to_path_buf(),
            console_print: false,
            ..LogConfig::default()
        })
    }

    #[test]
    fn test_file_path_layout() {
        let registry = LoggerRegistry::new(LogConfig::default());
        let none: [&str; 0] = [];
        assert_eq!(
            registry.file_path("audit", &none),
            PathBuf::from("./log/audit.log")
        );
        assert_eq!(
            registry.file_path("/audit/", &["2024", "06"]),
            PathBuf::from("./log/2024/06/audit.log")
        );
        assert_eq!(
            registry.file_path("", &[" ", "jobs"]),
            PathBuf::from("./log/jobs/server.log")
        );
    }

    #[test]
    fn test_channel_is_cached() {
        let temp_dir = TempDir::new().unwrap();
        let registry = registry(temp_dir.path());

        let a = registry.channel("orders", &["eu"]).unwrap();
        let b = registry.channel("orders", &["eu"]).unwrap();
        let c = registry.channel::<&str>("orders", &[]).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(registry.len(), 2);
        assert_eq!(a.path(), temp_dir.path().join("eu").join("orders.log"));
    }

    #[test]
    fn test_level_conveniences_use_named_channels() {
        let temp_dir = TempDir::new().unwrap();
        let registry = registry(temp_dir.path());

        registry.info("hello").unwrap();
        registry.error("boom").unwrap();

        let info = std::fs::read_to_string(temp_dir.path().join("info.log")).unwrap();
        let error = std::fs::read_to_string(temp_dir.path().join("error.log")).unwrap();
        assert!(info.contains("hello"));
        assert!(error.contains("boom"));
        assert!(!info.contains("boom"));
    }

    #[test]
    fn test_channel_open_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let registry = registry(&blocker);
        let result = registry.channel::<&str>("app", &[]);
        assert!(matches!(result, Err(LogError::CreateDir { .. })));
        assert!(registry.is_empty());
    }
}
