use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bytes per megabyte, the unit of [`LogConfig::max_size`].
pub const MEGABYTE: u64 = 1024 * 1024;

/// Settings shared by every channel logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LogConfig {
    /// Minimum level written by channel loggers
    #[serde(default = "default_level")]
    pub level: LogLevel,

    /// Record format for log files (text, json)
    #[serde(default)]
    pub format: LogFormat,

    /// Base directory for channel log files
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Mirror every record to stdout
    #[serde(default = "default_true")]
    pub console_print: bool,

    /// Attach the call site to every record
    #[serde(default = "default_true")]
    pub trace_enable: bool,

    /// Rotate once a file would exceed this many megabytes (0 = never)
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    /// Rotated files to keep (0 = keep all)
    #[serde(default = "default_max_backups")]
    pub max_backups: usize,

    /// Days to keep rotated files (0 = no age limit)
    #[serde(default)]
    pub max_age: u32,

    /// Gzip rotated files
    #[serde(default)]
    pub compress: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            log_path: default_log_path(),
            console_print: true,
            trace_enable: true,
            max_size: default_max_size(),
            max_backups: default_max_backups(),
            max_age: 0,
            compress: false,
        }
    }
}

impl LogConfig {
    /// Applies `overrides` on top of `self`.
    ///
    /// Absent fields, zero numbers and empty strings keep the current value.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &LogOverrides) -> Self {
        if let Some(level) = overrides.level.as_deref().filter(|l| !l.is_empty()) {
            self.level = LogLevel::parse_lenient(level);
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(path) = overrides
            .log_path
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
        {
            self.log_path.clone_from(path);
        }
        if let Some(console_print) = overrides.console_print {
            self.console_print = console_print;
        }
        if let Some(trace_enable) = overrides.trace_enable {
            self.trace_enable = trace_enable;
        }
        if let Some(max_size) = overrides.max_size.filter(|&n| n > 0) {
            self.max_size = max_size;
        }
        if let Some(max_backups) = overrides.max_backups.filter(|&n| n > 0) {
            self.max_backups = max_backups;
        }
        if let Some(max_age) = overrides.max_age.filter(|&n| n > 0) {
            self.max_age = max_age;
        }
        if let Some(compress) = overrides.compress {
            self.compress = compress;
        }
        self
    }

    /// Size threshold in bytes.
    pub const fn max_size_bytes(&self) -> u64 {
        self.max_size.saturating_mul(MEGABYTE)
    }
}

/// Partial [`LogConfig`], as found under the `logger` key of a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LogOverrides {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
    pub log_path: Option<PathBuf>,
    pub console_print: Option<bool>,
    pub trace_enable: Option<bool>,
    pub max_size: Option<u64>,
    pub max_backups: Option<usize>,
    pub max_age: Option<u32>,
    pub compress: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parses a level name, falling back to `Debug` for anything unknown.
    ///
    /// `panic`, `dpanic` and `fatal` have no tracing counterpart and map to
    /// `Error`.
    pub fn parse_lenient(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "trace" => Self::Trace,
            "info" => Self::Info,
            "warn" | "warning" => Self::Warn,
            "error" | "dpanic" | "panic" | "fatal" => Self::Error,
            _ => Self::Debug,
        }
    }

    /// Matching tracing level.
    pub const fn as_tracing(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }

    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

const fn default_level() -> LogLevel {
    LogLevel::Debug
}

fn default_log_path() -> PathBuf {
    PathBuf::from("./log")
}

const fn default_true() -> bool {
    true
}

const fn default_max_size() -> u64 {
    1024
}

const fn default_max_backups() -> usize {
    10
}
