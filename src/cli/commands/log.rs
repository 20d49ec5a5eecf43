//! Implementation of the `confkit log` command.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::LogLevel;
use crate::infrastructure::config::{LogConfigLoader, SharedConfig};
use crate::infrastructure::logging::{LoggerRegistry, DEFAULT_CHANNEL};

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Message to record
    pub message: String,

    /// Channel to write to
    #[arg(long, default_value = DEFAULT_CHANNEL)]
    pub channel: String,

    /// Subdirectory under the log directory (repeatable)
    #[arg(long = "subdir")]
    pub subdirs: Vec<String>,

    /// Record level
    #[arg(short, long, value_enum, default_value_t = LevelArg::Info)]
    pub level: LevelArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LevelArg> for LogLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Trace => Self::Trace,
            LevelArg::Debug => Self::Debug,
            LevelArg::Info => Self::Info,
            LevelArg::Warn => Self::Warn,
            LevelArg::Error => Self::Error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogOutput {
    pub success: bool,
    pub channel: String,
    pub level: LogLevel,
    pub path: PathBuf,
}

impl CommandOutput for LogOutput {
    fn to_human(&self) -> String {
        format!(
            "Wrote {} record to channel '{}' ({})",
            self.level.as_str(),
            self.channel,
            self.path.display()
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: LogArgs, config: &SharedConfig, json_mode: bool) -> Result<()> {
    let store = config.store()?;
    let log_config = LogConfigLoader::from_store(store)?;
    let registry = LoggerRegistry::new(log_config);

    let logger = registry
        .channel(&args.channel, args.subdirs.as_slice())
        .with_context(|| format!("failed to open log channel '{}'", args.channel))?;

    let level = LogLevel::from(args.level);
    logger.log(level, &args.message);

    let output_data = LogOutput {
        success: true,
        channel: logger.channel().to_string(),
        level,
        path: logger.path().to_path_buf(),
    };
    output(&output_data, json_mode);
    Ok(())
}
