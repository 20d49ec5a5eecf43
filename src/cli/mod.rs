//! Command-line interface.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::errors::ConfigError;

/// Config file used when `-c` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Exit status for fatal configuration errors.
pub const FATAL_EXIT_CODE: i32 = -1;

#[derive(Parser, Debug)]
#[command(name = "confkit")]
#[command(about = "Query YAML configuration by dotted key path and write channel logs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short = 'c', long = "config", global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a value by dotted key path
    Get(commands::get::GetArgs),

    /// Write a record to a log channel
    Log(commands::log::LogArgs),
}

/// Report a fatal configuration error and terminate.
pub fn fatal(err: &ConfigError) -> ! {
    eprintln!("\nconfiguration error:\n  {err}\n");
    std::process::exit(FATAL_EXIT_CODE);
}

/// Report a command failure and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if let Some(config_err) = err.downcast_ref::<ConfigError>() {
        if config_err.is_fatal() {
            fatal(config_err);
        }
    }

    if json_mode {
        let body = serde_json::json!({ "success": false, "error": format!("{err:#}") });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
