use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::path::{Path, PathBuf};
use tracing::Dispatch;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

use super::rotation::{RotatingFile, RotatingWriter, RotationPolicy};
use crate::domain::errors::LogError;
use crate::domain::models::{LogConfig, LogFormat, LogLevel};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logger bound to one channel file.
///
/// Every record is written and flushed before the call returns. The handle
/// owns its own tracing dispatcher, so channels never interfere with each
/// other or with a global subscriber.
pub struct ChannelLogger {
    channel: String,
    path: PathBuf,
    trace_enable: bool,
    console_print: bool,
    writer: RotatingWriter,
    dispatch: Dispatch,
}

impl ChannelLogger {
    /// Open `path` and build the channel's subscriber from `config`.
    pub fn open(
        channel: impl Into<String>,
        path: impl Into<PathBuf>,
        config: &LogConfig,
    ) -> Result<Self, LogError> {
        let channel = channel.into();
        let path = path.into();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| LogError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let policy = RotationPolicy {
            max_size: config.max_size_bytes(),
            max_backups: config.max_backups,
            max_age_days: config.max_age,
            compress: config.compress,
        };
        let file = RotatingFile::open(&path, policy).map_err(|source| LogError::Open {
            path: path.clone(),
            source,
        })?;
        let writer = RotatingWriter::new(file);

        let level = LevelFilter::from_level(config.level.as_tracing());
        let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);

        // File layer
        layers.push(match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer.clone())
                .with_current_span(false)
                .with_span_list(false)
                .with_target(false)
                .with_filter(level)
                .boxed(),
            LogFormat::Text => tracing_subscriber::fmt::layer()
                .with_writer(writer.clone())
                .with_ansi(false)
                .with_target(false)
                .with_filter(level)
                .boxed(),
        });

        // Console mirror
        if config.console_print {
            layers.push(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stdout)
                    .with_target(false)
                    .with_filter(level)
                    .boxed(),
            );
        }

        let dispatch = Dispatch::new(tracing_subscriber::registry().with(layers));

        Ok(Self {
            channel,
            path,
            trace_enable: config.trace_enable,
            console_print: config.console_print,
            writer,
            dispatch,
        })
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// File the channel writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[track_caller]
    pub fn trace(&self, msg: impl fmt::Display) -> &Self {
        self.log(LogLevel::Trace, msg)
    }

    #[track_caller]
    pub fn debug(&self, msg: impl fmt::Display) -> &Self {
        self.log(LogLevel::Debug, msg)
    }

    #[track_caller]
    pub fn info(&self, msg: impl fmt::Display) -> &Self {
        self.log(LogLevel::Info, msg)
    }

    #[track_caller]
    pub fn warn(&self, msg: impl fmt::Display) -> &Self {
        self.log(LogLevel::Warn, msg)
    }

    #[track_caller]
    pub fn error(&self, msg: impl fmt::Display) -> &Self {
        self.log(LogLevel::Error, msg)
    }

    /// Write one record at `level` and flush.
    #[track_caller]
    pub fn log(&self, level: LogLevel, msg: impl fmt::Display) -> &Self {
        let location = Location::caller();
        let caller = self
            .trace_enable
            .then_some(tracing::field::display(location));

        self.in_scope(|| match level {
            LogLevel::Trace => tracing::trace!(caller, "{msg}"),
            LogLevel::Debug => tracing::debug!(caller, "{msg}"),
            LogLevel::Info => tracing::info!(caller, "{msg}"),
            LogLevel::Warn => tracing::warn!(caller, "{msg}"),
            LogLevel::Error => tracing::error!(caller, "{msg}"),
        });
        self
    }

    /// Run `f` with this channel as the current subscriber, then flush.
    ///
    /// Any `tracing` event emitted inside `f` lands in the channel file,
    /// structured fields included.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        let result = tracing::dispatcher::with_default(&self.dispatch, f);
        self.flush();
        result
    }

    /// Flush the file and, when mirrored, stdout.
    pub fn flush(&self) {
        let mut writer = self.writer.clone();
        let _ = writer.flush();
        if self.console_print {
            let _ = io::stdout().flush();
        }
    }
}

impl fmt::Debug for ChannelLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelLogger")
            .field("channel", &self.channel)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
