//! Size-based log file rotation
//!
//! A [`RotatingFile`] appends to a single file. When a write would push the
//! file past its size limit, the file is renamed with a timestamp suffix and a
//! fresh one is opened in its place. Rotated files are then pruned by count
//! and age, and optionally gzipped.

use chrono::{DateTime, Duration, Local, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;
use tracing_subscriber::fmt::MakeWriter;

const BACKUP_TIME_FORMAT: &str = "%Y%m%d_%H%M%S_%6f";
const GZ_SUFFIX: &str = ".gz";

/// Limits applied to a [`RotatingFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Maximum file size in bytes before rotation (0 = unlimited)
    pub max_size: u64,
    /// Rotated files to keep (0 = keep all)
    pub max_backups: usize,
    /// Days to keep rotated files (0 = no age limit)
    pub max_age_days: u32,
    /// Gzip rotated files
    pub compress: bool,
}

/// Append-only file with size-based rotation.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    file: File,
    size: u64,
}

impl RotatingFile {
    /// Open `path` for appending, creating it if needed.
    ///
    /// The parent directory must already exist.
    pub fn open(path: impl Into<PathBuf>, policy: RotationPolicy) -> io::Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            path,
            policy,
            file,
            size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes in the current file.
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Rename the current file to a timestamped backup and start a new one.
    pub fn rotate(&mut self) -> io::Result<()> {
        self.rotate_with(open_append)
    }

    /// Rotation with a custom opener for the replacement file.
    ///
    /// If the replacement cannot be opened the backup is renamed back, so
    /// the current handle keeps writing to `path`.
    fn rotate_with(&mut self, reopen: impl FnOnce(&Path) -> io::Result<File>) -> io::Result<()> {
        self.file.flush()?;

        let backup = self.backup_path(Local::now());
        fs::rename(&self.path, &backup)?;
        let file = match reopen(&self.path) {
            Ok(file) => file,
            Err(e) => {
                if let Err(restore) = fs::rename(&backup, &self.path) {
                    warn!(
                        path = %self.path.display(),
                        error = %restore,
                        "failed to restore log file after reopen failure"
                    );
                }
                return Err(e);
            }
        };
        self.file = file;
        self.size = 0;

        if let Err(e) = self.prune() {
            warn!(path = %self.path.display(), error = %e, "failed to prune rotated log files");
        }
        Ok(())
    }

    /// Rotated files of this log, newest first.
    pub fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let Some(dir) = self.path.parent() else {
            return Ok(Vec::new());
        };
        let prefix = format!("{}.", self.file_name());

        let mut backups = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let is_backup = name
                .strip_prefix(&prefix)
                .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()));
            if is_backup {
                backups.push(path);
            }
        }

        // Timestamps sort lexicographically.
        backups.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(backups)
    }

    /// Apply the count, age and compression limits to existing backups.
    pub fn prune(&self) -> io::Result<()> {
        let mut backups = self.backups()?;

        if self.policy.max_backups > 0 && backups.len() > self.policy.max_backups {
            for stale in backups.split_off(self.policy.max_backups) {
                fs::remove_file(&stale)?;
            }
        }

        if self.policy.max_age_days > 0 {
            let cutoff = Utc::now() - Duration::days(i64::from(self.policy.max_age_days));
            let mut kept = Vec::with_capacity(backups.len());
            for backup in backups {
                let modified: DateTime<Utc> = fs::metadata(&backup)?.modified()?.into();
                if modified < cutoff {
                    fs::remove_file(&backup)?;
                } else {
                    kept.push(backup);
                }
            }
            backups = kept;
        }

        if self.policy.compress {
            for backup in backups
                .iter()
                .filter(|p| !p.to_string_lossy().ends_with(GZ_SUFFIX))
            {
                compress(backup)?;
            }
        }

        Ok(())
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn backup_path(&self, now: DateTime<Local>) -> PathBuf {
        let stamp = now.format(BACKUP_TIME_FORMAT);
        let base = self.path.with_file_name(format!("{}.{stamp}", self.file_name()));

        let mut candidate = base.clone();
        let mut n = 1;
        while candidate.exists() || gz_path(&candidate).exists() {
            candidate = PathBuf::from(format!("{}-{n}", base.display()));
            n += 1;
        }
        candidate
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len() as u64;
        if self.policy.max_size > 0 && self.size > 0 && self.size + len > self.policy.max_size {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.size += len;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn gz_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}{GZ_SUFFIX}", path.display()))
}

fn compress(path: &Path) -> io::Result<()> {
    let target = gz_path(path);
    let mut source = File::open(path)?;
    let mut encoder = GzEncoder::new(File::create(&target)?, Compression::default());
    io::copy(&mut source, &mut encoder)?;
    encoder.finish()?.sync_all()?;
    fs::remove_file(path)
}

/// Cloneable, thread-safe handle to a [`RotatingFile`], usable as a
/// `tracing-subscriber` writer.
#[derive(Debug, Clone)]
pub struct RotatingWriter {
    inner: Arc<Mutex<RotatingFile>>,
}

impl RotatingWriter {
    pub fn new(file: RotatingFile) -> Self {
        Self {
            inner: Arc::new(Mutex::new(file)),
        }
    }

    /// Run `f` with exclusive access to the underlying file.
    pub fn with_file<T>(&self, f: impl FnOnce(&mut RotatingFile) -> T) -> T {
        let mut file = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut file)
    }
}

impl Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(RotatingFile::flush)
    }
}

impl<'a> MakeWriter<'a> for RotatingWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
