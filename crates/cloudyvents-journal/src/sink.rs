use crate::errors::JournalError;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;

/// Target used for lines forwarded through [`TracingSink`].
pub const TRACING_TARGET: &str = "cloudyvents";

/// Destination for complete log lines.
///
/// Implementations append `line` as one line of an append-only,
/// line-buffered log. A marker written through a sink may end up with
/// arbitrary text around it (timestamps, levels, module paths); the reader
/// copes with that as long as the marker itself is not altered.
pub trait LineSink {
    /// Appends one line.
    fn write_line(&self, line: &str) -> Result<(), JournalError>;
}

impl<S: LineSink + ?Sized> LineSink for &S {
    fn write_line(&self, line: &str) -> Result<(), JournalError> {
        (**self).write_line(line)
    }
}

impl<S: LineSink + ?Sized> LineSink for Arc<S> {
    fn write_line(&self, line: &str) -> Result<(), JournalError> {
        (**self).write_line(line)
    }
}

impl<S: LineSink + ?Sized> LineSink for Box<S> {
    fn write_line(&self, line: &str) -> Result<(), JournalError> {
        (**self).write_line(line)
    }
}

/// Options for [`FileSink`].
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to fsync after each line (default: false).
    pub sync: bool,
    /// Whether to create the file if it doesn't exist (default: true).
    pub create: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: false,
            create: true,
        }
    }
}

/// Append-only line writer over a plain text file.
///
/// Each line, with its optional prefix and trailing newline, goes out in a
/// single `write_all` under a lock and is flushed before returning, so lines
/// written from several threads never interleave.
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
    path: PathBuf,
    prefix: String,
    sync: bool,
}

impl FileSink {
    /// Opens `path` for appending.
    ///
    /// Existing content is never truncated or rewritten.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, JournalError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(options.create)
            .append(true)
            .open(&path)?;

        Ok(Self {
            file: Mutex::new(file),
            path,
            prefix: String::new(),
            sync: options.sync,
        })
    }

    /// Prepends `prefix` to every line written from now on.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSink for FileSink {
    fn write_line(&self, line: &str) -> Result<(), JournalError> {
        let mut buf = String::with_capacity(self.prefix.len() + line.len() + 1);
        buf.push_str(&self.prefix);
        buf.push_str(line);
        buf.push('\n');

        let mut file = self.file.lock();
        file.write_all(buf.as_bytes())?;
        file.flush()?;
        if self.sync {
            file.sync_data()?;
        }
        Ok(())
    }
}

/// Forwards lines to `tracing` as event messages.
///
/// Lines are emitted with target [`TRACING_TARGET`] at the configured level.
/// Whatever subscriber is installed decides where they land; to scan them
/// back, it must write plain-text lines (e.g. `tracing_subscriber::fmt` with
/// ANSI colours off). JSON formatters escape the marker and hide it.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    /// Creates a sink that emits at `level`.
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// The level lines are emitted at.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(Level::INFO)
    }
}

impl LineSink for TracingSink {
    fn write_line(&self, line: &str) -> Result<(), JournalError> {
        match self.level {
            Level::ERROR => tracing::error!(target: TRACING_TARGET, "{line}"),
            Level::WARN => tracing::warn!(target: TRACING_TARGET, "{line}"),
            Level::INFO => tracing::info!(target: TRACING_TARGET, "{line}"),
            Level::DEBUG => tracing::debug!(target: TRACING_TARGET, "{line}"),
            _ => tracing::trace!(target: TRACING_TARGET, "{line}"),
        }
        Ok(())
    }
}
