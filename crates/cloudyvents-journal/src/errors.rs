use cloudyvents_codec::CodecError;
use cloudyvents_core::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while recording or scanning events.
#[derive(Error, Debug)]
pub enum JournalError {
    /// The log file could not be opened for reading.
    #[error("cannot open {} for reading: {source}", .path.display())]
    FileUnavailable {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// I/O error while reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The event was rejected before anything was written.
    #[error("invalid event: {0}")]
    Validation(#[from] ValidationError),
    /// Encoding failed.
    #[error("codec error: {0}")]
    Codec(CodecError),
}

impl From<CodecError> for JournalError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Validation(inner) => JournalError::Validation(inner),
            other => JournalError::Codec(other),
        }
    }
}
