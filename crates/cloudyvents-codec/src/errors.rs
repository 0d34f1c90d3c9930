use cloudyvents_core::ValidationError;
use thiserror::Error;

/// Errors that can occur while encoding or decoding markers.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input is not exactly one well-formed marker.
    #[error("no event marker found")]
    NoMarker,
    /// Marker payload could not be serialized or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Marker timestamp is not RFC 3339.
    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
    /// Fields do not describe a recordable event.
    #[error("invalid event: {0}")]
    Validation(#[from] ValidationError),
}
