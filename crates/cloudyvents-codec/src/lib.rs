//! Marker codec for cloudyvents.
//!
//! An event is written as a single newline-free fragment:
//!
//! ```text
//! CLOUDYVENT=={"source":"provisioner","name":"node_started","timestamp":"2026-10-19T08:15:02.123456Z"}==CLOUDYVENT
//! ```
//!
//! The fragment can sit anywhere inside a log line; text before and after it
//! is ignored when the line is scanned. The payload is compact JSON with the
//! keys `source`, `name`, `timestamp` (RFC 3339, UTC, six fractional digits)
//! and, when metadata is present, `extra`.
//!
//! ## Quick Start
//!
//! ```rust
//! use cloudyvents_codec::{extract_all, MarkerEncoder};
//!
//! let encoder = MarkerEncoder::default();
//! let marker = encoder.marker_text("provisioner", "node_started", None)?;
//!
//! let line = format!("2026-10-19 08:15:02 INFO worker: {marker} (took 3s)");
//! let events = extract_all(&line);
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].name(), "node_started");
//! # Ok::<(), cloudyvents_codec::CodecError>(())
//! ```

#![deny(missing_docs)]

/// Monotonic, duplicate-free timestamp source.
pub mod clock;
/// Stamping and encoding of new events.
pub mod encoder;
/// Error types for encoding and decoding.
pub mod errors;
/// Locating marker spans inside a line.
pub mod lexer;
/// Marker wire format.
pub mod marker;

pub use clock::UniqueClock;
pub use encoder::MarkerEncoder;
pub use errors::CodecError;
pub use lexer::{MarkerLexer, Span};
pub use marker::{decode, decode_span, encode, extract_all, END_TOKEN, START_TOKEN};
