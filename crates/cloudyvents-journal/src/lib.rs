//! Recording and scanning of log-embedded events.
//!
//! This crate provides:
//! - [`LineSink`], the seam to whatever line-based log the process writes
//!   to, with a file-backed and a `tracing`-backed implementation
//! - [`EventRecorder`] and the [`event`] / [`event_marker_text`] helpers for
//!   the write side
//! - [`EventReader`], the filter API and [`scan`] / [`scan_events`] for the
//!   read side
//!
//! ## Quick Start
//!
//! ```rust
//! use cloudyvents_journal::{event, scan_events, FileSink, LineSink, WriteOptions};
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("service.log");
//! let sink = FileSink::open(&path, WriteOptions::default())?;
//!
//! sink.write_line("starting up")?;
//! event("provisioner", "node_started", &sink, None)?;
//! event("provisioner", "node_stopped", &sink, None)?;
//!
//! let started = scan_events(&path, Some("started"), None)?;
//! assert_eq!(started.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The file is only ever appended to. A scan reads it from the start every
//! time, so a later scan sees events appended since an earlier one.

#![deny(missing_docs)]

/// Error types for recording and scanning.
pub mod errors;
/// Event filtering API.
pub mod filter;
/// Line-by-line event reader.
pub mod reader;
/// Write-side entry points.
pub mod recorder;
/// Whole-file scans.
pub mod scan;
/// Line sinks.
pub mod sink;

pub use cloudyvents_core::{Event, Extra, ExtraValue, ValidationError};
pub use errors::JournalError;
pub use filter::{
    AndFilter, EventFilter, FilteredReader, NameFilter, OrFilter, ScanFilter, SourceFilter,
    TimeRangeFilter,
};
pub use reader::EventReader;
pub use recorder::{event, event_marker_text, EventRecorder};
pub use scan::{scan, scan_events};
pub use sink::{FileSink, LineSink, TracingSink, WriteOptions};
