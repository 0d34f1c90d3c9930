//! Event model for cloudyvents.
//!
//! An event is a named occurrence with a source, a UTC timestamp and optional
//! nested metadata ("extra"). This crate holds the in-memory representation
//! and the rules that decide whether a candidate event can be written into a
//! line-oriented log at all:
//!
//! - `source` and `name` are non-empty and contain no line breaks
//! - `extra` is a mapping with text keys and text, numeric or mapping values
//! - no text anywhere in `extra` contains a line break
//! - `extra` nests no deeper than [`MAX_EXTRA_DEPTH`]
//! - the timestamp falls within years 0000 to 9999
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use cloudyvents_core::{Event, Extra, ExtraValue};
//!
//! let mut extra = Extra::new();
//! extra.insert("attempt".to_string(), ExtraValue::from(3));
//!
//! let event = Event::new("provisioner", "node_started", Utc::now(), Some(extra))?;
//! assert_eq!(event.name(), "node_started");
//! # Ok::<(), cloudyvents_core::ValidationError>(())
//! ```

#![deny(missing_docs)]

/// Event type.
pub mod event;
/// Metadata values attached to events.
pub mod extra;
/// Validation rules for event fields.
pub mod validation;

pub use event::Event;
pub use extra::{extra_from_json, Extra, ExtraValue};
pub use validation::{validate, ValidationError, MAX_EXTRA_DEPTH};
