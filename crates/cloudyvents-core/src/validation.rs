use crate::extra::{Extra, ExtraValue};
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

/// Deepest object nesting a marker payload may have.
///
/// The payload object itself is level 1 and the `extra` mapping is level 2,
/// so metadata may hold mappings up to `MAX_EXTRA_DEPTH - 1` levels deep.
/// The JSON decoder refuses input nested much deeper than this, so anything
/// beyond the limit could be written but never read back.
pub const MAX_EXTRA_DEPTH: usize = 64;

/// Depth of the top-level `extra` mapping inside a marker payload.
pub(crate) const EXTRA_ROOT_DEPTH: usize = 2;

/// Reasons a candidate event cannot be recorded.
///
/// All of these are raised before any I/O happens; a failed validation has
/// no partial effects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `source` or `name` was absent or empty.
    #[error("{field} is required")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
    /// A field or metadata text contains a line break.
    #[error("{field} contains a line break")]
    EmbeddedNewline {
        /// Field (or dotted metadata path) holding the line break.
        field: String,
    },
    /// Metadata is not a mapping, or holds a value of an unsupported type.
    #[error("invalid extra at {path}: {reason}")]
    InvalidExtraShape {
        /// Dotted path of the offending element (`root` for the top level).
        path: String,
        /// What was wrong with it.
        reason: String,
    },
    /// The timestamp has no four-digit year and cannot be written as RFC 3339.
    #[error("timestamp {timestamp} is outside years 0000 to 9999")]
    TimestampOutOfRange {
        /// The rejected instant.
        timestamp: DateTime<Utc>,
    },
}

/// Dotted path into a metadata mapping, used in error reports.
#[derive(Debug, Clone)]
pub(crate) struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub(crate) fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub(crate) fn push(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.to_string());
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

pub(crate) fn too_deep(path: &FieldPath) -> ValidationError {
    ValidationError::InvalidExtraShape {
        path: path.to_string(),
        reason: "nesting too deep".to_string(),
    }
}

/// Returns true if `text` would split a log line.
///
/// Carriage returns count as breaks.
pub(crate) fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

/// Checks that `source`, `name` and `extra` describe a recordable event.
///
/// Empty strings count as absent. This is a pure predicate; nothing is
/// written or logged.
pub fn validate(source: &str, name: &str, extra: Option<&Extra>) -> Result<(), ValidationError> {
    if source.is_empty() {
        return Err(ValidationError::MissingField { field: "source" });
    }
    if name.is_empty() {
        return Err(ValidationError::MissingField { field: "name" });
    }
    if has_line_break(source) {
        return Err(ValidationError::EmbeddedNewline {
            field: "source".to_string(),
        });
    }
    if has_line_break(name) {
        return Err(ValidationError::EmbeddedNewline {
            field: "name".to_string(),
        });
    }
    if let Some(extra) = extra {
        check_mapping(extra, &FieldPath::root().push("extra"), EXTRA_ROOT_DEPTH)?;
    }
    Ok(())
}

fn check_mapping(map: &Extra, path: &FieldPath, depth: usize) -> Result<(), ValidationError> {
    if depth > MAX_EXTRA_DEPTH {
        return Err(too_deep(path));
    }
    for (key, value) in map {
        let child = path.push(key);
        if has_line_break(key) {
            return Err(ValidationError::EmbeddedNewline {
                field: child.to_string(),
            });
        }
        match value {
            ExtraValue::Text(text) if has_line_break(text) => {
                return Err(ValidationError::EmbeddedNewline {
                    field: child.to_string(),
                });
            }
            ExtraValue::Mapping(inner) => check_mapping(inner, &child, depth + 1)?,
            ExtraValue::Text(_) | ExtraValue::Number(_) => {}
        }
    }
    Ok(())
}
