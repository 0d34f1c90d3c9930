use crate::extra::{Extra, ExtraValue};
use crate::validation::{validate, ValidationError};
use chrono::{DateTime, Datelike, SubsecRound, Utc};

/// Number of fractional-second digits an event timestamp carries.
pub const TIMESTAMP_PRECISION: u16 = 6;

/// Years an event timestamp may fall in; RFC 3339 has no form for others.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// One recorded occurrence.
///
/// An `Event` can only be built through [`Event::new`], so every instance
/// satisfies the validation rules. Timestamps are truncated to whole
/// microseconds and an empty metadata mapping is stored as `None`; both
/// normalisations make an event identical to its own decoded marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    source: String,
    name: String,
    timestamp: DateTime<Utc>,
    extra: Option<Extra>,
}

impl Event {
    /// Validates the fields and builds an event.
    ///
    /// # Errors
    ///
    /// Fails with the [`validate`] errors, or with
    /// [`ValidationError::TimestampOutOfRange`] for a year outside 0000 to 9999.
    pub fn new(
        source: impl Into<String>,
        name: impl Into<String>,
        timestamp: DateTime<Utc>,
        extra: Option<Extra>,
    ) -> Result<Self, ValidationError> {
        let source = source.into();
        let name = name.into();
        validate(&source, &name, extra.as_ref())?;
        if !YEAR_RANGE.contains(&timestamp.year()) {
            return Err(ValidationError::TimestampOutOfRange { timestamp });
        }

        Ok(Self {
            source,
            name,
            timestamp: timestamp.trunc_subsecs(TIMESTAMP_PRECISION),
            extra: extra.filter(|m| !m.is_empty()),
        })
    }

    /// Emitting subsystem.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Kind of occurrence.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// UTC instant, microsecond resolution.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Metadata, if any was attached.
    pub fn extra(&self) -> Option<&Extra> {
        self.extra.as_ref()
    }

    /// Looks up a top-level metadata value.
    pub fn extra_value(&self, key: &str) -> Option<&ExtraValue> {
        self.extra.as_ref().and_then(|m| m.get(key))
    }

    /// Splits the event into `(source, name, timestamp, extra)`.
    pub fn into_parts(self) -> (String, String, DateTime<Utc>, Option<Extra>) {
        (self.source, self.name, self.timestamp, self.extra)
    }
}
