//! Event filtering API for selective event iteration.

use crate::errors::JournalError;
use crate::reader::EventReader;
use chrono::{DateTime, Utc};
use cloudyvents_core::Event;
use std::io::BufRead;

/// Trait for filtering events during iteration.
pub trait EventFilter {
    /// Returns true if the event matches the filter criteria.
    fn matches(&self, event: &Event) -> bool;
}

impl<F: EventFilter + ?Sized> EventFilter for &F {
    fn matches(&self, event: &Event) -> bool {
        (**self).matches(event)
    }
}

impl<F: EventFilter + ?Sized> EventFilter for Box<F> {
    fn matches(&self, event: &Event) -> bool {
        (**self).matches(event)
    }
}

/// Keeps events whose name contains a substring (case-sensitive).
#[derive(Debug, Clone)]
pub struct NameFilter {
    /// Substring to look for.
    pub pattern: String,
}

impl NameFilter {
    /// Creates a name filter.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl EventFilter for NameFilter {
    fn matches(&self, event: &Event) -> bool {
        event.name().contains(self.pattern.as_str())
    }
}

/// Keeps events whose source contains a substring (case-sensitive).
#[derive(Debug, Clone)]
pub struct SourceFilter {
    /// Substring to look for.
    pub pattern: String,
}

impl SourceFilter {
    /// Creates a source filter.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl EventFilter for SourceFilter {
    fn matches(&self, event: &Event) -> bool {
        event.source().contains(self.pattern.as_str())
    }
}

/// Filter by time range.
#[derive(Debug, Clone, Default)]
pub struct TimeRangeFilter {
    /// Include events at or after this instant.
    pub after: Option<DateTime<Utc>>,
    /// Include events at or before this instant.
    pub before: Option<DateTime<Utc>>,
}

impl EventFilter for TimeRangeFilter {
    fn matches(&self, event: &Event) -> bool {
        let ts = event.timestamp();
        if let Some(after) = self.after {
            if ts < after {
                return false;
            }
        }
        if let Some(before) = self.before {
            if ts > before {
                return false;
            }
        }
        true
    }
}

/// Composite filter: all filters must match (AND).
pub struct AndFilter {
    /// Filters to combine with AND logic.
    pub filters: Vec<Box<dyn EventFilter>>,
}

impl EventFilter for AndFilter {
    fn matches(&self, event: &Event) -> bool {
        self.filters.iter().all(|f| f.matches(event))
    }
}

/// Composite filter: any filter must match (OR).
pub struct OrFilter {
    /// Filters to combine with OR logic.
    pub filters: Vec<Box<dyn EventFilter>>,
}

impl EventFilter for OrFilter {
    fn matches(&self, event: &Event) -> bool {
        self.filters.iter().any(|f| f.matches(event))
    }
}

/// Optional name and source substrings, both of which must match.
///
/// An empty `ScanFilter` keeps every event.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    /// Substring the name must contain.
    pub name: Option<String>,
    /// Substring the source must contain.
    pub source: Option<String>,
}

impl ScanFilter {
    /// A filter that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the name to contain `pattern`.
    pub fn with_name(mut self, pattern: impl Into<String>) -> Self {
        self.name = Some(pattern.into());
        self
    }

    /// Requires the source to contain `pattern`.
    pub fn with_source(mut self, pattern: impl Into<String>) -> Self {
        self.source = Some(pattern.into());
        self
    }
}

impl EventFilter for ScanFilter {
    fn matches(&self, event: &Event) -> bool {
        let name_ok = self
            .name
            .as_deref()
            .map_or(true, |p| event.name().contains(p));
        let source_ok = self
            .source
            .as_deref()
            .map_or(true, |p| event.source().contains(p));
        name_ok && source_ok
    }
}

/// Reader that filters events from an underlying [`EventReader`].
#[derive(Debug)]
pub struct FilteredReader<R, F> {
    reader: EventReader<R>,
    filter: F,
}

impl<R: BufRead, F: EventFilter> FilteredReader<R, F> {
    /// Creates a new filtered reader.
    pub fn new(reader: EventReader<R>, filter: F) -> Self {
        Self { reader, filter }
    }

    /// Returns the next matching event, or `Ok(None)` at end of input.
    pub fn next_event(&mut self) -> Result<Option<Event>, JournalError> {
        loop {
            match self.reader.next_event()? {
                None => return Ok(None),
                Some(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Some(_) => continue,
            }
        }
    }
}

impl<R: BufRead, F: EventFilter> Iterator for FilteredReader<R, F> {
    type Item = Result<Event, JournalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn make_event(source: &str, name: &str, minute: i64) -> Event {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minute);
        Event::new(source, name, ts, None).unwrap()
    }

    #[test]
    fn substring_not_prefix() {
        let filter = NameFilter::new("NM");
        assert!(filter.matches(&make_event("S", "NM1", 0)));
        assert!(filter.matches(&make_event("S", "XNMX", 0)));
        assert!(!filter.matches(&make_event("S", "nm1", 0)));
        assert!(!filter.matches(&make_event("S", "XX2", 0)));
    }

    #[test]
    fn scan_filter_requires_both() {
        let filter = ScanFilter::new().with_name("NM").with_source("SRC");
        assert!(filter.matches(&make_event("SRC5", "NM5", 0)));
        assert!(!filter.matches(&make_event("SRX2", "NM2", 0)));
        assert!(!filter.matches(&make_event("SRC3", "XX3", 0)));
        assert!(ScanFilter::new().matches(&make_event("any", "thing", 0)));
    }

    #[test]
    fn time_range_is_inclusive() {
        let filter = TimeRangeFilter {
            after: Some(make_event("S", "N", 1).timestamp()),
            before: Some(make_event("S", "N", 2).timestamp()),
        };
        assert!(!filter.matches(&make_event("S", "N", 0)));
        assert!(filter.matches(&make_event("S", "N", 1)));
        assert!(filter.matches(&make_event("S", "N", 2)));
        assert!(!filter.matches(&make_event("S", "N", 3)));
    }

    #[test]
    fn composite_filters() {
        let both = || -> Vec<Box<dyn EventFilter>> {
            vec![
                Box::new(NameFilter::new("NM")) as Box<dyn EventFilter>,
                Box::new(SourceFilter::new("SRC")),
            ]
        };
        let and = AndFilter { filters: both() };
        let or = OrFilter { filters: both() };
        let event = make_event("SRX2", "NM2", 0);
        assert!(!and.matches(&event));
        assert!(or.matches(&event));
        assert!(!or.matches(&make_event("SRX4", "XX4", 0)));
    }
}
