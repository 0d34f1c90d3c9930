use crate::errors::JournalError;
use crate::filter::{EventFilter, ScanFilter};
use crate::reader::EventReader;
use cloudyvents_core::Event;
use std::path::Path;
use tracing::debug;

/// Reads every event in the file at `path` that `filter` keeps, in file
/// order.
///
/// Runs to completion: lines without markers are skipped, and the only
/// failures are opening the file ([`JournalError::FileUnavailable`]) and
/// I/O errors while reading it. An empty file yields an empty list.
pub fn scan<P, F>(path: P, filter: &F) -> Result<Vec<Event>, JournalError>
where
    P: AsRef<Path>,
    F: EventFilter + ?Sized,
{
    let path = path.as_ref();
    let mut reader = EventReader::open(path)?;
    let mut events = Vec::new();

    while let Some(event) = reader.next_event()? {
        if filter.matches(&event) {
            events.push(event);
        }
    }

    debug!(
        path = %path.display(),
        lines = reader.line_number(),
        matched = events.len(),
        "scanned log"
    );
    Ok(events)
}

/// Reads the events in `path`, keeping those whose name contains
/// `namefilter` and whose source contains `sourcefilter` when given.
pub fn scan_events<P: AsRef<Path>>(
    path: P,
    namefilter: Option<&str>,
    sourcefilter: Option<&str>,
) -> Result<Vec<Event>, JournalError> {
    let filter = ScanFilter {
        name: namefilter.map(str::to_string),
        source: sourcefilter.map(str::to_string),
    };
    scan(path, &filter)
}
