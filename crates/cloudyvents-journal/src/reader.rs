//! Line-by-line event reader.

use crate::errors::JournalError;
use cloudyvents_codec::extract_all;
use cloudyvents_core::Event;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::trace;

/// Reads events out of a text log in file order.
///
/// Every line is searched for markers; lines without one are skipped. Lines
/// that are not valid UTF-8 are decoded lossily rather than failing, so a
/// single damaged line never stops the read.
///
/// # Example
///
/// ```rust
/// use cloudyvents_journal::EventReader;
/// use std::io::Cursor;
///
/// let log = "boot\nno events here\n";
/// let mut reader = EventReader::new(Cursor::new(log));
/// assert!(reader.next_event()?.is_none());
/// # Ok::<(), cloudyvents_journal::JournalError>(())
/// ```
#[derive(Debug)]
pub struct EventReader<R> {
    reader: R,
    buf: Vec<u8>,
    pending: VecDeque<Event>,
    line_number: u64,
}

impl EventReader<BufReader<File>> {
    /// Opens a log file for reading.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::FileUnavailable`] if the file cannot be opened
    /// or `path` names a directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, JournalError> {
        let path = path.as_ref();
        let unavailable = |source: io::Error| JournalError::FileUnavailable {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(unavailable)?;
        // Some platforms open directories without error and fail on read.
        if file.metadata().map_err(unavailable)?.is_dir() {
            return Err(unavailable(io::Error::other("is a directory")));
        }
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> EventReader<R> {
    /// Wraps any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
            line_number: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Returns the next event, or `Ok(None)` at end of input.
    pub fn next_event(&mut self) -> Result<Option<Event>, JournalError> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }

            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = String::from_utf8_lossy(&self.buf);
            let events = extract_all(line.trim_end_matches(['\n', '\r']));
            if !events.is_empty() {
                trace!(line = self.line_number, count = events.len(), "found events");
            }
            self.pending.extend(events);
        }
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<Event, JournalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cloudyvents_codec::encode;
    use std::io::Cursor;

    fn marker(name: &str) -> (Event, String) {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let event = Event::new("unittest", name, ts, None).unwrap();
        let text = encode(&event).unwrap();
        (event, text)
    }

    #[test]
    fn yields_events_in_line_order() {
        let (a, ma) = marker("A");
        let (b, mb) = marker("B");
        let log = format!("\n## auto-generated\n\nINFO {ma}\nsomething not an event\nWARN {mb} tail\n");

        let events: Vec<_> = EventReader::new(Cursor::new(log))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(events, vec![a, b]);
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let (a, ma) = marker("A");
        let mut reader = EventReader::new(Cursor::new(ma));
        assert_eq!(reader.next_event().unwrap(), Some(a));
        assert_eq!(reader.next_event().unwrap(), None);
        assert_eq!(reader.line_number(), 1);
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let (a, ma) = marker("A");
        let log = format!("noise\r\n{ma}\r\n");
        let events: Vec<_> = EventReader::new(Cursor::new(log)).map(Result::unwrap).collect();
        assert_eq!(events, vec![a]);
    }

    #[test]
    fn invalid_utf8_line_does_not_stop_reading() {
        let (a, ma) = marker("A");
        let mut bytes = b"\xff\xfe garbage\n".to_vec();
        bytes.extend_from_slice(ma.as_bytes());
        bytes.push(b'\n');

        let events: Vec<_> = EventReader::new(Cursor::new(bytes)).map(Result::unwrap).collect();
        assert_eq!(events, vec![a]);
    }

    #[test]
    fn two_markers_on_one_line() {
        let (a, ma) = marker("A");
        let (b, mb) = marker("B");
        let log = format!("{ma} {mb}\n");
        let events: Vec<_> = EventReader::new(Cursor::new(log)).map(Result::unwrap).collect();
        assert_eq!(events, vec![a, b]);
    }
}
