use crate::errors::JournalError;
use crate::sink::LineSink;
use cloudyvents_codec::MarkerEncoder;
use cloudyvents_core::{Event, Extra};
use tracing::debug;

/// Writes events to a [`LineSink`].
///
/// Every recorder stamps events from its encoder's clock. Recorders that
/// write to the same file must share a clock, which the default encoder
/// guarantees by using the process-wide one.
///
/// # Example
///
/// ```rust
/// use cloudyvents_journal::{EventRecorder, FileSink, WriteOptions};
///
/// let dir = tempfile::tempdir()?;
/// let sink = FileSink::open(dir.path().join("epu.log"), WriteOptions::default())?;
/// let recorder = EventRecorder::new(sink);
///
/// let event = recorder.record("controller", "reconfigure", None)?;
/// assert_eq!(event.source(), "controller");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct EventRecorder<S> {
    sink: S,
    encoder: MarkerEncoder,
}

impl<S: LineSink> EventRecorder<S> {
    /// Creates a recorder that stamps events with the process-wide clock.
    pub fn new(sink: S) -> Self {
        Self::with_encoder(sink, MarkerEncoder::default())
    }

    /// Creates a recorder with a specific encoder.
    pub fn with_encoder(sink: S, encoder: MarkerEncoder) -> Self {
        Self { sink, encoder }
    }

    /// The sink events are written to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Validates, stamps and encodes an event, then writes its marker as one
    /// line.
    ///
    /// Validation failures are returned before the sink is touched.
    pub fn record(
        &self,
        source: &str,
        name: &str,
        extra: Option<Extra>,
    ) -> Result<Event, JournalError> {
        let (event, marker) = self.encoder.stamp_and_encode(source, name, extra)?;
        self.sink.write_line(&marker)?;
        debug!(source, name, timestamp = %event.timestamp(), "recorded event");
        Ok(event)
    }

    /// Stamps and encodes an event without writing it.
    ///
    /// The caller embeds the returned marker in a message of its own and
    /// logs that instead.
    pub fn marker_text(
        &self,
        source: &str,
        name: &str,
        extra: Option<Extra>,
    ) -> Result<String, JournalError> {
        Ok(self.encoder.marker_text(source, name, extra)?)
    }
}

/// Records an event to `sink`, stamped with the process-wide clock.
pub fn event<S: LineSink + ?Sized>(
    source: &str,
    name: &str,
    sink: &S,
    extra: Option<Extra>,
) -> Result<Event, JournalError> {
    EventRecorder::new(sink).record(source, name, extra)
}

/// Returns the marker text for a new event, stamped with the process-wide
/// clock, without writing it anywhere.
pub fn event_marker_text(
    source: &str,
    name: &str,
    extra: Option<Extra>,
) -> Result<String, JournalError> {
    Ok(MarkerEncoder::default().marker_text(source, name, extra)?)
}
