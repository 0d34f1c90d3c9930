use crate::clock::UniqueClock;
use crate::errors::CodecError;
use crate::marker::encode;
use cloudyvents_core::{validate, Event, Extra};
use std::sync::Arc;

/// Builds new events stamped by a [`UniqueClock`] and encodes them.
///
/// The default encoder uses the process-wide clock, so every default encoder
/// in a process draws from one duplicate-free sequence.
#[derive(Debug, Clone)]
pub struct MarkerEncoder {
    clock: Arc<UniqueClock>,
}

impl MarkerEncoder {
    /// Creates an encoder that stamps events with `clock`.
    pub fn new(clock: Arc<UniqueClock>) -> Self {
        Self { clock }
    }

    /// The clock this encoder stamps with.
    pub fn clock(&self) -> &Arc<UniqueClock> {
        &self.clock
    }

    /// Validates the fields and builds an event stamped with the next unique
    /// instant.
    ///
    /// Invalid input is rejected before the clock is consulted.
    pub fn stamp(
        &self,
        source: &str,
        name: &str,
        extra: Option<Extra>,
    ) -> Result<Event, CodecError> {
        // Checked before `next()` so rejected input never advances the clock.
        validate(source, name, extra.as_ref())?;
        Ok(Event::new(source, name, self.clock.next(), extra)?)
    }

    /// Stamps a new event and returns it along with its marker text.
    pub fn stamp_and_encode(
        &self,
        source: &str,
        name: &str,
        extra: Option<Extra>,
    ) -> Result<(Event, String), CodecError> {
        let event = self.stamp(source, name, extra)?;
        let marker = encode(&event)?;
        Ok((event, marker))
    }

    /// Stamps a new event and returns only its marker text, for callers that
    /// splice it into a larger log message themselves.
    pub fn marker_text(
        &self,
        source: &str,
        name: &str,
        extra: Option<Extra>,
    ) -> Result<String, CodecError> {
        self.stamp_and_encode(source, name, extra)
            .map(|(_, marker)| marker)
    }
}

impl Default for MarkerEncoder {
    fn default() -> Self {
        Self::new(UniqueClock::global())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::decode;
    use cloudyvents_core::ValidationError;

    #[test]
    fn invalid_input_does_not_touch_clock() {
        let encoder = MarkerEncoder::new(Arc::new(UniqueClock::new()));
        let err = encoder.stamp("unit\ntest", "TRIAL", None).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Validation(ValidationError::EmbeddedNewline { .. })
        ));
        assert!(encoder.clock().last_issued().is_none());
    }

    #[test]
    fn marker_text_decodes_to_stamped_event() {
        let encoder = MarkerEncoder::new(Arc::new(UniqueClock::new()));
        let (event, marker) = encoder.stamp_and_encode("unittest", "TRIAL1", None).unwrap();
        assert_eq!(decode(&marker).unwrap(), event);
        assert_eq!(encoder.clock().last_issued(), Some(event.timestamp()));
    }
}
