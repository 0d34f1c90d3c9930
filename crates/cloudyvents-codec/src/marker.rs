use crate::errors::CodecError;
use crate::lexer::{MarkerLexer, Span};
use chrono::{DateTime, SecondsFormat, Utc};
use cloudyvents_core::{Event, Extra};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Text that opens every marker.
///
/// Must start with an ASCII byte; the lexer resumes one byte past a failed
/// candidate.
pub const START_TOKEN: &str = "CLOUDYVENT==";

/// Text that closes every marker.
pub const END_TOKEN: &str = "==CLOUDYVENT";

#[derive(Serialize)]
struct PayloadOut<'a> {
    source: &'a str,
    name: &'a str,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra: Option<&'a Extra>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PayloadIn {
    source: String,
    name: String,
    timestamp: String,
    #[serde(default)]
    extra: Option<Extra>,
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, CodecError> {
    Ok(DateTime::parse_from_rfc3339(text)?.with_timezone(&Utc))
}

/// Encodes an event as marker text.
///
/// The event's own timestamp is used as-is; see
/// [`MarkerEncoder`](crate::MarkerEncoder) for stamping new events.
pub fn encode(event: &Event) -> Result<String, CodecError> {
    let payload = PayloadOut {
        source: event.source(),
        name: event.name(),
        timestamp: format_timestamp(event.timestamp()),
        extra: event.extra(),
    };
    let json = serde_json::to_string(&payload)?;
    Ok(format!("{START_TOKEN}{json}{END_TOKEN}"))
}

/// Decodes the payload of a span found by [`MarkerLexer`].
pub fn decode_span(span: &Span<'_>) -> Result<Event, CodecError> {
    let payload: PayloadIn = serde_json::from_str(span.payload())?;
    let timestamp = parse_timestamp(&payload.timestamp)?;
    Ok(Event::new(
        payload.source,
        payload.name,
        timestamp,
        payload.extra,
    )?)
}

/// Decodes text that is exactly one marker, with nothing around it.
pub fn decode(marker: &str) -> Result<Event, CodecError> {
    let span = MarkerLexer::new(marker)
        .next()
        .filter(|span| span.start() == 0 && span.end() == marker.len())
        .ok_or(CodecError::NoMarker)?;
    decode_span(&span)
}

/// Extracts every event marker embedded in `line`, in order of appearance.
///
/// Candidate spans that do not decode are skipped; this never fails.
pub fn extract_all(line: &str) -> Vec<Event> {
    MarkerLexer::new(line)
        .filter_map(|span| match decode_span(&span) {
            Ok(event) => Some(event),
            Err(err) => {
                trace!(offset = span.start(), error = %err, "skipping undecodable marker");
                None
            }
        })
        .collect()
}
