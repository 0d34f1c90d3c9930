use crate::marker::{END_TOKEN, START_TOKEN};
use serde::de::IgnoredAny;
use serde_json::Deserializer;
use tracing::trace;

/// A syntactically complete marker found inside a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    start: usize,
    end: usize,
    payload: &'a str,
}

impl<'a> Span<'a> {
    /// Byte offset of the start token.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset just past the end token.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The JSON object between the tokens.
    pub fn payload(&self) -> &'a str {
        self.payload
    }
}

/// Iterator over the marker spans of one line.
///
/// A span is a start token, immediately followed by one complete JSON
/// object, immediately followed by the end token. The object's extent is
/// found by parsing it, so token text inside JSON strings cannot cut a
/// marker short. A candidate that fails any of these checks is dropped and
/// the search resumes one byte after its start token.
#[derive(Debug, Clone)]
pub struct MarkerLexer<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> MarkerLexer<'a> {
    /// Creates a lexer over `line`.
    pub fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }
}

impl<'a> Iterator for MarkerLexer<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Span<'a>> {
        while self.pos < self.line.len() {
            let start = self.pos + self.line[self.pos..].find(START_TOKEN)?;
            let body_start = start + START_TOKEN.len();
            let body = &self.line[body_start..];

            if let Some(len) = object_len(body) {
                if body[len..].starts_with(END_TOKEN) {
                    let end = body_start + len + END_TOKEN.len();
                    self.pos = end;
                    return Some(Span {
                        start,
                        end,
                        payload: &body[..len],
                    });
                }
            }

            trace!(offset = start, "start token not followed by a complete marker");
            self.pos = start + 1;
        }
        None
    }
}

/// Length in bytes of the JSON object at the very start of `text`.
fn object_len(text: &str) -> Option<usize> {
    if !text.starts_with('{') {
        return None;
    }
    let mut stream = Deserializer::from_str(text).into_iter::<IgnoredAny>();
    match stream.next() {
        Some(Ok(_)) => Some(stream.byte_offset()),
        _ => None,
    }
}
