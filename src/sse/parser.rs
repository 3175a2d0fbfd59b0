//! SSE stream parsing logic
//!
//! Contains the stateful SseParser that reassembles lines split across text
//! chunks and turns `data:` lines into events, as well as the line-level
//! parsing functions.

use crate::sse::events::{CompletionChunk, SseEvent, SseLine, SseParseError, DONE_SENTINEL};

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    SseLine::Field(line.to_string())
}

/// Parse the payload of a `data:` line
pub fn parse_data_payload(data: &str) -> Result<SseEvent, SseParseError> {
    if data == DONE_SENTINEL {
        return Ok(SseEvent::Done);
    }

    serde_json::from_str::<CompletionChunk>(data)
        .map(SseEvent::Chunk)
        .map_err(|e| SseParseError::InvalidJson {
            data: data.to_string(),
            source: e.to_string(),
        })
}

/// Stateful SSE parser fed with decoded text chunks
///
/// Completion endpoints put one JSON object on each `data:` line, so every
/// complete data line is an event on its own; blank separator lines are not
/// needed to emit.
#[derive(Debug, Default)]
pub struct SseParser {
    /// Text after the last newline seen so far
    line_buffer: String,
    /// Malformed payloads skipped so far
    skipped: usize,
}

impl SseParser {
    /// Create a new SSE parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a decoded text chunk, returning events for every line it completes
    pub fn feed(&mut self, text: &str) -> Vec<SseEvent> {
        self.line_buffer.push_str(text);

        let mut events = Vec::new();
        while let Some(newline_pos) = self.line_buffer.find('\n') {
            let line: String = self.line_buffer.drain(..=newline_pos).collect();
            let line = line.trim_end_matches('\n').trim_end_matches('\r');
            if let Some(event) = self.feed_line(line) {
                events.push(event);
            }
        }
        events
    }

    /// Feed one complete line (without its newline)
    ///
    /// Returns `None` for non-data lines, empty keep-alive payloads, and
    /// payloads that fail to parse. Parse failures are logged and counted,
    /// never raised.
    pub fn feed_line(&mut self, line: &str) -> Option<SseEvent> {
        match parse_sse_line(line) {
            SseLine::Data(data) if data.is_empty() => None,
            SseLine::Data(data) => match parse_data_payload(&data) {
                Ok(event) => Some(event),
                Err(e) => {
                    self.skipped += 1;
                    tracing::warn!("Skipping malformed SSE payload: {}", e);
                    None
                }
            },
            SseLine::Field(_) | SseLine::Empty | SseLine::Comment(_) => None,
        }
    }

    /// Flush a final line that was not newline-terminated
    pub fn finish(&mut self) -> Option<SseEvent> {
        if self.line_buffer.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.line_buffer);
        self.feed_line(line.trim_end_matches('\r'))
    }

    /// Number of malformed payloads skipped
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
