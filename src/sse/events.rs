//! SSE line, payload, and stream event types

use serde::{Deserialize, Serialize};

/// Payload that marks the normal end of a completion stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Data payload (e.g., `data: {"choices":[...]}`), prefix and surrounding whitespace stripped
    Data(String),
    /// Any other field (`event:`, `id:`, `retry:`); unused by completion streams
    Field(String),
    /// Empty line - separates events
    Empty,
    /// Comment line (starts with ':')
    Comment(String),
}

/// One streamed chunk of a chat completion
///
/// Only `choices[0].delta.content` is ever read; every other field the
/// endpoint sends is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: ChunkDelta,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
}

/// A complete SSE event from a completion stream
#[derive(Debug, Clone, PartialEq)]
pub enum SseEvent {
    /// A parsed completion chunk
    Chunk(CompletionChunk),
    /// The `[DONE]` sentinel
    Done,
}

/// What the accumulator consumes: one typed event per step of a send.
///
/// A send's stream yields any number of `Fragment`s followed by exactly one
/// `End` or `Error`, and nothing after that.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Incremental piece of generated text
    Fragment(String),
    /// The reply finished normally
    End,
    /// The reply failed; the reason is shown to the user
    Error(String),
}

impl StreamEvent {
    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StreamEvent::Fragment(_))
    }
}

/// Error parsing a single data payload
#[derive(Debug, Clone, PartialEq)]
pub enum SseParseError {
    /// Payload is not valid JSON of the chunk shape
    InvalidJson { data: String, source: String },
}

impl std::fmt::Display for SseParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SseParseError::InvalidJson { data, source } => {
                write!(f, "Invalid JSON payload '{}': {}", data, source)
            }
        }
    }
}

impl std::error::Error for SseParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_ignores_unknown_fields() {
        let json = r#"{"id":"x","created":1,"model":"m","choices":[{"index":0,"delta":{"role":"assistant","content":"hi"},"finish_reason":null}]}"#;
        let chunk: CompletionChunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.choices.len(), 1);
        assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("hi"));
    }

    #[test]
    fn test_chunk_tolerates_missing_delta() {
        let chunk: CompletionChunk =
            serde_json::from_str(r#"{"choices":[{"finish_reason":"stop"}]}"#).unwrap();
        assert_eq!(chunk.choices[0].delta.content, None);
    }

    #[test]
    fn test_chunk_tolerates_null_content() {
        let chunk: CompletionChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":null}}]}"#).unwrap();
        assert_eq!(chunk.choices[0].delta.content, None);
    }

    #[test]
    fn test_stream_event_is_terminal() {
        assert!(!StreamEvent::Fragment("x".to_string()).is_terminal());
        assert!(StreamEvent::End.is_terminal());
        assert!(StreamEvent::Error("x".to_string()).is_terminal());
    }
}
