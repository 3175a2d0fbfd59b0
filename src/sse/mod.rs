//! SSE (Server-Sent Events) stream handling for chat completions
//!
//! Completion endpoints answer with lines of the form:
//! - `data: <json>` - one completion chunk
//! - `data: [DONE]` - end of the reply
//! - Lines starting with `:` - comments (ignored)
//!
//! # Module structure
//! - `reader` - incremental UTF-8 decoding of body chunks
//! - `parser` - line reassembly and `data:` payload parsing
//! - `delta` - text fragment extraction from a parsed chunk
//! - `stream` - the byte stream to [`StreamEvent`] pipeline
//! - `events` - type definitions

mod delta;
mod events;
mod parser;
mod reader;
mod stream;

pub use delta::extract_delta;
pub use events::{
    ChunkChoice, ChunkDelta, CompletionChunk, SseEvent, SseLine, SseParseError, StreamEvent,
    DONE_SENTINEL,
};
pub use parser::{parse_data_payload, parse_sse_line, SseParser};
pub use reader::Utf8Decoder;
pub use stream::{completion_events, failed_events, EventStream};
