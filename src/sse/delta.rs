//! Content extraction from completion chunks

use crate::sse::events::CompletionChunk;

/// Text fragment carried by the first choice of `chunk`, if any.
///
/// Role-only deltas, finish markers, and empty strings carry no text and
/// yield `None`.
pub fn extract_delta(chunk: &CompletionChunk) -> Option<&str> {
    chunk
        .choices
        .first()?
        .delta
        .content
        .as_deref()
        .filter(|content| !content.is_empty())
}
