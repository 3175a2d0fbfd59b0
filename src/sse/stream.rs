//! Byte stream to typed event stream
//!
//! Ties the decoder, parser, and delta extractor together into the lazy
//! sequence of [`StreamEvent`]s a send consumes.

use std::collections::VecDeque;
use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};

use crate::error::{ChatError, StreamError};
use crate::sse::delta::extract_delta;
use crate::sse::events::{SseEvent, StreamEvent};
use crate::sse::parser::SseParser;
use crate::sse::reader::Utf8Decoder;
use crate::traits::ByteStream;

/// Lazy stream of typed events for one send
pub type EventStream = Pin<Box<dyn Stream<Item = StreamEvent> + Send>>;

struct ReadState {
    body: ByteStream,
    decoder: Utf8Decoder,
    parser: SseParser,
    /// Events decoded but not yet handed out
    queue: VecDeque<StreamEvent>,
    /// A terminal event is in the queue; nothing more is read or queued
    terminal_queued: bool,
    /// The terminal event has been handed out
    finished: bool,
}

impl ReadState {
    fn new(body: ByteStream) -> Self {
        Self {
            body,
            decoder: Utf8Decoder::new(),
            parser: SseParser::new(),
            queue: VecDeque::new(),
            terminal_queued: false,
            finished: false,
        }
    }

    fn push(&mut self, event: StreamEvent) {
        if self.terminal_queued {
            return;
        }
        self.terminal_queued = event.is_terminal();
        self.queue.push_back(event);
    }

    fn push_sse(&mut self, events: impl IntoIterator<Item = SseEvent>) {
        for event in events {
            match event {
                SseEvent::Chunk(chunk) => {
                    if let Some(fragment) = extract_delta(&chunk) {
                        self.push(StreamEvent::Fragment(fragment.to_string()));
                    }
                }
                SseEvent::Done => self.push(StreamEvent::End),
            }
        }
    }

    fn fail(&mut self, err: StreamError) {
        let err = ChatError::from(err);
        tracing::warn!("[{}/{}] {}", err.category(), err.error_code(), err);
        self.push(StreamEvent::Error(err.to_string()));
    }

    /// Handle end of the byte stream: flush partial input, then fail unless
    /// the sentinel was seen.
    fn close(&mut self) {
        let tail = self.decoder.finish();
        let events = self.parser.feed(&tail);
        self.push_sse(events);
        if let Some(event) = self.parser.finish() {
            self.push_sse([event]);
        }
        if !self.terminal_queued {
            self.fail(StreamError::ClosedUnexpectedly);
        }
    }
}

/// Turn a response body into the event sequence of a send.
///
/// The returned stream yields zero or more `Fragment`s and then exactly one
/// `End` or `Error`, after which it is exhausted:
/// - `data: [DONE]` yields `End`;
/// - a failed body read yields `Error` with the transport's reason;
/// - a body that ends without the sentinel yields
///   `Error("stream closed unexpectedly")`.
pub fn completion_events(body: ByteStream) -> EventStream {
    let state = ReadState::new(body);

    Box::pin(stream::unfold(state, |mut state| async move {
        loop {
            if state.finished {
                return None;
            }

            if let Some(event) = state.queue.pop_front() {
                state.finished = event.is_terminal();
                return Some((event, state));
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let text = state.decoder.decode(&chunk);
                    let events = state.parser.feed(&text);
                    state.push_sse(events);
                }
                Some(Err(e)) => state.fail(StreamError::Interrupted {
                    message: e.to_string(),
                }),
                None => state.close(),
            }
        }
    }))
}

/// A stream that yields a single `Error` event.
pub fn failed_events(reason: impl Into<String>) -> EventStream {
    Box::pin(stream::once(futures::future::ready(StreamEvent::Error(
        reason.into(),
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::HttpError;
    use bytes::Bytes;

    fn body(chunks: &[&[u8]]) -> ByteStream {
        let chunks: Vec<Result<Bytes, HttpError>> = chunks
            .iter()
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        Box::pin(stream::iter(chunks))
    }

    fn data(content: &str) -> String {
        format!(
            "data: {}\n\n",
            serde_json::json!({"choices": [{"delta": {"content": content}}]})
        )
    }

    #[tokio::test]
    async fn test_fragments_then_end() {
        let text = format!("{}{}{}data: [DONE]\n\n", data("Hel"), data("lo"), data(" world"));
        let events: Vec<_> = completion_events(body(&[text.as_bytes()])).collect().await;
        assert_eq!(
            events,
            vec![
                StreamEvent::Fragment("Hel".to_string()),
                StreamEvent::Fragment("lo".to_string()),
                StreamEvent::Fragment(" world".to_string()),
                StreamEvent::End,
            ]
        );
    }

    #[tokio::test]
    async fn test_nothing_after_sentinel() {
        let text = format!("data: [DONE]\n\n{}", data("late"));
        let events: Vec<_> = completion_events(body(&[text.as_bytes()])).collect().await;
        assert_eq!(events, vec![StreamEvent::End]);
    }

    #[tokio::test]
    async fn test_close_without_sentinel_is_error() {
        let text = data("Par");
        let events: Vec<_> = completion_events(body(&[text.as_bytes()])).collect().await;
        assert_eq!(
            events,
            vec![
                StreamEvent::Fragment("Par".to_string()),
                StreamEvent::Error("stream closed unexpectedly".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_read_error_is_terminal() {
        let text = data("Par");
        let chunks: Vec<Result<Bytes, HttpError>> = vec![
            Ok(Bytes::from(text)),
            Err(HttpError::Io("connection reset".to_string())),
            Ok(Bytes::from("data: [DONE]\n")),
        ];
        let events: Vec<_> = completion_events(Box::pin(stream::iter(chunks)))
            .collect()
            .await;
        assert_eq!(events.len(), 2);
        match &events[1] {
            StreamEvent::Error(reason) => assert!(reason.contains("connection reset")),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_multibyte_split_between_chunks() {
        let text = format!("{}data: [DONE]\n", data("你好"));
        let bytes = text.as_bytes();
        // Split inside the first CJK character
        let split = text.find('你').unwrap() + 1;
        let events: Vec<_> = completion_events(body(&[&bytes[..split], &bytes[split..]]))
            .collect()
            .await;
        assert_eq!(events[0], StreamEvent::Fragment("你好".to_string()));
        assert_eq!(events[1], StreamEvent::End);
    }

    #[tokio::test]
    async fn test_sentinel_without_trailing_newline() {
        let text = format!("{}data: [DONE]", data("a"));
        let events: Vec<_> = completion_events(body(&[text.as_bytes()])).collect().await;
        assert_eq!(events.last(), Some(&StreamEvent::End));
    }

    #[tokio::test]
    async fn test_malformed_line_does_not_stop_stream() {
        let text = format!("data: {{not json\n\n{}data: [DONE]\n", data("ok"));
        let events: Vec<_> = completion_events(body(&[text.as_bytes()])).collect().await;
        assert_eq!(
            events,
            vec![StreamEvent::Fragment("ok".to_string()), StreamEvent::End]
        );
    }

    #[tokio::test]
    async fn test_failed_events() {
        let events: Vec<_> = failed_events("boom").collect().await;
        assert_eq!(events, vec![StreamEvent::Error("boom".to_string())]);
    }
}
