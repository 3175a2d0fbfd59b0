//! Streaming chat-completion client.
//!
//! Sends the conversation history to the configured endpoint and exposes the
//! reply as a lazy [`EventStream`]. Nothing here touches the conversation
//! store; the caller applies the events.

use std::sync::Arc;

use futures::future::FutureExt;
use futures::stream::{self, StreamExt};
use tokio::sync::oneshot;

use crate::adapters::ReqwestHttpClient;
use crate::error::{ChatError, NetworkError, StreamError};
use crate::models::{ChatMessage, CompletionRequest};
use crate::sse::{completion_events, failed_events, EventStream, StreamEvent};
use crate::startup::ChatConfig;
use crate::traits::{Headers, HttpClient};

/// Client for the completion endpoint described by a [`ChatConfig`].
#[derive(Clone)]
pub struct CompletionClient {
    config: Arc<ChatConfig>,
    http: Arc<dyn HttpClient>,
}

impl CompletionClient {
    /// Create a client using the reqwest transport.
    pub fn new(config: ChatConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    /// Create a client with an injected transport.
    pub fn with_http_client(config: ChatConfig, http: Arc<dyn HttpClient>) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Request body for `history`.
    pub fn build_request(&self, history: Vec<ChatMessage>) -> CompletionRequest {
        CompletionRequest::new(self.config.model.clone(), history, self.config.temperature)
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.config.api_key),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        headers
    }

    /// Stream the reply to `history`.
    ///
    /// The request is sent when the stream is first polled. Connection
    /// failures and non-2xx statuses come out as a single `Error` event
    /// before any fragment; see [`completion_events`] for the rest.
    pub fn stream(&self, history: Vec<ChatMessage>) -> EventStream {
        let request = self.build_request(history);
        let headers = self.headers();
        let http = Arc::clone(&self.http);
        let url = self.config.endpoint.clone();

        let open = async move {
            let body = match serde_json::to_string(&request) {
                Ok(body) => body,
                Err(e) => return failed_events(format!("failed to encode request: {}", e)),
            };

            tracing::debug!(
                "POST {} model={} messages={}",
                url,
                request.model,
                request.messages.len()
            );

            match http.post_stream(&url, &body, &headers).await {
                Ok(bytes) => completion_events(bytes),
                Err(e) => {
                    let err = ChatError::from(NetworkError::from_http(e, &url));
                    tracing::warn!("[{}/{}] {}", err.category(), err.error_code(), err);
                    failed_events(err.to_string())
                }
            }
        };

        Box::pin(stream::once(open).flatten())
    }
}

/// Wrap `events` so that firing `cancel` ends it with
/// `Error("cancelled by user")`.
///
/// Dropping the sender without sending is not a cancellation. Events already
/// past their terminal event are never followed by the cancel error.
pub fn cancellable(events: EventStream, cancel: oneshot::Receiver<()>) -> EventStream {
    let state = (events, cancel.fuse(), false);

    Box::pin(stream::unfold(
        state,
        |(mut events, mut cancel, finished)| async move {
            if finished {
                return None;
            }

            tokio::select! {
                biased;

                Ok(()) = &mut cancel => {
                    let err = ChatError::from(StreamError::Cancelled);
                    tracing::info!("[{}] Completion stream cancelled", err.error_code());
                    let event = StreamEvent::Error(err.to_string());
                    Some((event, (events, cancel, true)))
                }
                next = events.next() => {
                    let event = next?;
                    let finished = event.is_terminal();
                    Some((event, (events, cancel, finished)))
                }
            }
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;
    use std::time::Duration;

    const URL: &str = "http://mock.local/v1/chat/completions";

    fn config() -> ChatConfig {
        ChatConfig::default()
            .with_endpoint(URL)
            .with_api_key("test-key")
            .with_model("test-model")
            .with_temperature(0.5)
    }

    fn sse(parts: &[&str]) -> Vec<String> {
        let mut lines: Vec<String> = parts
            .iter()
            .map(|p| {
                format!(
                    "data: {}\n\n",
                    serde_json::json!({"choices": [{"delta": {"content": p}}]})
                )
            })
            .collect();
        lines.push("data: [DONE]\n\n".to_string());
        lines
    }

    #[tokio::test]
    async fn test_stream_hello_world() {
        let mock = Arc::new(MockHttpClient::with_default(MockResponse::chunks(sse(&[
            "Hel", "lo", " world",
        ]))));
        let client = CompletionClient::with_http_client(config(), mock.clone());

        let events: Vec<_> = client.stream(vec![ChatMessage::user("hi")]).collect().await;

        assert_eq!(
            events,
            vec![
                StreamEvent::Fragment("Hel".to_string()),
                StreamEvent::Fragment("lo".to_string()),
                StreamEvent::Fragment(" world".to_string()),
                StreamEvent::End,
            ]
        );
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_stream_sends_headers_and_body() {
        let mock = Arc::new(MockHttpClient::with_default(MockResponse::chunks(sse(&[]))));
        let client = CompletionClient::with_http_client(config(), mock.clone());

        let history = vec![
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
            ChatMessage::user("bye"),
        ];
        let _: Vec<_> = client.stream(history).collect().await;

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.url, URL);
        assert_eq!(
            request.headers.get("Authorization").map(String::as_str),
            Some("Bearer test-key")
        );
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("text/event-stream")
        );
        assert_eq!(
            request.json(),
            serde_json::json!({
                "model": "test-model",
                "messages": [
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hello"},
                    {"role": "user", "content": "bye"}
                ],
                "temperature": 0.5,
                "stream": true
            })
        );
    }

    #[tokio::test]
    async fn test_stream_is_lazy() {
        let mock = Arc::new(MockHttpClient::with_default(MockResponse::chunks(sse(&[]))));
        let client = CompletionClient::with_http_client(config(), mock.clone());

        let events = client.stream(vec![ChatMessage::user("hi")]);
        assert_eq!(mock.request_count(), 0);
        drop(events);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_status_error_before_any_fragment() {
        let mock = Arc::new(MockHttpClient::with_default(MockResponse::Error(
            HttpError::ServerError {
                status: 500,
                message: "internal".to_string(),
            },
        )));
        let client = CompletionClient::with_http_client(config(), mock);

        let events: Vec<_> = client.stream(vec![ChatMessage::user("hi")]).collect().await;

        assert_eq!(events.len(), 1);
        match &events[0] {
            StreamEvent::Error(reason) => {
                let expected = ChatError::from(NetworkError::HttpStatus {
                    status: 500,
                    message: "internal".to_string(),
                });
                assert_eq!(expected.error_code(), "E_NET_HTTP");
                assert_eq!(reason, &expected.to_string());
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_error_after_partial_reply() {
        let mock = Arc::new(MockHttpClient::with_default(MockResponse::StreamThenError(
            vec![bytes::Bytes::from(
                "data: {\"choices\":[{\"delta\":{\"content\":\"Par\"}}]}\n\n",
            )],
            HttpError::Io("connection reset".to_string()),
        )));
        let client = CompletionClient::with_http_client(config(), mock);

        let events: Vec<_> = client.stream(vec![ChatMessage::user("hi")]).collect().await;

        assert_eq!(events[0], StreamEvent::Fragment("Par".to_string()));
        assert!(matches!(&events[1], StreamEvent::Error(r) if r.contains("connection reset")));
        assert_eq!(events.len(), 2);
    }

    #[tokio::test]
    async fn test_cancel_mid_stream() {
        let mock = Arc::new(MockHttpClient::with_default(MockResponse::StreamThenHang(
            vec![bytes::Bytes::from(
                "data: {\"choices\":[{\"delta\":{\"content\":\"Par\"}}]}\n\n",
            )],
        )));
        let client = CompletionClient::with_http_client(config(), mock);
        let (cancel_tx, cancel_rx) = oneshot::channel();

        let mut events = cancellable(client.stream(vec![ChatMessage::user("hi")]), cancel_rx);

        assert_eq!(
            events.next().await,
            Some(StreamEvent::Fragment("Par".to_string()))
        );
        cancel_tx.send(()).unwrap();
        assert_eq!(
            events.next().await,
            Some(StreamEvent::Error("cancelled by user".to_string()))
        );
        assert_eq!(events.next().await, None);
    }

    #[tokio::test]
    async fn test_dropped_cancel_sender_is_not_a_cancel() {
        let mock = Arc::new(MockHttpClient::with_default(MockResponse::chunks(sse(&["ok"]))));
        let client = CompletionClient::with_http_client(config(), mock);
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        drop(cancel_tx);

        let events: Vec<_> = cancellable(client.stream(vec![ChatMessage::user("hi")]), cancel_rx)
            .collect()
            .await;

        assert_eq!(
            events,
            vec![StreamEvent::Fragment("ok".to_string()), StreamEvent::End]
        );
    }

    #[tokio::test]
    async fn test_hanging_stream_without_cancel_stays_pending() {
        let mock = Arc::new(MockHttpClient::with_default(MockResponse::StreamThenHang(
            vec![],
        )));
        let client = CompletionClient::with_http_client(config(), mock);
        let (_cancel_tx, cancel_rx) = oneshot::channel();
        let mut events = cancellable(client.stream(vec![ChatMessage::user("hi")]), cancel_rx);

        let next = tokio::time::timeout(Duration::from_millis(50), events.next()).await;
        assert!(next.is_err());
    }
}
