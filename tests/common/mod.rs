//! Common test utilities for integration tests.
//!
//! Builders for SSE bodies, test configs, and apps wired to a mock
//! transport, plus a helper that pumps stream messages until a send settles.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chatdeck::adapters::{MockHttpClient, MockResponse};
use chatdeck::app::App;
use chatdeck::completion::CompletionClient;
use chatdeck::startup::ChatConfig;

pub const TEST_API_KEY: &str = "test-key";
pub const TEST_MODEL: &str = "test-model";
pub const MOCK_ENDPOINT: &str = "http://mock.local/v1/chat/completions";

/// One `data:` line carrying `content` as the first choice's delta.
pub fn sse_chunk(content: &str) -> String {
    format!(
        "data: {}\n\n",
        serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "delta": {"content": content}}]
        })
    )
}

/// Body streaming `parts` and then the sentinel.
pub fn sse_body(parts: &[&str]) -> String {
    let mut body = sse_body_without_done(parts);
    body.push_str("data: [DONE]\n\n");
    body
}

/// Body streaming `parts` with no sentinel.
pub fn sse_body_without_done(parts: &[&str]) -> String {
    parts.iter().map(|p| sse_chunk(p)).collect()
}

/// A valid config pointing at `endpoint`.
pub fn test_config(endpoint: &str) -> ChatConfig {
    ChatConfig::default()
        .with_endpoint(endpoint)
        .with_api_key(TEST_API_KEY)
        .with_model(TEST_MODEL)
        .with_temperature(0.5)
}

/// An app whose sends are answered by a mock transport.
pub fn mock_app(response: MockResponse) -> (App, Arc<MockHttpClient>) {
    let mock = Arc::new(MockHttpClient::with_default(response));
    let client = CompletionClient::with_http_client(test_config(MOCK_ENDPOINT), mock.clone());
    (App::new(client), mock)
}

/// Type `text` into the input and press Enter.
pub fn send(app: &mut App, text: &str) -> chatdeck::app::SendOutcome {
    app.input = text.to_string();
    app.submit_input()
}

/// Apply stream messages until no send is active.
pub async fn settle(app: &mut App) {
    let mut rx = app.message_rx.take().expect("message receiver already taken");
    while app.is_streaming() {
        let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for stream event")
            .expect("message channel closed");
        app.handle_message(msg);
    }
    app.message_rx = Some(rx);
}

/// Apply exactly one pending stream message.
pub async fn pump_one(app: &mut App) {
    let mut rx = app.message_rx.take().expect("message receiver already taken");
    let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for stream event")
        .expect("message channel closed");
    app.handle_message(msg);
    app.message_rx = Some(rx);
}
