//! Mock HTTP client for testing.
//!
//! Returns scripted byte streams and records every request so tests can
//! assert on what was sent.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: String,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Fail before any chunk is produced
    Error(HttpError),
    /// Yield these chunks, then end the body
    Stream(Vec<Bytes>),
    /// Yield these chunks, then fail the read
    StreamThenError(Vec<Bytes>, HttpError),
    /// Yield these chunks, then never produce anything again
    StreamThenHang(Vec<Bytes>),
}

impl MockResponse {
    /// Convenience for a body made of string chunks.
    pub fn chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockResponse::Stream(to_bytes(chunks))
    }
}

fn to_bytes<I, S>(chunks: I) -> Vec<Bytes>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    chunks.into_iter().map(|c| Bytes::from(c.into())).collect()
}

/// Mock HTTP client for testing.
///
/// ```ignore
/// let client = MockHttpClient::new();
/// client.set_default_response(MockResponse::chunks(["data: [DONE]\n"]));
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a client answering every URL with `response`.
    pub fn with_default(response: MockResponse) -> Self {
        let client = Self::new();
        client.set_default_response(response);
        client
    }

    /// Set a response for a specific URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }
        self.default_response.lock().unwrap().clone()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });

        match self.get_response(url) {
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Stream(chunks)) => {
                Ok(Box::pin(stream::iter(chunks.into_iter().map(Ok))))
            }
            Some(MockResponse::StreamThenError(chunks, err)) => {
                let head = stream::iter(chunks.into_iter().map(Ok));
                let tail = stream::once(async move { Err(err) });
                Ok(Box::pin(head.chain(tail)))
            }
            Some(MockResponse::StreamThenHang(chunks)) => {
                let head = stream::iter(chunks.into_iter().map(Ok));
                Ok(Box::pin(head.chain(stream::pending())))
            }
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stream_yields_chunks_and_records_request() {
        let client = MockHttpClient::with_default(MockResponse::chunks(["a", "b"]));

        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), "Bearer k".to_string());
        let body = client
            .post_stream("http://x/chat", r#"{"q":1}"#, &headers)
            .await
            .unwrap();
        let chunks: Vec<_> = body.collect().await;

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], Ok(Bytes::from("a")));

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].json()["q"], 1);
        assert_eq!(requests[0].headers["Authorization"], "Bearer k");
    }

    #[tokio::test]
    async fn test_stream_then_error() {
        let client = MockHttpClient::with_default(MockResponse::StreamThenError(
            vec![Bytes::from("a")],
            HttpError::Io("reset".to_string()),
        ));
        let body = client.post_stream("http://x", "{}", &Headers::new()).await.unwrap();
        let chunks: Vec<_> = body.collect().await;
        assert_eq!(chunks.len(), 2);
        assert!(chunks[1].is_err());
    }

    #[tokio::test]
    async fn test_error_before_stream() {
        let client = MockHttpClient::with_default(MockResponse::Error(HttpError::ServerError {
            status: 500,
            message: "down".to_string(),
        }));
        let result = client.post_stream("http://x", "{}", &Headers::new()).await;
        assert!(result.is_err());
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_response_is_error() {
        let client = MockHttpClient::new();
        let result = client.post_stream("http://x", "{}", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }
}
