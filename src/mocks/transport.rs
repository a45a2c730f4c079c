//! Mock HTTP transport for testing.

use crate::error::{PinboardError, TransportError};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

/// Canned HTTP response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl MockResponse {
    /// A response with the given status and body.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// A 200 response with the given body.
    pub fn ok_with_body(body: impl Into<Bytes>) -> Self {
        Self::new(200, body)
    }

    /// A non-success response.
    pub fn error(status: u16, body: impl Into<Bytes>) -> Self {
        Self::new(status, body)
    }

    /// Add a header to the response.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Mock HTTP transport.
///
/// Replays queued responses in order, then falls back to the default
/// response. Every request is recorded.
pub struct MockTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
    default_response: Option<MockResponse>,
}

impl MockTransport {
    /// A transport with nothing to reply; every send fails.
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// A transport replaying `responses` in order.
    pub fn with_responses(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            default_response: None,
        }
    }

    /// A transport answering every request with `response`.
    pub fn with_default(response: MockResponse) -> Self {
        Self {
            default_response: Some(response),
            ..Self::new()
        }
    }

    /// Queue a response.
    pub fn queue_response(&self, response: MockResponse) {
        self.responses.lock().push_back(response);
    }

    /// All recorded requests.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, PinboardError> {
        self.requests.lock().push(request);

        let response = self
            .responses
            .lock()
            .pop_front()
            .or_else(|| self.default_response.clone());

        match response {
            Some(mock) => Ok(HttpResponse {
                status: mock.status,
                headers: mock.headers,
                body: mock.body,
            }),
            None => Err(TransportError::ConnectionFailed {
                message: "no mock response available".to_string(),
            }
            .into()),
        }
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("queued_responses", &self.responses.lock().len())
            .field("recorded_requests", &self.requests.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_responses_replay_in_order() {
        let transport = MockTransport::with_responses(vec![
            MockResponse::ok_with_body("first"),
            MockResponse::error(500, "second"),
        ]);

        let first = transport.send(HttpRequest::get("https://example.com/1")).await.unwrap();
        let second = transport.send(HttpRequest::get("https://example.com/2")).await.unwrap();

        assert_eq!(first.body, Bytes::from("first"));
        assert_eq!(second.status, 500);
        assert_eq!(transport.request_count(), 2);
        assert_eq!(transport.last_request().unwrap().url, "https://example.com/2");
    }

    #[tokio::test]
    async fn test_default_response_and_headers() {
        let transport = MockTransport::with_default(
            MockResponse::ok_with_body("default").with_header("Retry-After", "2"),
        );
        transport.queue_response(MockResponse::ok_with_body("queued"));

        let queued = transport.send(HttpRequest::get("https://example.com")).await.unwrap();
        let fallback = transport.send(HttpRequest::get("https://example.com")).await.unwrap();

        assert_eq!(queued.body, Bytes::from("queued"));
        assert_eq!(fallback.body, Bytes::from("default"));
        assert_eq!(fallback.get_header("retry-after"), Some("2"));
    }

    #[test]
    fn test_response_constructors() {
        let ok = MockResponse::ok_with_body("body");
        assert_eq!(ok.status, 200);
        assert_eq!(ok.body, Bytes::from("body"));

        let created = MockResponse::new(201, "");
        assert_eq!(created.status, 201);
        assert!(created.headers.is_empty());

        assert_eq!(MockResponse::error(503, "").status, 503);
    }

    #[tokio::test]
    async fn test_exhausted_transport_fails() {
        let transport = MockTransport::new();
        let err = transport
            .send(HttpRequest::get("https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PinboardError::Transport(TransportError::ConnectionFailed { .. })
        ));
        assert_eq!(transport.request_count(), 1);
    }
}
