//! HTTP transport layer for Pinboard requests.
//!
//! The services only need to issue GET requests and read back a status,
//! headers and body. [`HttpTransport`] captures that capability so callers
//! can share one connection pool between clients or substitute a double in
//! tests.

use crate::error::{PinboardError, TransportError};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;

/// HTTP request to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: String,
    /// Request URL including the query string.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Create a new HTTP request.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Look up a query parameter in the request URL.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let url = url::Url::parse(&self.url).ok()?;
        let value = url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned());
        value
    }
}

/// HTTP response received.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value by name (case-insensitive).
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The `Retry-After` hint, when given in seconds.
    pub fn retry_after(&self) -> Option<Duration> {
        self.get_header("retry-after")
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_secs)
    }

    /// Get the content type.
    pub fn content_type(&self) -> Option<&str> {
        self.get_header("content-type")
    }
}

/// HTTP transport trait for making requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request and return the response.
    ///
    /// Any status is a successful send; only failures to complete the
    /// exchange are errors.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, PinboardError>;
}

/// Default HTTP transport using reqwest.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a new transport with default settings.
    pub fn new() -> Result<Self, PinboardError> {
        Self::builder().build()
    }

    /// Wrap an existing reqwest client, sharing its connection pool.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Create a transport builder.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, PinboardError> {
        let method = request.method.parse::<reqwest::Method>().map_err(|e| {
            PinboardError::Transport(TransportError::InvalidUrl {
                message: format!("Invalid HTTP method: {}", e),
            })
        })?;

        let mut req_builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        let response = req_builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                map_reqwest_error(e)
            } else {
                PinboardError::Transport(TransportError::ConnectionFailed {
                    message: format!("Failed to read response body: {}", e.without_url()),
                })
            }
        })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

// reqwest includes the full URL in its messages; strip it so the auth token
// never ends up in an error string.
fn map_reqwest_error(e: reqwest::Error) -> PinboardError {
    let is_timeout = e.is_timeout();
    let is_builder = e.is_builder();
    let message = e.without_url().to_string();
    if is_timeout {
        PinboardError::Transport(TransportError::Timeout { message })
    } else if is_builder {
        PinboardError::Transport(TransportError::InvalidUrl { message })
    } else {
        PinboardError::Transport(TransportError::ConnectionFailed { message })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

/// Builder for reqwest transport.
pub struct ReqwestTransportBuilder {
    connect_timeout: Duration,
    read_timeout: Duration,
    pool_max_idle_per_host: usize,
    pool_idle_timeout: Option<Duration>,
    verify_ssl: bool,
    user_agent: String,
}

impl ReqwestTransportBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 10,
            pool_idle_timeout: Some(Duration::from_secs(90)),
            verify_ssl: true,
            user_agent: crate::config::DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the maximum idle connections per host.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Set the idle connection timeout.
    pub fn pool_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set whether to verify SSL certificates.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the transport.
    pub fn build(self) -> Result<ReqwestTransport, PinboardError> {
        let client = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.read_timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .pool_idle_timeout(self.pool_idle_timeout)
            .danger_accept_invalid_certs(!self.verify_ssl)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| {
                PinboardError::Transport(TransportError::Client {
                    message: e.to_string(),
                })
            })?;

        Ok(ReqwestTransport { client })
    }
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
