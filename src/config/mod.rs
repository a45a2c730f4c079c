//! Configuration types for the Pinboard client.
//!
//! This module provides the `PinboardConfig` type: the auth token, the API
//! base URL and the settings of the default HTTP transport.

use crate::error::{ConfigurationError, PinboardError, TransportError};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.pinboard.in/v1/";

/// Environment variable holding the auth token (`user:TOKEN`).
pub const ENV_API_TOKEN: &str = "PINBOARD_API_TOKEN";

/// Environment variable overriding the API root.
pub const ENV_BASE_URL: &str = "PINBOARD_BASE_URL";

/// Environment variable overriding the read timeout, in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "PINBOARD_TIMEOUT_MS";

/// Query parameter carrying the auth token.
pub const AUTH_TOKEN_PARAM: &str = "auth_token";

/// User agent sent by the default transport.
pub const DEFAULT_USER_AGENT: &str = concat!("pinboard-integration/", env!("CARGO_PKG_VERSION"));

/// Configuration for the Pinboard client.
#[derive(Clone)]
pub struct PinboardConfig {
    /// API token, sent with every request.
    pub auth_token: SecretString,

    /// API root; always ends with `/`.
    pub base_url: Url,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Read timeout for a whole request.
    pub read_timeout: Duration,

    /// Maximum idle connections kept per host.
    pub max_connections: u32,

    /// Idle connection timeout.
    pub idle_timeout: Duration,

    /// Verify SSL certificates.
    pub verify_ssl: bool,

    /// User-Agent header value.
    pub user_agent: String,
}

impl std::fmt::Debug for PinboardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinboardConfig")
            .field("auth_token", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("max_connections", &self.max_connections)
            .field("idle_timeout", &self.idle_timeout)
            .field("verify_ssl", &self.verify_ssl)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl PinboardConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PinboardConfigBuilder {
        PinboardConfigBuilder::default()
    }

    /// Create a configuration with default settings for the given token.
    pub fn new(auth_token: impl Into<String>) -> Result<Self, PinboardError> {
        Self::builder().auth_token(auth_token).build()
    }

    /// The user part of the token, safe to log.
    pub fn username(&self) -> Option<&str> {
        self.auth_token
            .expose_secret()
            .split_once(':')
            .map(|(user, _)| user)
    }

    /// Build the full URL for an API path with its parameters and the token.
    pub fn request_url(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Url, PinboardError> {
        let mut url = self.base_url.join(path).map_err(|e| {
            PinboardError::Transport(TransportError::InvalidUrl {
                message: format!("cannot join '{}' to base URL: {}", path, e),
            })
        })?;
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in params {
                query.append_pair(name, value);
            }
            query.append_pair(AUTH_TOKEN_PARAM, self.auth_token.expose_secret());
        }
        Ok(url)
    }
}

/// Builder for Pinboard configuration.
#[derive(Default)]
pub struct PinboardConfigBuilder {
    auth_token: Option<String>,
    base_url: Option<String>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    max_connections: Option<u32>,
    idle_timeout: Option<Duration>,
    verify_ssl: Option<bool>,
    user_agent: Option<String>,
    env_error: Option<ConfigurationError>,
}

impl PinboardConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the auth token.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set a custom API root (for proxies and test servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    pub fn max_connections(mut self, connections: u32) -> Self {
        self.max_connections = Some(connections);
        self
    }

    /// Set the idle connection timeout.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Enable or disable SSL verification.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = Some(verify);
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `PINBOARD_API_TOKEN`, `PINBOARD_BASE_URL` and
    /// `PINBOARD_TIMEOUT_MS`. Values already set on the builder win.
    pub fn from_env(self) -> Self {
        self.from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.auth_token.is_none() {
            self.auth_token = lookup(ENV_API_TOKEN);
        }
        if self.base_url.is_none() {
            self.base_url = lookup(ENV_BASE_URL);
        }
        if self.read_timeout.is_none() {
            if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
                match raw.trim().parse() {
                    Ok(ms) => self.read_timeout = Some(Duration::from_millis(ms)),
                    Err(_) => {
                        self.env_error = Some(ConfigurationError::InvalidConfiguration {
                            field: ENV_TIMEOUT_MS.to_string(),
                            message: format!("'{}' is not a number of milliseconds", raw),
                        })
                    }
                }
            }
        }
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<PinboardConfig, PinboardError> {
        if let Some(error) = self.env_error {
            return Err(error.into());
        }

        let auth_token = match self.auth_token {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => return Err(ConfigurationError::MissingAuthToken.into()),
        };

        let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let read_timeout = self.read_timeout.unwrap_or(Duration::from_secs(30));
        if read_timeout.is_zero() {
            return Err(ConfigurationError::InvalidConfiguration {
                field: "read_timeout".to_string(),
                message: "must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(PinboardConfig {
            auth_token: SecretString::new(auth_token),
            base_url,
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(5)),
            read_timeout,
            max_connections: self.max_connections.unwrap_or(10),
            idle_timeout: self.idle_timeout.unwrap_or(Duration::from_secs(90)),
            verify_ssl: self.verify_ssl.unwrap_or(true),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

// `Url::join` drops the last path segment unless the base ends with '/'.
fn parse_base_url(raw: &str) -> Result<Url, PinboardError> {
    let invalid = |details: String| ConfigurationError::InvalidBaseUrl {
        url: raw.to_string(),
        details,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https".to_string()).into());
    }
    if url.query().is_some() {
        return Err(invalid("base URL cannot carry a query string".to_string()).into());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
