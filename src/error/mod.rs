//! Error types for the Pinboard client.
//!
//! Errors are grouped by where they originate: local configuration and
//! argument validation, the HTTP transport, the service itself (a 2xx
//! response whose payload reports a failure), and response decoding.
//! `PinboardError` wraps one of each so callers can match on the category
//! through [`PinboardError::kind`] instead of inspecting message text.

pub(crate) mod mapping;

pub use mapping::{classify_response, expect_acknowledgment, map_http_status};

use std::time::Duration;
use thiserror::Error;

/// Top-level error type for the Pinboard client.
#[derive(Debug, Error)]
pub enum PinboardError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Invalid arguments rejected before any request was sent.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Network failures and non-success HTTP statuses.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Failure reported by the service in a successful HTTP response.
    ///
    /// Displays the service's text verbatim.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The response body could not be decoded.
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),
}

/// Coarse error category, for branching without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Client configuration is unusable.
    Configuration,
    /// A caller-supplied argument was rejected locally.
    Validation,
    /// The HTTP exchange failed.
    Transport,
    /// The service rejected the operation.
    Service,
    /// The payload was malformed.
    Parse,
}

impl PinboardError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PinboardError::Configuration(_) => ErrorKind::Configuration,
            PinboardError::Validation(_) => ErrorKind::Validation,
            PinboardError::Transport(_) => ErrorKind::Transport,
            PinboardError::Service(_) => ErrorKind::Service,
            PinboardError::Response(_) => ErrorKind::Parse,
        }
    }

    /// Returns true if the service itself reported the failure.
    pub fn is_service_error(&self) -> bool {
        matches!(self, PinboardError::Service(_))
    }

    /// Returns the HTTP status code if the failure came from one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PinboardError::Transport(TransportError::HttpStatus { status, .. }) => Some(*status),
            PinboardError::Transport(TransportError::Unauthorized) => Some(401),
            PinboardError::Transport(TransportError::RateLimited { .. }) => Some(429),
            _ => None,
        }
    }

    /// Returns the service-provided message for service errors.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            PinboardError::Service(e) => Some(e.message()),
            _ => None,
        }
    }
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// No auth token was provided.
    #[error("Missing auth token: set it on the builder or via PINBOARD_API_TOKEN")]
    MissingAuthToken,

    /// Invalid base URL.
    #[error("Invalid base URL '{url}': {details}")]
    InvalidBaseUrl {
        /// The invalid URL.
        url: String,
        /// Details about the validation error.
        details: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfiguration {
        /// The configuration field name.
        field: String,
        /// Error message.
        message: String,
    },
}

/// Argument validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required argument was empty.
    #[error("Missing required argument '{name}'")]
    MissingArgument {
        /// The argument name.
        name: &'static str,
    },

    /// Too many tags in a filter.
    #[error("Too many tags: {count} given, at most {max} allowed")]
    TooManyTags {
        /// Number of tags supplied.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A tag cannot be sent to the service.
    #[error("Invalid tag '{tag}': {reason}")]
    InvalidTag {
        /// The offending tag.
        tag: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Argument with characters the service cannot accept.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// The argument name.
        name: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Numeric argument outside its accepted range.
    #[error("Argument '{name}' out of range: {value} not in {min}..={max}")]
    OutOfRange {
        /// The argument name.
        name: &'static str,
        /// The supplied value.
        value: u64,
        /// Inclusive lower bound.
        min: u64,
        /// Inclusive upper bound.
        max: u64,
    },

    /// String argument longer than the service accepts.
    #[error("Argument '{name}' too long: {length} characters exceeds {max}")]
    TooLong {
        /// The argument name.
        name: &'static str,
        /// Supplied length in characters.
        length: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// A date range whose start is after its end.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// Range start.
        from: String,
        /// Range end.
        to: String,
    },
}

/// Network and HTTP-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Non-success HTTP status.
    #[error("HTTP {status}: {reason}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// The service rejected the auth token.
    #[error("Unauthorized: the auth token was rejected")]
    Unauthorized,

    /// Too many requests.
    #[error("Rate limited by the service")]
    RateLimited {
        /// Retry hint from the `Retry-After` header.
        retry_after: Option<Duration>,
    },

    /// Connection failed.
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message.
        message: String,
    },

    /// Request timed out.
    #[error("Request timed out: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {message}")]
    Client {
        /// Error message.
        message: String,
    },

    /// A request URL could not be built.
    #[error("Invalid request URL: {message}")]
    InvalidUrl {
        /// Error message.
        message: String,
    },
}

/// A logical failure reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    message: String,
}

impl ServiceError {
    /// Create a service error from the service's own text.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The service-provided message, verbatim.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Response decoding errors.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// A successful response carried no body.
    #[error("Empty response body")]
    EmptyBody,

    /// XML parse error.
    #[error("XML parse error: {message}")]
    XmlParse {
        /// Error message.
        message: String,
    },

    /// The document root was not what the operation expects.
    #[error("Unexpected root element: expected <{expected}>, got <{actual}>")]
    UnexpectedRoot {
        /// Expected element name.
        expected: &'static str,
        /// Actual element name.
        actual: String,
    },

    /// Missing required attribute.
    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Missing required child element.
    #[error("Missing element <{child}> in <{element}>")]
    MissingElement {
        /// Parent element name.
        element: String,
        /// Missing child name.
        child: String,
    },

    /// A value could not be coerced to its field type.
    #[error("Invalid value '{value}' for '{field}': expected {expected}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Raw value.
        value: String,
        /// Description of the expected format.
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_displays_verbatim() {
        let err = PinboardError::from(ServiceError::new("item not found"));
        assert_eq!(err.to_string(), "item not found");
        assert_eq!(err.service_message(), Some("item not found"));
        assert!(err.is_service_error());
    }

    #[test]
    fn test_error_kinds() {
        let validation = PinboardError::from(ValidationError::MissingArgument { name: "url" });
        assert_eq!(validation.kind(), ErrorKind::Validation);

        let parse = PinboardError::from(ResponseError::EmptyBody);
        assert_eq!(parse.kind(), ErrorKind::Parse);

        let service = PinboardError::from(ServiceError::new("missing url"));
        assert_eq!(service.kind(), ErrorKind::Service);
        assert_ne!(parse.kind(), service.kind());
    }

    #[test]
    fn test_status_code() {
        let status = PinboardError::from(TransportError::HttpStatus {
            status: 500,
            reason: "Internal Server Error".into(),
        });
        assert_eq!(status.status_code(), Some(500));

        let limited = PinboardError::from(TransportError::RateLimited { retry_after: None });
        assert_eq!(limited.status_code(), Some(429));

        let timeout = PinboardError::from(TransportError::Timeout {
            message: "deadline".into(),
        });
        assert_eq!(timeout.status_code(), None);
    }
}
