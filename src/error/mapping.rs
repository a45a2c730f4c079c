//! Classification of HTTP responses into success trees or typed errors.

use super::*;
use crate::transport::HttpResponse;
use crate::xml::{self, XmlNode};

/// Code the service uses to acknowledge a successful mutation.
const ACK_CODE: &str = "done";

/// Root element the service uses for operation results.
const RESULT_ELEMENT: &str = "result";

/// Classify a response and return its parsed tree on success.
///
/// In order: a non-2xx status is a transport error and the body is not
/// read; an empty body is a parse error; a body that fails to parse is a
/// parse error; a `<result>` root whose code is not `done` is a service
/// error carrying the service's text.
pub fn classify_response(response: &HttpResponse) -> Result<XmlNode, PinboardError> {
    if !response.is_success() {
        return Err(map_http_status(response.status, response.retry_after()));
    }

    let body = std::str::from_utf8(&response.body).map_err(|e| {
        PinboardError::Response(ResponseError::XmlParse {
            message: format!("body is not valid UTF-8: {}", e),
        })
    })?;
    if body.trim().is_empty() {
        return Err(PinboardError::Response(ResponseError::EmptyBody));
    }

    let root = xml::parse_document(body)?;
    if let Some(message) = service_failure(&root) {
        return Err(PinboardError::Service(ServiceError::new(message)));
    }
    Ok(root)
}

/// Require a `done` acknowledgment from a mutating operation.
pub fn expect_acknowledgment(root: &XmlNode) -> Result<(), PinboardError> {
    if root.name != RESULT_ELEMENT {
        return Err(PinboardError::Response(ResponseError::UnexpectedRoot {
            expected: RESULT_ELEMENT,
            actual: root.name.clone(),
        }));
    }
    match service_failure(root) {
        Some(message) => Err(PinboardError::Service(ServiceError::new(message))),
        None => Ok(()),
    }
}

/// Map an HTTP status code to a transport error.
pub fn map_http_status(status: u16, retry_after: Option<Duration>) -> PinboardError {
    let error = match status {
        401 => TransportError::Unauthorized,
        429 => TransportError::RateLimited { retry_after },
        _ => TransportError::HttpStatus {
            status,
            reason: reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown Status")
                .to_string(),
        },
    };
    PinboardError::Transport(error)
}

/// The service's failure text, if `root` is a `<result>` that is not `done`.
///
/// The service encodes results either as `<result code="..."/>` or as
/// `<result>...</result>`; the attribute wins when both are present.
fn service_failure(root: &XmlNode) -> Option<String> {
    if root.name != RESULT_ELEMENT {
        return None;
    }
    let message = match root.attr("code") {
        Some(code) => code.to_string(),
        None => root.text.as_deref().unwrap_or_default().trim().to_string(),
    };
    if message == ACK_CODE {
        None
    } else if message.is_empty() {
        Some("unknown error".to_string())
    } else {
        Some(message)
    }
}
