//! Crate-level error type for the D-API client.

use serde_json::Value;
use thiserror::Error;

use crate::client::ResponseBody;

/// Alias for `Result<T, DApiError>`.
pub type DApiResult<T> = Result<T, DApiError>;

/// Uniform error type used across the crate.
///
/// Failures reported by the API over HTTP (a non-2xx status) are normalized
/// into [`DApiError::Api`]; a fired deadline becomes [`DApiError::Timeout`].
/// Network-level failures (DNS, connection refused, TLS) are **not**
/// normalized — they pass through unchanged as [`DApiError::Http`], so
/// callers can still reach the underlying `reqwest::Error`. [`status`]
/// returns `Some` exactly for the normalized shapes.
///
/// [`status`]: DApiError::status
#[derive(Debug, Error)]
pub enum DApiError {
    /// Invalid configuration, detected at construction time.
    #[error("{0}")]
    Config(String),

    /// The exchange did not complete within the configured window.
    #[error("Request timed out")]
    Timeout,

    /// The API answered with a non-2xx status.
    #[error("{message}")]
    Api {
        /// HTTP status of the response.
        status: u16,
        /// The error body's `error` field, or a generic fallback.
        message: String,
        /// Numeric error code from the body, when the API sent one.
        code: Option<i64>,
        /// The decoded error body (a JSON value, or a string for text bodies).
        payload: Option<Value>,
    },

    /// A response body could not be decoded into the requested type.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request URL could not be built from the base URL and path.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Network-level failure from the HTTP stack, passed through unchanged.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl DApiError {
    /// HTTP-like status code for normalized failures.
    ///
    /// `Some(408)` for timeouts, the response status for API errors, `None`
    /// for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Timeout => Some(408),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build the normalized error for a non-2xx response.
    ///
    /// The message comes from the decoded body's `error` field when it is a
    /// string, falling back to `"Request failed with status <status>"`. The
    /// body's numeric `code` field is carried when present, and the full
    /// decoded body is attached as the payload.
    pub fn from_api_response(status: u16, body: ResponseBody) -> Self {
        let payload = match body {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => Value::String(text),
        };

        let message = payload
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        let code = payload.get("code").and_then(Value::as_i64);

        Self::Api {
            status,
            message,
            code,
            payload: Some(payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_api_response_error_field() {
        let body = ResponseBody::Json(json!({ "error": "not found" }));
        let err = DApiError::from_api_response(404, body);

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "not found");
        match err {
            DApiError::Api { payload, .. } => {
                assert_eq!(payload, Some(json!({ "error": "not found" })));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_api_response_fallback_message() {
        let body = ResponseBody::Text("internal server error".to_string());
        let err = DApiError::from_api_response(500, body);

        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[test]
    fn test_from_api_response_non_string_error_field() {
        // An `error` field that is not a string does not become the message.
        let body = ResponseBody::Json(json!({ "error": { "detail": "boom" } }));
        let err = DApiError::from_api_response(422, body);

        assert_eq!(err.to_string(), "Request failed with status 422");
    }

    #[test]
    fn test_from_api_response_numeric_code() {
        let body = ResponseBody::Json(json!({ "error": "session limit reached", "code": 4009 }));
        let err = DApiError::from_api_response(403, body);

        match err {
            DApiError::Api { code, .. } => assert_eq!(code, Some(4009)),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_timeout_surface() {
        let err = DApiError::Timeout;
        assert_eq!(err.status(), Some(408));
        assert_eq!(err.to_string(), "Request timed out");
    }

    #[test]
    fn test_config_error_has_no_status() {
        let err = DApiError::Config("API key is required".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "API key is required");
    }
}
