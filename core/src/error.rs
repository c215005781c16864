//! Error types for the fleet API client.
//!
//! # Design
//! Every failure a caller can observe is one variant of `ApiError`. Non-2xx
//! responses and client-side timeouts carry a status so callers can branch on
//! it; transport failures keep the underlying `reqwest::Error` untouched.

use thiserror::Error;

use crate::response::Payload;

/// Status reported for a request cancelled by its own timer.
pub const TIMEOUT_STATUS: u16 = 408;

/// Errors returned by `ApiClient` operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a status outside 200..300. `data` is the
    /// decoded response body (JSON or text). The reason phrase is left out of
    /// the message when the status has none.
    #[error("HTTP {status}{}", reason_suffix(.status_text))]
    Http {
        status: u16,
        status_text: String,
        data: Payload,
    },

    /// No response arrived within the configured window.
    #[error("Request timed out")]
    Timeout,

    /// DNS, connect, TLS or body-read failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The request body could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A JSON response body could not be decoded, or did not match the
    /// expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

fn reason_suffix(status_text: &str) -> String {
    if status_text.is_empty() {
        String::new()
    } else {
        format!(": {status_text}")
    }
}

impl ApiError {
    /// HTTP status associated with the error: the response status for `Http`,
    /// 408 for `Timeout`, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Timeout => Some(TIMEOUT_STATUS),
            _ => None,
        }
    }

    /// Decoded error body of a non-2xx response.
    pub fn data(&self) -> Option<&Payload> {
        match self {
            ApiError::Http { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout)
    }
}
