//! Normalized gateway error.
//!
//! Every façade method returns [`ApiError`]. Transport errors from `reqwest`
//! are logged where they happen and converted to a message; callers never see
//! transport types.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Shown when neither the transport nor the response body says anything
/// useful.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Errors that can occur when calling the MoFresh API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Response {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the body, or [`NETWORK_ERROR_MESSAGE`].
        message: String,
    },

    /// The request never produced a response.
    #[error("{0}")]
    Network(String),

    /// A 2xx body could not be decoded into the expected type.
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// The request could not be built, e.g. an attachment with a bad MIME type.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build the error for a non-2xx response from its status and raw body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Response {
            status,
            message: extract_message(body).unwrap_or_else(|| NETWORK_ERROR_MESSAGE.to_string()),
        }
    }

    /// Generic network failure.
    #[must_use]
    pub fn network() -> Self {
        Self::Network(NETWORK_ERROR_MESSAGE.to_string())
    }

    /// Human-readable message for display.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status, when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Error body shapes the backend produces.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// Pull a display message out of an error body.
///
/// Understands `{"message": "..."}`, `{"message": ["...", "..."]}` (validation
/// errors, joined with `; `) and `{"error": "..."}`.
fn extract_message(body: &str) -> Option<String> {
    let body: ErrorBody = serde_json::from_str(body).ok()?;
    body.message
        .as_ref()
        .and_then(message_text)
        .or_else(|| body.error.as_ref().and_then(message_text))
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}
