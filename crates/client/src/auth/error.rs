//! Authentication flow errors.

use mofresh_core::ValidationError;
use thiserror::Error;

use crate::error::ApiError;

/// Errors returned by [`AuthFlow`](super::AuthFlow) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Input was rejected before anything was sent; the session is unchanged.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The authenticator failed; the session records the message.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AuthError {
    /// Human-readable message for display.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether the failure happened before dispatch.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
