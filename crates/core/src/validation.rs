//! Input checks that run before any request is dispatched.
//!
//! A failure here never touches the session: the caller shows the message
//! next to the form and nothing else happens.

use thiserror::Error;

use crate::types::{Email, EmailError};

/// Problems with user input, detected client-side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The email address is malformed.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The OTP code does not have the expected number of characters.
    #[error("verification code must be {expected} characters (got {actual})")]
    InvalidOtpLength {
        /// Required length.
        expected: usize,
        /// Length of the submitted code.
        actual: usize,
    },

    /// OTP verification or resend was requested with no registration pending.
    #[error("no registration is awaiting verification")]
    NoPendingVerification,
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

/// Validated login input.
#[derive(Clone)]
pub struct LoginForm {
    /// Account email.
    pub email: Email,
    /// Password exactly as typed.
    pub password: String,
}

impl LoginForm {
    /// Check that both fields are present and the email is well formed.
    ///
    /// The password is not trimmed; only blankness is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for a blank field and
    /// [`ValidationError::InvalidEmail`] for a malformed address.
    pub fn parse(email: &str, password: &str) -> Result<Self, ValidationError> {
        let email = required(email, "email")?;
        required(password, "password")?;

        Ok(Self {
            email: Email::parse(email)?,
            password: password.to_owned(),
        })
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Validated registration input.
#[derive(Clone)]
pub struct RegistrationForm {
    /// Display name.
    pub full_name: String,
    /// Contact phone number, as typed.
    pub phone: String,
    /// Account email; becomes the pending OTP address.
    pub email: Email,
    /// Chosen password.
    pub password: String,
}

impl RegistrationForm {
    /// Check that every field is present and the email is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming the first blank field,
    /// or [`ValidationError::InvalidEmail`].
    pub fn parse(
        full_name: &str,
        phone: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, ValidationError> {
        let full_name = required(full_name, "full name")?.to_owned();
        let phone = required(phone, "phone")?.to_owned();
        let email = Email::parse(required(email, "email")?)?;
        required(password, "password")?;

        Ok(Self {
            full_name,
            phone,
            email,
            password: password.to_owned(),
        })
    }
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("full_name", &self.full_name)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A one-time passcode as submitted by the user.
///
/// Only the length is checked; the backend decides whether the code is right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Number of characters in a MoFresh verification code.
    pub const LENGTH: usize = 6;

    /// Accept a code of exactly [`OtpCode::LENGTH`] characters, ignoring
    /// surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidOtpLength`] for any other length.
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        let actual = code.chars().count();
        if actual != Self::LENGTH {
            return Err(ValidationError::InvalidOtpLength {
                expected: Self::LENGTH,
                actual,
            });
        }
        Ok(Self(code.to_owned()))
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
