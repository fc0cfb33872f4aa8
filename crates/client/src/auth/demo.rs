//! Local authenticator backed by the demo identity directory.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use mofresh_core::directory;
use mofresh_core::{AuthGrant, AuthToken, Email, LoginForm, OtpCode, RegistrationForm};
use tracing::{debug, instrument};

use super::Authenticator;
use crate::error::ApiError;
use crate::models::Attachment;

/// Resolves identity from the email alone and never touches the network.
///
/// Registration remembers the full name so the verified session shows it.
/// Any well-formed code verifies.
#[derive(Debug, Default)]
pub struct DemoAuthenticator {
    registrations: Mutex<HashMap<String, String>>,
}

impl DemoAuthenticator {
    /// A demo authenticator with no registrations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn grant(&self, email: &Email) -> AuthGrant {
        let mut user = directory::resolve(email);
        let registrations = self
            .registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(name) = registrations.get(email.as_str()) {
            user.name.clone_from(name);
        }

        AuthGrant {
            token: AuthToken::new(format!("demo.{}", email.as_str())),
            user,
        }
    }
}

impl Authenticator for DemoAuthenticator {
    #[instrument(skip(self, form), fields(email = %form.email))]
    async fn login(&self, form: &LoginForm) -> Result<AuthGrant, ApiError> {
        let grant = self.grant(&form.email);
        debug!(role = %grant.user.role, "Resolved demo identity");
        Ok(grant)
    }

    #[instrument(skip(self, form, documents), fields(email = %form.email, documents = documents.len()))]
    async fn register(
        &self,
        form: &RegistrationForm,
        documents: Vec<Attachment>,
    ) -> Result<(), ApiError> {
        let mut registrations = self
            .registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        registrations.insert(form.email.as_str().to_owned(), form.full_name.clone());
        Ok(())
    }

    #[instrument(skip(self, _code), fields(email = %email))]
    async fn verify_otp(&self, email: &Email, _code: &OtpCode) -> Result<AuthGrant, ApiError> {
        Ok(self.grant(email))
    }

    #[instrument(skip(self), fields(email = %email))]
    async fn resend_otp(&self, email: &Email) -> Result<(), ApiError> {
        debug!("Demo mode: no code is sent");
        Ok(())
    }
}
