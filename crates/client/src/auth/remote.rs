//! Authenticator that lets the backend assert identity.

use mofresh_core::{AuthGrant, Email, LoginForm, OtpCode, RegistrationForm};
use secrecy::SecretString;

use super::Authenticator;
use crate::error::ApiError;
use crate::gateway::ApiClient;
use crate::models::{Attachment, RegisterUserRequest};
use crate::services::{LoginRequest, OtpRequest, ResendOtpRequest};

/// Calls `/auth/*` and `/users/register`.
#[derive(Debug, Clone)]
pub struct ApiAuthenticator {
    client: ApiClient,
}

impl ApiAuthenticator {
    /// Authenticate through `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl Authenticator for ApiAuthenticator {
    async fn login(&self, form: &LoginForm) -> Result<AuthGrant, ApiError> {
        let request = LoginRequest {
            email: form.email.as_str().to_owned(),
            password: SecretString::from(form.password.clone()),
        };
        let payload = self.client.auth().login(&request).await?;
        Ok(payload.into_grant())
    }

    async fn register(
        &self,
        form: &RegistrationForm,
        documents: Vec<Attachment>,
    ) -> Result<(), ApiError> {
        let request = RegisterUserRequest {
            documents,
            ..RegisterUserRequest::from_form(form)
        };
        self.client.users().register(&request).await
    }

    async fn verify_otp(&self, email: &Email, code: &OtpCode) -> Result<AuthGrant, ApiError> {
        let request = OtpRequest {
            email: email.as_str().to_owned(),
            otp: code.as_str().to_owned(),
        };
        let payload = self.client.auth().verify_otp(&request).await?;
        Ok(payload.into_grant())
    }

    async fn resend_otp(&self, email: &Email) -> Result<(), ApiError> {
        let request = ResendOtpRequest {
            email: email.as_str().to_owned(),
        };
        self.client.auth().resend_otp(&request).await
    }
}
