//! Backend authentication endpoints.

use mofresh_core::{AuthGrant, AuthToken, Email, Role, SessionUser};
use reqwest::Method;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::error::ApiError;
use crate::gateway::{Access, ApiClient};
use crate::models::expose_secret;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

/// Body of `POST /auth/verify-otp`.
#[derive(Debug, Clone, Serialize)]
pub struct OtpRequest {
    pub email: String,
    pub otp: String,
}

/// Body of `POST /auth/resend-otp`.
#[derive(Debug, Clone, Serialize)]
pub struct ResendOtpRequest {
    pub email: String,
}

/// Token and user returned by login and OTP verification.
///
/// Backends disagree on the token field name, so the common spellings are all
/// accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    #[serde(alias = "access_token", alias = "token")]
    pub access_token: AuthToken,
    pub user: AuthUser,
}

/// User portion of [`AuthPayload`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub email: Email,
    #[serde(default, alias = "name")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, alias = "siteName")]
    pub location: Option<String>,
}

impl AuthPayload {
    /// Session credentials carried by this payload.
    #[must_use]
    pub fn into_grant(self) -> AuthGrant {
        let user = self.user;
        if user.role == Role::Unknown {
            warn!(email = %user.email, "Backend returned an unrecognized role; treating as buyer dashboard");
        }
        let name = user
            .full_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| user.email.local_part().to_owned());

        AuthGrant {
            user: SessionUser {
                email: user.email,
                name,
                role: user.role,
                location: user.location,
            },
            token: self.access_token,
        }
    }
}

/// `/auth` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    /// Create the façade.
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the credentials are
    /// rejected.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ApiError> {
        let builder = self
            .client
            .request(Method::POST, &["auth", "login"], Access::Public)?
            .json(request);
        self.client.fetch(builder).await
    }

    /// Submit the code sent after registration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the code is rejected.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn verify_otp(&self, request: &OtpRequest) -> Result<AuthPayload, ApiError> {
        let builder = self
            .client
            .request(Method::POST, &["auth", "verify-otp"], Access::Public)?
            .json(request);
        self.client.fetch(builder).await
    }

    /// Ask for a new code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn resend_otp(&self, request: &ResendOtpRequest) -> Result<(), ApiError> {
        let builder = self
            .client
            .request(Method::POST, &["auth", "resend-otp"], Access::Public)?
            .json(request);
        self.client.send(builder).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_token_aliases() {
        for key in ["accessToken", "access_token", "token"] {
            let body = format!(
                r#"{{"{key}":"jwt-1","user":{{"email":"kigali@mofresh.rw","fullName":"Kigali Hub","role":"SITE_MANAGER","location":"Kigali"}}}}"#
            );
            let grant = serde_json::from_str::<AuthPayload>(&body).unwrap().into_grant();
            assert_eq!(grant.token.expose(), "jwt-1", "key: {key}");
            assert_eq!(grant.user.role, Role::SiteManager);
            assert_eq!(grant.user.location.as_deref(), Some("Kigali"));
            assert_eq!(grant.user.name, "Kigali Hub");
        }
    }

    #[test]
    fn test_payload_name_falls_back_to_local_part() {
        let payload: AuthPayload = serde_json::from_str(
            r#"{"accessToken":"t","user":{"email":"jean@mofresh.rw","role":"AUDITOR"}}"#,
        )
        .unwrap();
        let grant = payload.into_grant();
        assert_eq!(grant.user.name, "jean");
        assert_eq!(grant.user.role, Role::Unknown);
    }

    #[test]
    fn test_login_body() {
        let request = LoginRequest {
            email: "admin@mofresh.rw".to_string(),
            password: SecretString::from("pw".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"email":"admin@mofresh.rw","password":"pw"}"#
        );
    }
}
