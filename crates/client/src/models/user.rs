//! User accounts.

use chrono::{DateTime, Utc};
use mofresh_core::{RegistrationForm, Role, SiteId, UserId};
use reqwest::multipart::Form;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{Attachment, Extra, expose_secret};
use crate::error::ApiError;

/// A user as returned by `/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub site_id: Option<SiteId>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `POST /users/register`.
///
/// Sent as JSON, or as multipart form data when documents are attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Supporting documents (ID, business licence).
    #[serde(skip)]
    pub documents: Vec<Attachment>,
}

impl RegisterUserRequest {
    /// Request body for a validated registration form, without documents.
    #[must_use]
    pub fn from_form(form: &RegistrationForm) -> Self {
        Self {
            full_name: form.full_name.clone(),
            phone: form.phone.clone(),
            email: form.email.as_str().to_owned(),
            password: SecretString::from(form.password.clone()),
            role: None,
            documents: Vec::new(),
        }
    }

    /// Whether the request must go out as multipart.
    #[must_use]
    pub const fn has_attachments(&self) -> bool {
        !self.documents.is_empty()
    }

    /// Encode as multipart form data; each document is a `documents` part.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if a document has a bad MIME type.
    pub fn to_multipart(&self) -> Result<Form, ApiError> {
        let mut form = Form::new()
            .text("fullName", self.full_name.clone())
            .text("phone", self.phone.clone())
            .text("email", self.email.clone())
            .text("password", self.password.expose_secret().to_owned());
        if let Some(role) = self.role {
            form = form.text("role", role.as_str());
        }
        for document in &self.documents {
            form = form.part("documents", document.to_part()?);
        }
        Ok(form)
    }
}

/// Body of `PATCH /users/:id`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<SiteId>,
}
