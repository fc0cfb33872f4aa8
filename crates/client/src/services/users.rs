use mofresh_core::UserId;
use reqwest::Method;
use tracing::instrument;

use crate::error::ApiError;
use crate::gateway::{Access, ApiClient};
use crate::models::{RegisterUserRequest, UpdateUserRequest, User};

/// `/users` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    client: &'a ApiClient,
}

impl<'a> Users<'a> {
    /// Create the façade.
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Register an account. Multipart when documents are attached.
    ///
    /// Only the status matters: the backend may answer with an empty body or
    /// any acknowledgement, and the code arrives by email.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self, request), fields(email = %request.email, documents = request.documents.len()))]
    pub async fn register(
        &self,
        request: &RegisterUserRequest,
    ) -> Result<(), ApiError> {
        let builder = self
            .client
            .request(Method::POST, &["users", "register"], Access::Public)?;
        let builder = if request.has_attachments() {
            builder.multipart(request.to_multipart()?)
        } else {
            builder.json(request)
        };
        self.client.send(builder).await
    }

    /// Fetch one user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is not a user.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get(&self, id: &UserId) -> Result<User, ApiError> {
        let builder = self
            .client
            .request(Method::GET, &["users", id.as_str()], Access::Session)?;
        self.client.fetch(builder).await
    }

    /// Update fields of a user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self, request), fields(user_id = %id))]
    pub async fn update(&self, id: &UserId, request: &UpdateUserRequest) -> Result<User, ApiError> {
        let builder = self
            .client
            .request(Method::PATCH, &["users", id.as_str()], Access::Session)?
            .json(request);
        self.client.fetch(builder).await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete(&self, id: &UserId) -> Result<(), ApiError> {
        let builder = self
            .client
            .request(Method::DELETE, &["users", id.as_str()], Access::Session)?;
        self.client.send(builder).await
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let builder = self.client.request(Method::GET, &["users"], Access::Session)?;
        self.client.fetch_list(builder).await
    }
}
