use mofresh_core::ProductId;
use reqwest::Method;
use tracing::instrument;

use crate::error::ApiError;
use crate::gateway::{Access, ApiClient};
use crate::models::{CreateProductRequest, Product};

/// `/products` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Products<'a> {
    client: &'a ApiClient,
}

impl<'a> Products<'a> {
    /// Create the façade.
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All product listings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let builder = self.client.request(Method::GET, &["products"], Access::Session)?;
        self.client.fetch_list(builder).await
    }

    /// Create a listing. Multipart when an image is attached.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self, request), fields(name = %request.name, image = request.image.is_some()))]
    pub async fn create(&self, request: &CreateProductRequest) -> Result<Product, ApiError> {
        let builder = self.client.request(Method::POST, &["products"], Access::Session)?;
        let builder = if request.image.is_some() {
            builder.multipart(request.to_multipart()?)
        } else {
            builder.json(request)
        };
        self.client.fetch(builder).await
    }

    /// Delete a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<(), ApiError> {
        let builder = self
            .client
            .request(Method::DELETE, &["products", id.as_str()], Access::Session)?;
        self.client.send(builder).await
    }
}
