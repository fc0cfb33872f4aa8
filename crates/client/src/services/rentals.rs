use mofresh_core::RentalId;
use reqwest::Method;
use tracing::instrument;

use crate::error::ApiError;
use crate::gateway::{Access, ApiClient};
use crate::models::{CreateRentalRequest, Rental};

/// `/rentals` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Rentals<'a> {
    client: &'a ApiClient,
}

impl<'a> Rentals<'a> {
    /// Create the façade.
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All rentals visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Rental>, ApiError> {
        let builder = self.client.request(Method::GET, &["rentals"], Access::Session)?;
        self.client.fetch_list(builder).await
    }

    /// Request a rental.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self, request), fields(kind = ?request.asset_type))]
    pub async fn create(&self, request: &CreateRentalRequest) -> Result<Rental, ApiError> {
        let builder = self
            .client
            .request(Method::POST, &["rentals"], Access::Session)?
            .json(request);
        self.client.fetch(builder).await
    }

    /// Rentals of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn my_rentals(&self) -> Result<Vec<Rental>, ApiError> {
        let builder = self
            .client
            .request(Method::GET, &["rentals", "my-rentals"], Access::Session)?;
        self.client.fetch_list(builder).await
    }

    /// Mark a rental as returned.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self), fields(rental_id = %id))]
    pub async fn complete(&self, id: &RentalId) -> Result<Rental, ApiError> {
        let builder = self
            .client
            .request(Method::POST, &["rentals", id.as_str(), "complete"], Access::Session)?;
        self.client.fetch(builder).await
    }
}
