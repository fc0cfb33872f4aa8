use mofresh_core::OrderId;
use reqwest::Method;
use tracing::instrument;

use crate::error::ApiError;
use crate::gateway::{Access, ApiClient};
use crate::models::{CreateOrderRequest, Order};

/// `/orders` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Orders<'a> {
    client: &'a ApiClient,
}

impl<'a> Orders<'a> {
    /// Create the façade.
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    pub async fn create(&self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
        let builder = self
            .client
            .request(Method::POST, &["orders"], Access::Session)?
            .json(request);
        self.client.fetch(builder).await
    }

    /// Orders placed by the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        let builder = self
            .client
            .request(Method::GET, &["orders", "my-orders"], Access::Session)?;
        self.client.fetch_list(builder).await
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is not an order.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get(&self, id: &OrderId) -> Result<Order, ApiError> {
        let builder = self
            .client
            .request(Method::GET, &["orders", id.as_str()], Access::Session)?;
        self.client.fetch(builder).await
    }

    /// Cancel an order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn cancel(&self, id: &OrderId) -> Result<Order, ApiError> {
        let builder = self
            .client
            .request(Method::POST, &["orders", id.as_str(), "cancel"], Access::Session)?;
        self.client.fetch(builder).await
    }
}
