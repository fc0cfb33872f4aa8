use mofresh_core::ColdRoomId;
use reqwest::Method;
use tracing::instrument;

use crate::error::ApiError;
use crate::gateway::{Access, ApiClient};
use crate::models::{ColdRoom, CreateColdRoomRequest, Occupancy, UpdateColdRoomRequest};

/// `/cold-rooms` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Infrastructure<'a> {
    client: &'a ApiClient,
}

impl<'a> Infrastructure<'a> {
    /// Create the façade.
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create a cold room.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self, request), fields(name = %request.name, site_id = %request.site_id))]
    pub async fn create(&self, request: &CreateColdRoomRequest) -> Result<ColdRoom, ApiError> {
        let builder = self
            .client
            .request(Method::POST, &["cold-rooms"], Access::Session)?
            .json(request);
        self.client.fetch(builder).await
    }

    /// All cold rooms.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ColdRoom>, ApiError> {
        let builder = self.client.request(Method::GET, &["cold-rooms"], Access::Session)?;
        self.client.fetch_list(builder).await
    }

    /// Fetch one cold room.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is not a room.
    #[instrument(skip(self), fields(cold_room_id = %id))]
    pub async fn get(&self, id: &ColdRoomId) -> Result<ColdRoom, ApiError> {
        let builder = self
            .client
            .request(Method::GET, &["cold-rooms", id.as_str()], Access::Session)?;
        self.client.fetch(builder).await
    }

    /// Update fields of a cold room.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self, request), fields(cold_room_id = %id))]
    pub async fn update(
        &self,
        id: &ColdRoomId,
        request: &UpdateColdRoomRequest,
    ) -> Result<ColdRoom, ApiError> {
        let builder = self
            .client
            .request(Method::PATCH, &["cold-rooms", id.as_str()], Access::Session)?
            .json(request);
        self.client.fetch(builder).await
    }

    /// Delete a cold room.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self), fields(cold_room_id = %id))]
    pub async fn delete(&self, id: &ColdRoomId) -> Result<(), ApiError> {
        let builder = self
            .client
            .request(Method::DELETE, &["cold-rooms", id.as_str()], Access::Session)?;
        self.client.send(builder).await
    }

    /// Current fill level of a cold room.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self), fields(cold_room_id = %id))]
    pub async fn occupancy(&self, id: &ColdRoomId) -> Result<Occupancy, ApiError> {
        let builder = self.client.request(
            Method::GET,
            &["cold-rooms", id.as_str(), "occupancy"],
            Access::Session,
        )?;
        self.client.fetch(builder).await
    }
}
