use mofresh_core::{ColdAssetId, SiteId};
use reqwest::Method;
use tracing::instrument;

use crate::error::ApiError;
use crate::gateway::{Access, ApiClient};
use crate::models::{AssetStatus, ColdAsset, Tricycle, UpdateStatusRequest};

const COLD_ASSETS: &str = "cold-assets";

/// `/cold-assets/:kind` endpoints, generic over the asset type.
///
/// ```rust,no_run
/// # use mofresh_client::models::{ColdBox, Tricycle};
/// # async fn run(api: mofresh_client::ApiClient) -> Result<(), mofresh_client::ApiError> {
/// let tricycles = api.logistics().list::<Tricycle>().await?;
/// let boxes = api.logistics().list::<ColdBox>().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logistics<'a> {
    client: &'a ApiClient,
}

impl<'a> Logistics<'a> {
    /// Create the façade.
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Register a new asset.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self, request), fields(kind = %A::KIND))]
    pub async fn create<A: ColdAsset>(&self, request: &A::Create) -> Result<A, ApiError> {
        let builder = self
            .client
            .request(Method::POST, &[COLD_ASSETS, A::KIND.path_segment()], Access::Session)?
            .json(request);
        self.client.fetch(builder).await
    }

    /// All assets of one kind.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self), fields(kind = %A::KIND))]
    pub async fn list<A: ColdAsset>(&self) -> Result<Vec<A>, ApiError> {
        let builder = self.client.request(
            Method::GET,
            &[COLD_ASSETS, A::KIND.path_segment()],
            Access::Session,
        )?;
        self.client.fetch_list(builder).await
    }

    /// Fetch one asset.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body does not match.
    #[instrument(skip(self), fields(kind = %A::KIND, asset_id = %id))]
    pub async fn get<A: ColdAsset>(&self, id: &ColdAssetId) -> Result<A, ApiError> {
        let builder = self.client.request(
            Method::GET,
            &[COLD_ASSETS, A::KIND.path_segment(), id.as_str()],
            Access::Session,
        )?;
        self.client.fetch(builder).await
    }

    /// Change an asset's availability.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self), fields(kind = %A::KIND, asset_id = %id))]
    pub async fn update_status<A: ColdAsset>(
        &self,
        id: &ColdAssetId,
        status: AssetStatus,
    ) -> Result<A, ApiError> {
        let builder = self
            .client
            .request(
                Method::PATCH,
                &[COLD_ASSETS, A::KIND.path_segment(), id.as_str(), "status"],
                Access::Session,
            )?
            .json(&UpdateStatusRequest { status });
        self.client.fetch(builder).await
    }

    /// Delete an asset.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self), fields(kind = %A::KIND, asset_id = %id))]
    pub async fn delete<A: ColdAsset>(&self, id: &ColdAssetId) -> Result<(), ApiError> {
        let builder = self.client.request(
            Method::DELETE,
            &[COLD_ASSETS, A::KIND.path_segment(), id.as_str()],
            Access::Session,
        )?;
        self.client.send(builder).await
    }

    /// Tricycles open to the public. Sent without credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn public_tricycles(&self) -> Result<Vec<Tricycle>, ApiError> {
        let builder = self.client.request(
            Method::GET,
            &[COLD_ASSETS, "public", "tricycles"],
            Access::Public,
        )?;
        self.client.fetch_list(builder).await
    }

    /// Public tricycles stationed at one site. Sent without credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is rejected.
    #[instrument(skip(self), fields(site_id = %site_id))]
    pub async fn public_tricycles_at_site(&self, site_id: &SiteId) -> Result<Vec<Tricycle>, ApiError> {
        let builder = self.client.request(
            Method::GET,
            &[COLD_ASSETS, "public", "tricycles", "site", site_id.as_str()],
            Access::Public,
        )?;
        self.client.fetch_list(builder).await
    }
}
