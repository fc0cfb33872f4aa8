//! Cold boxes, plates and tricycles by kind.

use mofresh_client::models::{AssetStatus, ColdAssetKind, ColdBox, ColdPlate, Tricycle};
use mofresh_core::ColdAssetId;
use serde::Serialize;

use super::{App, to_json};

/// List every asset of one kind.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(app: &App, kind: ColdAssetKind) -> Result<(), Box<dyn std::error::Error>> {
    let logistics = app.api.logistics();
    match kind {
        ColdAssetKind::Tricycles => report(kind, &logistics.list::<Tricycle>().await?),
        ColdAssetKind::Boxes => report(kind, &logistics.list::<ColdBox>().await?),
        ColdAssetKind::Plates => report(kind, &logistics.list::<ColdPlate>().await?),
    }
    Ok(())
}

/// Move one asset to a new status.
///
/// # Errors
///
/// Returns an error if the request fails or is rejected.
pub async fn set_status(
    app: &App,
    kind: ColdAssetKind,
    id: &str,
    status: AssetStatus,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = ColdAssetId::new(id);
    let logistics = app.api.logistics();
    let updated = match kind {
        ColdAssetKind::Tricycles => to_json(&logistics.update_status::<Tricycle>(&id, status).await?),
        ColdAssetKind::Boxes => to_json(&logistics.update_status::<ColdBox>(&id, status).await?),
        ColdAssetKind::Plates => to_json(&logistics.update_status::<ColdPlate>(&id, status).await?),
    };
    tracing::info!(%kind, asset = %id, ?status, "Status updated");
    tracing::info!("{updated}");
    Ok(())
}

fn report<A: Serialize>(kind: ColdAssetKind, assets: &[A]) {
    tracing::info!(%kind, count = assets.len(), "Cold assets");
    tracing::info!("{}", to_json(&assets));
}
