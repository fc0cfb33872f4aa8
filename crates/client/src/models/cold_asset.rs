//! Mobile cold-chain assets: tricycles, cold boxes and cold plates.
//!
//! All three live under `/cold-assets/:kind` and share one set of endpoints.
//! [`ColdAsset`] ties each entity type to its path segment and create body so
//! the logistics façade can be written once.

use mofresh_core::{ColdAssetId, SiteId};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::Extra;

/// Which asset collection an endpoint addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColdAssetKind {
    #[serde(rename = "TRICYCLE")]
    Tricycles,
    #[serde(rename = "COLD_BOX")]
    Boxes,
    #[serde(rename = "COLD_PLATE")]
    Plates,
}

impl ColdAssetKind {
    /// Path segment under `/cold-assets`.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Tricycles => "tricycles",
            Self::Boxes => "boxes",
            Self::Plates => "plates",
        }
    }
}

impl std::fmt::Display for ColdAssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl std::str::FromStr for ColdAssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tricycles" => Ok(Self::Tricycles),
            "boxes" => Ok(Self::Boxes),
            "plates" => Ok(Self::Plates),
            other => Err(format!("unknown cold asset kind: {other}")),
        }
    }
}

/// Availability of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    Available,
    InUse,
    Rented,
    Maintenance,
    #[serde(other)]
    Unknown,
}

impl std::str::FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "AVAILABLE" => Ok(Self::Available),
            "IN_USE" => Ok(Self::InUse),
            "RENTED" => Ok(Self::Rented),
            "MAINTENANCE" => Ok(Self::Maintenance),
            other => Err(format!("unknown asset status: {other}")),
        }
    }
}

/// Body of `PATCH /cold-assets/:kind/:id/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateStatusRequest {
    pub status: AssetStatus,
}

/// An entity stored under `/cold-assets/:kind`.
pub trait ColdAsset: DeserializeOwned + Send {
    /// Collection this type lives in.
    const KIND: ColdAssetKind;
    /// Body accepted by `POST /cold-assets/:kind`.
    type Create: Serialize + Sync;
}

/// A refrigerated delivery tricycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tricycle {
    pub id: ColdAssetId,
    pub plate_number: String,
    #[serde(default)]
    pub site_id: Option<SiteId>,
    #[serde(default)]
    pub capacity: Option<String>,
    #[serde(default = "unknown_status")]
    pub status: AssetStatus,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `POST /cold-assets/tricycles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTricycleRequest {
    pub plate_number: String,
    pub site_id: SiteId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
}

/// An insulated cold box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColdBox {
    pub id: ColdAssetId,
    pub identification_number: String,
    #[serde(default)]
    pub size_or_capacity: Option<String>,
    #[serde(default)]
    pub site_id: Option<SiteId>,
    #[serde(default = "unknown_status")]
    pub status: AssetStatus,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `POST /cold-assets/boxes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColdBoxRequest {
    pub identification_number: String,
    pub site_id: SiteId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_or_capacity: Option<String>,
}

/// A eutectic cold plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColdPlate {
    pub id: ColdAssetId,
    pub identification_number: String,
    #[serde(default)]
    pub cooling_specification: Option<String>,
    #[serde(default)]
    pub rental_price: Option<Decimal>,
    #[serde(default)]
    pub site_id: Option<SiteId>,
    #[serde(default = "unknown_status")]
    pub status: AssetStatus,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `POST /cold-assets/plates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColdPlateRequest {
    pub identification_number: String,
    pub site_id: SiteId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooling_specification: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub rental_price: Option<Decimal>,
}

const fn unknown_status() -> AssetStatus {
    AssetStatus::Unknown
}

impl ColdAsset for Tricycle {
    const KIND: ColdAssetKind = ColdAssetKind::Tricycles;
    type Create = CreateTricycleRequest;
}

impl ColdAsset for ColdBox {
    const KIND: ColdAssetKind = ColdAssetKind::Boxes;
    type Create = CreateColdBoxRequest;
}

impl ColdAsset for ColdPlate {
    const KIND: ColdAssetKind = ColdAssetKind::Plates;
    type Create = CreateColdPlateRequest;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_segments_and_parse() {
        for kind in [ColdAssetKind::Tricycles, ColdAssetKind::Boxes, ColdAssetKind::Plates] {
            assert_eq!(kind.path_segment().parse::<ColdAssetKind>().unwrap(), kind);
        }
        assert!("fridges".parse::<ColdAssetKind>().is_err());
        assert_eq!(Tricycle::KIND.path_segment(), "tricycles");
    }

    #[test]
    fn test_status_parse_and_wire_form() {
        assert_eq!("in-use".parse::<AssetStatus>().unwrap(), AssetStatus::InUse);
        let body = UpdateStatusRequest {
            status: AssetStatus::Maintenance,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"status":"MAINTENANCE"}"#);
    }

    #[test]
    fn test_missing_status_is_unknown() {
        let tricycle: Tricycle =
            serde_json::from_str(r#"{"id":"t1","plateNumber":"RAB 123 C"}"#).unwrap();
        assert_eq!(tricycle.status, AssetStatus::Unknown);

        let plate: ColdPlate = serde_json::from_str(
            r#"{"id":"p1","identificationNumber":"CP-9","status":"RETIRED"}"#,
        )
        .unwrap();
        assert_eq!(plate.status, AssetStatus::Unknown);
    }
}
