//! Cold asset and cold room rentals.

use chrono::{DateTime, NaiveDate, Utc};
use mofresh_core::{ColdAssetId, ColdRoomId, RentalId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ColdAssetKind, Extra};

/// Rental lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalStatus {
    Pending,
    Approved,
    Active,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// A rental agreement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: RentalId,
    pub status: RentalStatus,
    #[serde(default)]
    pub client_id: Option<UserId>,
    #[serde(default)]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub asset_id: Option<ColdAssetId>,
    #[serde(default)]
    pub cold_room_id: Option<ColdRoomId>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `POST /rentals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<ColdAssetKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<ColdAssetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cold_room_id: Option<ColdRoomId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
