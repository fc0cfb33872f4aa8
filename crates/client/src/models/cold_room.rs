//! Cold rooms at collection sites.

use mofresh_core::{ColdRoomId, SiteId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Extra;

/// A refrigerated storage room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColdRoom {
    pub id: ColdRoomId,
    pub name: String,
    #[serde(default)]
    pub site_id: Option<SiteId>,
    #[serde(default)]
    pub total_capacity_kg: Option<Decimal>,
    #[serde(default)]
    pub used_capacity_kg: Option<Decimal>,
    #[serde(default)]
    pub temperature_min: Option<Decimal>,
    #[serde(default)]
    pub temperature_max: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `POST /cold-rooms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColdRoomRequest {
    pub name: String,
    pub site_id: SiteId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_capacity_kg: Decimal,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub temperature_min: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub temperature_max: Option<Decimal>,
}

/// Body of `PATCH /cold-rooms/:id`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateColdRoomRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub total_capacity_kg: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub temperature_min: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub temperature_max: Option<Decimal>,
}

/// Response of `GET /cold-rooms/:id/occupancy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupancy {
    #[serde(default)]
    pub total_capacity_kg: Option<Decimal>,
    #[serde(default)]
    pub used_capacity_kg: Option<Decimal>,
    #[serde(default)]
    pub available_capacity_kg: Option<Decimal>,
    #[serde(default)]
    pub occupancy_percentage: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Extra,
}
