//! Orders placed by buyers.

use chrono::{DateTime, Utc};
use mofresh_core::{Cart, OrderId, ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Extra;

/// Order lifecycle as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// An order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    #[serde(default)]
    pub buyer_id: Option<UserId>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One product line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLineRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Product and quantity to order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl From<&Cart> for CreateOrderRequest {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| OrderLineRequest {
                    product_id: line.id.clone(),
                    quantity: line.quantity,
                })
                .collect(),
            delivery_address: None,
            notes: None,
        }
    }
}
