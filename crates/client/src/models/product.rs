//! Marketplace products.

use mofresh_core::{CartItem, ProductId, SiteId, UserId};
use reqwest::multipart::Form;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Attachment, Extra};
use crate::error::ApiError;

/// A product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<UserId>,
    #[serde(default)]
    pub site_id: Option<SiteId>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Product {
    /// The cart entry for one unit of this product.
    #[must_use]
    pub fn to_cart_item(&self) -> CartItem {
        CartItem {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            unit: self.unit.clone().unwrap_or_else(|| "unit".to_owned()),
            image: self.image_url.clone().unwrap_or_default(),
        }
    }
}

/// Body of `POST /products`; multipart when an image is attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<SiteId>,
    #[serde(skip)]
    pub image: Option<Attachment>,
}

impl CreateProductRequest {
    /// Encode as multipart form data with the image in an `image` part.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the image has a bad MIME type.
    pub fn to_multipart(&self) -> Result<Form, ApiError> {
        let mut form = Form::new()
            .text("name", self.name.clone())
            .text("price", self.price.to_string())
            .text("unit", self.unit.clone())
            .text("quantity", self.quantity.to_string());
        if let Some(description) = &self.description {
            form = form.text("description", description.clone());
        }
        if let Some(category) = &self.category {
            form = form.text("category", category.clone());
        }
        if let Some(site_id) = &self.site_id {
            form = form.text("siteId", site_id.to_string());
        }
        if let Some(image) = &self.image {
            form = form.part("image", image.to_part()?);
        }
        Ok(form)
    }
}
