//! Read-only listings.

use mofresh_core::{ColdRoomId, ProductId, SiteId};

use super::{App, to_json};

/// List products.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn products(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let products = app.api.products().list().await?;
    tracing::info!(count = products.len(), "Products");
    for product in &products {
        tracing::info!(id = %product.id, name = %product.name, price = %product.price, "Product");
    }
    Ok(())
}

/// Look a product up in the listing and add it to the cart.
///
/// # Errors
///
/// Returns an error if the request fails, the product is not listed, or the
/// cart cannot be saved.
pub async fn add_to_cart(app: &App, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = ProductId::new(id);
    let product = app
        .api
        .products()
        .list()
        .await?
        .into_iter()
        .find(|product| product.id == id)
        .ok_or_else(|| format!("product {id} is not listed"))?;

    let cart = app.cart.add(product.to_cart_item())?;
    tracing::info!(
        product = %product.name,
        quantity = cart.line(&id).map_or(0, |line| line.quantity),
        "Added to cart"
    );
    Ok(())
}

/// List cold rooms.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn cold_rooms(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let rooms = app.api.infrastructure().list().await?;
    tracing::info!(count = rooms.len(), "Cold rooms");
    tracing::info!("{}", to_json(&rooms));
    Ok(())
}

/// Show occupancy of one cold room.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn occupancy(app: &App, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let occupancy = app.api.infrastructure().occupancy(&ColdRoomId::new(id)).await?;
    tracing::info!("{}", to_json(&occupancy));
    Ok(())
}

/// Orders of the signed-in user.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn my_orders(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let orders = app.api.orders().my_orders().await?;
    tracing::info!(count = orders.len(), "Orders");
    tracing::info!("{}", to_json(&orders));
    Ok(())
}

/// Rentals of the signed-in user.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn my_rentals(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let rentals = app.api.rentals().my_rentals().await?;
    tracing::info!(count = rentals.len(), "Rentals");
    tracing::info!("{}", to_json(&rentals));
    Ok(())
}

/// Publicly listed tricycles, optionally for one site.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn public_tricycles(app: &App, site: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let logistics = app.api.logistics();
    let tricycles = match site {
        Some(site) => logistics.public_tricycles_at_site(&SiteId::new(site)).await?,
        None => logistics.public_tricycles().await?,
    };
    tracing::info!(count = tricycles.len(), "Public tricycles");
    tracing::info!("{}", to_json(&tricycles));
    Ok(())
}
