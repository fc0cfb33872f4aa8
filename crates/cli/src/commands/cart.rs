//! Local cart commands.

use mofresh_client::models::CreateOrderRequest;
use mofresh_core::{Cart, CartItem, ProductId};
use rust_decimal::Decimal;

use super::{App, to_json};

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn add(
    app: &App,
    id: String,
    name: String,
    price: Decimal,
    unit: String,
    image: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let cart = app.cart.add(CartItem {
        id: ProductId::new(id),
        name,
        price,
        unit,
        image,
    })?;
    report(&cart);
    Ok(())
}

/// Remove a product line.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove(app: &App, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cart = app.cart.remove(&ProductId::new(id))?;
    report(&cart);
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let cart = app.cart.clear()?;
    report(&cart);
    Ok(())
}

/// Show the cart.
///
/// # Errors
///
/// Never fails; the signature matches the other commands.
#[allow(clippy::unnecessary_wraps)]
pub fn show(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let cart = app.cart.snapshot();
    report(&cart);
    tracing::info!("{}", to_json(&cart));
    Ok(())
}

/// Place an order for the whole cart and empty it once accepted.
///
/// # Errors
///
/// Returns an error if the cart is empty, the order is rejected, or the
/// emptied cart cannot be saved.
pub async fn checkout(app: &App, address: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cart = app.cart.snapshot();
    if cart.is_empty() {
        return Err("cart is empty".into());
    }

    let request = CreateOrderRequest {
        delivery_address: address,
        ..CreateOrderRequest::from(&cart)
    };
    let order = app.api.orders().create(&request).await?;
    tracing::info!(order_id = %order.id, status = ?order.status, "Order placed");

    app.cart.clear()?;
    Ok(())
}

fn report(cart: &Cart) {
    tracing::info!(
        lines = cart.lines().len(),
        quantity = cart.total_quantity(),
        subtotal = %cart.subtotal(),
        "Cart"
    );
}
