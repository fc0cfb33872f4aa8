//! Cart line items and the merge-by-id reducer.
//!
//! ## Invariants
//! - at most one line per product `id` (adding again bumps the quantity)
//! - every line has `quantity >= 1`
//! - insertion order is preserved
//!
//! The reducer is pure. Persistence lives in `mofresh-client`, which writes the
//! whole line sequence after every mutation. Prices are stored as decimal
//! strings so they come back exactly; plain JSON numbers are accepted on read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A product as offered to the cart, before it has a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product identifier; the merge key.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Unit of sale, e.g. `kg` or `crate`.
    pub unit: String,
    /// Image URL.
    pub image: String,
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Unit of sale.
    pub unit: String,
    /// Image URL.
    pub image: String,
    /// Number of units, at least 1.
    pub quantity: u32,
}

impl CartLine {
    fn from_item(item: CartItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            unit: item.unit,
            image: item.image,
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The buyer's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild a cart from stored lines.
    ///
    /// Stored data is not trusted: lines with quantity 0 are dropped and
    /// repeated ids are folded into the first occurrence.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            if let Some(existing) = cart.lines.iter_mut().find(|l| l.id == line.id) {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            } else {
                cart.lines.push(line);
            }
        }
        cart
    }

    /// Add one unit of `item`, merging with an existing line of the same id.
    #[must_use]
    pub fn add(mut self, item: CartItem) -> Self {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine::from_item(item));
        }
        self
    }

    /// Remove every line with this id.
    #[must_use]
    pub fn remove(mut self, id: &ProductId) -> Self {
        self.lines.retain(|line| &line.id != id);
        self
    }

    /// Drop all lines.
    #[must_use]
    pub fn clear(mut self) -> Self {
        self.lines.clear();
        self
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for a product, if present.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::new(price, 0),
            unit: "kg".to_string(),
            image: format!("https://cdn.mofresh.rw/{id}.jpg"),
        }
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart = cart.add(item("tomato", 800));
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(&ProductId::new("tomato")).unwrap().quantity, 5);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let cart = Cart::new()
            .add(item("a", 1))
            .add(item("b", 1))
            .add(item("a", 1));

        let ids: Vec<_> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_remove_then_add_starts_at_one() {
        let id = ProductId::new("avocado");
        let cart = Cart::new()
            .add(item("avocado", 300))
            .add(item("avocado", 300))
            .remove(&id)
            .add(item("avocado", 300));

        assert_eq!(cart.line(&id).unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let cart = Cart::new().add(item("a", 1));
        let after = cart.clone().remove(&ProductId::new("zzz"));
        assert_eq!(cart, after);
    }

    #[test]
    fn test_clear_always_empties() {
        assert!(Cart::new().clear().is_empty());
        let cart = Cart::new().add(item("a", 1)).add(item("b", 2)).clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_totals() {
        let cart = Cart::new()
            .add(item("a", 1000))
            .add(item("a", 1000))
            .add(item("b", 250));

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal(), Decimal::new(2250, 0));
    }

    #[test]
    fn test_serialization_preserves_order() {
        let cart = Cart::new()
            .add(item("c", 3))
            .add(item("a", 1))
            .add(item("b", 2))
            .add(item("a", 1));

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_line_json_shape() {
        let cart = Cart::new().add(CartItem {
            price: Decimal::new(15, 1),
            ..item("milk", 0)
        });
        let json = serde_json::to_value(&cart).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["id"], "milk");
        assert_eq!(json[0]["price"], "1.5");
        assert_eq!(json[0]["quantity"], 1);
    }

    #[test]
    fn test_price_keeps_every_digit() {
        let price = Decimal::from_i128_with_scale(1_234_567_890_123_456_789, 9);
        let cart = Cart::new().add(CartItem {
            price,
            ..item("saffron", 0)
        });

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lines()[0].price, price);
        assert_eq!(back, cart);
    }

    #[test]
    fn test_numeric_prices_still_load() {
        let lines: Vec<CartLine> = serde_json::from_str(
            r#"[{"id":"a","name":"A","price":1.25,"unit":"kg","image":"","quantity":2}]"#,
        )
        .unwrap();
        assert_eq!(lines[0].price, Decimal::new(125, 2));
    }

    #[test]
    fn test_from_lines_repairs_stored_data() {
        let mut a = CartLine::from_item(item("a", 1));
        a.quantity = 2;
        let mut zero = CartLine::from_item(item("z", 1));
        zero.quantity = 0;
        let dup = CartLine::from_item(item("a", 1));

        let cart = Cart::from_lines(vec![a, zero, dup]);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }
}
