use serde::{Deserialize, Serialize};

use crate::domain::Product;

/// A product reference held in one buyer's cart.
///
/// Quantity is always 1 in this marketplace (every product is a unique
/// unit); the field exists for extensibility only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: String,
    pub quantity: u32,
}

impl CartEntry {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            quantity: 1,
        }
    }
}

/// One resolved line of a cart snapshot: the current product record
/// plus the computed subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub subtotal_cents: u64,
}

/// A point-in-time view of a buyer's cart, reconciled against the
/// catalog. Entries whose product is gone or sold never appear here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total_cents: u64,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
