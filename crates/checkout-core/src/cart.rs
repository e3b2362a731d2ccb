//! # Cart Types
//!
//! Client-submitted cart lines. Only the product id and quantity are ever
//! acted on; the display fields the storefront sends alongside them are
//! carried for wire compatibility and ignored by validation and pricing.

use crate::money::Price;
use serde::{Deserialize, Serialize};

/// A single line of a client-submitted cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Product ID
    pub product_id: String,

    /// Requested quantity; validated to be positive before pricing
    pub quantity: i64,

    /// Client-asserted display name, never trusted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Client-asserted unit price; totals are always recomputed from the
    /// catalog, so this field is never read for pricing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Price>,
}

impl CartLine {
    /// Create a bare cart line (product id + quantity)
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            name: None,
            unit_price: None,
        }
    }
}
