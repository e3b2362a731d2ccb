//! # Order Types
//!
//! Validated order lines and the persisted order shape. An order's total is
//! derived from its lines at construction and both come exclusively from
//! catalog prices captured during validation.

use crate::money::{Currency, Price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cart line after validation, price-stamped from the catalog snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatedOrderLine {
    /// Product ID
    pub product_id: String,

    /// Product name (denormalized for display)
    pub product_name: String,

    /// Catalog unit price observed during validation
    pub unit_price: Price,

    /// Quantity
    pub quantity: u32,
}

impl ValidatedOrderLine {
    /// Total for this line
    pub fn line_total(&self) -> Price {
        Price {
            amount: self.unit_price.amount * self.quantity as i64,
            currency: self.unit_price.currency,
        }
    }
}

/// An order ready to be persisted. The store assigns the id on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Owner (customer) identifier
    pub owner_id: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Order total, always the sum of the line totals
    pub total_amount: Price,

    /// Authorization reference returned by the payment gateway
    pub payment_authorization_id: String,

    /// Validated, price-stamped lines
    pub lines: Vec<ValidatedOrderLine>,
}

impl Order {
    /// Build an order from validated lines, deriving the total from them
    pub fn from_validated_lines(
        owner_id: impl Into<String>,
        lines: Vec<ValidatedOrderLine>,
        currency: Currency,
        payment_authorization_id: impl Into<String>,
    ) -> Self {
        let total = total_of(&lines, currency);
        Self {
            owner_id: owner_id.into(),
            created_at: Utc::now(),
            total_amount: total,
            payment_authorization_id: payment_authorization_id.into(),
            lines,
        }
    }
}

/// Sum the line totals of a validated cart
pub fn total_of(lines: &[ValidatedOrderLine], currency: Currency) -> Price {
    let amount: i64 = lines.iter().map(|line| line.line_total().amount).sum();
    Price { amount, currency }
}

/// A persisted order: the store-assigned id plus the order fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Store-assigned order id
    pub id: String,

    #[serde(flatten)]
    pub order: Order,
}
