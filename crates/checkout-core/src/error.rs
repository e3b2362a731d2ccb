//! # Checkout Error Taxonomy
//!
//! Typed failures for each stage of the checkout flow. Display strings are
//! the user-facing messages the storefront shows; nothing here carries
//! credentials or internal detail beyond what a customer may see.

use serde::Serialize;
use thiserror::Error;

/// Cart validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Submitted cart had no lines
    #[error("Cart cannot be empty.")]
    EmptyCart,

    /// One or more product ids did not resolve in the catalog snapshot.
    /// `product_ids` lists every unresolved id, not just the first.
    #[error("One or more products in your cart are invalid.")]
    UnknownProduct { product_ids: Vec<String> },

    /// First cart line with a non-positive quantity
    #[error("Invalid quantity for product '{product_name}'.")]
    InvalidQuantity {
        product_id: String,
        product_name: String,
    },
}

/// Payment gateway client failures.
///
/// A business decline is not an error; it comes back as an authorization
/// outcome with `Declined` status. These variants cover everything that
/// prevents a usable outcome from being obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Charge amount was zero or negative; rejected locally, no request is sent
    #[error("Total amount must be positive.")]
    NonPositiveAmount,

    /// Client misconfiguration (missing or malformed credentials)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout, connection failure, remote 5xx, or an unparseable response.
    /// The detail is logged, never shown to the customer.
    #[error("An unexpected error occurred during payment processing.")]
    TransportFailure { detail: String },
}

/// Order persistence failure. Store-failure subtypes (constraint violation,
/// connectivity loss) are collapsed into this single category.
#[derive(Debug, Clone, Error)]
#[error("Order store failure: {0}")]
pub struct StoreError(pub String);

/// Machine-readable reason code carried beside the human-readable message on
/// every failed checkout result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    EmptyCart,
    UnknownProduct,
    InvalidQuantity,
    PaymentDeclined,
    PaymentTransportError,
    PersistenceError,
}

impl ValidationError {
    /// The reason code for this validation failure
    pub fn kind(&self) -> FailureKind {
        match self {
            ValidationError::EmptyCart => FailureKind::EmptyCart,
            ValidationError::UnknownProduct { .. } => FailureKind::UnknownProduct,
            ValidationError::InvalidQuantity { .. } => FailureKind::InvalidQuantity,
        }
    }
}

impl GatewayError {
    /// The reason code for this gateway failure. The local amount guard is a
    /// business rejection, not a transport fault.
    pub fn kind(&self) -> FailureKind {
        match self {
            GatewayError::NonPositiveAmount => FailureKind::PaymentDeclined,
            GatewayError::Configuration(_) | GatewayError::TransportFailure { .. } => {
                FailureKind::PaymentTransportError
            }
        }
    }
}
