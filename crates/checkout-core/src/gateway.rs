//! # Payment Gateway Trait
//!
//! Capability seam for the remote payment processor. Implementations issue
//! exactly one authorization request per `authorize` call and carry no retry
//! logic; the processor is assumed to handle idempotency on its side.

use crate::error::GatewayError;
use crate::money::Price;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Terminal outcome of an authorization attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    /// Funds authorized for the requested amount
    Authorized,
    /// Any non-authorized terminal status (declined, requires further action)
    Declined,
}

/// Result of a payment authorization call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAuthorization {
    /// Opaque reference assigned by the processor (may be empty on some
    /// declines where the processor rejected before creating one)
    pub authorization_id: String,

    /// Terminal status
    pub status: AuthorizationStatus,

    /// Processor-reported reason when not authorized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl PaymentAuthorization {
    /// An authorized outcome
    pub fn authorized(authorization_id: impl Into<String>) -> Self {
        Self {
            authorization_id: authorization_id.into(),
            status: AuthorizationStatus::Authorized,
            failure_reason: None,
        }
    }

    /// A declined outcome with the processor's reason
    pub fn declined(authorization_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            authorization_id: authorization_id.into(),
            status: AuthorizationStatus::Declined,
            failure_reason: Some(reason.into()),
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self.status, AuthorizationStatus::Authorized)
    }
}

/// Remote payment authorization.
///
/// Contract:
/// - amounts ≤ 0 minor units are rejected locally with
///   [`GatewayError::NonPositiveAmount`] before any network I/O
/// - a business decline is `Ok` with [`AuthorizationStatus::Declined`]
/// - transport problems (timeout, 5xx, malformed body) are
///   [`GatewayError::TransportFailure`]
/// - exactly one request per call; no internal retry
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Authorize a charge of `amount` against the given payment method
    async fn authorize(
        &self,
        amount: Price,
        payment_method_ref: &str,
    ) -> Result<PaymentAuthorization, GatewayError>;

    /// Processor name, for logging
    fn gateway_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
