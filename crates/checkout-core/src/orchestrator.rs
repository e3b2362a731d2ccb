//! # Checkout Orchestrator
//!
//! Sequences one checkout attempt: validate the cart against the catalog,
//! authorize the recomputed total with the payment gateway, persist the
//! order. The flow is strictly linear; no step is retried or re-entered.
//!
//! Every failure resolves locally into a [`CheckoutResult`] — nothing is
//! propagated past this boundary as an error type. Callers inspect the
//! result's `reason` code rather than parsing message text.

use crate::cart::CartLine;
use crate::catalog::CatalogReader;
use crate::error::{FailureKind, GatewayError};
use crate::gateway::BoxedPaymentGateway;
use crate::money::{Currency, Price};
use crate::order::{total_of, Order, ValidatedOrderLine};
use crate::store::BoxedOrderStore;
use crate::validator::PricingValidator;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Terminal outcome of a checkout attempt
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResult {
    /// Whether the order was placed
    pub success: bool,

    /// Persisted order id on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// Human-readable outcome message
    pub message: String,

    /// Machine-readable reason code on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureKind>,
}

impl CheckoutResult {
    /// A successfully placed order
    pub fn placed(order_id: impl Into<String>) -> Self {
        Self {
            success: true,
            order_id: Some(order_id.into()),
            message: "Order placed successfully.".to_string(),
            reason: None,
        }
    }

    /// A failed checkout with its reason code and message
    pub fn rejected(reason: FailureKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            order_id: None,
            message: message.into(),
            reason: Some(reason),
        }
    }
}

/// Sequences validation, payment authorization, and order persistence.
///
/// Collaborators are injected as shared trait objects; the orchestrator holds
/// no other state, so one instance serves any number of concurrent checkouts.
pub struct CheckoutOrchestrator {
    validator: PricingValidator,
    gateway: BoxedPaymentGateway,
    store: BoxedOrderStore,
    currency: Currency,
}

impl CheckoutOrchestrator {
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        gateway: BoxedPaymentGateway,
        store: BoxedOrderStore,
    ) -> Self {
        Self {
            validator: PricingValidator::new(catalog),
            gateway,
            store,
            currency: Currency::USD,
        }
    }

    /// Builder: set the charge currency (defaults to USD)
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Run one checkout attempt to a terminal result.
    ///
    /// Dropping the returned future during validation aborts the attempt
    /// without contacting the gateway. Once authorization has been requested
    /// the rest of the flow runs to completion on a spawned task even if the
    /// caller goes away, so no authorization is left untracked.
    #[instrument(skip(self, cart, payment_method_ref), fields(owner_id = %owner_id, lines = cart.len()))]
    pub async fn checkout(
        &self,
        owner_id: &str,
        cart: Vec<CartLine>,
        payment_method_ref: &str,
    ) -> CheckoutResult {
        let lines = match self.validator.validate(owner_id, &cart).await {
            Ok(lines) => lines,
            Err(err) => return CheckoutResult::rejected(err.kind(), err.to_string()),
        };

        let total = total_of(&lines, self.currency);
        info!(
            "Server calculated order total {} for owner {}",
            total.display(),
            owner_id
        );

        let gateway = Arc::clone(&self.gateway);
        let store = Arc::clone(&self.store);
        let owner = owner_id.to_string();
        let method = payment_method_ref.to_string();
        let currency = self.currency;

        let handle = tokio::spawn(async move {
            authorize_and_persist(gateway, store, owner, lines, total, currency, method).await
        });

        match handle.await {
            Ok(result) => result,
            // The task is never aborted, so a join failure means it panicked.
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}

async fn authorize_and_persist(
    gateway: BoxedPaymentGateway,
    store: BoxedOrderStore,
    owner_id: String,
    lines: Vec<ValidatedOrderLine>,
    total: Price,
    currency: Currency,
    payment_method_ref: String,
) -> CheckoutResult {
    let authorization = match gateway.authorize(total, &payment_method_ref).await {
        Ok(authorization) => authorization,
        Err(err) => {
            warn!(
                "Payment authorization failed for owner {} via {}: {}",
                owner_id,
                gateway.gateway_name(),
                gateway_detail(&err)
            );
            return CheckoutResult::rejected(err.kind(), format!("Payment failed: {err}"));
        }
    };

    if !authorization.is_authorized() {
        let detail = authorization
            .failure_reason
            .unwrap_or_else(|| "payment was declined".to_string());
        warn!("Payment declined for owner {}: {}", owner_id, detail);
        return CheckoutResult::rejected(
            FailureKind::PaymentDeclined,
            format!("Payment failed: {detail}"),
        );
    }

    info!(
        "Payment authorization {} succeeded for owner {}",
        authorization.authorization_id, owner_id
    );

    let order = Order::from_validated_lines(
        owner_id.clone(),
        lines,
        currency,
        authorization.authorization_id.clone(),
    );

    match store.save(order).await {
        Ok(order_id) => {
            info!("Order {} saved for owner {}", order_id, owner_id);
            CheckoutResult::placed(order_id)
        }
        Err(err) => {
            // Money has moved but no order exists; surface the distinct
            // support-actionable message so operators can reconcile. No
            // automatic void/refund is attempted here.
            error!(
                "Failed to save order for owner {} after successful authorization {}: {}. Manual reconciliation required.",
                owner_id, authorization.authorization_id, err
            );
            CheckoutResult::rejected(
                FailureKind::PersistenceError,
                "Order could not be saved after payment processing. Please contact support.",
            )
        }
    }
}

fn gateway_detail(err: &GatewayError) -> String {
    match err {
        GatewayError::TransportFailure { detail } => detail.clone(),
        other => other.to_string(),
    }
}
