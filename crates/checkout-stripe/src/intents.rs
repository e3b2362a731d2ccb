//! # Stripe PaymentIntents Gateway
//!
//! `PaymentGateway` implementation over the Stripe PaymentIntents API.
//! Amounts go over the wire as integer minor units. One request per
//! `authorize` call; retry policy, if any, belongs to the caller.

use crate::config::StripeConfig;
use async_trait::async_trait;
use checkout_core::{GatewayError, PaymentAuthorization, PaymentGateway, Price};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

/// Payment gateway backed by Stripe PaymentIntents
pub struct StripePaymentGateway {
    config: StripeConfig,
    client: Client,
}

impl StripePaymentGateway {
    /// Create a new gateway client
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, GatewayError> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }
}

#[async_trait]
impl PaymentGateway for StripePaymentGateway {
    #[instrument(skip(self, payment_method_ref), fields(amount = amount.amount, currency = %amount.currency))]
    async fn authorize(
        &self,
        amount: Price,
        payment_method_ref: &str,
    ) -> Result<PaymentAuthorization, GatewayError> {
        // Local guard: never contact the processor for a non-positive charge.
        if amount.amount <= 0 {
            warn!(
                "Rejecting authorization locally: non-positive amount {}",
                amount.amount
            );
            return Err(GatewayError::NonPositiveAmount);
        }

        let form_params: Vec<(&str, String)> = vec![
            ("amount", amount.amount.to_string()),
            ("currency", amount.currency.as_str().to_string()),
            ("payment_method", payment_method_ref.to_string()),
            ("confirm", "true".to_string()),
            ("metadata[integration]", "storefront-checkout".to_string()),
        ];

        debug!("Creating Stripe payment intent for {}", amount.display());

        let url = format!("{}/v1/payment_intents", self.config.api_base_url);
        let idempotency_key = Uuid::new_v4().to_string();

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &idempotency_key)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| {
                error!("Stripe request failed: {}", e);
                GatewayError::TransportFailure {
                    detail: e.to_string(),
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::TransportFailure {
                detail: e.to_string(),
            })?;

        if status.is_server_error() {
            error!("Stripe API error: status={}, body={}", status, body);
            return Err(GatewayError::TransportFailure {
                detail: format!("HTTP {}: {}", status, body),
            });
        }

        if !status.is_success() {
            // Stripe reports card declines as 4xx request errors with a
            // typed body; treat those as terminal business declines.
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                warn!(
                    "Stripe rejected payment: status={}, code={:?}, message={}",
                    status, error_response.error.code, error_response.error.message
                );
                let intent_id = error_response
                    .error
                    .payment_intent
                    .map(|pi| pi.id)
                    .unwrap_or_default();
                return Ok(PaymentAuthorization::declined(
                    intent_id,
                    format!("Payment processing error: {}", error_response.error.message),
                ));
            }

            error!("Unparseable Stripe error: status={}, body={}", status, body);
            return Err(GatewayError::TransportFailure {
                detail: format!("HTTP {}: {}", status, body),
            });
        }

        let intent: StripePaymentIntentResponse =
            serde_json::from_str(&body).map_err(|e| GatewayError::TransportFailure {
                detail: format!("Failed to parse Stripe response: {}", e),
            })?;

        debug!(
            "Payment intent {} returned status {}",
            intent.id, intent.status
        );

        match intent.status.as_str() {
            "succeeded" | "requires_capture" => Ok(PaymentAuthorization::authorized(intent.id)),
            other => {
                let reason = intent
                    .last_payment_error
                    .map(|e| e.message)
                    .unwrap_or_else(|| format!("Payment processing resulted in status: {}", other));
                warn!("Payment intent {} did not succeed: {}", intent.id, reason);
                Ok(PaymentAuthorization::declined(intent.id, reason))
            }
        }
    }

    fn gateway_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripePaymentIntentResponse {
    id: String,
    status: String,
    #[serde(default)]
    last_payment_error: Option<StripePaymentError>,
}

#[derive(Debug, Deserialize)]
struct StripePaymentError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    payment_intent: Option<StripeErrorIntent>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorIntent {
    id: String,
}
