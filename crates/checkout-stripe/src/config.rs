//! # Stripe Configuration
//!
//! Immutable configuration for the Stripe gateway client, loaded once from
//! environment variables at construction. Secrets never appear in logs or
//! customer-facing messages.

use checkout_core::GatewayError;
use std::env;

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// API base URL; point at a stripe-mock instance for testing
    pub api_base_url: String,

    /// API version header value
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required: `STRIPE_SECRET_KEY`. Optional: `STRIPE_API_BASE` to target a
    /// mock server instead of the live API.
    pub fn from_env() -> Result<Self, GatewayError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("STRIPE_SECRET_KEY")
            .map_err(|_| GatewayError::Configuration("STRIPE_SECRET_KEY not set".to_string()))?;

        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(GatewayError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        let api_base_url =
            env::var("STRIPE_API_BASE").unwrap_or_else(|_| "https://api.stripe.com".to_string());

        Ok(Self {
            secret_key,
            api_base_url,
            api_version: "2024-12-18.acacia".to_string(),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2024-12-18.acacia".to_string(),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
        assert!(config.is_test_mode());
    }

    #[test]
    fn test_api_base_override() {
        let config = StripeConfig::new("sk_test_abc123").with_api_base_url("http://localhost:12111");
        assert_eq!(config.api_base_url, "http://localhost:12111");
    }

    #[test]
    fn test_from_env_missing_key() {
        env::remove_var("STRIPE_SECRET_KEY");

        let result = StripeConfig::from_env();
        assert!(matches!(result, Err(GatewayError::Configuration(_))));
    }
}
