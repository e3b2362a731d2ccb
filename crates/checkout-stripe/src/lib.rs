//! # checkout-stripe
//!
//! Stripe implementation of the storefront's `PaymentGateway` seam, using the
//! PaymentIntents API (one synchronous authorization per checkout, no hosted
//! pages, no webhooks).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_stripe::StripePaymentGateway;
//! use checkout_core::{Currency, PaymentGateway, Price};
//!
//! // Reads STRIPE_SECRET_KEY (and optionally STRIPE_API_BASE for stripe-mock)
//! let gateway = StripePaymentGateway::from_env()?;
//!
//! let auth = gateway
//!     .authorize(Price::from_minor_units(6248, Currency::USD), "pm_card_visa")
//!     .await?;
//!
//! if auth.is_authorized() {
//!     // record auth.authorization_id against the order
//! }
//! ```

pub mod config;
pub mod intents;

// Re-exports
pub use config::StripeConfig;
pub use intents::StripePaymentGateway;
