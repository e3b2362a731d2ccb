//! # checkout-core
//!
//! Checkout orchestration core for the storefront: revalidate a
//! client-submitted cart against authoritative catalog pricing, authorize the
//! recomputed total with a payment gateway, and durably record the order.
//!
//! This crate provides:
//! - `CheckoutOrchestrator` sequencing validation → authorization → persistence
//! - `PricingValidator` for server-side price recomputation
//! - `CatalogReader`, `PaymentGateway`, and `OrderStore` traits for the
//!   external collaborators
//! - `ProductCatalog` (TOML-backed) and `MemoryOrderStore` adapters
//! - the checkout error taxonomy and reason codes
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{CartLine, CheckoutOrchestrator, MemoryOrderStore, ProductCatalog};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(ProductCatalog::from_toml(&toml_str)?);
//! let orchestrator = CheckoutOrchestrator::new(catalog, gateway, Arc::new(MemoryOrderStore::new()));
//!
//! let result = orchestrator
//!     .checkout("user-1", vec![CartLine::new("classic-logo-tee", 2)], "pm_card_visa")
//!     .await;
//!
//! if result.success {
//!     println!("placed order {}", result.order_id.unwrap());
//! }
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod gateway;
pub mod money;
pub mod order;
pub mod orchestrator;
pub mod store;
pub mod validator;

// Re-exports for convenience
pub use cart::CartLine;
pub use catalog::{CatalogProduct, CatalogReader, ProductCatalog};
pub use error::{FailureKind, GatewayError, StoreError, ValidationError};
pub use gateway::{
    AuthorizationStatus, BoxedPaymentGateway, PaymentAuthorization, PaymentGateway,
};
pub use money::{Currency, Price};
pub use order::{Order, OrderRecord, ValidatedOrderLine};
pub use orchestrator::{CheckoutOrchestrator, CheckoutResult};
pub use store::{BoxedOrderStore, MemoryOrderStore, OrderStore};
pub use validator::PricingValidator;
