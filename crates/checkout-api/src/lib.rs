//! # checkout-api
//!
//! HTTP API layer for storefront-checkout-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The checkout entry point over `checkout_core::CheckoutOrchestrator`
//! - Read endpoints for products and order history
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/checkout` | Process a checkout |
//! | GET | `/api/v1/orders/{owner_id}` | Order history |
//! | GET | `/api/v1/products` | List products |
//! | GET | `/api/v1/products/{id}` | Get product |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
