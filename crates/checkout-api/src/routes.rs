//! # Routes
//!
//! Axum router configuration for the storefront API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - POST /api/v1/checkout - Process a checkout
/// - GET  /api/v1/orders/{owner_id} - Order history for an owner
/// - GET  /api/v1/products - List purchasable products
/// - GET  /api/v1/products/{product_id} - Get product by ID
/// - GET  /health - Health check
pub fn create_router(state: AppState) -> Router {
    // The storefront is served from a different origin than the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/checkout", post(handlers::checkout))
        .route("/orders/{owner_id}", get(handlers::order_history))
        .route("/products", get(handlers::list_products))
        .route("/products/{product_id}", get(handlers::get_product));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
