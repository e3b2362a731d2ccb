//! # Storefront Checkout
//!
//! Checkout orchestration service for the storefront.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! # Optional: point at a stripe-mock instance
//! export STRIPE_API_BASE=http://localhost:12111
//!
//! # Run the server
//! storefront-checkout
//! ```

use checkout_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Products loaded: {}", state.catalog.products.len());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Storefront checkout starting on http://{}", addr);

    if !is_prod {
        info!("Checkout: POST http://{}/api/v1/checkout", addr);
        info!("Products: GET  http://{}/api/v1/products", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
