//! # Application State
//!
//! Shared state for the axum application: the product catalog, the order
//! store, and the checkout orchestrator wired over them.

use checkout_core::{
    BoxedOrderStore, BoxedPaymentGateway, CheckoutOrchestrator, MemoryOrderStore, ProductCatalog,
};
use checkout_stripe::StripePaymentGateway;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout orchestrator
    pub orchestrator: Arc<CheckoutOrchestrator>,
    /// Product catalog
    pub catalog: Arc<ProductCatalog>,
    /// Order store (shared with the orchestrator)
    pub store: BoxedOrderStore,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state wired to the Stripe gateway and an in-memory order store
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let catalog = Arc::new(load_product_catalog()?);

        let gateway = StripePaymentGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_parts(
            catalog,
            Arc::new(gateway),
            Arc::new(MemoryOrderStore::new()),
            config,
        ))
    }

    /// Assemble state from explicit collaborators (used by tests)
    pub fn with_parts(
        catalog: Arc<ProductCatalog>,
        gateway: BoxedPaymentGateway,
        store: BoxedOrderStore,
        config: AppConfig,
    ) -> Self {
        let orchestrator = Arc::new(CheckoutOrchestrator::new(
            Arc::clone(&catalog) as Arc<dyn checkout_core::CatalogReader>,
            gateway,
            Arc::clone(&store),
        ));

        Self {
            orchestrator,
            catalog,
            store,
            config,
        }
    }
}

/// Load product catalog from config file
fn load_product_catalog() -> anyhow::Result<ProductCatalog> {
    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = ProductCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} products from {}", catalog.products.len(), path);
            return Ok(catalog);
        }
    }

    anyhow::bail!("No product catalog found (expected config/products.toml)")
}
