//! # Request Handlers
//!
//! Axum request handlers for the storefront API. The checkout handler is a
//! thin adapter over the orchestrator: it rejects malformed requests up
//! front, then returns the orchestrator's result verbatim with 200/400
//! mapping.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use checkout_core::{CartLine, CheckoutResult};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Checkout request
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Owner (customer) identifier, supplied by the calling layer; this
    /// service does not issue identities
    #[serde(default)]
    pub owner_id: String,

    /// Cart lines to check out
    #[serde(default)]
    pub items: Vec<CartLine>,

    /// Payment method reference obtained by the storefront client
    #[serde(default)]
    pub payment_method_ref: String,
}

/// Error response for the read endpoints
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Process a checkout
#[instrument(skip(state, request), fields(owner_id = %request.owner_id, items = request.items.len()))]
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResult>), (StatusCode, Json<ErrorResponse>)> {
    // Request-shape guards, checked before the orchestrator is invoked.
    if request.owner_id.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Owner id is required.", 400)),
        ));
    }
    if request.items.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Cart cannot be empty.", 400)),
        ));
    }
    if request.payment_method_ref.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Payment method ID is required.", 400)),
        ));
    }

    info!("Checkout initiated by owner {}", request.owner_id);

    let result = state
        .orchestrator
        .checkout(&request.owner_id, request.items, &request.payment_method_ref)
        .await;

    if result.success {
        info!(
            "Checkout successful for owner {}, order {:?}",
            request.owner_id, result.order_id
        );
        Ok((StatusCode::OK, Json(result)))
    } else {
        info!(
            "Checkout failed for owner {}: {}",
            request.owner_id, result.message
        );
        Ok((StatusCode::BAD_REQUEST, Json(result)))
    }
}

/// Order history for an owner, newest first
#[instrument(skip(state))]
pub async fn order_history(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let orders = state.store.orders_for_owner(&owner_id).await.map_err(|e| {
        error!("Failed to fetch order history for owner {}: {}", owner_id, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(
                "An error occurred while fetching your order history.",
                500,
            )),
        )
    })?;

    Ok(Json(serde_json::json!({
        "owner_id": owner_id,
        "orders": orders,
        "count": orders.len()
    })))
}

/// List purchasable products
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    let products: Vec<_> = state.catalog.active_products().collect();
    Json(serde_json::json!({
        "products": products,
        "count": products.len()
    }))
}

/// Get single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let product = state.catalog.get(&product_id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                format!("Product not found: {}", product_id),
                404,
            )),
        )
    })?;

    Ok(Json(product.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::state::AppConfig;
    use async_trait::async_trait;
    use axum_test::TestServer;
    use checkout_core::{
        CatalogProduct, Currency, GatewayError, MemoryOrderStore, PaymentAuthorization,
        PaymentGateway, Price, ProductCatalog,
    };
    use std::sync::Arc;

    struct AlwaysAuthorizes;

    #[async_trait]
    impl PaymentGateway for AlwaysAuthorizes {
        async fn authorize(
            &self,
            _amount: Price,
            _payment_method_ref: &str,
        ) -> Result<PaymentAuthorization, GatewayError> {
            Ok(PaymentAuthorization::authorized("pi_stub_1"))
        }

        fn gateway_name(&self) -> &'static str {
            "stub"
        }
    }

    fn test_server() -> TestServer {
        let mut catalog = ProductCatalog::new();
        catalog.add(CatalogProduct {
            id: "classic-logo-tee".to_string(),
            name: "Classic Logo Tee".to_string(),
            description: "A timeless classic".to_string(),
            price: Price::new(19.99, Currency::USD),
            active: true,
            image_url: None,
        });

        let state = AppState::with_parts(
            Arc::new(catalog),
            Arc::new(AlwaysAuthorizes),
            Arc::new(MemoryOrderStore::new()),
            AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
            },
        );

        TestServer::new(create_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_checkout_places_order_and_shows_in_history() {
        let server = test_server();

        let response = server
            .post("/api/v1/checkout")
            .json(&serde_json::json!({
                "owner_id": "user-1",
                "items": [{ "product_id": "classic-logo-tee", "quantity": 2 }],
                "payment_method_ref": "pm_card_visa"
            }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Order placed successfully.");
        let order_id = body["order_id"].as_str().unwrap().to_string();

        let history = server.get("/api/v1/orders/user-1").await;
        history.assert_status_ok();
        let body: serde_json::Value = history.json();
        assert_eq!(body["count"], 1);
        assert_eq!(body["orders"][0]["id"], order_id.as_str());
        assert_eq!(body["orders"][0]["total_amount"]["amount"], 3998);
    }

    #[tokio::test]
    async fn test_checkout_unknown_product_is_400_with_reason() {
        let server = test_server();

        let response = server
            .post("/api/v1/checkout")
            .json(&serde_json::json!({
                "owner_id": "user-1",
                "items": [{ "product_id": "no-such-tee", "quantity": 1 }],
                "payment_method_ref": "pm_card_visa"
            }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["reason"], "unknown_product");
        assert_eq!(body["message"], "One or more products in your cart are invalid.");
    }

    #[tokio::test]
    async fn test_checkout_guards_reject_bad_requests() {
        let server = test_server();

        let response = server
            .post("/api/v1/checkout")
            .json(&serde_json::json!({
                "owner_id": "user-1",
                "items": [],
                "payment_method_ref": "pm_card_visa"
            }))
            .await;
        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Cart cannot be empty.");

        let response = server
            .post("/api/v1/checkout")
            .json(&serde_json::json!({
                "owner_id": "user-1",
                "items": [{ "product_id": "classic-logo-tee", "quantity": 1 }]
            }))
            .await;
        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Payment method ID is required.");
    }

    #[tokio::test]
    async fn test_product_endpoints() {
        let server = test_server();

        let response = server.get("/api/v1/products").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["count"], 1);

        let response = server.get("/api/v1/products/classic-logo-tee").await;
        response.assert_status_ok();

        let response = server.get("/api/v1/products/no-such-tee").await;
        response.assert_status_not_found();
    }
}
