//! # Pricing Validator
//!
//! Revalidates a client cart against the authoritative catalog and recomputes
//! every price server-side. Unknown-product detection is batched across the
//! whole cart; the quantity check stops at the first offender. That asymmetry
//! is part of the validator's observable contract.

use crate::cart::CartLine;
use crate::catalog::{CatalogProduct, CatalogReader};
use crate::error::ValidationError;
use crate::order::ValidatedOrderLine;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Validates carts and stamps catalog prices onto their lines.
///
/// Purely a read of the catalog plus computation; no side effects.
pub struct PricingValidator {
    catalog: Arc<dyn CatalogReader>,
}

impl PricingValidator {
    pub fn new(catalog: Arc<dyn CatalogReader>) -> Self {
        Self { catalog }
    }

    /// Validate a cart and return one price-stamped line per cart line,
    /// preserving cart order.
    pub async fn validate(
        &self,
        owner_id: &str,
        cart: &[CartLine],
    ) -> Result<Vec<ValidatedOrderLine>, ValidationError> {
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart);
        }

        // One snapshot fetch for the distinct ids; the catalog omits ids it
        // cannot resolve.
        let mut ids: Vec<String> = cart.iter().map(|line| line.product_id.clone()).collect();
        ids.sort();
        ids.dedup();

        let snapshot = self.catalog.products_by_ids(&ids).await;
        let by_id: HashMap<&str, &CatalogProduct> =
            snapshot.iter().map(|p| (p.id.as_str(), p)).collect();

        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !by_id.contains_key(id.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            warn!(
                "Cart validation failed for owner {}: unknown product ids: {}",
                owner_id,
                missing.join(", ")
            );
            return Err(ValidationError::UnknownProduct {
                product_ids: missing,
            });
        }

        let mut validated = Vec::with_capacity(cart.len());
        for line in cart {
            let product = by_id[line.product_id.as_str()];
            if line.quantity <= 0 {
                warn!(
                    "Cart validation failed for owner {}: invalid quantity {} for product {}",
                    owner_id, line.quantity, product.id
                );
                return Err(ValidationError::InvalidQuantity {
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                });
            }
            validated.push(ValidatedOrderLine {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                unit_price: product.price.clone(),
                quantity: line.quantity as u32,
            });
        }

        Ok(validated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductCatalog;
    use crate::money::{Currency, Price};

    fn catalog() -> Arc<ProductCatalog> {
        let mut catalog = ProductCatalog::new();
        catalog.add(CatalogProduct {
            id: "classic-logo-tee".to_string(),
            name: "Classic Logo Tee".to_string(),
            description: String::new(),
            price: Price::new(19.99, Currency::USD),
            active: true,
            image_url: None,
        });
        catalog.add(CatalogProduct {
            id: "rocket-tee".to_string(),
            name: "Rocket Tee".to_string(),
            description: String::new(),
            price: Price::new(22.50, Currency::USD),
            active: true,
            image_url: None,
        });
        Arc::new(catalog)
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let validator = PricingValidator::new(catalog());
        let result = validator.validate("user-1", &[]).await;

        assert_eq!(result.unwrap_err(), ValidationError::EmptyCart);
    }

    #[tokio::test]
    async fn test_unknown_products_are_reported_together() {
        let validator = PricingValidator::new(catalog());
        let cart = vec![
            CartLine::new("no-such-tee", 1),
            CartLine::new("classic-logo-tee", 1),
            CartLine::new("also-missing", 1),
        ];

        let err = validator.validate("user-1", &cart).await.unwrap_err();
        match err {
            ValidationError::UnknownProduct { product_ids } => {
                assert_eq!(product_ids.len(), 2);
                assert!(product_ids.contains(&"no-such-tee".to_string()));
                assert!(product_ids.contains(&"also-missing".to_string()));
            }
            other => panic!("expected UnknownProduct, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_quantity_check_stops_at_first_offender() {
        let validator = PricingValidator::new(catalog());
        let cart = vec![
            CartLine::new("classic-logo-tee", 1),
            CartLine::new("rocket-tee", 0),
            CartLine::new("classic-logo-tee", -3),
        ];

        let err = validator.validate("user-1", &cart).await.unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidQuantity {
                product_id: "rocket-tee".to_string(),
                product_name: "Rocket Tee".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_prices_come_from_the_catalog_in_cart_order() {
        let validator = PricingValidator::new(catalog());
        let cart = vec![
            CartLine {
                // Client-asserted price must be ignored
                unit_price: Some(Price::new(0.01, Currency::USD)),
                ..CartLine::new("rocket-tee", 1)
            },
            CartLine::new("classic-logo-tee", 2),
        ];

        let lines = validator.validate("user-1", &cart).await.unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_id, "rocket-tee");
        assert_eq!(lines[0].unit_price.amount, 2250);
        assert_eq!(lines[1].product_id, "classic-logo-tee");
        assert_eq!(lines[1].unit_price.amount, 1999);
        assert_eq!(lines[1].quantity, 2);
    }

    #[tokio::test]
    async fn test_duplicate_lines_each_get_priced() {
        let validator = PricingValidator::new(catalog());
        let cart = vec![
            CartLine::new("classic-logo-tee", 1),
            CartLine::new("classic-logo-tee", 2),
        ];

        let lines = validator.validate("user-1", &cart).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].quantity, 1);
        assert_eq!(lines[1].quantity, 2);
    }
}
