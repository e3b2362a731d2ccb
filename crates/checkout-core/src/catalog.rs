//! # Product Catalog
//!
//! Authoritative product data for pricing. The catalog is the only source of
//! truth for unit prices; client-submitted prices are never consulted.
//! The in-process implementation loads from `config/products.toml`.

use crate::money::Price;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Unique product identifier (e.g., "classic-logo-tee")
    pub id: String,

    /// Display name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Authoritative unit price
    pub price: Price,

    /// Whether this product is available for purchase
    #[serde(default = "default_true")]
    pub active: bool,

    /// Optional image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Read access to the product catalog.
///
/// `products_by_ids` returns only products that exist and are purchasable;
/// unknown and retired ids are omitted rather than reported as errors. The
/// result is a point-in-time snapshot, not a lock.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn products_by_ids(&self, ids: &[String]) -> Vec<CatalogProduct>;
}

/// Product catalog backed by an in-process list (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub products: Vec<CatalogProduct>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Add a product to the catalog
    pub fn add(&mut self, product: CatalogProduct) {
        self.products.push(product);
    }

    /// Find a product by ID
    pub fn get(&self, id: &str) -> Option<&CatalogProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All purchasable products
    pub fn active_products(&self) -> impl Iterator<Item = &CatalogProduct> {
        self.products.iter().filter(|p| p.active)
    }

    /// Load catalog from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

#[async_trait]
impl CatalogReader for ProductCatalog {
    async fn products_by_ids(&self, ids: &[String]) -> Vec<CatalogProduct> {
        self.products
            .iter()
            .filter(|p| p.active && ids.iter().any(|id| *id == p.id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn sample_catalog() -> ProductCatalog {
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
            id: "retired-tee".to_string(),
            name: "Retired Tee".to_string(),
            description: String::new(),
            price: Price::new(9.99, Currency::USD),
            active: false,
            image_url: None,
        });
        catalog
    }

    #[test]
    fn test_from_toml() {
        let toml_str = r#"
            [[products]]
            id = "classic-logo-tee"
            name = "Classic Logo Tee"
            description = "A timeless classic"
            price = { amount = 1999, currency = "usd" }

            [[products]]
            id = "rocket-tee"
            name = "Rocket Tee"
            price = { amount = 2250, currency = "usd" }
            active = false
        "#;

        let catalog = ProductCatalog::from_toml(toml_str).unwrap();
        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.get("classic-logo-tee").unwrap().price.amount, 1999);
        assert!(!catalog.get("rocket-tee").unwrap().active);
        assert_eq!(catalog.active_products().count(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_omits_unknown_and_inactive() {
        let catalog = sample_catalog();
        let ids = vec![
            "classic-logo-tee".to_string(),
            "retired-tee".to_string(),
            "no-such-tee".to_string(),
        ];

        let snapshot = catalog.products_by_ids(&ids).await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "classic-logo-tee");
    }
}
