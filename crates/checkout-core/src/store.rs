//! # Order Store
//!
//! Durable order persistence. The orchestrator only ever appends: an order is
//! written exactly once per successful checkout and never mutated afterwards.
//! The in-memory adapter here is the default store; a relational adapter can
//! implement the same trait without touching the core.

use crate::error::StoreError;
use crate::order::{Order, OrderRecord};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Order persistence seam.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist an order, assigning and returning its unique id
    async fn save(&self, order: Order) -> Result<String, StoreError>;

    /// All persisted orders for an owner, newest first
    async fn orders_for_owner(&self, owner_id: &str) -> Result<Vec<OrderRecord>, StoreError>;
}

/// Type alias for a shared store (dynamic dispatch)
pub type BoxedOrderStore = Arc<dyn OrderStore>;

/// In-memory order store
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    records: RwLock<Vec<OrderRecord>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted orders
    pub fn len(&self) -> usize {
        self.records.read().expect("order store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn save(&self, order: Order) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError("order store lock poisoned".to_string()))?;
        records.push(OrderRecord {
            id: id.clone(),
            order,
        });
        Ok(id)
    }

    async fn orders_for_owner(&self, owner_id: &str) -> Result<Vec<OrderRecord>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError("order store lock poisoned".to_string()))?;
        let mut owned: Vec<OrderRecord> = records
            .iter()
            .filter(|r| r.order.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.order.created_at.cmp(&a.order.created_at));
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Price};
    use crate::order::ValidatedOrderLine;

    fn order_for(owner_id: &str) -> Order {
        Order::from_validated_lines(
            owner_id,
            vec![ValidatedOrderLine {
                product_id: "classic-logo-tee".to_string(),
                product_name: "Classic Logo Tee".to_string(),
                unit_price: Price::new(19.99, Currency::USD),
                quantity: 1,
            }],
            Currency::USD,
            "pi_test",
        )
    }

    #[tokio::test]
    async fn test_save_assigns_unique_ids() {
        let store = MemoryOrderStore::new();
        let a = store.save(order_for("user-1")).await.unwrap();
        let b = store.save(order_for("user-1")).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_history_is_owner_scoped() {
        let store = MemoryOrderStore::new();
        store.save(order_for("user-1")).await.unwrap();
        store.save(order_for("user-2")).await.unwrap();

        let mine = store.orders_for_owner("user-1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].order.owner_id, "user-1");

        let none = store.orders_for_owner("user-3").await.unwrap();
        assert!(none.is_empty());
    }
}
