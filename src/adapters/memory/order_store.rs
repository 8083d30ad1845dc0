//! In-memory order store.
//!
//! Used by tests and by the development server when no database is
//! configured. Orders are lost on restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId, TransactionId};
use crate::domain::order::Order;
use crate::ports::OrderStore;

/// Order store backed by a `BTreeMap` keyed by order id.
///
/// Iteration is in ascending id order, which gives the lowest-id-wins rule
/// of [`OrderStore::find_by_transaction_id`] for free.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<BTreeMap<u64, Order>>,
}

impl InMemoryOrderStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `orders`.
    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            orders: RwLock::new(orders.into_iter().map(|o| (o.id.value(), o)).collect()),
        }
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.id.value()) {
            return Err(DomainError::new(
                ErrorCode::OrderExists,
                format!("Order {} already exists", order.id),
            ));
        }
        orders.insert(order.id.value(), order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&order.id.value()) {
            Some(existing) => {
                *existing = order.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found")),
        }
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.read().await.get(&id.value()).cloned())
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .read()
            .await
            .values()
            .find(|o| o.transaction_id.as_ref() == Some(transaction_id))
            .cloned())
    }
}
