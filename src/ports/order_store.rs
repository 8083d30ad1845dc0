//! Order store port.
//!
//! Abstracts the host commerce platform's order storage. The gateway needs
//! to load orders, find them by their Naboopay correlation attribute and
//! write back status transitions.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrderId, TransactionId};
use crate::domain::order::Order;

/// Port for order persistence.
///
/// Implementations are expected to serialise concurrent writes to the
/// same order.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a new order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if an order with the same id exists or the
    /// write fails.
    async fn save(&self, order: &Order) -> Result<(), DomainError>;

    /// Persist changes to an existing order.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` if the order does not exist.
    async fn update(&self, order: &Order) -> Result<(), DomainError>;

    /// Find an order by its internal id.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError>;

    /// Find the order whose correlation attribute equals `transaction_id`.
    ///
    /// If several orders share the id, the lowest order id wins.
    async fn find_by_transaction_id(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Option<Order>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn OrderStore) {}
    }
}
