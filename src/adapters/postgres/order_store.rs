//! PostgreSQL implementation of OrderStore.
//!
//! Orders live in the `orders` table. Line items and notes are stored as
//! JSONB; the Naboopay transaction id is the indexed `naboo_order_id`
//! column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::foundation::{
    DomainError, ErrorCode, OrderId, Timestamp, TransactionId,
};
use crate::domain::order::{LineItem, Order, OrderNote, OrderStatus};
use crate::ports::OrderStore;

/// PostgreSQL implementation of the OrderStore port.
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgresOrderStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an order.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    order_key: String,
    status: String,
    line_items: Json<Vec<LineItem>>,
    naboo_order_id: Option<String>,
    paid_at: Option<DateTime<Utc>>,
    notes: Json<Vec<OrderNote>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id).map_err(|_| {
            DomainError::database(format!("Invalid order id: {}", row.id))
        })?;
        let status: OrderStatus = row
            .status
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid status value: {}", e)))?;
        // Blank correlation values are treated as absent
        let transaction_id = row.naboo_order_id.and_then(|v| TransactionId::new(v).ok());

        Ok(Order {
            id: OrderId::new(id),
            order_key: row.order_key,
            status,
            line_items: row.line_items.0,
            transaction_id,
            paid_at: row.paid_at.map(Timestamp::from_datetime),
            notes: row.notes.0,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn order_id_to_db(id: OrderId) -> Result<i64, DomainError> {
    i64::try_from(id.value()).map_err(|_| {
        DomainError::new(
            ErrorCode::ValidationFailed,
            format!("Order id {} exceeds the database range", id),
        )
    })
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, order_key, status, line_items, naboo_order_id, paid_at, notes,
           created_at, updated_at
    FROM orders
"#;

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn save(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_key, status, line_items, naboo_order_id, paid_at, notes,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(order_id_to_db(order.id)?)
        .bind(&order.order_key)
        .bind(order.status.as_str())
        .bind(Json(&order.line_items))
        .bind(order.transaction_id.as_ref().map(TransactionId::as_str))
        .bind(order.paid_at.map(|t| *t.as_datetime()))
        .bind(Json(&order.notes))
        .bind(order.created_at.as_datetime())
        .bind(order.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("orders_pkey") {
                    return DomainError::new(
                        ErrorCode::OrderExists,
                        format!("Order {} already exists", order.id),
                    );
                }
            }
            DomainError::database(format!("Failed to save order: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET
                status = $2,
                line_items = $3,
                naboo_order_id = $4,
                paid_at = $5,
                notes = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(order_id_to_db(order.id)?)
        .bind(order.status.as_str())
        .bind(Json(&order.line_items))
        .bind(order.transaction_id.as_ref().map(TransactionId::as_str))
        .bind(order.paid_at.map(|t| *t.as_datetime()))
        .bind(Json(&order.notes))
        .bind(order.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update order: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(order_id_to_db(id)?)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to find order: {}", e)))?;

        row.map(Order::try_from).transpose()
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "{} WHERE naboo_order_id = $1 ORDER BY id ASC LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(transaction_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find order: {}", e)))?;

        row.map(Order::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, naboo_order_id: Option<&str>) -> OrderRow {
        let now = Utc::now();
        OrderRow {
            id: 42,
            order_key: "wc_order_42".to_string(),
            status: status.to_string(),
            line_items: Json(vec![LineItem::new("Mug", 1000, 2, "").unwrap()]),
            naboo_order_id: naboo_order_id.map(str::to_string),
            paid_at: None,
            notes: Json(vec![]),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_converts_to_order() {
        let order = Order::try_from(row("on-hold", Some("txn_42"))).unwrap();

        assert_eq!(order.id, OrderId::new(42));
        assert_eq!(order.status, OrderStatus::OnHold);
        assert_eq!(order.line_items[0].quantity, 2);
        assert_eq!(order.transaction_id.unwrap().as_str(), "txn_42");
    }

    #[test]
    fn row_accepts_prefixed_status() {
        let order = Order::try_from(row("wc-processing", None)).unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[test]
    fn row_with_unknown_status_is_database_error() {
        let err = Order::try_from(row("shipped", None)).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn row_with_blank_correlation_is_uncorrelated() {
        let order = Order::try_from(row("pending", Some("  "))).unwrap();
        assert!(order.transaction_id.is_none());
    }

    #[test]
    fn negative_id_is_rejected() {
        let mut bad = row("pending", None);
        bad.id = -1;
        assert!(Order::try_from(bad).is_err());
    }

    #[test]
    fn order_id_beyond_bigint_is_rejected() {
        assert!(order_id_to_db(OrderId::new(u64::MAX)).is_err());
        assert_eq!(order_id_to_db(OrderId::new(7)).unwrap(), 7);
    }
}
