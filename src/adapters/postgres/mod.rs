//! PostgreSQL adapters - Database implementations of the store ports.
//!
//! - `PostgresOrderStore` - Orders table with JSONB line items and notes

mod order_store;

pub use order_store::PostgresOrderStore;
