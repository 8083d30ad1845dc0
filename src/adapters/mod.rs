//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes for checkout, gateway info and the webhook
//! - `naboopay` - Naboopay transaction API client
//! - `memory` - In-memory order store
//! - `postgres` - PostgreSQL order store

pub mod http;
pub mod memory;
pub mod naboopay;
pub mod postgres;

pub use memory::InMemoryOrderStore;
pub use naboopay::{NaboopayAdapter, NaboopayConfig};
pub use postgres::PostgresOrderStore;
