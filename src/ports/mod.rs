//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `OrderStore` - Host-owned order storage
//! - `PaymentProvider` - Naboopay transaction API

mod order_store;
mod payment_provider;

pub use order_store::OrderStore;
pub use payment_provider::{PaymentError, PaymentErrorCode, PaymentProvider};
