//! In-memory adapters.

mod order_store;

pub use order_store::InMemoryOrderStore;
