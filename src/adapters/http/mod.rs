//! HTTP adapters - REST API implementations.

pub mod payment;
mod server;

// Re-export key types for convenience
pub use payment::{payment_router, PaymentAppState, WEBHOOK_PATH};
pub use server::{app_router, serve, shutdown_signal};
