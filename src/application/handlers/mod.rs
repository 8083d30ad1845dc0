//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod payment;

pub use payment::{
    CheckoutError, HandlePaymentWebhookCommand, HandlePaymentWebhookHandler,
    HandlePaymentWebhookResult, ProcessPaymentCommand, ProcessPaymentHandler,
    ProcessPaymentResult,
};
