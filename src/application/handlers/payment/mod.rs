//! Payment handlers.
//!
//! ## Commands
//! - Starting a Naboopay checkout for an order
//! - Processing Naboopay status webhooks

mod handle_payment_webhook;
mod process_payment;

pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
pub use process_payment::{
    CheckoutError, ProcessPaymentCommand, ProcessPaymentHandler, ProcessPaymentResult,
};
