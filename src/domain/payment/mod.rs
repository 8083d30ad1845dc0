//! Payment module - Naboopay transactions and webhook authentication.
//!
//! - `transaction` - request/response bodies of the transaction API
//! - `transaction_status` - webhook status codes and their order actions
//! - `webhook_verifier` - HMAC-SHA256 signature verification
//! - `webhook_errors` - webhook failures and their HTTP status codes

mod transaction;
mod transaction_status;
mod webhook_errors;
mod webhook_verifier;

pub use transaction::{
    PaymentMethod, Product, TransactionRequest, TransactionResponse, DEFAULT_PRODUCT_CATEGORY,
};
pub use transaction_status::{OrderAction, TransactionStatus};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{compute_signature, WebhookPayload, WebhookVerifier, SIGNATURE_HEADER};
