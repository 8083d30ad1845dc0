//! Naboopay payment provider adapter.
//!
//! Implements the `PaymentProvider` port for the Naboopay transaction API:
//! `PUT /api/v1/transaction/create-transaction`, bearer-token authenticated.
//!
//! # Security
//!
//! - The API token is held as `secrecy::SecretString` and never logged
//! - Webhook authentication lives in `domain::payment::WebhookVerifier`

mod mock_payment_provider;
mod naboopay_adapter;

pub use mock_payment_provider::{MockOutcome, MockPaymentProvider};
pub use naboopay_adapter::{NaboopayAdapter, NaboopayConfig};
