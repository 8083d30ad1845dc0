//! Webhook error types for Naboopay webhook handling.
//!
//! Every failure maps to the HTTP status returned to Naboopay.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// No webhook secret is configured, so nothing can be authenticated.
    #[error("Webhook secret not configured")]
    SecretNotConfigured,

    /// The `x_signature` header is absent.
    #[error("Missing signature")]
    MissingSignature,

    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Failed to parse the webhook payload.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No order carries the notified transaction id.
    #[error("Order not found")]
    OrderNotFound,

    /// Order store operation failed.
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl WebhookError {
    /// Maps the error to the HTTP status code returned to the provider.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::SecretNotConfigured | WebhookError::StorageError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                StatusCode::FORBIDDEN
            }

            WebhookError::ParseError(_) => StatusCode::BAD_REQUEST,

            WebhookError::OrderNotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Plain-text body sent with the status code.
    ///
    /// Never includes the secret or the expected signature.
    pub fn response_body(&self) -> &'static str {
        match self {
            WebhookError::SecretNotConfigured => "Webhook secret not configured",
            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                "Invalid signature"
            }
            WebhookError::ParseError(_) => "Invalid payload",
            WebhookError::OrderNotFound => "Order not found",
            WebhookError::StorageError(_) => "Internal error",
        }
    }
}
