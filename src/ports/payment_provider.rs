//! Payment provider port for the Naboopay transaction API.
//!
//! The gateway only creates transactions; status changes arrive later
//! through the signed webhook.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::payment::{TransactionRequest, TransactionResponse};

/// Port for the payment provider integration.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a transaction and obtain the hosted checkout URL.
    ///
    /// A successful HTTP exchange returns the provider's response as-is;
    /// callers decide whether it carries a usable checkout URL.
    async fn create_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionResponse, PaymentError>;
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    /// Create a provider-reported error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    /// Create an error for a response body that could not be read.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidResponse, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API token rejected.
    AuthenticationError,

    /// Provider API returned an error.
    ProviderError,

    /// Provider response could not be parsed.
    InvalidResponse,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::ProviderError => "provider_error",
            PaymentErrorCode::InvalidResponse => "invalid_response",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn PaymentProvider) {}
    }

    #[test]
    fn payment_error_display() {
        let err = PaymentError::provider("Invalid product amount");
        assert_eq!(err.to_string(), "provider_error: Invalid product amount");
    }

    #[test]
    fn constructors_set_codes() {
        assert_eq!(PaymentError::network("x").code, PaymentErrorCode::NetworkError);
        assert_eq!(
            PaymentError::authentication("x").code,
            PaymentErrorCode::AuthenticationError
        );
        assert_eq!(
            PaymentError::invalid_response("x").code,
            PaymentErrorCode::InvalidResponse
        );
    }
}
