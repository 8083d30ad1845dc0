//! Mock payment provider for testing.
//!
//! Records every transaction request and answers with a scripted outcome.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::payment::{TransactionRequest, TransactionResponse};
use crate::ports::{PaymentError, PaymentProvider};

/// Scripted response of the mock provider.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return a transaction with a checkout URL.
    Succeed { transaction_id: String },
    /// Return this response body verbatim.
    Respond(TransactionResponse),
    /// Fail with this error.
    Fail(PaymentError),
}

/// In-memory `PaymentProvider` for tests.
pub struct MockPaymentProvider {
    outcome: Mutex<MockOutcome>,
    requests: Mutex<Vec<TransactionRequest>>,
}

impl MockPaymentProvider {
    /// Provider that creates transaction `transaction_id`.
    pub fn succeeding(transaction_id: impl Into<String>) -> Self {
        Self::with_outcome(MockOutcome::Succeed {
            transaction_id: transaction_id.into(),
        })
    }

    /// Provider that fails every call with `error`.
    pub fn failing(error: PaymentError) -> Self {
        Self::with_outcome(MockOutcome::Fail(error))
    }

    pub fn with_outcome(outcome: MockOutcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the scripted outcome.
    pub fn set_outcome(&self, outcome: MockOutcome) {
        *self.outcome.lock().unwrap_or_else(PoisonError::into_inner) = outcome;
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<TransactionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Hosted checkout URL the mock issues for a transaction.
    pub fn checkout_url_for(transaction_id: &str) -> String {
        format!("https://checkout.naboopay.test/{}", transaction_id)
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionResponse, PaymentError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let outcome = self
            .outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match outcome {
            MockOutcome::Succeed { transaction_id } => Ok(TransactionResponse {
                checkout_url: Some(Self::checkout_url_for(&transaction_id)),
                order_id: Some(transaction_id),
                message: None,
            }),
            MockOutcome::Respond(response) => Ok(response),
            MockOutcome::Fail(error) => Err(error),
        }
    }
}
