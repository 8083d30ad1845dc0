//! ProcessPaymentHandler - Command handler for starting a Naboopay checkout.

use std::sync::Arc;

use thiserror::Error;

use crate::config::{GatewayConfig, ValidationError as ConfigValidationError};
use crate::domain::foundation::{DomainError, OrderId, TransactionId, ValidationError};
use crate::domain::order::OrderStatus;
use crate::domain::payment::{PaymentMethod, TransactionRequest, TransactionResponse};
use crate::ports::{OrderStore, PaymentError, PaymentErrorCode, PaymentProvider};

/// Command to start payment for an order.
#[derive(Debug, Clone)]
pub struct ProcessPaymentCommand {
    pub order_id: OrderId,
    /// Wallet chosen by the buyer; the configured default when absent.
    pub payment_method: Option<PaymentMethod>,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessPaymentResult {
    /// Naboopay transaction id now stored on the order.
    pub transaction_id: TransactionId,
    /// Hosted checkout URL to redirect the buyer to.
    pub redirect: String,
}

/// Errors from the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Naboopay gateway is disabled")]
    GatewayDisabled,

    #[error("Order {0} not found")]
    OrderNotFound(OrderId),

    #[error("Order is {0} and cannot be paid")]
    OrderNotPayable(OrderStatus),

    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] ValidationError),

    /// Provider call failed; `notice` is safe to show the buyer.
    #[error("{notice}")]
    PaymentFailed { notice: String },

    #[error("Order store error: {0}")]
    Store(#[from] DomainError),

    #[error("Gateway misconfigured: {0}")]
    Configuration(#[from] ConfigValidationError),
}

impl CheckoutError {
    fn payment_failed(reason: impl AsRef<str>) -> Self {
        CheckoutError::PaymentFailed {
            notice: format!("Payment error: {}", reason.as_ref()),
        }
    }
}

/// Buyer-facing reason for a provider failure.
///
/// Provider messages are passed through; transport details are not.
fn failure_reason(error: &PaymentError) -> &str {
    match error.code {
        PaymentErrorCode::ProviderError | PaymentErrorCode::AuthenticationError
            if !error.message.is_empty() =>
        {
            &error.message
        }
        PaymentErrorCode::NetworkError => "Naboopay could not be reached. Please try again.",
        _ => "Naboopay could not create the transaction.",
    }
}

/// Handler that creates a Naboopay transaction for an order.
///
/// On success the transaction id is written onto the order as its
/// correlation attribute so the webhook can find it later. On failure the
/// order is left untouched. No retry.
pub struct ProcessPaymentHandler {
    order_store: Arc<dyn OrderStore>,
    payment_provider: Arc<dyn PaymentProvider>,
    gateway: Arc<GatewayConfig>,
}

impl ProcessPaymentHandler {
    pub fn new(
        order_store: Arc<dyn OrderStore>,
        payment_provider: Arc<dyn PaymentProvider>,
        gateway: Arc<GatewayConfig>,
    ) -> Self {
        Self {
            order_store,
            payment_provider,
            gateway,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessPaymentCommand,
    ) -> Result<ProcessPaymentResult, CheckoutError> {
        if !self.gateway.enabled {
            return Err(CheckoutError::GatewayDisabled);
        }

        // 1. Load the order
        let mut order = self
            .order_store
            .find_by_id(cmd.order_id)
            .await?
            .ok_or(CheckoutError::OrderNotFound(cmd.order_id))?;

        if !order.status.needs_payment() {
            return Err(CheckoutError::OrderNotPayable(order.status));
        }

        // 2. Build the transaction request
        let method = cmd
            .payment_method
            .unwrap_or(self.gateway.default_payment_method);
        let request = TransactionRequest::for_order(
            &order,
            vec![method],
            self.gateway.success_url(order.id, &order.order_key)?,
            self.gateway.error_url()?,
        )?;

        // 3. Call Naboopay
        let response = self
            .payment_provider
            .create_transaction(request)
            .await
            .map_err(|e| {
                tracing::warn!(
                    order_id = %order.id,
                    error = %e,
                    "Naboopay transaction creation failed"
                );
                CheckoutError::payment_failed(failure_reason(&e))
            })?;

        let (transaction_id, checkout_url) = match response {
            TransactionResponse {
                order_id: Some(transaction_id),
                checkout_url: Some(checkout_url),
                ..
            } if !checkout_url.trim().is_empty() => {
                let transaction_id = TransactionId::new(transaction_id).map_err(|_| {
                    CheckoutError::payment_failed("Naboopay did not return a transaction id.")
                })?;
                (transaction_id, checkout_url)
            }
            TransactionResponse { message, .. } => {
                tracing::warn!(
                    order_id = %order.id,
                    message = message.as_deref().unwrap_or_default(),
                    "Naboopay response has no checkout URL"
                );
                return Err(CheckoutError::payment_failed(
                    message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| "Naboopay did not return a checkout URL.".to_string()),
                ));
            }
        };

        // 4. Correlate the order with the transaction
        order.attach_transaction(transaction_id.clone());
        self.order_store.update(&order).await?;

        tracing::info!(
            order_id = %order.id,
            transaction_id = %transaction_id,
            payment_method = %method,
            "Naboopay checkout created"
        );

        Ok(ProcessPaymentResult {
            transaction_id,
            redirect: checkout_url,
        })
    }
}
