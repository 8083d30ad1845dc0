//! HandlePaymentWebhookHandler - Command handler for Naboopay status notifications.

use std::sync::Arc;

use secrecy::SecretString;

use crate::domain::foundation::{OrderId, TransactionId};
use crate::domain::order::{OrderStatus, TransitionOutcome};
use crate::domain::payment::{OrderAction, WebhookError, WebhookVerifier};
use crate::ports::OrderStore;

/// Command to handle a Naboopay webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook body, exactly as received.
    pub payload: Vec<u8>,
    /// Value of the signature header, if present.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// Payment completed, order moved to processing.
    OrderPaid { order_id: OrderId },
    /// Order moved to the status mapped from the notification.
    StatusUpdated {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },
    /// Order already reflected the notification.
    Unchanged { order_id: OrderId },
    /// Notification acknowledged without touching the order.
    Ignored { order_id: OrderId, reason: String },
}

/// Handler for Naboopay webhooks.
///
/// Authenticates the body, finds the order by its correlation attribute and
/// applies the transition mapped from `transaction_status`. The order is
/// written only when it actually changed.
pub struct HandlePaymentWebhookHandler {
    order_store: Arc<dyn OrderStore>,
    secret: Option<SecretString>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(order_store: Arc<dyn OrderStore>, secret: Option<SecretString>) -> Self {
        Self {
            order_store,
            secret,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        // 1. Authenticate and parse
        let verifier = WebhookVerifier::from_secret(self.secret.as_ref()).map_err(|e| {
            tracing::error!("Naboopay webhook received but no secret is configured");
            e
        })?;
        let payload = verifier
            .verify_and_parse(&cmd.payload, cmd.signature.as_deref())
            .map_err(|e| {
                tracing::warn!(error = %e, "Naboopay webhook rejected");
                e
            })?;

        // 2. Find the order carrying this transaction id
        let transaction_id = TransactionId::new(payload.order_id)
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;
        let mut order = self
            .order_store
            .find_by_transaction_id(&transaction_id)
            .await
            .map_err(|e| WebhookError::StorageError(e.to_string()))?
            .ok_or_else(|| {
                tracing::warn!(transaction_id = %transaction_id, "No order for Naboopay transaction");
                WebhookError::OrderNotFound
            })?;
        let order_id = order.id;

        // 3. Map the status to an order action
        let Some((action, note)) = payload.transaction_status.order_action() else {
            tracing::warn!(
                order_id = %order_id,
                transaction_status = payload.transaction_status.as_str(),
                "Unknown Naboopay transaction status ignored"
            );
            return Ok(HandlePaymentWebhookResult::Ignored {
                order_id,
                reason: format!(
                    "unknown transaction status '{}'",
                    payload.transaction_status.as_str()
                ),
            });
        };

        let outcome = match action {
            OrderAction::MarkPaid => order.mark_paid(note),
            OrderAction::SetStatus(target) => order.update_status(target, note),
        };

        // 4. Persist only real changes
        let TransitionOutcome::Applied { from, to } = outcome else {
            tracing::debug!(order_id = %order_id, status = %order.status, "Order already up to date");
            return Ok(HandlePaymentWebhookResult::Unchanged { order_id });
        };

        self.order_store
            .update(&order)
            .await
            .map_err(|e| WebhookError::StorageError(e.to_string()))?;

        tracing::info!(
            order_id = %order_id,
            transaction_id = %transaction_id,
            from = %from,
            to = %to,
            "Order updated from Naboopay webhook"
        );

        Ok(match action {
            OrderAction::MarkPaid => HandlePaymentWebhookResult::OrderPaid { order_id },
            OrderAction::SetStatus(_) => HandlePaymentWebhookResult::StatusUpdated { order_id, from, to },
        })
    }
}
