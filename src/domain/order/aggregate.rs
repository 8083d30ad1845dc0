//! Order aggregate.
//!
//! Orders are owned by the host commerce platform. The gateway reads them,
//! writes the Naboopay transaction id onto them as a correlation attribute,
//! and drives their status from webhook notifications.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrderId, Timestamp, TransactionId, ValidationError};

use super::line_item::LineItem;
use super::status::OrderStatus;

/// A free-text note recorded against an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNote {
    pub content: String,
    pub created_at: Timestamp,
}

/// Whether a status change actually modified the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Status changed and a note was recorded.
    Applied { from: OrderStatus, to: OrderStatus },
    /// Order was already in the requested state.
    Unchanged,
}

/// Order aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Secret key used in the buyer's order-received URL.
    pub order_key: String,
    pub status: OrderStatus,
    pub line_items: Vec<LineItem>,
    /// Correlation attribute linking the order to its Naboopay transaction.
    pub transaction_id: Option<TransactionId>,
    pub paid_at: Option<Timestamp>,
    pub notes: Vec<OrderNote>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Creates a new pending order.
    pub fn new(
        id: OrderId,
        order_key: impl Into<String>,
        line_items: Vec<LineItem>,
    ) -> Result<Self, ValidationError> {
        let order_key = order_key.into();
        if order_key.trim().is_empty() {
            return Err(ValidationError::empty_field("order_key"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            order_key,
            status: OrderStatus::Pending,
            line_items,
            transaction_id: None,
            paid_at: None,
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Records the Naboopay transaction id on the order.
    pub fn attach_transaction(&mut self, transaction_id: TransactionId) {
        self.transaction_id = Some(transaction_id);
        self.touch();
    }

    /// Adds a note to the order.
    pub fn add_note(&mut self, content: impl Into<String>) {
        self.notes.push(OrderNote {
            content: content.into(),
            created_at: Timestamp::now(),
        });
        self.touch();
    }

    /// Completes payment on the order.
    ///
    /// Only orders still awaiting payment move to `processing`; an order
    /// that is already paid is left untouched so repeated notifications are
    /// absorbed.
    pub fn mark_paid(&mut self, note: &str) -> TransitionOutcome {
        if !self.status.needs_payment() {
            return TransitionOutcome::Unchanged;
        }

        let from = self.status;
        self.status = OrderStatus::Processing;
        self.paid_at = Some(Timestamp::now());
        self.add_note(note);

        TransitionOutcome::Applied {
            from,
            to: OrderStatus::Processing,
        }
    }

    /// Moves the order to `target`, recording `note` when it changes.
    ///
    /// Any status may be set from any other, matching the host platform.
    pub fn update_status(&mut self, target: OrderStatus, note: &str) -> TransitionOutcome {
        if self.status == target {
            return TransitionOutcome::Unchanged;
        }

        let from = self.status;
        self.status = target;
        self.add_note(format!(
            "{} Order status changed from {} to {}.",
            note, from, target
        ));

        TransitionOutcome::Applied { from, to: target }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::new(
            OrderId::new(101),
            "wc_order_abc",
            vec![
                LineItem::new("Bissap", 1500, 2, "Hibiscus juice").unwrap(),
                LineItem::new("Thiakry", 2000, 1, "").unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_order_is_pending_and_uncorrelated() {
        let order = order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.transaction_id.is_none());
        assert!(order.notes.is_empty());
    }

    #[test]
    fn new_order_requires_order_key() {
        assert!(Order::new(OrderId::new(1), "", vec![]).is_err());
    }

    #[test]
    fn attach_transaction_sets_correlation_attribute() {
        let mut order = order();
        order.attach_transaction(TransactionId::new("txn_1").unwrap());
        assert_eq!(order.transaction_id.as_ref().unwrap().as_str(), "txn_1");
    }

    #[test]
    fn mark_paid_moves_pending_to_processing() {
        let mut order = order();

        let outcome = order.mark_paid("Payment completed via Naboopay.");

        assert_eq!(
            outcome,
            TransitionOutcome::Applied {
                from: OrderStatus::Pending,
                to: OrderStatus::Processing
            }
        );
        assert!(order.paid_at.is_some());
        assert_eq!(order.notes.len(), 1);
        assert_eq!(order.notes[0].content, "Payment completed via Naboopay.");
    }

    #[test]
    fn mark_paid_twice_is_absorbed() {
        let mut order = order();
        order.mark_paid("paid");

        let outcome = order.mark_paid("paid");

        assert_eq!(outcome, TransitionOutcome::Unchanged);
        assert_eq!(order.notes.len(), 1);
    }

    #[test]
    fn mark_paid_recovers_cancelled_order() {
        let mut order = order();
        order.update_status(OrderStatus::Cancelled, "cancel");

        let outcome = order.mark_paid("paid");

        assert!(matches!(outcome, TransitionOutcome::Applied { .. }));
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[test]
    fn update_status_records_note_with_transition() {
        let mut order = order();

        order.update_status(OrderStatus::OnHold, "Payment partially paid via Naboopay.");

        assert_eq!(order.status, OrderStatus::OnHold);
        assert_eq!(
            order.notes[0].content,
            "Payment partially paid via Naboopay. Order status changed from pending to on-hold."
        );
    }

    #[test]
    fn update_status_to_same_status_is_unchanged() {
        let mut order = order();

        let outcome = order.update_status(OrderStatus::Pending, "pending");

        assert_eq!(outcome, TransitionOutcome::Unchanged);
        assert!(order.notes.is_empty());
    }

    #[test]
    fn update_status_moves_completed_order_to_cancelled() {
        let mut order = order();
        order.status = OrderStatus::Completed;

        let outcome = order.update_status(OrderStatus::Cancelled, "Payment cancelled via Naboopay.");

        assert_eq!(
            outcome,
            TransitionOutcome::Applied {
                from: OrderStatus::Completed,
                to: OrderStatus::Cancelled
            }
        );
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(order.notes.len(), 1);
    }

    #[test]
    fn update_status_applies_from_every_status() {
        use OrderStatus::*;
        for from in [Pending, Processing, OnHold, Completed, Cancelled, Refunded, Failed] {
            let mut order = order();
            order.status = from;

            order.update_status(Pending, "pending");

            assert_eq!(order.status, Pending, "from {:?}", from);
        }
    }
}
