//! Transaction status codes carried by Naboopay webhooks.

use serde::{Deserialize, Serialize};

use crate::domain::order::OrderStatus;

/// Status reported for a Naboopay transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Paid,
    Cancel,
    Pending,
    PartPaid,
    /// Any code the gateway does not act on.
    Unknown(String),
}

/// What a webhook status asks the gateway to do to the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Complete payment on the order.
    MarkPaid,
    /// Move the order to the given status.
    SetStatus(OrderStatus),
}

impl TransactionStatus {
    /// Maps the status to the order action and the note recorded with it.
    ///
    /// Returns `None` for unknown statuses.
    pub fn order_action(&self) -> Option<(OrderAction, &'static str)> {
        match self {
            TransactionStatus::Paid => {
                Some((OrderAction::MarkPaid, "Payment completed via Naboopay."))
            }
            TransactionStatus::Cancel => Some((
                OrderAction::SetStatus(OrderStatus::Cancelled),
                "Payment cancelled via Naboopay.",
            )),
            TransactionStatus::Pending => Some((
                OrderAction::SetStatus(OrderStatus::Pending),
                "Payment pending via Naboopay.",
            )),
            TransactionStatus::PartPaid => Some((
                OrderAction::SetStatus(OrderStatus::OnHold),
                "Payment partially paid via Naboopay.",
            )),
            TransactionStatus::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Paid => "paid",
            TransactionStatus::Cancel => "cancel",
            TransactionStatus::Pending => "pending",
            TransactionStatus::PartPaid => "part_paid",
            TransactionStatus::Unknown(code) => code,
        }
    }
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Unknown(String::new())
    }
}

impl From<String> for TransactionStatus {
    fn from(code: String) -> Self {
        match code.as_str() {
            "paid" => TransactionStatus::Paid,
            "cancel" => TransactionStatus::Cancel,
            "pending" => TransactionStatus::Pending,
            "part_paid" => TransactionStatus::PartPaid,
            _ => TransactionStatus::Unknown(code),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        status.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paid_marks_order_paid() {
        let (action, note) = TransactionStatus::Paid.order_action().unwrap();
        assert_eq!(action, OrderAction::MarkPaid);
        assert_eq!(note, "Payment completed via Naboopay.");
    }

    #[test]
    fn cancel_maps_to_cancelled() {
        let (action, _) = TransactionStatus::Cancel.order_action().unwrap();
        assert_eq!(action, OrderAction::SetStatus(OrderStatus::Cancelled));
    }

    #[test]
    fn pending_maps_to_pending() {
        let (action, _) = TransactionStatus::Pending.order_action().unwrap();
        assert_eq!(action, OrderAction::SetStatus(OrderStatus::Pending));
    }

    #[test]
    fn part_paid_maps_to_on_hold() {
        let (action, note) = TransactionStatus::PartPaid.order_action().unwrap();
        assert_eq!(action, OrderAction::SetStatus(OrderStatus::OnHold));
        assert_eq!(note, "Payment partially paid via Naboopay.");
    }

    #[test]
    fn unknown_status_has_no_action() {
        let status = TransactionStatus::from("refunded".to_string());
        assert_eq!(status, TransactionStatus::Unknown("refunded".to_string()));
        assert!(status.order_action().is_none());
    }

    #[test]
    fn default_is_empty_unknown_code() {
        let status = TransactionStatus::default();
        assert_eq!(status, TransactionStatus::Unknown(String::new()));
        assert!(status.order_action().is_none());
    }

    #[test]
    fn status_codes_are_case_sensitive() {
        let status = TransactionStatus::from("PAID".to_string());
        assert!(matches!(status, TransactionStatus::Unknown(_)));
    }

    #[test]
    fn deserializes_from_wire_code() {
        let status: TransactionStatus = serde_json::from_str("\"part_paid\"").unwrap();
        assert_eq!(status, TransactionStatus::PartPaid);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"part_paid\"");
    }
}
