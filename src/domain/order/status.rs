//! Order status.
//!
//! Mirrors the order statuses of the host commerce platform. The gateway
//! only ever drives orders into `processing`, `cancelled`, `pending` and
//! `on-hold`, but the full set is modelled so stored orders round-trip.
//! Like the host platform, any status may be set from any other; only
//! payment completion is guarded (see [`OrderStatus::needs_payment`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Order placed, awaiting payment.
    Pending,

    /// Payment received, order being fulfilled.
    Processing,

    /// Awaiting action (e.g. partial payment received).
    OnHold,

    /// Fulfilled and closed.
    Completed,

    /// Cancelled by buyer, merchant or provider.
    Cancelled,

    /// Refunded after payment.
    Refunded,

    /// Payment failed or was declined.
    Failed,
}

impl OrderStatus {
    /// Storage/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Failed => "failed",
        }
    }

    /// Statuses from which a payment may complete the order.
    pub fn needs_payment(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::OnHold | OrderStatus::Failed | OrderStatus::Cancelled
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().trim_start_matches("wc-") {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "on-hold" => Ok(OrderStatus::OnHold),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "refunded" => Ok(OrderStatus::Refunded),
            "failed" => Ok(OrderStatus::Failed),
            other => Err(ValidationError::invalid_format(
                "order_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}
