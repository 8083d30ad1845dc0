//! Order line items.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// A purchased product on an order.
///
/// Amounts are whole currency units (XOF has no minor unit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub amount: u64,
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
}

impl LineItem {
    /// Creates a line item, rejecting empty names and zero quantities.
    pub fn new(
        name: impl Into<String>,
        amount: u64,
        quantity: u32,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if quantity == 0 {
            return Err(ValidationError::invalid_format(
                "quantity",
                "must be at least 1",
            ));
        }
        Ok(Self {
            name,
            amount,
            quantity,
            description: description.into(),
        })
    }
}
