//! Naboopay transaction request and response value objects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::order::Order;

/// Category sent for every product; the store has no category mapping.
pub const DEFAULT_PRODUCT_CATEGORY: &str = "General";

/// Mobile money wallets accepted by Naboopay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Wave,
    OrangeMoney,
    FreeMoney,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Wave => "WAVE",
            PaymentMethod::OrangeMoney => "ORANGE_MONEY",
            PaymentMethod::FreeMoney => "FREE_MONEY",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace([' ', '-'], "_").as_str() {
            "WAVE" => Ok(PaymentMethod::Wave),
            "ORANGE_MONEY" => Ok(PaymentMethod::OrangeMoney),
            "FREE_MONEY" => Ok(PaymentMethod::FreeMoney),
            other => Err(ValidationError::invalid_format(
                "payment_method",
                format!("unsupported payment method '{}'", other),
            )),
        }
    }
}

/// A product entry in a transaction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub amount: u64,
    pub quantity: u32,
    pub description: String,
}

/// Body of `PUT /transaction/create-transaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub method_of_payment: Vec<PaymentMethod>,
    pub products: Vec<Product>,
    /// Escrow holding is never requested.
    pub is_escrow: bool,
    pub success_url: String,
    pub error_url: String,
}

impl TransactionRequest {
    /// Builds a request from the order's line items.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the order has no line items or no
    /// payment method is selected.
    pub fn for_order(
        order: &Order,
        methods: Vec<PaymentMethod>,
        success_url: impl Into<String>,
        error_url: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if order.line_items.is_empty() {
            return Err(ValidationError::empty_field("products"));
        }
        if methods.is_empty() {
            return Err(ValidationError::empty_field("method_of_payment"));
        }

        let products = order
            .line_items
            .iter()
            .map(|item| Product {
                name: item.name.clone(),
                category: DEFAULT_PRODUCT_CATEGORY.to_string(),
                amount: item.amount,
                quantity: item.quantity,
                description: item.description.clone(),
            })
            .collect();

        Ok(Self {
            method_of_payment: methods,
            products,
            is_escrow: false,
            success_url: success_url.into(),
            error_url: error_url.into(),
        })
    }
}

/// Response of the transaction-creation endpoint.
///
/// Naboopay returns `order_id` and `checkout_url` on success, and a
/// `message` describing the failure otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TransactionResponse {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::OrderId;
    use crate::domain::order::LineItem;

    fn order_with_items(items: Vec<LineItem>) -> Order {
        Order::new(OrderId::new(7), "wc_order_key", items).unwrap()
    }

    #[test]
    fn builds_products_from_line_items() {
        let order = order_with_items(vec![
            LineItem::new("Thieboudienne", 3500, 2, "Rice and fish").unwrap(),
        ]);

        let request = TransactionRequest::for_order(
            &order,
            vec![PaymentMethod::Wave],
            "https://shop.test/ok",
            "https://shop.test/ko",
        )
        .unwrap();

        assert_eq!(request.products.len(), 1);
        let product = &request.products[0];
        assert_eq!(product.name, "Thieboudienne");
        assert_eq!(product.category, "General");
        assert_eq!(product.amount, 3500);
        assert_eq!(product.quantity, 2);
        assert_eq!(product.description, "Rice and fish");
        assert!(!request.is_escrow);
    }

    #[test]
    fn serializes_to_provider_wire_format() {
        let order = order_with_items(vec![LineItem::new("Mug", 1000, 1, "").unwrap()]);
        let request = TransactionRequest::for_order(
            &order,
            vec![PaymentMethod::Wave, PaymentMethod::OrangeMoney],
            "s",
            "e",
        )
        .unwrap();

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["method_of_payment"], serde_json::json!(["WAVE", "ORANGE_MONEY"]));
        assert_eq!(json["is_escrow"], false);
        assert_eq!(json["success_url"], "s");
        assert_eq!(json["error_url"], "e");
        assert_eq!(json["products"][0]["category"], "General");
    }

    #[test]
    fn rejects_order_without_items() {
        let order = order_with_items(vec![]);
        let result = TransactionRequest::for_order(&order, vec![PaymentMethod::Wave], "s", "e");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_empty_payment_methods() {
        let order = order_with_items(vec![LineItem::new("Mug", 1000, 1, "").unwrap()]);
        let result = TransactionRequest::for_order(&order, vec![], "s", "e");
        assert!(result.is_err());
    }

    #[test]
    fn payment_method_parses_loose_spellings() {
        assert_eq!("wave".parse::<PaymentMethod>().unwrap(), PaymentMethod::Wave);
        assert_eq!(
            "orange-money".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::OrangeMoney
        );
        assert_eq!(
            "Free Money".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::FreeMoney
        );
        assert!("paypal".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let response: TransactionResponse =
            serde_json::from_str(r#"{"message":"Invalid token"}"#).unwrap();
        assert!(response.checkout_url.is_none());
        assert_eq!(response.message.as_deref(), Some("Invalid token"));
    }
}
