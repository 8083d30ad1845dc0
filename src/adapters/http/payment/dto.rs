//! HTTP DTOs for the checkout and gateway endpoints.
//!
//! The webhook endpoint answers in plain text and has no DTOs.

use serde::{Deserialize, Serialize};

use crate::config::{GatewayConfig, GATEWAY_ID};
use crate::domain::payment::PaymentMethod;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to start a Naboopay checkout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutRequest {
    /// Wallet chosen by the buyer.
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Outcome of a checkout, in the store's `{result, redirect}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    /// `"success"` or `"fail"`.
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CheckoutResponse {
    pub fn success(redirect: impl Into<String>) -> Self {
        Self {
            result: "success".to_string(),
            redirect: Some(redirect.into()),
            notice: None,
            error_code: None,
        }
    }

    pub fn fail(error_code: impl Into<String>, notice: impl Into<String>) -> Self {
        Self {
            result: "fail".to_string(),
            redirect: None,
            notice: Some(notice.into()),
            error_code: Some(error_code.into()),
        }
    }
}

/// Gateway settings as shown to the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayDescriptorResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub enabled: bool,
    pub payment_methods: Vec<PaymentMethod>,
    pub default_payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    /// Whether webhooks can be authenticated. The secret itself is never exposed.
    pub webhook_secret_configured: bool,
}

impl From<&GatewayConfig> for GatewayDescriptorResponse {
    fn from(config: &GatewayConfig) -> Self {
        Self {
            id: GATEWAY_ID.to_string(),
            title: config.title.clone(),
            description: config.description.clone(),
            enabled: config.enabled,
            payment_methods: vec![
                PaymentMethod::Wave,
                PaymentMethod::OrangeMoney,
                PaymentMethod::FreeMoney,
            ],
            default_payment_method: config.default_payment_method,
            webhook_url: config.webhook_url.clone(),
            webhook_secret_configured: config.has_webhook_secret(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn success_response_omits_notice() {
        let json = serde_json::to_value(CheckoutResponse::success("https://pay.test/x")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"result": "success", "redirect": "https://pay.test/x"})
        );
    }

    #[test]
    fn fail_response_carries_notice() {
        let json =
            serde_json::to_value(CheckoutResponse::fail("PAYMENT_FAILED", "Payment error: x"))
                .unwrap();
        assert_eq!(json["result"], "fail");
        assert_eq!(json["notice"], "Payment error: x");
        assert!(json.get("redirect").is_none());
    }

    #[test]
    fn checkout_request_accepts_empty_object() {
        let request: CheckoutRequest = serde_json::from_str("{}").unwrap();
        assert!(request.payment_method.is_none());

        let request: CheckoutRequest =
            serde_json::from_str(r#"{"payment_method":"ORANGE_MONEY"}"#).unwrap();
        assert_eq!(request.payment_method, Some(PaymentMethod::OrangeMoney));
    }

    #[test]
    fn descriptor_never_contains_secrets() {
        let config = GatewayConfig {
            api_token: Some(SecretString::new("tok_live_123".to_string())),
            secret_key: Some(SecretString::new("whsec_456".to_string())),
            ..Default::default()
        };

        let descriptor = GatewayDescriptorResponse::from(&config);
        let json = serde_json::to_string(&descriptor).unwrap();

        assert_eq!(descriptor.id, "naboopay_gateway");
        assert!(descriptor.webhook_secret_configured);
        assert!(!json.contains("tok_live_123"));
        assert!(!json.contains("whsec_456"));
    }
}
