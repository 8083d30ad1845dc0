//! Naboopay gateway configuration
//!
//! These are the merchant-facing gateway settings: display text, the
//! Naboopay API token and the webhook signing secret.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::OrderId;
use crate::domain::payment::PaymentMethod;

use super::error::ValidationError;

/// Identifier of the gateway as registered with the store.
pub const GATEWAY_ID: &str = "naboopay_gateway";

/// Path of the transaction-creation endpoint relative to the API base URL.
const CREATE_TRANSACTION_PATH: &str = "/api/v1/transaction/create-transaction";

/// Naboopay gateway settings
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Whether the gateway is offered at checkout
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Title shown during checkout
    #[serde(default = "default_title")]
    pub title: String,

    /// Description shown during checkout
    #[serde(default = "default_description")]
    pub description: String,

    /// Naboopay API token (bearer)
    pub api_token: Option<SecretString>,

    /// Secret used to verify webhook signatures
    pub secret_key: Option<SecretString>,

    /// Public URL Naboopay posts notifications to (informational)
    pub webhook_url: Option<String>,

    /// Public base URL of the shop, used for return URLs
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Naboopay API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Wallet preselected when the buyer does not choose one
    #[serde(default)]
    pub default_payment_method: PaymentMethod,

    /// Outbound request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub api_timeout_secs: u64,
}

impl GatewayConfig {
    /// Full URL of the transaction-creation endpoint.
    pub fn create_transaction_url(&self) -> String {
        format!(
            "{}{}",
            self.api_base_url.trim_end_matches('/'),
            CREATE_TRANSACTION_PATH
        )
    }

    /// Order-received page the buyer returns to after paying.
    ///
    /// The order key is percent-encoded into the query string.
    pub fn success_url(
        &self,
        order_id: OrderId,
        order_key: &str,
    ) -> Result<String, ValidationError> {
        let mut url = self.site_page(&format!("/checkout/order-received/{}/", order_id))?;
        url.query_pairs_mut().append_pair("key", order_key);
        Ok(url.into())
    }

    /// Checkout page the buyer returns to when payment fails.
    pub fn error_url(&self) -> Result<String, ValidationError> {
        let mut url = self.site_page("/checkout/")?;
        url.query_pairs_mut().append_pair("payment_error", "true");
        Ok(url.into())
    }

    /// Returns true if a non-blank webhook secret is configured.
    pub fn has_webhook_secret(&self) -> bool {
        self.secret_key
            .as_ref()
            .is_some_and(|s| !s.expose_secret().trim().is_empty())
    }

    /// Validate gateway configuration
    ///
    /// An enabled gateway needs an API token. A missing webhook secret is
    /// tolerated here; webhooks are then refused at request time.
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.enabled {
            let has_token = self
                .api_token
                .as_ref()
                .is_some_and(|t| !t.expose_secret().trim().is_empty());
            if !has_token {
                return Err(ValidationError::MissingRequired("GATEWAY__API_TOKEN"));
            }
        }

        check_url(&self.api_base_url, "GATEWAY__API_BASE_URL")?;
        check_url(&self.site_url, "GATEWAY__SITE_URL")?;
        if let Some(webhook_url) = &self.webhook_url {
            check_url(webhook_url, "GATEWAY__WEBHOOK_URL")?;
        }

        if production && !self.site_url.starts_with("https://") {
            return Err(ValidationError::SiteUrlMustBeHttps);
        }

        if self.api_timeout_secs == 0 || self.api_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }

    fn site_page(&self, path: &str) -> Result<reqwest::Url, ValidationError> {
        let base = self.site_url.trim_end_matches('/');
        reqwest::Url::parse(&format!("{}{}", base, path))
            .map_err(|_| ValidationError::InvalidUrl("GATEWAY__SITE_URL"))
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            title: default_title(),
            description: default_description(),
            api_token: None,
            secret_key: None,
            webhook_url: None,
            site_url: default_site_url(),
            api_base_url: default_api_base_url(),
            default_payment_method: PaymentMethod::default(),
            api_timeout_secs: default_api_timeout(),
        }
    }
}

fn check_url(value: &str, name: &'static str) -> Result<(), ValidationError> {
    match reqwest::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::InvalidUrl(name)),
    }
}

fn default_enabled() -> bool {
    true
}

fn default_title() -> String {
    "Naboopay".to_string()
}

fn default_description() -> String {
    "Payez via WAVE, ORANGE MONEY et FREE MONEY en toute sécurité".to_string()
}

fn default_site_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_api_base_url() -> String {
    "https://api.naboopay.com".to_string()
}

fn default_api_timeout() -> u64 {
    30
}
