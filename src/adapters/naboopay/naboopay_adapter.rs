//! Naboopay payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Naboopay REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = NaboopayConfig::from_gateway(&app_config.gateway);
//! let adapter = NaboopayAdapter::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use crate::config::GatewayConfig;
use crate::domain::payment::{TransactionRequest, TransactionResponse};
use crate::ports::{PaymentError, PaymentProvider};

/// Naboopay API configuration.
#[derive(Clone)]
pub struct NaboopayConfig {
    /// Bearer token issued by Naboopay.
    api_token: SecretString,

    /// Full URL of the transaction-creation endpoint.
    create_transaction_url: String,

    /// Per-request timeout.
    timeout: Duration,
}

impl NaboopayConfig {
    /// Derive the adapter configuration from the gateway settings.
    ///
    /// A missing token yields an empty one; Naboopay rejects it, and an
    /// enabled gateway without a token fails config validation anyway.
    pub fn from_gateway(gateway: &GatewayConfig) -> Self {
        Self {
            api_token: gateway
                .api_token
                .clone()
                .unwrap_or_else(|| SecretString::new(String::new())),
            create_transaction_url: gateway.create_transaction_url(),
            timeout: Duration::from_secs(gateway.api_timeout_secs),
        }
    }
}

/// Naboopay payment provider adapter.
pub struct NaboopayAdapter {
    config: NaboopayConfig,
    http_client: reqwest::Client,
}

impl NaboopayAdapter {
    /// Create a new adapter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a network error if the HTTP client cannot be built.
    pub fn new(config: NaboopayConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

/// Extracts the provider's `message` from an error body, if any.
fn provider_message(body: &str) -> Option<String> {
    serde_json::from_str::<TransactionResponse>(body)
        .ok()
        .and_then(|r| r.message)
        .filter(|m| !m.trim().is_empty())
}

#[async_trait]
impl PaymentProvider for NaboopayAdapter {
    async fn create_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionResponse, PaymentError> {
        let response = self
            .http_client
            .put(&self.config.create_transaction_url)
            .bearer_auth(self.config.api_token.expose_secret())
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Naboopay create-transaction request failed");
                PaymentError::network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::error!(status = %status, "Naboopay rejected the API token");
            return Err(PaymentError::authentication(
                provider_message(&body).unwrap_or_else(|| "API token rejected".to_string()),
            ));
        }

        if !status.is_success() {
            tracing::error!(status = %status, body = %body, "Naboopay create-transaction failed");
            return Err(PaymentError::provider(
                provider_message(&body)
                    .unwrap_or_else(|| format!("Naboopay API error (HTTP {})", status.as_u16())),
            ));
        }

        let transaction: TransactionResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse Naboopay response");
            PaymentError::invalid_response(format!("Failed to parse Naboopay response: {}", e))
        })?;

        tracing::debug!(
            transaction_id = transaction.order_id.as_deref().unwrap_or_default(),
            has_checkout_url = transaction.checkout_url.is_some(),
            "Naboopay transaction created"
        );

        Ok(transaction)
    }
}
