//! HTTP handlers for the Naboopay gateway endpoints.
//!
//! These handlers connect Axum routes to the payment command handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::payment::{
    CheckoutError, HandlePaymentWebhookCommand, HandlePaymentWebhookHandler,
    ProcessPaymentCommand, ProcessPaymentHandler,
};
use crate::config::GatewayConfig;
use crate::domain::foundation::OrderId;
use crate::domain::payment::{WebhookError, SIGNATURE_HEADER};
use crate::ports::{OrderStore, PaymentProvider};

use super::dto::{CheckoutRequest, CheckoutResponse, GatewayDescriptorResponse};

/// Hyphenated spelling of the signature header, accepted as well.
const SIGNATURE_HEADER_HYPHENATED: &str = "x-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct PaymentAppState {
    pub order_store: Arc<dyn OrderStore>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub gateway: Arc<GatewayConfig>,
}

impl PaymentAppState {
    pub fn new(
        order_store: Arc<dyn OrderStore>,
        payment_provider: Arc<dyn PaymentProvider>,
        gateway: GatewayConfig,
    ) -> Self {
        Self {
            order_store,
            payment_provider,
            gateway: Arc::new(gateway),
        }
    }

    pub fn process_payment_handler(&self) -> ProcessPaymentHandler {
        ProcessPaymentHandler::new(
            self.order_store.clone(),
            self.payment_provider.clone(),
            self.gateway.clone(),
        )
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.order_store.clone(), self.gateway.secret_key.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/checkout/:order_id - Start a Naboopay checkout for an order
pub async fn process_checkout(
    State(state): State<PaymentAppState>,
    Path(order_id): Path<u64>,
    body: Option<Json<CheckoutRequest>>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let handler = state.process_payment_handler();
    let cmd = ProcessPaymentCommand {
        order_id: OrderId::new(order_id),
        payment_method: request.payment_method,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(CheckoutResponse::success(result.redirect)))
}

/// POST /naboopayorders/v1/webhook - Handle Naboopay status notifications
///
/// The raw body is kept as bytes; the signature covers it exactly.
pub async fn handle_naboopay_webhook(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .or_else(|| headers.get(SIGNATURE_HEADER_HYPHENATED))
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    match state.webhook_handler().handle(cmd).await {
        Ok(_) => (StatusCode::OK, "Webhook received").into_response(),
        Err(err) => WebhookApiError(err).into_response(),
    }
}

/// GET /api/gateway - Gateway descriptor for the storefront
pub async fn get_gateway(State(state): State<PaymentAppState>) -> impl IntoResponse {
    Json(GatewayDescriptorResponse::from(state.gateway.as_ref()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts checkout errors to HTTP responses.
pub struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            CheckoutError::GatewayDisabled => (StatusCode::CONFLICT, "GATEWAY_DISABLED"),
            CheckoutError::OrderNotFound(_) => (StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
            CheckoutError::OrderNotPayable(_) => (StatusCode::CONFLICT, "ORDER_NOT_PAYABLE"),
            CheckoutError::InvalidOrder(_) => (StatusCode::BAD_REQUEST, "INVALID_ORDER"),
            CheckoutError::PaymentFailed { .. } => (StatusCode::BAD_GATEWAY, "PAYMENT_FAILED"),
            CheckoutError::Store(_) | CheckoutError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let notice = match &self.0 {
            CheckoutError::PaymentFailed { notice } => notice.clone(),
            CheckoutError::Store(e) => {
                tracing::error!(error = %e, "Order store failure during checkout");
                "Payment error: the order could not be processed.".to_string()
            }
            CheckoutError::Configuration(e) => {
                tracing::error!(error = %e, "Gateway misconfigured during checkout");
                "Payment error: the order could not be processed.".to_string()
            }
            other => format!("Payment error: {}", other),
        };

        (status, Json(CheckoutResponse::fail(error_code, notice))).into_response()
    }
}

/// API error type that converts webhook errors to plain-text responses.
pub struct WebhookApiError(WebhookError);

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        if let WebhookError::StorageError(e) = &self.0 {
            tracing::error!(error = %e, "Order store failure during webhook");
        }
        (self.0.status_code(), self.0.response_body()).into_response()
    }
}
