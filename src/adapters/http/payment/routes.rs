//! Axum router configuration for the Naboopay gateway endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_gateway, handle_naboopay_webhook, process_checkout, PaymentAppState};

/// Path Naboopay posts status notifications to.
pub const WEBHOOK_PATH: &str = "/naboopayorders/v1/webhook";

/// Create the gateway router.
///
/// # Routes
///
/// ## Storefront Endpoints
/// - `POST /api/checkout/:order_id` - Start a Naboopay checkout
/// - `GET /api/gateway` - Gateway descriptor
///
/// ## Webhook Endpoints (no auth, signature verified)
/// - `POST /naboopayorders/v1/webhook` - Handle Naboopay notifications
pub fn payment_router() -> Router<PaymentAppState> {
    Router::new()
        .route("/api/checkout/:order_id", post(process_checkout))
        .route("/api/gateway", get(get_gateway))
        .route(WEBHOOK_PATH, post(handle_naboopay_webhook))
}
