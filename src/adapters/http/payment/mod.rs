//! HTTP adapter for the Naboopay gateway.
//!
//! Exposes checkout, the gateway descriptor and the webhook receiver.

mod dto;
mod handlers;
mod routes;

pub use dto::{CheckoutRequest, CheckoutResponse, GatewayDescriptorResponse};
pub use handlers::{
    get_gateway, handle_naboopay_webhook, process_checkout, CheckoutApiError, PaymentAppState,
    WebhookApiError,
};
pub use routes::{payment_router, WEBHOOK_PATH};
