//! Order module - the host-owned order as seen by the gateway.

mod aggregate;
mod line_item;
mod status;

pub use aggregate::{Order, OrderNote, TransitionOutcome};
pub use line_item::LineItem;
pub use status::OrderStatus;
