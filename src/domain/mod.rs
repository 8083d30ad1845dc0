//! Domain layer - orders, Naboopay transactions and webhook rules.

pub mod foundation;
pub mod order;
pub mod payment;
