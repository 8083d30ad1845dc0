//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types used across the
//! gateway domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{OrderId, TransactionId};
pub use timestamp::Timestamp;
