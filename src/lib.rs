//! Naboopay Gateway - Mobile money checkout and webhook reconciliation
//!
//! This crate creates Naboopay transactions for store orders and keeps the
//! orders' status in sync with the signed notifications Naboopay sends back.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod observability;
pub mod ports;
