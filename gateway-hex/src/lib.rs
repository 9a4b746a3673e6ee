//! # Gateway Hex
//!
//! Application service layer and HTTP adapter for the Stripe gateway.
//!
//! ## Architecture
//!
//! - `service/` - Application service (validates shape, forwards to the provider)
//! - `webhook/` - Verified-event dispatch table
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `P: PaymentsProvider`, allowing the Stripe
//! adapter to be swapped for an in-memory provider in tests.

pub mod inbound;
pub mod openapi;
pub mod service;
pub mod webhook;

#[cfg(test)]
mod service_tests;

pub use service::GatewayService;
