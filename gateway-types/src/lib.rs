//! # Gateway Types
//!
//! DTOs, error types, and port traits for the Stripe gateway.
//! This crate has ZERO external IO dependencies - only data structures
//! and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `dto/` - request/response shapes for the gateway's HTTP boundary
//! - `event/` - parsed webhook event types
//! - `ports/` - the outbound provider trait adapters must implement
//! - `error/` - provider and application error types

pub mod dto;
pub mod error;
pub mod event;
pub mod ports;

// Re-export commonly used types
pub use dto::*;
pub use error::{AppError, ProviderError};
pub use event::{EventData, StripeEvent, WebhookAck};
pub use ports::PaymentsProvider;
