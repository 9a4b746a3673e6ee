//! Webhook event types.
//!
//! Stripe pushes events as JSON envelopes; the gateway only cares about the
//! event type string and the embedded object. The raw payload is verified
//! against the `Stripe-Signature` header BEFORE it is parsed into these types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A verified, parsed webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEvent {
    /// Event identifier assigned by Stripe (e.g. `evt_...`).
    #[serde(default)]
    pub id: String,
    /// Event type string, e.g. `payment_intent.succeeded`.
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: EventData,
}

/// The `data` envelope of a webhook event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventData {
    /// The provider object the event describes.
    #[serde(default)]
    pub object: Value,
}

/// Acknowledgement returned for every accepted webhook event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebhookAck {
    /// Human-readable description of how the event was handled
    #[schema(example = "Payment intent succeeded")]
    pub message: String,
    /// Echo of the event's object payload
    pub data: Value,
}
