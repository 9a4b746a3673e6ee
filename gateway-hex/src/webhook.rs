//! Webhook event dispatch.
//!
//! Events arrive here only after their signature has been verified. Dispatch
//! is a flat, exact match on the event type string; each handler echoes the
//! event's object back in the acknowledgement. Events are independent - no
//! state is retained across deliveries, and retries are the provider's
//! responsibility.

use serde_json::Value;

use gateway_types::{StripeEvent, WebhookAck};

/// Dispatches a verified event to its handler.
///
/// Unrecognized event types are accepted and echoed with an "unhandled"
/// message rather than rejected, so new provider event types never break
/// deliveries.
pub fn dispatch(event: StripeEvent) -> WebhookAck {
    let StripeEvent {
        event_type, data, ..
    } = event;
    let data = data.object;

    match event_type.as_str() {
        "payment_intent.succeeded" => acked("Payment intent succeeded", data),
        "checkout.session.completed" => acked("Checkout session completed", data),
        "customer.subscription.created" => acked("Subscription created", data),
        "product.updated" => acked("Product updated", data),
        "price.updated" => acked("Price updated", data),
        other => {
            tracing::debug!(event_type = other, "Unhandled webhook event type");
            WebhookAck {
                message: format!("Unhandled event {}", other),
                data,
            }
        }
    }
}

fn acked(message: &str, data: Value) -> WebhookAck {
    tracing::info!("Webhook event handled: {}", message);
    WebhookAck {
        message: message.to_string(),
        data,
    }
}
