//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Request bodies are validated for shape only (field presence and type);
//! Stripe enforces its own business rules on the forwarded values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Free-form key/value metadata forwarded to Stripe untouched.
pub type Metadata = HashMap<String, String>;

fn default_true() -> bool {
    true
}

fn default_limit() -> u32 {
    100
}

// ─────────────────────────────────────────────────────────────────────────────
// Customer DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a Stripe customer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "Alice")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Request to update a Stripe customer. All fields optional; an update with
/// no fields set is rejected before reaching Stripe.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl UpdateCustomerRequest {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.phone.is_none() && self.metadata.is_none()
    }
}

/// Trimmed view of a created customer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerSummary {
    #[schema(example = "cus_abc123")]
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub metadata: Value,
}

/// Response after creating a customer: a trimmed summary plus the raw
/// provider object.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedCustomerResponse {
    pub short_response: CustomerSummary,
    pub full_response: Value,
    #[schema(example = "Customer created successfully")]
    pub message: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs (payment intents, setup intents, charges, refunds)
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a PaymentIntent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentIntentRequest {
    /// Amount in the smallest currency unit (e.g. cents)
    #[schema(example = 2000)]
    pub amount: i64,
    /// Three-letter ISO currency code
    #[schema(example = "usd")]
    pub currency: String,
    /// Payment method to charge
    #[schema(example = "pm_card_visa")]
    pub payment_method: String,
    /// Confirm the intent immediately
    #[serde(default = "default_true")]
    pub confirm: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Request to create a SetupIntent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateSetupIntentRequest {
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    /// `on_session` or `off_session`
    #[schema(example = "off_session")]
    pub usage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Request to create a Charge (legacy source-based payments).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateChargeRequest {
    #[schema(example = 2000)]
    pub amount: i64,
    #[schema(example = "usd")]
    pub currency: String,
    /// Token or source identifier
    #[schema(example = "tok_visa")]
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Request to refund a charge.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRefundRequest {
    /// Charge to refund
    #[schema(example = "ch_abc123")]
    pub charge: String,
    /// Partial amount; refunds the full charge when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// `duplicate`, `fraudulent`, or `requested_by_customer`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment Method DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a payment method.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentMethodRequest {
    /// Payment method type, e.g. `card`
    #[serde(rename = "type")]
    #[schema(example = "card")]
    pub kind: String,
    /// Card fields (`number`, `exp_month`, `exp_year`, `cvc`)
    pub card: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Request to attach a payment method to a customer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttachPaymentMethodRequest {
    #[schema(example = "pm_abc123")]
    pub payment_method_id: String,
    #[schema(example = "cus_abc123")]
    pub customer: String,
}

/// Request to detach a payment method from its customer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetachPaymentMethodRequest {
    #[schema(example = "pm_abc123")]
    pub payment_method_id: String,
}

/// Query parameters for listing a customer's payment methods.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListPaymentMethodsQuery {
    pub customer: String,
    #[serde(rename = "type", default = "default_payment_method_type")]
    pub kind: String,
}

fn default_payment_method_type() -> String {
    "card".to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Price DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a price.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePriceRequest {
    /// Amount in the smallest currency unit
    #[schema(example = 999)]
    pub unit_amount: i64,
    #[schema(example = "usd")]
    pub currency: String,
    /// Product the price belongs to
    #[schema(example = "prod_abc123")]
    pub product: String,
    /// Recurrence fields, e.g. `{"interval": "month"}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// `inclusive`, `exclusive`, or `unspecified`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_behavior: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Request to update a price. Stripe prices are immutable in amount; only
/// these fields can change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePriceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl UpdatePriceRequest {
    pub fn is_empty(&self) -> bool {
        self.active.is_none() && self.nickname.is_none() && self.metadata.is_none()
    }
}

/// Query parameters for listing prices.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListPricesQuery {
    pub product: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Product DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Premium plan")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Request to update a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.metadata.is_none()
    }
}

/// Query parameters for listing products.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListProductsQuery {
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Subscription DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a subscription.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateSubscriptionRequest {
    #[schema(example = "cus_abc123")]
    pub customer: String,
    /// Price of the plan to subscribe to
    #[schema(example = "price_abc123")]
    pub price: String,
    /// Free trial length in days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_period_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Request to update a subscription.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSubscriptionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_at_period_end: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl UpdateSubscriptionRequest {
    pub fn is_empty(&self) -> bool {
        self.cancel_at_period_end.is_none()
            && self.default_payment_method.is_none()
            && self.metadata.is_none()
    }
}

/// Query parameters for listing subscriptions.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListSubscriptionsQuery {
    pub customer: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared responses
// ─────────────────────────────────────────────────────────────────────────────

/// Plain message response for deletes and misses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Customer deleted successfully")]
    pub message: String,
}
