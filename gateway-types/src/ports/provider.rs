//! Provider port trait.
//!
//! This is the single outbound port of the gateway. The Stripe REST adapter
//! implements it; tests implement it in memory. Every method is a
//! passthrough: the provider's objects come back untouched as
//! `serde_json::Value`, list calls unwrapped from the `{"data": [...]}`
//! envelope.

use serde_json::Value;

use crate::dto::{
    AttachPaymentMethodRequest, CreateChargeRequest, CreateCustomerRequest,
    CreatePaymentIntentRequest, CreatePaymentMethodRequest, CreatePriceRequest,
    CreateProductRequest, CreateRefundRequest, CreateSetupIntentRequest,
    CreateSubscriptionRequest, UpdateCustomerRequest, UpdatePriceRequest, UpdateProductRequest,
    UpdateSubscriptionRequest,
};
use crate::error::ProviderError;

/// The payments provider port.
///
/// Each inbound request triggers at most one of these calls, awaited to
/// completion before responding. Implementations hold no gateway state.
#[async_trait::async_trait]
pub trait PaymentsProvider: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────
    // Customers
    // ─────────────────────────────────────────────────────────────────────────

    async fn create_customer(&self, req: CreateCustomerRequest) -> Result<Value, ProviderError>;

    async fn list_customers(&self, limit: u32) -> Result<Vec<Value>, ProviderError>;

    async fn update_customer(
        &self,
        id: &str,
        req: UpdateCustomerRequest,
    ) -> Result<Value, ProviderError>;

    async fn delete_customer(&self, id: &str) -> Result<Value, ProviderError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Payment methods
    // ─────────────────────────────────────────────────────────────────────────

    async fn create_payment_method(
        &self,
        req: CreatePaymentMethodRequest,
    ) -> Result<Value, ProviderError>;

    async fn attach_payment_method(
        &self,
        req: AttachPaymentMethodRequest,
    ) -> Result<Value, ProviderError>;

    async fn detach_payment_method(&self, id: &str) -> Result<Value, ProviderError>;

    async fn retrieve_payment_method(&self, id: &str) -> Result<Value, ProviderError>;

    async fn list_payment_methods(
        &self,
        customer: &str,
        kind: &str,
    ) -> Result<Vec<Value>, ProviderError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Payments (intents, charges, refunds)
    // ─────────────────────────────────────────────────────────────────────────

    async fn create_payment_intent(
        &self,
        req: CreatePaymentIntentRequest,
    ) -> Result<Value, ProviderError>;

    async fn retrieve_payment_intent(&self, id: &str) -> Result<Value, ProviderError>;

    async fn create_setup_intent(
        &self,
        req: CreateSetupIntentRequest,
    ) -> Result<Value, ProviderError>;

    async fn retrieve_setup_intent(&self, id: &str) -> Result<Value, ProviderError>;

    async fn create_charge(&self, req: CreateChargeRequest) -> Result<Value, ProviderError>;

    async fn retrieve_charge(&self, id: &str) -> Result<Value, ProviderError>;

    async fn create_refund(&self, req: CreateRefundRequest) -> Result<Value, ProviderError>;

    async fn retrieve_refund(&self, id: &str) -> Result<Value, ProviderError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Prices
    // ─────────────────────────────────────────────────────────────────────────

    async fn create_price(&self, req: CreatePriceRequest) -> Result<Value, ProviderError>;

    async fn update_price(&self, id: &str, req: UpdatePriceRequest)
    -> Result<Value, ProviderError>;

    async fn retrieve_price(&self, id: &str) -> Result<Value, ProviderError>;

    async fn list_prices(
        &self,
        product: Option<&str>,
        active: bool,
        limit: u32,
    ) -> Result<Vec<Value>, ProviderError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Products
    // ─────────────────────────────────────────────────────────────────────────

    async fn create_product(&self, req: CreateProductRequest) -> Result<Value, ProviderError>;

    async fn update_product(
        &self,
        id: &str,
        req: UpdateProductRequest,
    ) -> Result<Value, ProviderError>;

    async fn delete_product(&self, id: &str) -> Result<Value, ProviderError>;

    async fn retrieve_product(&self, id: &str) -> Result<Value, ProviderError>;

    async fn list_products(&self, active: bool, limit: u32) -> Result<Vec<Value>, ProviderError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────────

    async fn create_subscription(
        &self,
        req: CreateSubscriptionRequest,
    ) -> Result<Value, ProviderError>;

    async fn retrieve_subscription(&self, id: &str) -> Result<Value, ProviderError>;

    async fn update_subscription(
        &self,
        id: &str,
        req: UpdateSubscriptionRequest,
    ) -> Result<Value, ProviderError>;

    async fn cancel_subscription(&self, id: &str) -> Result<Value, ProviderError>;

    async fn list_subscriptions(
        &self,
        customer: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Value>, ProviderError>;
}
