//! Gateway Application Service
//!
//! Validates request shape, forwards to the provider port, and returns the
//! provider's response (or a trivial reshaping of it). Contains NO transport
//! logic - the HTTP adapter and the Stripe adapter sit on either side.

use serde_json::{Value, json};

use gateway_types::{
    AppError, AttachPaymentMethodRequest, CreateChargeRequest, CreateCustomerRequest,
    CreatePaymentIntentRequest, CreatePaymentMethodRequest, CreatePriceRequest,
    CreateProductRequest, CreateRefundRequest, CreateSetupIntentRequest,
    CreateSubscriptionRequest, CreatedCustomerResponse, CustomerSummary, MessageResponse,
    PaymentsProvider, StripeEvent, UpdateCustomerRequest, UpdatePriceRequest,
    UpdateProductRequest, UpdateSubscriptionRequest, WebhookAck,
};

use crate::webhook;

/// Default page size forwarded on list calls, matching Stripe's maximum.
const LIST_LIMIT: u32 = 100;

/// Application service for the gateway.
///
/// Generic over `P: PaymentsProvider` - the adapter is injected at compile
/// time, so tests run against an in-memory provider with no HTTP involved.
pub struct GatewayService<P: PaymentsProvider> {
    provider: P,
    webhook_secret: String,
}

impl<P: PaymentsProvider> GatewayService<P> {
    /// Creates a new gateway service over the given provider adapter.
    pub fn new(provider: P, webhook_secret: impl Into<String>) -> Self {
        Self {
            provider,
            webhook_secret: webhook_secret.into(),
        }
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Customers
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates a customer and reshapes the provider object into a summary
    /// plus the raw response.
    pub async fn create_customer(
        &self,
        req: CreateCustomerRequest,
    ) -> Result<CreatedCustomerResponse, AppError> {
        if req.email.trim().is_empty() {
            return Err(AppError::Validation("Customer email cannot be empty".into()));
        }
        if req.name.trim().is_empty() {
            return Err(AppError::Validation("Customer name cannot be empty".into()));
        }

        let customer = self.provider.create_customer(req).await?;

        Ok(CreatedCustomerResponse {
            short_response: CustomerSummary {
                id: str_field(&customer, "id"),
                email: str_field(&customer, "email"),
                name: str_field(&customer, "name"),
                phone: customer
                    .get("phone")
                    .and_then(Value::as_str)
                    .map(String::from),
                metadata: customer.get("metadata").cloned().unwrap_or(Value::Null),
            },
            full_response: customer,
            message: "Customer created successfully".into(),
        })
    }

    /// Lists all customers. An empty list comes back as a message body,
    /// matching the gateway's permissive response style.
    pub async fn list_customers(&self) -> Result<Value, AppError> {
        let customers = self.provider.list_customers(LIST_LIMIT).await?;

        if customers.is_empty() {
            Ok(json!({ "message": "No customers found" }))
        } else {
            Ok(Value::Array(customers))
        }
    }

    /// Finds a customer by email by scanning the provider's list. A miss is
    /// a 200 with a message body, not an error.
    pub async fn get_customer_by_email(&self, email: &str) -> Result<Value, AppError> {
        let customers = self.provider.list_customers(LIST_LIMIT).await?;

        Ok(customers
            .into_iter()
            .find(|c| c.get("email").and_then(Value::as_str) == Some(email))
            .unwrap_or_else(|| json!({ "message": "Customer not found" })))
    }

    /// Updates a customer. An update with no fields set never reaches Stripe.
    pub async fn update_customer(
        &self,
        id: &str,
        req: UpdateCustomerRequest,
    ) -> Result<Value, AppError> {
        if req.is_empty() {
            return Err(AppError::Validation(
                "No fields to update for the customer".into(),
            ));
        }

        self.provider.update_customer(id, req).await.map_err(Into::into)
    }

    /// Deletes a customer.
    pub async fn delete_customer(&self, id: &str) -> Result<MessageResponse, AppError> {
        self.provider.delete_customer(id).await?;
        Ok(MessageResponse {
            message: "Customer deleted successfully".into(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payment methods
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_payment_method(
        &self,
        req: CreatePaymentMethodRequest,
    ) -> Result<Value, AppError> {
        if req.kind.trim().is_empty() {
            return Err(AppError::Validation(
                "Payment method type cannot be empty".into(),
            ));
        }

        self.provider
            .create_payment_method(req)
            .await
            .map_err(Into::into)
    }

    pub async fn attach_payment_method(
        &self,
        req: AttachPaymentMethodRequest,
    ) -> Result<Value, AppError> {
        self.provider
            .attach_payment_method(req)
            .await
            .map_err(Into::into)
    }

    pub async fn detach_payment_method(&self, id: &str) -> Result<Value, AppError> {
        self.provider
            .detach_payment_method(id)
            .await
            .map_err(Into::into)
    }

    pub async fn retrieve_payment_method(&self, id: &str) -> Result<Value, AppError> {
        self.provider
            .retrieve_payment_method(id)
            .await
            .map_err(Into::into)
    }

    pub async fn list_payment_methods(
        &self,
        customer: &str,
        kind: &str,
    ) -> Result<Value, AppError> {
        let methods = self.provider.list_payment_methods(customer, kind).await?;
        Ok(Value::Array(methods))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payments
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_payment_intent(
        &self,
        req: CreatePaymentIntentRequest,
    ) -> Result<Value, AppError> {
        if req.amount <= 0 {
            return Err(AppError::Validation("Amount must be positive".into()));
        }

        self.provider
            .create_payment_intent(req)
            .await
            .map_err(Into::into)
    }

    pub async fn retrieve_payment_intent(&self, id: &str) -> Result<Value, AppError> {
        self.provider
            .retrieve_payment_intent(id)
            .await
            .map_err(Into::into)
    }

    pub async fn create_setup_intent(
        &self,
        req: CreateSetupIntentRequest,
    ) -> Result<Value, AppError> {
        self.provider
            .create_setup_intent(req)
            .await
            .map_err(Into::into)
    }

    pub async fn retrieve_setup_intent(&self, id: &str) -> Result<Value, AppError> {
        self.provider
            .retrieve_setup_intent(id)
            .await
            .map_err(Into::into)
    }

    pub async fn create_charge(&self, req: CreateChargeRequest) -> Result<Value, AppError> {
        if req.amount <= 0 {
            return Err(AppError::Validation("Amount must be positive".into()));
        }

        self.provider.create_charge(req).await.map_err(Into::into)
    }

    pub async fn retrieve_charge(&self, id: &str) -> Result<Value, AppError> {
        self.provider.retrieve_charge(id).await.map_err(Into::into)
    }

    pub async fn create_refund(&self, req: CreateRefundRequest) -> Result<Value, AppError> {
        if matches!(req.amount, Some(amount) if amount <= 0) {
            return Err(AppError::Validation("Refund amount must be positive".into()));
        }

        self.provider.create_refund(req).await.map_err(Into::into)
    }

    pub async fn retrieve_refund(&self, id: &str) -> Result<Value, AppError> {
        self.provider.retrieve_refund(id).await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Prices
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_price(&self, req: CreatePriceRequest) -> Result<Value, AppError> {
        if req.unit_amount <= 0 {
            return Err(AppError::Validation("Unit amount must be positive".into()));
        }

        self.provider.create_price(req).await.map_err(Into::into)
    }

    pub async fn update_price(
        &self,
        id: &str,
        req: UpdatePriceRequest,
    ) -> Result<Value, AppError> {
        if req.is_empty() {
            return Err(AppError::Validation(
                "No fields to update for the price".into(),
            ));
        }

        self.provider.update_price(id, req).await.map_err(Into::into)
    }

    /// Stripe prices cannot be deleted; deletion deactivates instead.
    pub async fn delete_price(&self, id: &str) -> Result<Value, AppError> {
        let req = UpdatePriceRequest {
            active: Some(false),
            ..Default::default()
        };

        self.provider.update_price(id, req).await.map_err(Into::into)
    }

    pub async fn retrieve_price(&self, id: &str) -> Result<Value, AppError> {
        self.provider.retrieve_price(id).await.map_err(Into::into)
    }

    pub async fn list_prices(
        &self,
        product: Option<&str>,
        active: bool,
        limit: u32,
    ) -> Result<Value, AppError> {
        let prices = self.provider.list_prices(product, active, limit).await?;
        Ok(Value::Array(prices))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Products
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_product(&self, req: CreateProductRequest) -> Result<Value, AppError> {
        if req.name.trim().is_empty() {
            return Err(AppError::Validation("Product name cannot be empty".into()));
        }

        self.provider.create_product(req).await.map_err(Into::into)
    }

    pub async fn update_product(
        &self,
        id: &str,
        req: UpdateProductRequest,
    ) -> Result<Value, AppError> {
        if req.is_empty() {
            return Err(AppError::Validation(
                "No fields to update for the product".into(),
            ));
        }

        self.provider.update_product(id, req).await.map_err(Into::into)
    }

    pub async fn delete_product(&self, id: &str) -> Result<Value, AppError> {
        self.provider.delete_product(id).await.map_err(Into::into)
    }

    pub async fn retrieve_product(&self, id: &str) -> Result<Value, AppError> {
        self.provider.retrieve_product(id).await.map_err(Into::into)
    }

    pub async fn list_products(&self, active: bool, limit: u32) -> Result<Value, AppError> {
        let products = self.provider.list_products(active, limit).await?;
        Ok(Value::Array(products))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_subscription(
        &self,
        req: CreateSubscriptionRequest,
    ) -> Result<Value, AppError> {
        self.provider
            .create_subscription(req)
            .await
            .map_err(Into::into)
    }

    pub async fn retrieve_subscription(&self, id: &str) -> Result<Value, AppError> {
        self.provider
            .retrieve_subscription(id)
            .await
            .map_err(Into::into)
    }

    pub async fn update_subscription(
        &self,
        id: &str,
        req: UpdateSubscriptionRequest,
    ) -> Result<Value, AppError> {
        if req.is_empty() {
            return Err(AppError::Validation(
                "No fields to update for the subscription".into(),
            ));
        }

        self.provider
            .update_subscription(id, req)
            .await
            .map_err(Into::into)
    }

    pub async fn cancel_subscription(&self, id: &str) -> Result<Value, AppError> {
        self.provider
            .cancel_subscription(id)
            .await
            .map_err(Into::into)
    }

    pub async fn list_subscriptions(
        &self,
        customer: Option<&str>,
        limit: u32,
    ) -> Result<Value, AppError> {
        let subscriptions = self.provider.list_subscriptions(customer, limit).await?;
        Ok(Value::Array(subscriptions))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Webhook
    // ─────────────────────────────────────────────────────────────────────────

    /// Verifies and dispatches a webhook delivery.
    ///
    /// Fails closed: the signature is checked against the raw body BEFORE
    /// any business payload is parsed. Unrecognized event types are accepted
    /// and echoed, never rejected.
    pub fn handle_webhook(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
    ) -> Result<WebhookAck, AppError> {
        let header = signature_header.ok_or(AppError::MissingSignature)?;

        if !gateway_stripe::signature::verify_signature_header(
            payload,
            header,
            &self.webhook_secret,
        ) {
            return Err(AppError::InvalidSignature);
        }

        let event: StripeEvent = serde_json::from_slice(payload)
            .map_err(|e| AppError::InvalidPayload(e.to_string()))?;

        Ok(webhook::dispatch(event))
    }
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
