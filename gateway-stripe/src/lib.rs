//! # Gateway Stripe
//!
//! Outbound adapter for the Stripe REST API. `StripeClient` implements the
//! `PaymentsProvider` port with plain `reqwest` calls: POST bodies are
//! form-encoded the way Stripe expects (`metadata[k]=v`, `items[0][price]`),
//! responses come back as `serde_json::Value` and are passed through
//! untouched. Stripe's error envelope is reduced to its `error.message`
//! string.

use serde_json::Value;

use gateway_types::{
    AttachPaymentMethodRequest, CreateChargeRequest, CreateCustomerRequest,
    CreatePaymentIntentRequest, CreatePaymentMethodRequest, CreatePriceRequest,
    CreateProductRequest, CreateRefundRequest, CreateSetupIntentRequest,
    CreateSubscriptionRequest, PaymentsProvider, ProviderError, UpdateCustomerRequest,
    UpdatePriceRequest, UpdateProductRequest, UpdateSubscriptionRequest,
};

pub mod signature;

/// Production Stripe API base.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";

/// Stripe REST client.
///
/// Authenticates every call with `Authorization: Bearer <secret key>`.
/// The base URL is overridable so tests can point at a local stub.
pub struct StripeClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    /// Creates a client against the production Stripe API.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            secret_key: secret_key.into(),
        }
    }

    /// Overrides the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, ProviderError> {
        let resp = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.secret_key)
            .query(query)
            .send()
            .await
            .map_err(transport)?;
        Self::handle(resp).await
    }

    async fn post(&self, path: &str, params: &[(String, String)]) -> Result<Value, ProviderError> {
        let resp = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.secret_key)
            .form(params)
            .send()
            .await
            .map_err(transport)?;
        Self::handle(resp).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ProviderError> {
        let resp = self
            .http
            .delete(self.url(path))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(transport)?;
        Self::handle(resp).await
    }

    async fn handle(resp: reqwest::Response) -> Result<Value, ProviderError> {
        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        if status.is_success() {
            Ok(body)
        } else {
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("unknown Stripe error")
                .to_string();
            tracing::warn!(status = %status, "Stripe API call failed: {}", message);
            Err(ProviderError::Api(message))
        }
    }
}

fn transport(err: reqwest::Error) -> ProviderError {
    ProviderError::Transport(err.to_string())
}

/// Unwraps Stripe's `{"object": "list", "data": [...]}` envelope.
fn unwrap_list(body: Value) -> Result<Vec<Value>, ProviderError> {
    if let Value::Object(mut map) = body {
        if let Some(Value::Array(items)) = map.remove("data") {
            return Ok(items);
        }
    }
    Err(ProviderError::Decode(
        "list response is missing a 'data' array".into(),
    ))
}

fn push(params: &mut Vec<(String, String)>, key: &str, value: impl ToString) {
    params.push((key.to_string(), value.to_string()));
}

fn push_opt(params: &mut Vec<(String, String)>, key: &str, value: Option<impl ToString>) {
    if let Some(value) = value {
        push(params, key, value);
    }
}

/// Flattens a map into Stripe's bracketed form keys: `prefix[k]=v`.
fn push_map(
    params: &mut Vec<(String, String)>,
    prefix: &str,
    map: &std::collections::HashMap<String, String>,
) {
    for (key, value) in map {
        params.push((format!("{}[{}]", prefix, key), value.clone()));
    }
}

fn push_opt_map(
    params: &mut Vec<(String, String)>,
    prefix: &str,
    map: Option<&std::collections::HashMap<String, String>>,
) {
    if let Some(map) = map {
        push_map(params, prefix, map);
    }
}

#[async_trait::async_trait]
impl PaymentsProvider for StripeClient {
    // ─────────────────────────────────────────────────────────────────────────
    // Customers
    // ─────────────────────────────────────────────────────────────────────────

    async fn create_customer(&self, req: CreateCustomerRequest) -> Result<Value, ProviderError> {
        let mut params = Vec::new();
        push(&mut params, "email", &req.email);
        push(&mut params, "name", &req.name);
        push_opt(&mut params, "phone", req.phone.as_ref());
        push_map(&mut params, "metadata", &req.metadata);
        self.post("/customers", &params).await
    }

    async fn list_customers(&self, limit: u32) -> Result<Vec<Value>, ProviderError> {
        let query = vec![("limit".to_string(), limit.to_string())];
        self.get("/customers", &query).await.and_then(unwrap_list)
    }

    async fn update_customer(
        &self,
        id: &str,
        req: UpdateCustomerRequest,
    ) -> Result<Value, ProviderError> {
        let mut params = Vec::new();
        push_opt(&mut params, "email", req.email.as_ref());
        push_opt(&mut params, "name", req.name.as_ref());
        push_opt(&mut params, "phone", req.phone.as_ref());
        push_opt_map(&mut params, "metadata", req.metadata.as_ref());
        self.post(&format!("/customers/{}", id), &params).await
    }

    async fn delete_customer(&self, id: &str) -> Result<Value, ProviderError> {
        self.delete(&format!("/customers/{}", id)).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payment methods
    // ─────────────────────────────────────────────────────────────────────────

    async fn create_payment_method(
        &self,
        req: CreatePaymentMethodRequest,
    ) -> Result<Value, ProviderError> {
        let mut params = Vec::new();
        push(&mut params, "type", &req.kind);
        push_map(&mut params, "card", &req.card);
        push_opt_map(&mut params, "metadata", req.metadata.as_ref());
        self.post("/payment_methods", &params).await
    }

    async fn attach_payment_method(
        &self,
        req: AttachPaymentMethodRequest,
    ) -> Result<Value, ProviderError> {
        let params = vec![("customer".to_string(), req.customer)];
        self.post(
            &format!("/payment_methods/{}/attach", req.payment_method_id),
            &params,
        )
        .await
    }

    async fn detach_payment_method(&self, id: &str) -> Result<Value, ProviderError> {
        self.post(&format!("/payment_methods/{}/detach", id), &[])
            .await
    }

    async fn retrieve_payment_method(&self, id: &str) -> Result<Value, ProviderError> {
        self.get(&format!("/payment_methods/{}", id), &[]).await
    }

    async fn list_payment_methods(
        &self,
        customer: &str,
        kind: &str,
    ) -> Result<Vec<Value>, ProviderError> {
        let query = vec![
            ("customer".to_string(), customer.to_string()),
            ("type".to_string(), kind.to_string()),
        ];
        self.get("/payment_methods", &query)
            .await
            .and_then(unwrap_list)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payments
    // ─────────────────────────────────────────────────────────────────────────

    async fn create_payment_intent(
        &self,
        req: CreatePaymentIntentRequest,
    ) -> Result<Value, ProviderError> {
        let mut params = Vec::new();
        push(&mut params, "amount", req.amount);
        push(&mut params, "currency", &req.currency);
        push(&mut params, "payment_method", &req.payment_method);
        push(&mut params, "confirm", req.confirm);
        push_opt(&mut params, "customer", req.customer.as_ref());
        push_opt(&mut params, "receipt_email", req.receipt_email.as_ref());
        push_opt(&mut params, "description", req.description.as_ref());
        push_opt_map(&mut params, "metadata", req.metadata.as_ref());
        self.post("/payment_intents", &params).await
    }

    async fn retrieve_payment_intent(&self, id: &str) -> Result<Value, ProviderError> {
        self.get(&format!("/payment_intents/{}", id), &[]).await
    }

    async fn create_setup_intent(
        &self,
        req: CreateSetupIntentRequest,
    ) -> Result<Value, ProviderError> {
        let mut params = Vec::new();
        push(&mut params, "payment_method", &req.payment_method);
        push(&mut params, "usage", &req.usage);
        push_opt(&mut params, "customer", req.customer.as_ref());
        push_opt_map(&mut params, "metadata", req.metadata.as_ref());
        self.post("/setup_intents", &params).await
    }

    async fn retrieve_setup_intent(&self, id: &str) -> Result<Value, ProviderError> {
        self.get(&format!("/setup_intents/{}", id), &[]).await
    }

    async fn create_charge(&self, req: CreateChargeRequest) -> Result<Value, ProviderError> {
        let mut params = Vec::new();
        push(&mut params, "amount", req.amount);
        push(&mut params, "currency", &req.currency);
        push(&mut params, "source", &req.source);
        push_opt(&mut params, "customer", req.customer.as_ref());
        push_opt(&mut params, "description", req.description.as_ref());
        push_opt_map(&mut params, "metadata", req.metadata.as_ref());
        self.post("/charges", &params).await
    }

    async fn retrieve_charge(&self, id: &str) -> Result<Value, ProviderError> {
        self.get(&format!("/charges/{}", id), &[]).await
    }

    async fn create_refund(&self, req: CreateRefundRequest) -> Result<Value, ProviderError> {
        let mut params = Vec::new();
        push(&mut params, "charge", &req.charge);
        push_opt(&mut params, "amount", req.amount);
        push_opt(&mut params, "reason", req.reason.as_ref());
        push_opt_map(&mut params, "metadata", req.metadata.as_ref());
        self.post("/refunds", &params).await
    }

    async fn retrieve_refund(&self, id: &str) -> Result<Value, ProviderError> {
        self.get(&format!("/refunds/{}", id), &[]).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Prices
    // ─────────────────────────────────────────────────────────────────────────

    async fn create_price(&self, req: CreatePriceRequest) -> Result<Value, ProviderError> {
        let mut params = Vec::new();
        push(&mut params, "unit_amount", req.unit_amount);
        push(&mut params, "currency", &req.currency);
        push(&mut params, "product", &req.product);
        push_opt_map(&mut params, "recurring", req.recurring.as_ref());
        push_opt(&mut params, "nickname", req.nickname.as_ref());
        push_opt(&mut params, "tax_behavior", req.tax_behavior.as_ref());
        push_opt_map(&mut params, "metadata", req.metadata.as_ref());
        self.post("/prices", &params).await
    }

    async fn update_price(
        &self,
        id: &str,
        req: UpdatePriceRequest,
    ) -> Result<Value, ProviderError> {
        let mut params = Vec::new();
        push_opt(&mut params, "active", req.active);
        push_opt(&mut params, "nickname", req.nickname.as_ref());
        push_opt_map(&mut params, "metadata", req.metadata.as_ref());
        self.post(&format!("/prices/{}", id), &params).await
    }

    async fn retrieve_price(&self, id: &str) -> Result<Value, ProviderError> {
        self.get(&format!("/prices/{}", id), &[]).await
    }

    async fn list_prices(
        &self,
        product: Option<&str>,
        active: bool,
        limit: u32,
    ) -> Result<Vec<Value>, ProviderError> {
        let mut query = Vec::new();
        push_opt(&mut query, "product", product);
        push(&mut query, "active", active);
        push(&mut query, "limit", limit);
        self.get("/prices", &query).await.and_then(unwrap_list)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Products
    // ─────────────────────────────────────────────────────────────────────────

    async fn create_product(&self, req: CreateProductRequest) -> Result<Value, ProviderError> {
        let mut params = Vec::new();
        push(&mut params, "name", &req.name);
        push_opt(&mut params, "description", req.description.as_ref());
        push_opt_map(&mut params, "metadata", req.metadata.as_ref());
        self.post("/products", &params).await
    }

    async fn update_product(
        &self,
        id: &str,
        req: UpdateProductRequest,
    ) -> Result<Value, ProviderError> {
        let mut params = Vec::new();
        push_opt(&mut params, "name", req.name.as_ref());
        push_opt(&mut params, "description", req.description.as_ref());
        push_opt_map(&mut params, "metadata", req.metadata.as_ref());
        self.post(&format!("/products/{}", id), &params).await
    }

    async fn delete_product(&self, id: &str) -> Result<Value, ProviderError> {
        self.delete(&format!("/products/{}", id)).await
    }

    async fn retrieve_product(&self, id: &str) -> Result<Value, ProviderError> {
        self.get(&format!("/products/{}", id), &[]).await
    }

    async fn list_products(&self, active: bool, limit: u32) -> Result<Vec<Value>, ProviderError> {
        let mut query = Vec::new();
        push(&mut query, "active", active);
        push(&mut query, "limit", limit);
        self.get("/products", &query).await.and_then(unwrap_list)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────────

    async fn create_subscription(
        &self,
        req: CreateSubscriptionRequest,
    ) -> Result<Value, ProviderError> {
        let mut params = Vec::new();
        push(&mut params, "customer", &req.customer);
        push(&mut params, "items[0][price]", &req.price);
        push_opt(&mut params, "trial_period_days", req.trial_period_days);
        push_opt_map(&mut params, "metadata", req.metadata.as_ref());
        self.post("/subscriptions", &params).await
    }

    async fn retrieve_subscription(&self, id: &str) -> Result<Value, ProviderError> {
        self.get(&format!("/subscriptions/{}", id), &[]).await
    }

    async fn update_subscription(
        &self,
        id: &str,
        req: UpdateSubscriptionRequest,
    ) -> Result<Value, ProviderError> {
        let mut params = Vec::new();
        push_opt(&mut params, "cancel_at_period_end", req.cancel_at_period_end);
        push_opt(
            &mut params,
            "default_payment_method",
            req.default_payment_method.as_ref(),
        );
        push_opt_map(&mut params, "metadata", req.metadata.as_ref());
        self.post(&format!("/subscriptions/{}", id), &params).await
    }

    async fn cancel_subscription(&self, id: &str) -> Result<Value, ProviderError> {
        self.delete(&format!("/subscriptions/{}", id)).await
    }

    async fn list_subscriptions(
        &self,
        customer: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Value>, ProviderError> {
        let mut query = Vec::new();
        push_opt(&mut query, "customer", customer);
        push(&mut query, "limit", limit);
        self.get("/subscriptions", &query)
            .await
            .and_then(unwrap_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = StripeClient::new("sk_test_abc").with_api_base("http://localhost:9000/");
        assert_eq!(client.url("/customers"), "http://localhost:9000/customers");
    }

    #[test]
    fn test_unwrap_list_success() {
        let body = json!({"object": "list", "data": [{"id": "cus_1"}, {"id": "cus_2"}], "has_more": false});
        let items = unwrap_list(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], "cus_1");
    }

    #[test]
    fn test_unwrap_list_missing_data() {
        let result = unwrap_list(json!({"object": "list"}));
        assert!(matches!(result, Err(ProviderError::Decode(_))));
    }

    #[test]
    fn test_push_map_brackets_keys() {
        let mut params = Vec::new();
        let mut map = std::collections::HashMap::new();
        map.insert("plan".to_string(), "pro".to_string());
        push_map(&mut params, "metadata", &map);

        assert_eq!(params, vec![("metadata[plan]".to_string(), "pro".to_string())]);
    }

    #[test]
    fn test_push_opt_skips_none() {
        let mut params = Vec::new();
        push_opt(&mut params, "phone", None::<&String>);
        push_opt(&mut params, "limit", Some(100));

        assert_eq!(params, vec![("limit".to_string(), "100".to_string())]);
    }
}
