//! Integration tests for the HTTP surface.
//!
//! These tests drive the full router with `tower::ServiceExt::oneshot`,
//! backed by a stub provider, and verify the gateway's two contract points:
//! webhook signature enforcement and the uniform 400 error envelope.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use gateway_hex::{GatewayService, inbound::HttpServer};
use gateway_types::{
    AttachPaymentMethodRequest, CreateChargeRequest, CreateCustomerRequest,
    CreatePaymentIntentRequest, CreatePaymentMethodRequest, CreatePriceRequest,
    CreateProductRequest, CreateRefundRequest, CreateSetupIntentRequest,
    CreateSubscriptionRequest, PaymentsProvider, ProviderError, UpdateCustomerRequest,
    UpdatePriceRequest, UpdateProductRequest, UpdateSubscriptionRequest,
};

const WEBHOOK_SECRET: &str = "whsec_integration_secret";

/// Stub provider: every call returns the same canned object, or the canned
/// error when one is set.
struct StubProvider {
    response: Value,
    fail: Option<String>,
}

impl StubProvider {
    fn returning(response: Value) -> Self {
        Self {
            response,
            fail: None,
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            response: Value::Null,
            fail: Some(message.to_string()),
        }
    }

    fn respond(&self) -> Result<Value, ProviderError> {
        match &self.fail {
            Some(message) => Err(ProviderError::Api(message.clone())),
            None => Ok(self.response.clone()),
        }
    }

    fn respond_list(&self) -> Result<Vec<Value>, ProviderError> {
        self.respond().map(|v| vec![v])
    }
}

#[async_trait::async_trait]
impl PaymentsProvider for StubProvider {
    async fn create_customer(&self, _req: CreateCustomerRequest) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn list_customers(&self, _limit: u32) -> Result<Vec<Value>, ProviderError> {
        self.respond_list()
    }

    async fn update_customer(
        &self,
        _id: &str,
        _req: UpdateCustomerRequest,
    ) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn delete_customer(&self, _id: &str) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn create_payment_method(
        &self,
        _req: CreatePaymentMethodRequest,
    ) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn attach_payment_method(
        &self,
        _req: AttachPaymentMethodRequest,
    ) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn detach_payment_method(&self, _id: &str) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn retrieve_payment_method(&self, _id: &str) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn list_payment_methods(
        &self,
        _customer: &str,
        _kind: &str,
    ) -> Result<Vec<Value>, ProviderError> {
        self.respond_list()
    }

    async fn create_payment_intent(
        &self,
        _req: CreatePaymentIntentRequest,
    ) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn retrieve_payment_intent(&self, _id: &str) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn create_setup_intent(
        &self,
        _req: CreateSetupIntentRequest,
    ) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn retrieve_setup_intent(&self, _id: &str) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn create_charge(&self, _req: CreateChargeRequest) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn retrieve_charge(&self, _id: &str) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn create_refund(&self, _req: CreateRefundRequest) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn retrieve_refund(&self, _id: &str) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn create_price(&self, _req: CreatePriceRequest) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn update_price(
        &self,
        _id: &str,
        _req: UpdatePriceRequest,
    ) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn retrieve_price(&self, _id: &str) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn list_prices(
        &self,
        _product: Option<&str>,
        _active: bool,
        _limit: u32,
    ) -> Result<Vec<Value>, ProviderError> {
        self.respond_list()
    }

    async fn create_product(&self, _req: CreateProductRequest) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn update_product(
        &self,
        _id: &str,
        _req: UpdateProductRequest,
    ) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn delete_product(&self, _id: &str) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn retrieve_product(&self, _id: &str) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn list_products(
        &self,
        _active: bool,
        _limit: u32,
    ) -> Result<Vec<Value>, ProviderError> {
        self.respond_list()
    }

    async fn create_subscription(
        &self,
        _req: CreateSubscriptionRequest,
    ) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn retrieve_subscription(&self, _id: &str) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn update_subscription(
        &self,
        _id: &str,
        _req: UpdateSubscriptionRequest,
    ) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn cancel_subscription(&self, _id: &str) -> Result<Value, ProviderError> {
        self.respond()
    }

    async fn list_subscriptions(
        &self,
        _customer: Option<&str>,
        _limit: u32,
    ) -> Result<Vec<Value>, ProviderError> {
        self.respond_list()
    }
}

fn router(provider: StubProvider) -> axum::Router {
    HttpServer::new(GatewayService::new(provider, WEBHOOK_SECRET)).router()
}

fn webhook_request(payload: &[u8], signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/webhook")
        .header("Content-Type", "application/json");

    if let Some(signature) = signature {
        builder = builder.header("Stripe-Signature", signature);
    }

    builder.body(Body::from(payload.to_vec())).unwrap()
}

fn sign(payload: &[u8]) -> String {
    gateway_stripe::signature::signature_header(
        payload,
        WEBHOOK_SECRET,
        chrono::Utc::now().timestamp(),
    )
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = router(StubProvider::returning(Value::Null));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "Stripe gateway is healthy");
}

#[tokio::test]
async fn test_webhook_missing_signature_is_400() {
    let app = router(StubProvider::returning(Value::Null));
    let payload = br#"{"type":"payment_intent.succeeded","data":{"object":{}}}"#;

    let response = app.oneshot(webhook_request(payload, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing Stripe-Signature header");
    assert_eq!(json["code"], 400);
}

#[tokio::test]
async fn test_webhook_invalid_signature_is_400() {
    let app = router(StubProvider::returning(Value::Null));
    let payload = br#"{"type":"payment_intent.succeeded","data":{"object":{}}}"#;
    let header = gateway_stripe::signature::signature_header(
        payload,
        "whsec_not_the_secret",
        chrono::Utc::now().timestamp(),
    );

    let response = app
        .oneshot(webhook_request(payload, Some(&header)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid webhook signature");
}

#[tokio::test]
async fn test_webhook_valid_known_event_is_200() {
    let app = router(StubProvider::returning(Value::Null));
    let payload = serde_json::to_vec(&json!({
        "id": "evt_1",
        "type": "customer.subscription.created",
        "data": {"object": {"id": "sub_1"}}
    }))
    .unwrap();
    let header = sign(&payload);

    let response = app
        .oneshot(webhook_request(&payload, Some(&header)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Subscription created");
    assert_eq!(json["data"]["id"], "sub_1");
}

#[tokio::test]
async fn test_webhook_valid_unknown_event_is_200() {
    let app = router(StubProvider::returning(Value::Null));
    let payload = serde_json::to_vec(&json!({
        "id": "evt_2",
        "type": "invoice.payment_failed",
        "data": {"object": {"id": "in_1"}}
    }))
    .unwrap();
    let header = sign(&payload);

    let response = app
        .oneshot(webhook_request(&payload, Some(&header)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Unhandled event invoice.payment_failed");
    assert_eq!(json["data"]["id"], "in_1");
}

#[tokio::test]
async fn test_create_customer_returns_201_with_summary() {
    let app = router(StubProvider::returning(json!({
        "id": "cus_1",
        "email": "alice@example.com",
        "name": "Alice"
    })));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/customer")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    r#"{"email": "alice@example.com", "name": "Alice"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["short_response"]["id"], "cus_1");
    assert_eq!(json["message"], "Customer created successfully");
}

#[tokio::test]
async fn test_provider_error_becomes_400_with_message() {
    let app = router(StubProvider::failing("No such payment_intent: 'pi_nope'"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/payment/intent/pi_nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No such payment_intent: 'pi_nope'");
    assert_eq!(json["code"], 400);
    // Stringified message only, no structured provider detail.
    assert_eq!(json.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_every_resource_surfaces_provider_error_as_400() {
    let routes = [
        "/api/v1/customer",
        "/api/v1/payment/intent/pi_1",
        "/api/v1/payment/setup-intent/seti_1",
        "/api/v1/payment/charge/ch_1",
        "/api/v1/payment/refund/re_1",
        "/api/v1/payment-method/pm_1",
        "/api/v1/price/price_1",
        "/api/v1/product/prod_1",
        "/api/v1/subscription/sub_1",
    ];

    for uri in routes {
        let app = router(StubProvider::failing("upstream rejected the call"));

        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "GET {} should surface the provider error as 400",
            uri
        );
        let json = body_json(response).await;
        assert_eq!(json["error"], "upstream rejected the call");
        assert_eq!(json["code"], 400);
    }
}

#[tokio::test]
async fn test_empty_update_is_400() {
    let app = router(StubProvider::returning(json!({"id": "prod_1"})));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::PUT)
                .uri("/api/v1/product/prod_1")
                .header("Content-Type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No fields to update for the product");
}

#[tokio::test]
async fn test_delete_price_returns_provider_object() {
    let app = router(StubProvider::returning(
        json!({"id": "price_1", "active": false}),
    ));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/api/v1/price/price_1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["active"], false);
}
