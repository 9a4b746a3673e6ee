//! Service-layer tests against an in-memory provider.

use std::sync::Mutex;

use serde_json::{Value, json};

use gateway_types::{
    AppError, AttachPaymentMethodRequest, CreateChargeRequest, CreateCustomerRequest,
    CreatePaymentIntentRequest, CreatePaymentMethodRequest, CreatePriceRequest,
    CreateProductRequest, CreateRefundRequest, CreateSetupIntentRequest,
    CreateSubscriptionRequest, PaymentsProvider, ProviderError, UpdateCustomerRequest,
    UpdatePriceRequest, UpdateProductRequest, UpdateSubscriptionRequest,
};

use crate::GatewayService;

const WEBHOOK_SECRET: &str = "whsec_test123secret456";

/// In-memory provider: returns a canned object, a canned customer list, or a
/// canned error. Records the last price update so tests can observe what the
/// service forwarded.
struct MockProvider {
    response: Value,
    customers: Vec<Value>,
    fail: Option<String>,
    last_price_update: Mutex<Option<UpdatePriceRequest>>,
}

impl MockProvider {
    fn returning(response: Value) -> Self {
        Self {
            response,
            customers: Vec::new(),
            fail: None,
            last_price_update: Mutex::new(None),
        }
    }

    fn with_customers(customers: Vec<Value>) -> Self {
        Self {
            customers,
            ..Self::returning(Value::Null)
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            fail: Some(message.to_string()),
            ..Self::returning(Value::Null)
        }
    }

    fn respond(&self) -> Result<Value, ProviderError> {
        match &self.fail {
            Some(message) => Err(ProviderError::Api(message.clone())),
            None => Ok(self.response.clone()),
        }
    }

    fn respond_list(&self) -> Result<Vec<Value>, ProviderError> {
        match &self.fail {
            Some(message) => Err(ProviderError::Api(message.clone())),
            None => Ok(self.customers.clone()),
        }
    }
}

#[async_trait::async_trait]
impl PaymentsProvider for MockProvider {
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
        req: UpdatePriceRequest,
    ) -> Result<Value, ProviderError> {
        *self.last_price_update.lock().unwrap() = Some(req);
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

fn service(provider: MockProvider) -> GatewayService<MockProvider> {
    GatewayService::new(provider, WEBHOOK_SECRET)
}

fn customer_request(email: &str, name: &str) -> CreateCustomerRequest {
    CreateCustomerRequest {
        email: email.to_string(),
        name: name.to_string(),
        phone: None,
        metadata: Default::default(),
    }
}

fn intent_request(amount: i64) -> CreatePaymentIntentRequest {
    CreatePaymentIntentRequest {
        amount,
        currency: "usd".to_string(),
        payment_method: "pm_card_visa".to_string(),
        confirm: true,
        customer: None,
        receipt_email: None,
        description: None,
        metadata: None,
    }
}

#[tokio::test]
async fn test_create_customer_reshapes_response() {
    let svc = service(MockProvider::returning(json!({
        "id": "cus_1",
        "email": "alice@example.com",
        "name": "Alice",
        "phone": null,
        "metadata": {"plan": "pro"},
        "object": "customer"
    })));

    let resp = svc
        .create_customer(customer_request("alice@example.com", "Alice"))
        .await
        .unwrap();

    assert_eq!(resp.short_response.id, "cus_1");
    assert_eq!(resp.short_response.email, "alice@example.com");
    assert_eq!(resp.short_response.metadata["plan"], "pro");
    assert_eq!(resp.full_response["object"], "customer");
    assert_eq!(resp.message, "Customer created successfully");
}

#[tokio::test]
async fn test_create_customer_rejects_blank_fields() {
    let svc = service(MockProvider::returning(json!({})));

    let err = svc
        .create_customer(customer_request("  ", "Alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = svc
        .create_customer(customer_request("alice@example.com", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_provider_error_surfaces_message_only() {
    let svc = service(MockProvider::failing("No such customer: 'cus_nope'"));

    let err = svc
        .create_customer(customer_request("alice@example.com", "Alice"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "No such customer: 'cus_nope'");
}

#[tokio::test]
async fn test_list_customers_empty_returns_message() {
    let svc = service(MockProvider::with_customers(vec![]));

    let resp = svc.list_customers().await.unwrap();

    assert_eq!(resp["message"], "No customers found");
}

#[tokio::test]
async fn test_get_customer_by_email_hit_and_miss() {
    let svc = service(MockProvider::with_customers(vec![
        json!({"id": "cus_1", "email": "alice@example.com"}),
        json!({"id": "cus_2", "email": "bob@example.com"}),
    ]));

    let hit = svc.get_customer_by_email("bob@example.com").await.unwrap();
    assert_eq!(hit["id"], "cus_2");

    // A miss is still a 200 with a message body.
    let miss = svc.get_customer_by_email("carol@example.com").await.unwrap();
    assert_eq!(miss["message"], "Customer not found");
}

#[tokio::test]
async fn test_empty_updates_rejected_before_provider() {
    let svc = service(MockProvider::failing("provider should not be called"));

    let err = svc
        .update_customer("cus_1", UpdateCustomerRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = svc
        .update_price("price_1", UpdatePriceRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = svc
        .update_product("prod_1", UpdateProductRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = svc
        .update_subscription("sub_1", UpdateSubscriptionRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_delete_customer_returns_confirmation() {
    let svc = service(MockProvider::returning(json!({"deleted": true})));

    let resp = svc.delete_customer("cus_1").await.unwrap();

    assert_eq!(resp.message, "Customer deleted successfully");
}

#[tokio::test]
async fn test_non_positive_amounts_rejected() {
    let svc = service(MockProvider::returning(json!({})));

    let err = svc.create_payment_intent(intent_request(0)).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = svc
        .create_charge(CreateChargeRequest {
            amount: -100,
            currency: "usd".to_string(),
            source: "tok_visa".to_string(),
            customer: None,
            description: None,
            metadata: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = svc
        .create_refund(CreateRefundRequest {
            charge: "ch_1".to_string(),
            amount: Some(0),
            reason: None,
            metadata: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = svc
        .create_price(CreatePriceRequest {
            unit_amount: 0,
            currency: "usd".to_string(),
            product: "prod_1".to_string(),
            recurring: None,
            nickname: None,
            tax_behavior: None,
            metadata: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_full_refund_without_amount_allowed() {
    let svc = service(MockProvider::returning(json!({"id": "re_1"})));

    let resp = svc
        .create_refund(CreateRefundRequest {
            charge: "ch_1".to_string(),
            amount: None,
            reason: None,
            metadata: None,
        })
        .await
        .unwrap();

    assert_eq!(resp["id"], "re_1");
}

#[tokio::test]
async fn test_delete_price_deactivates() {
    let svc = service(MockProvider::returning(json!({"id": "price_1", "active": false})));

    let resp = svc.delete_price("price_1").await.unwrap();
    assert_eq!(resp["active"], false);

    let forwarded = svc
        .provider()
        .last_price_update
        .lock()
        .unwrap()
        .take()
        .unwrap();
    assert_eq!(forwarded.active, Some(false));
    assert!(forwarded.nickname.is_none());
}

#[tokio::test]
async fn test_create_product_rejects_blank_name() {
    let svc = service(MockProvider::returning(json!({})));

    let err = svc
        .create_product(CreateProductRequest {
            name: "   ".to_string(),
            description: None,
            metadata: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Webhook handling
// ─────────────────────────────────────────────────────────────────────────────

fn signed_header(payload: &[u8]) -> String {
    gateway_stripe::signature::signature_header(
        payload,
        WEBHOOK_SECRET,
        chrono::Utc::now().timestamp(),
    )
}

#[test]
fn test_webhook_missing_header_rejected() {
    let svc = service(MockProvider::returning(Value::Null));

    let err = svc.handle_webhook(b"{}", None).unwrap_err();

    assert!(matches!(err, AppError::MissingSignature));
}

#[test]
fn test_webhook_invalid_signature_rejected() {
    let svc = service(MockProvider::returning(Value::Null));
    let payload = br#"{"type":"payment_intent.succeeded","data":{"object":{}}}"#;
    let header = gateway_stripe::signature::signature_header(
        payload,
        "whsec_wrong",
        chrono::Utc::now().timestamp(),
    );

    let err = svc.handle_webhook(payload, Some(&header)).unwrap_err();

    assert!(matches!(err, AppError::InvalidSignature));
}

#[test]
fn test_webhook_known_event_dispatched() {
    let svc = service(MockProvider::returning(Value::Null));
    let payload = serde_json::to_vec(&json!({
        "id": "evt_1",
        "type": "payment_intent.succeeded",
        "data": {"object": {"id": "pi_1", "amount": 2000}}
    }))
    .unwrap();
    let header = signed_header(&payload);

    let ack = svc.handle_webhook(&payload, Some(&header)).unwrap();

    assert_eq!(ack.message, "Payment intent succeeded");
    assert_eq!(ack.data["id"], "pi_1");
}

#[test]
fn test_webhook_unknown_event_acknowledged() {
    let svc = service(MockProvider::returning(Value::Null));
    let payload = serde_json::to_vec(&json!({
        "id": "evt_2",
        "type": "invoice.paid",
        "data": {"object": {"id": "in_1"}}
    }))
    .unwrap();
    let header = signed_header(&payload);

    let ack = svc.handle_webhook(&payload, Some(&header)).unwrap();

    assert_eq!(ack.message, "Unhandled event invoice.paid");
    assert_eq!(ack.data["id"], "in_1");
}

#[test]
fn test_webhook_signed_garbage_is_invalid_payload() {
    let svc = service(MockProvider::returning(Value::Null));
    let payload = b"not json at all";
    let header = signed_header(payload);

    let err = svc.handle_webhook(payload, Some(&header)).unwrap_err();

    assert!(matches!(err, AppError::InvalidPayload(_)));
}
