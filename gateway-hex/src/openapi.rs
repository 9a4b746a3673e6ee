//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use gateway_types::dto::{
    AttachPaymentMethodRequest, CreateChargeRequest, CreateCustomerRequest,
    CreatePaymentIntentRequest, CreatePaymentMethodRequest, CreatePriceRequest,
    CreateProductRequest, CreateRefundRequest, CreateSetupIntentRequest,
    CreateSubscriptionRequest, CreatedCustomerResponse, CustomerSummary,
    DetachPaymentMethodRequest, MessageResponse, UpdateCustomerRequest, UpdatePriceRequest,
    UpdateProductRequest, UpdateSubscriptionRequest,
};
use gateway_types::event::WebhookAck;
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "Stripe gateway is healthy"}))
    )
)]
async fn health() {}

/// Create a Stripe customer
#[utoipa::path(
    post,
    path = "/api/v1/customer",
    tag = "customer",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CreatedCustomerResponse),
        (status = 400, description = "Invalid request or provider error")
    )
)]
async fn create_customer() {}

/// List all Stripe customers
#[utoipa::path(
    get,
    path = "/api/v1/customer",
    tag = "customer",
    responses(
        (status = 200, description = "Customer list, or a message when empty", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn list_customers() {}

/// Get a Stripe customer by email
#[utoipa::path(
    get,
    path = "/api/v1/customer/{id}",
    tag = "customer",
    params(
        ("id" = String, Path, description = "Customer email address")
    ),
    responses(
        (status = 200, description = "Customer object, or a message when not found", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn get_customer_by_email() {}

/// Update a Stripe customer
#[utoipa::path(
    put,
    path = "/api/v1/customer/{id}",
    tag = "customer",
    request_body = UpdateCustomerRequest,
    params(
        ("id" = String, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Updated customer object", body = inline(serde_json::Value)),
        (status = 400, description = "Empty update set or provider error")
    )
)]
async fn update_customer() {}

/// Delete a Stripe customer
#[utoipa::path(
    delete,
    path = "/api/v1/customer/{id}",
    tag = "customer",
    params(
        ("id" = String, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Deletion confirmation", body = MessageResponse),
        (status = 400, description = "Provider error")
    )
)]
async fn delete_customer() {}

/// Create a PaymentIntent
#[utoipa::path(
    post,
    path = "/api/v1/payment/intent",
    tag = "payment",
    request_body = CreatePaymentIntentRequest,
    responses(
        (status = 201, description = "PaymentIntent created", body = inline(serde_json::Value)),
        (status = 400, description = "Invalid request or provider error")
    )
)]
async fn create_payment_intent() {}

/// Retrieve a PaymentIntent
#[utoipa::path(
    get,
    path = "/api/v1/payment/intent/{id}",
    tag = "payment",
    params(
        ("id" = String, Path, description = "PaymentIntent ID")
    ),
    responses(
        (status = 200, description = "PaymentIntent object", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn retrieve_payment_intent() {}

/// Create a SetupIntent
#[utoipa::path(
    post,
    path = "/api/v1/payment/setup-intent",
    tag = "payment",
    request_body = CreateSetupIntentRequest,
    responses(
        (status = 201, description = "SetupIntent created", body = inline(serde_json::Value)),
        (status = 400, description = "Invalid request or provider error")
    )
)]
async fn create_setup_intent() {}

/// Retrieve a SetupIntent
#[utoipa::path(
    get,
    path = "/api/v1/payment/setup-intent/{id}",
    tag = "payment",
    params(
        ("id" = String, Path, description = "SetupIntent ID")
    ),
    responses(
        (status = 200, description = "SetupIntent object", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn retrieve_setup_intent() {}

/// Create a Charge
#[utoipa::path(
    post,
    path = "/api/v1/payment/charge",
    tag = "payment",
    request_body = CreateChargeRequest,
    responses(
        (status = 201, description = "Charge created", body = inline(serde_json::Value)),
        (status = 400, description = "Invalid request or provider error")
    )
)]
async fn create_charge() {}

/// Retrieve a Charge
#[utoipa::path(
    get,
    path = "/api/v1/payment/charge/{id}",
    tag = "payment",
    params(
        ("id" = String, Path, description = "Charge ID")
    ),
    responses(
        (status = 200, description = "Charge object", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn retrieve_charge() {}

/// Create a Refund
#[utoipa::path(
    post,
    path = "/api/v1/payment/refund",
    tag = "payment",
    request_body = CreateRefundRequest,
    responses(
        (status = 201, description = "Refund created", body = inline(serde_json::Value)),
        (status = 400, description = "Invalid request or provider error")
    )
)]
async fn create_refund() {}

/// Retrieve a Refund
#[utoipa::path(
    get,
    path = "/api/v1/payment/refund/{id}",
    tag = "payment",
    params(
        ("id" = String, Path, description = "Refund ID")
    ),
    responses(
        (status = 200, description = "Refund object", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn retrieve_refund() {}

/// Create a payment method
#[utoipa::path(
    post,
    path = "/api/v1/payment-method",
    tag = "payment-method",
    request_body = CreatePaymentMethodRequest,
    responses(
        (status = 201, description = "Payment method created", body = inline(serde_json::Value)),
        (status = 400, description = "Invalid request or provider error")
    )
)]
async fn create_payment_method() {}

/// Attach a payment method to a customer
#[utoipa::path(
    post,
    path = "/api/v1/payment-method/attach",
    tag = "payment-method",
    request_body = AttachPaymentMethodRequest,
    responses(
        (status = 200, description = "Attached payment method", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn attach_payment_method() {}

/// Detach a payment method from its customer
#[utoipa::path(
    post,
    path = "/api/v1/payment-method/detach",
    tag = "payment-method",
    request_body = DetachPaymentMethodRequest,
    responses(
        (status = 200, description = "Detached payment method", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn detach_payment_method() {}

/// Retrieve a payment method
#[utoipa::path(
    get,
    path = "/api/v1/payment-method/{id}",
    tag = "payment-method",
    params(
        ("id" = String, Path, description = "Payment method ID")
    ),
    responses(
        (status = 200, description = "Payment method object", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn retrieve_payment_method() {}

/// List a customer's payment methods
#[utoipa::path(
    get,
    path = "/api/v1/payment-method",
    tag = "payment-method",
    params(
        ("customer" = String, Query, description = "Customer ID"),
        ("type" = Option<String>, Query, description = "Payment method type (default: card)")
    ),
    responses(
        (status = 200, description = "Payment method list", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn list_payment_methods() {}

/// Create a price
#[utoipa::path(
    post,
    path = "/api/v1/price",
    tag = "price",
    request_body = CreatePriceRequest,
    responses(
        (status = 201, description = "Price created", body = inline(serde_json::Value)),
        (status = 400, description = "Invalid request or provider error")
    )
)]
async fn create_price() {}

/// Update a price
#[utoipa::path(
    put,
    path = "/api/v1/price/{id}",
    tag = "price",
    request_body = UpdatePriceRequest,
    params(
        ("id" = String, Path, description = "Price ID")
    ),
    responses(
        (status = 200, description = "Updated price object", body = inline(serde_json::Value)),
        (status = 400, description = "Empty update set or provider error")
    )
)]
async fn update_price() {}

/// Deactivate a price (Stripe prices cannot be hard-deleted)
#[utoipa::path(
    delete,
    path = "/api/v1/price/{id}",
    tag = "price",
    params(
        ("id" = String, Path, description = "Price ID")
    ),
    responses(
        (status = 200, description = "Deactivated price object", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn delete_price() {}

/// Retrieve a price
#[utoipa::path(
    get,
    path = "/api/v1/price/{id}",
    tag = "price",
    params(
        ("id" = String, Path, description = "Price ID")
    ),
    responses(
        (status = 200, description = "Price object", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn retrieve_price() {}

/// List prices
#[utoipa::path(
    get,
    path = "/api/v1/price",
    tag = "price",
    params(
        ("product" = Option<String>, Query, description = "Filter by product ID"),
        ("active" = Option<bool>, Query, description = "Only active prices (default: true)"),
        ("limit" = Option<u32>, Query, description = "Page size (default: 100)")
    ),
    responses(
        (status = 200, description = "Price list", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn list_prices() {}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/v1/product",
    tag = "product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = inline(serde_json::Value)),
        (status = 400, description = "Invalid request or provider error")
    )
)]
async fn create_product() {}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/v1/product/{id}",
    tag = "product",
    request_body = UpdateProductRequest,
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Updated product object", body = inline(serde_json::Value)),
        (status = 400, description = "Empty update set or provider error")
    )
)]
async fn update_product() {}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/v1/product/{id}",
    tag = "product",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product object", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn delete_product() {}

/// Retrieve a product
#[utoipa::path(
    get,
    path = "/api/v1/product/{id}",
    tag = "product",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product object", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn retrieve_product() {}

/// List products
#[utoipa::path(
    get,
    path = "/api/v1/product",
    tag = "product",
    params(
        ("active" = Option<bool>, Query, description = "Only active products (default: true)"),
        ("limit" = Option<u32>, Query, description = "Page size (default: 100)")
    ),
    responses(
        (status = 200, description = "Product list", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn list_products() {}

/// Create a subscription
#[utoipa::path(
    post,
    path = "/api/v1/subscription",
    tag = "subscription",
    request_body = CreateSubscriptionRequest,
    responses(
        (status = 201, description = "Subscription created", body = inline(serde_json::Value)),
        (status = 400, description = "Invalid request or provider error")
    )
)]
async fn create_subscription() {}

/// Update a subscription
#[utoipa::path(
    put,
    path = "/api/v1/subscription/{id}",
    tag = "subscription",
    request_body = UpdateSubscriptionRequest,
    params(
        ("id" = String, Path, description = "Subscription ID")
    ),
    responses(
        (status = 200, description = "Updated subscription object", body = inline(serde_json::Value)),
        (status = 400, description = "Empty update set or provider error")
    )
)]
async fn update_subscription() {}

/// Cancel a subscription
#[utoipa::path(
    delete,
    path = "/api/v1/subscription/{id}",
    tag = "subscription",
    params(
        ("id" = String, Path, description = "Subscription ID")
    ),
    responses(
        (status = 200, description = "Canceled subscription object", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn cancel_subscription() {}

/// Retrieve a subscription
#[utoipa::path(
    get,
    path = "/api/v1/subscription/{id}",
    tag = "subscription",
    params(
        ("id" = String, Path, description = "Subscription ID")
    ),
    responses(
        (status = 200, description = "Subscription object", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn retrieve_subscription() {}

/// List subscriptions
#[utoipa::path(
    get,
    path = "/api/v1/subscription",
    tag = "subscription",
    params(
        ("customer" = Option<String>, Query, description = "Filter by customer ID"),
        ("limit" = Option<u32>, Query, description = "Page size (default: 100)")
    ),
    responses(
        (status = 200, description = "Subscription list", body = inline(serde_json::Value)),
        (status = 400, description = "Provider error")
    )
)]
async fn list_subscriptions() {}

/// Stripe webhook receiver
#[utoipa::path(
    post,
    path = "/api/v1/webhook",
    tag = "webhook",
    request_body = inline(serde_json::Value),
    params(
        ("Stripe-Signature" = String, Header, description = "Stripe signature header (t=...,v1=...)")
    ),
    responses(
        (status = 200, description = "Event acknowledged (recognized or not)", body = WebhookAck),
        (status = 400, description = "Missing or invalid signature, or invalid payload")
    )
)]
async fn webhook() {}

/// OpenAPI documentation for the Stripe gateway API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stripe Gateway API",
        version = "0.1.0",
        description = "A thin HTTP gateway over the Stripe API: customers, payments, payment methods, prices, products, subscriptions, and webhook verification.",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_customer,
        list_customers,
        get_customer_by_email,
        update_customer,
        delete_customer,
        create_payment_intent,
        retrieve_payment_intent,
        create_setup_intent,
        retrieve_setup_intent,
        create_charge,
        retrieve_charge,
        create_refund,
        retrieve_refund,
        create_payment_method,
        attach_payment_method,
        detach_payment_method,
        retrieve_payment_method,
        list_payment_methods,
        create_price,
        update_price,
        delete_price,
        retrieve_price,
        list_prices,
        create_product,
        update_product,
        delete_product,
        retrieve_product,
        list_products,
        create_subscription,
        update_subscription,
        cancel_subscription,
        retrieve_subscription,
        list_subscriptions,
        webhook,
    ),
    components(
        schemas(
            CreateCustomerRequest,
            UpdateCustomerRequest,
            CreatedCustomerResponse,
            CustomerSummary,
            CreatePaymentIntentRequest,
            CreateSetupIntentRequest,
            CreateChargeRequest,
            CreateRefundRequest,
            CreatePaymentMethodRequest,
            AttachPaymentMethodRequest,
            DetachPaymentMethodRequest,
            CreatePriceRequest,
            UpdatePriceRequest,
            CreateProductRequest,
            UpdateProductRequest,
            CreateSubscriptionRequest,
            UpdateSubscriptionRequest,
            MessageResponse,
            WebhookAck,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "customer", description = "Stripe customer operations"),
        (name = "payment", description = "Payment intents, setup intents, charges, and refunds"),
        (name = "payment-method", description = "Payment method operations"),
        (name = "price", description = "Price operations"),
        (name = "product", description = "Product operations"),
        (name = "subscription", description = "Subscription operations"),
        (name = "webhook", description = "Stripe webhook receiver"),
    )
)]
pub struct ApiDoc;
