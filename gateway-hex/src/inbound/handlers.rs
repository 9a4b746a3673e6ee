//! HTTP request handlers.
//!
//! Each handler validates shape via the extractors, hands off to the
//! service, and returns the provider's JSON. Error translation is uniform:
//! every failure is a 400 with the stringified error as detail.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use gateway_types::{
    AppError, AttachPaymentMethodRequest, CreateChargeRequest, CreateCustomerRequest,
    CreatePaymentIntentRequest, CreatePaymentMethodRequest, CreatePriceRequest,
    CreateProductRequest, CreateRefundRequest, CreateSetupIntentRequest,
    CreateSubscriptionRequest, DetachPaymentMethodRequest, ListPaymentMethodsQuery,
    ListPricesQuery, ListProductsQuery, ListSubscriptionsQuery, PaymentsProvider,
    UpdateCustomerRequest, UpdatePriceRequest, UpdateProductRequest, UpdateSubscriptionRequest,
};

use crate::GatewayService;

/// Application state shared across handlers.
pub struct AppState<P: PaymentsProvider> {
    pub service: GatewayService<P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Single failure taxonomy: every error renders as HTTP 400 with the
        // stringified message as its only detail.
        let body = serde_json::json!({
            "error": self.0.to_string(),
            "code": StatusCode::BAD_REQUEST.as_u16()
        });

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "Stripe gateway is healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Customers
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, req))]
pub async fn create_customer<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.service.create_customer(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[tracing::instrument(skip(state))]
pub async fn list_customers<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> Result<impl IntoResponse, ApiError> {
    let customers = state.service.list_customers().await?;
    Ok(Json(customers))
}

/// Lookup by email: scans the provider list, returns a message body on miss.
#[tracing::instrument(skip(state), fields(email = %email))]
pub async fn get_customer_by_email<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.service.get_customer_by_email(&email).await?;
    Ok(Json(customer))
}

#[tracing::instrument(skip(state, req), fields(customer_id = %id))]
pub async fn update_customer<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.service.update_customer(&id, req).await?;
    Ok(Json(customer))
}

#[tracing::instrument(skip(state), fields(customer_id = %id))]
pub async fn delete_customer<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state.service.delete_customer(&id).await?;
    Ok(Json(message))
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment methods
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, req))]
pub async fn create_payment_method<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<CreatePaymentMethodRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let method = state.service.create_payment_method(req).await?;
    Ok((StatusCode::CREATED, Json(method)))
}

#[tracing::instrument(skip(state), fields(payment_method = %req.payment_method_id, customer = %req.customer))]
pub async fn attach_payment_method<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<AttachPaymentMethodRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let method = state.service.attach_payment_method(req).await?;
    Ok(Json(method))
}

#[tracing::instrument(skip(state), fields(payment_method = %req.payment_method_id))]
pub async fn detach_payment_method<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<DetachPaymentMethodRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let method = state
        .service
        .detach_payment_method(&req.payment_method_id)
        .await?;
    Ok(Json(method))
}

#[tracing::instrument(skip(state), fields(payment_method = %id))]
pub async fn retrieve_payment_method<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let method = state.service.retrieve_payment_method(&id).await?;
    Ok(Json(method))
}

#[tracing::instrument(skip(state), fields(customer = %query.customer))]
pub async fn list_payment_methods<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<ListPaymentMethodsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let methods = state
        .service
        .list_payment_methods(&query.customer, &query.kind)
        .await?;
    Ok(Json(methods))
}

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, req), fields(amount = req.amount))]
pub async fn create_payment_intent<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<CreatePaymentIntentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let intent = state.service.create_payment_intent(req).await?;
    Ok((StatusCode::CREATED, Json(intent)))
}

#[tracing::instrument(skip(state), fields(payment_intent = %id))]
pub async fn retrieve_payment_intent<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let intent = state.service.retrieve_payment_intent(&id).await?;
    Ok(Json(intent))
}

#[tracing::instrument(skip(state, req))]
pub async fn create_setup_intent<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<CreateSetupIntentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let intent = state.service.create_setup_intent(req).await?;
    Ok((StatusCode::CREATED, Json(intent)))
}

#[tracing::instrument(skip(state), fields(setup_intent = %id))]
pub async fn retrieve_setup_intent<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let intent = state.service.retrieve_setup_intent(&id).await?;
    Ok(Json(intent))
}

#[tracing::instrument(skip(state, req), fields(amount = req.amount))]
pub async fn create_charge<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<CreateChargeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let charge = state.service.create_charge(req).await?;
    Ok((StatusCode::CREATED, Json(charge)))
}

#[tracing::instrument(skip(state), fields(charge = %id))]
pub async fn retrieve_charge<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let charge = state.service.retrieve_charge(&id).await?;
    Ok(Json(charge))
}

#[tracing::instrument(skip(state, req), fields(charge = %req.charge))]
pub async fn create_refund<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<CreateRefundRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let refund = state.service.create_refund(req).await?;
    Ok((StatusCode::CREATED, Json(refund)))
}

#[tracing::instrument(skip(state), fields(refund = %id))]
pub async fn retrieve_refund<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let refund = state.service.retrieve_refund(&id).await?;
    Ok(Json(refund))
}

// ─────────────────────────────────────────────────────────────────────────────
// Prices
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, req), fields(product = %req.product))]
pub async fn create_price<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<CreatePriceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let price = state.service.create_price(req).await?;
    Ok((StatusCode::CREATED, Json(price)))
}

#[tracing::instrument(skip(state, req), fields(price = %id))]
pub async fn update_price<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePriceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let price = state.service.update_price(&id, req).await?;
    Ok(Json(price))
}

/// Soft delete: deactivates the price.
#[tracing::instrument(skip(state), fields(price = %id))]
pub async fn delete_price<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let price = state.service.delete_price(&id).await?;
    Ok(Json(price))
}

#[tracing::instrument(skip(state), fields(price = %id))]
pub async fn retrieve_price<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let price = state.service.retrieve_price(&id).await?;
    Ok(Json(price))
}

#[tracing::instrument(skip(state, query))]
pub async fn list_prices<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<ListPricesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let prices = state
        .service
        .list_prices(query.product.as_deref(), query.active, query.limit)
        .await?;
    Ok(Json(prices))
}

// ─────────────────────────────────────────────────────────────────────────────
// Products
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, req))]
pub async fn create_product<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state.service.create_product(req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[tracing::instrument(skip(state, req), fields(product = %id))]
pub async fn update_product<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state.service.update_product(&id, req).await?;
    Ok(Json(product))
}

#[tracing::instrument(skip(state), fields(product = %id))]
pub async fn delete_product<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.service.delete_product(&id).await?;
    Ok(Json(deleted))
}

#[tracing::instrument(skip(state), fields(product = %id))]
pub async fn retrieve_product<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state.service.retrieve_product(&id).await?;
    Ok(Json(product))
}

#[tracing::instrument(skip(state, query))]
pub async fn list_products<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state
        .service
        .list_products(query.active, query.limit)
        .await?;
    Ok(Json(products))
}

// ─────────────────────────────────────────────────────────────────────────────
// Subscriptions
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state, req), fields(customer = %req.customer))]
pub async fn create_subscription<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<CreateSubscriptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = state.service.create_subscription(req).await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

#[tracing::instrument(skip(state, req), fields(subscription = %id))]
pub async fn update_subscription<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSubscriptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = state.service.update_subscription(&id, req).await?;
    Ok(Json(subscription))
}

#[tracing::instrument(skip(state), fields(subscription = %id))]
pub async fn cancel_subscription<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = state.service.cancel_subscription(&id).await?;
    Ok(Json(subscription))
}

#[tracing::instrument(skip(state), fields(subscription = %id))]
pub async fn retrieve_subscription<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = state.service.retrieve_subscription(&id).await?;
    Ok(Json(subscription))
}

#[tracing::instrument(skip(state, query))]
pub async fn list_subscriptions<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<ListSubscriptionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let subscriptions = state
        .service
        .list_subscriptions(query.customer.as_deref(), query.limit)
        .await?;
    Ok(Json(subscriptions))
}

// ─────────────────────────────────────────────────────────────────────────────
// Webhook
// ─────────────────────────────────────────────────────────────────────────────

/// Webhook endpoint. Takes the raw body so the signature is verified over
/// exactly the bytes Stripe signed.
#[tracing::instrument(skip(state, headers, body))]
pub async fn webhook<P: PaymentsProvider>(
    State(state): State<Arc<AppState<P>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|value| value.to_str().ok());

    let ack = state.service.handle_webhook(&body, signature)?;
    Ok(Json(ack))
}
