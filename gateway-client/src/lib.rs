//! # Gateway Client SDK
//!
//! A Rust client for the Stripe gateway API. Request bodies are the gateway's
//! typed DTOs; responses come back as raw `serde_json::Value` Stripe objects,
//! mirroring the gateway's passthrough behavior.

use gateway_types::{
    AttachPaymentMethodRequest, CreateChargeRequest, CreateCustomerRequest,
    CreatePaymentIntentRequest, CreatePaymentMethodRequest, CreatePriceRequest,
    CreateProductRequest, CreateRefundRequest, CreateSetupIntentRequest,
    CreateSubscriptionRequest, CreatedCustomerResponse, DetachPaymentMethodRequest,
    MessageResponse, UpdateCustomerRequest, UpdatePriceRequest, UpdateProductRequest,
    UpdateSubscriptionRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stripe gateway API client.
pub struct GatewayClient {
    base_url: String,
    http: Client,
}

impl GatewayClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the gateway is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Customers
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_customer(
        &self,
        req: &CreateCustomerRequest,
    ) -> Result<CreatedCustomerResponse, ClientError> {
        self.post("/api/v1/customer", req).await
    }

    pub async fn list_customers(&self) -> Result<Value, ClientError> {
        self.get("/api/v1/customer").await
    }

    pub async fn get_customer_by_email(&self, email: &str) -> Result<Value, ClientError> {
        self.get(&format!("/api/v1/customer/{}", email)).await
    }

    pub async fn update_customer(
        &self,
        id: &str,
        req: &UpdateCustomerRequest,
    ) -> Result<Value, ClientError> {
        self.put(&format!("/api/v1/customer/{}", id), req).await
    }

    pub async fn delete_customer(&self, id: &str) -> Result<MessageResponse, ClientError> {
        self.delete(&format!("/api/v1/customer/{}", id)).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payments
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_payment_intent(
        &self,
        req: &CreatePaymentIntentRequest,
    ) -> Result<Value, ClientError> {
        self.post("/api/v1/payment/intent", req).await
    }

    pub async fn retrieve_payment_intent(&self, id: &str) -> Result<Value, ClientError> {
        self.get(&format!("/api/v1/payment/intent/{}", id)).await
    }

    pub async fn create_setup_intent(
        &self,
        req: &CreateSetupIntentRequest,
    ) -> Result<Value, ClientError> {
        self.post("/api/v1/payment/setup-intent", req).await
    }

    pub async fn retrieve_setup_intent(&self, id: &str) -> Result<Value, ClientError> {
        self.get(&format!("/api/v1/payment/setup-intent/{}", id))
            .await
    }

    pub async fn create_charge(&self, req: &CreateChargeRequest) -> Result<Value, ClientError> {
        self.post("/api/v1/payment/charge", req).await
    }

    pub async fn retrieve_charge(&self, id: &str) -> Result<Value, ClientError> {
        self.get(&format!("/api/v1/payment/charge/{}", id)).await
    }

    pub async fn create_refund(&self, req: &CreateRefundRequest) -> Result<Value, ClientError> {
        self.post("/api/v1/payment/refund", req).await
    }

    pub async fn retrieve_refund(&self, id: &str) -> Result<Value, ClientError> {
        self.get(&format!("/api/v1/payment/refund/{}", id)).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payment methods
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_payment_method(
        &self,
        req: &CreatePaymentMethodRequest,
    ) -> Result<Value, ClientError> {
        self.post("/api/v1/payment-method", req).await
    }

    pub async fn attach_payment_method(
        &self,
        req: &AttachPaymentMethodRequest,
    ) -> Result<Value, ClientError> {
        self.post("/api/v1/payment-method/attach", req).await
    }

    pub async fn detach_payment_method(
        &self,
        payment_method_id: &str,
    ) -> Result<Value, ClientError> {
        let req = DetachPaymentMethodRequest {
            payment_method_id: payment_method_id.to_string(),
        };
        self.post("/api/v1/payment-method/detach", &req).await
    }

    pub async fn retrieve_payment_method(&self, id: &str) -> Result<Value, ClientError> {
        self.get(&format!("/api/v1/payment-method/{}", id)).await
    }

    pub async fn list_payment_methods(
        &self,
        customer: &str,
        kind: &str,
    ) -> Result<Value, ClientError> {
        self.get(&format!(
            "/api/v1/payment-method?customer={}&type={}",
            customer, kind
        ))
        .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Prices
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_price(&self, req: &CreatePriceRequest) -> Result<Value, ClientError> {
        self.post("/api/v1/price", req).await
    }

    pub async fn update_price(
        &self,
        id: &str,
        req: &UpdatePriceRequest,
    ) -> Result<Value, ClientError> {
        self.put(&format!("/api/v1/price/{}", id), req).await
    }

    /// Deactivates a price; Stripe prices cannot be hard-deleted.
    pub async fn delete_price(&self, id: &str) -> Result<Value, ClientError> {
        self.delete(&format!("/api/v1/price/{}", id)).await
    }

    pub async fn retrieve_price(&self, id: &str) -> Result<Value, ClientError> {
        self.get(&format!("/api/v1/price/{}", id)).await
    }

    pub async fn list_prices(&self, product: Option<&str>) -> Result<Value, ClientError> {
        match product {
            Some(product) => self.get(&format!("/api/v1/price?product={}", product)).await,
            None => self.get("/api/v1/price").await,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Products
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_product(&self, req: &CreateProductRequest) -> Result<Value, ClientError> {
        self.post("/api/v1/product", req).await
    }

    pub async fn update_product(
        &self,
        id: &str,
        req: &UpdateProductRequest,
    ) -> Result<Value, ClientError> {
        self.put(&format!("/api/v1/product/{}", id), req).await
    }

    pub async fn delete_product(&self, id: &str) -> Result<Value, ClientError> {
        self.delete(&format!("/api/v1/product/{}", id)).await
    }

    pub async fn retrieve_product(&self, id: &str) -> Result<Value, ClientError> {
        self.get(&format!("/api/v1/product/{}", id)).await
    }

    pub async fn list_products(&self) -> Result<Value, ClientError> {
        self.get("/api/v1/product").await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_subscription(
        &self,
        req: &CreateSubscriptionRequest,
    ) -> Result<Value, ClientError> {
        self.post("/api/v1/subscription", req).await
    }

    pub async fn update_subscription(
        &self,
        id: &str,
        req: &UpdateSubscriptionRequest,
    ) -> Result<Value, ClientError> {
        self.put(&format!("/api/v1/subscription/{}", id), req).await
    }

    pub async fn cancel_subscription(&self, id: &str) -> Result<Value, ClientError> {
        self.delete(&format!("/api/v1/subscription/{}", id)).await
    }

    pub async fn retrieve_subscription(&self, id: &str) -> Result<Value, ClientError> {
        self.get(&format!("/api/v1/subscription/{}", id)).await
    }

    pub async fn list_subscriptions(&self, customer: Option<&str>) -> Result<Value, ClientError> {
        match customer {
            Some(customer) => {
                self.get(&format!("/api/v1/subscription?customer={}", customer))
                    .await
            }
            None => self.get("/api/v1/subscription").await,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transport helpers
    // ─────────────────────────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .put(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GatewayClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = GatewayClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
