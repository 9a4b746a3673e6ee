//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use gateway_types::PaymentsProvider;

use super::handlers::{self, AppState};
use crate::GatewayService;
use crate::openapi::ApiDoc;

/// HTTP Server for the Stripe gateway.
pub struct HttpServer<P: PaymentsProvider> {
    state: Arc<AppState<P>>,
}

impl<P: PaymentsProvider> HttpServer<P> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: GatewayService<P>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            // Customers
            .route(
                "/api/v1/customer",
                get(handlers::list_customers::<P>).post(handlers::create_customer::<P>),
            )
            // GET on this segment looks customers up by email.
            .route(
                "/api/v1/customer/{id}",
                get(handlers::get_customer_by_email::<P>)
                    .put(handlers::update_customer::<P>)
                    .delete(handlers::delete_customer::<P>),
            )
            // Payments
            .route(
                "/api/v1/payment/intent",
                post(handlers::create_payment_intent::<P>),
            )
            .route(
                "/api/v1/payment/intent/{id}",
                get(handlers::retrieve_payment_intent::<P>),
            )
            .route(
                "/api/v1/payment/setup-intent",
                post(handlers::create_setup_intent::<P>),
            )
            .route(
                "/api/v1/payment/setup-intent/{id}",
                get(handlers::retrieve_setup_intent::<P>),
            )
            .route("/api/v1/payment/charge", post(handlers::create_charge::<P>))
            .route(
                "/api/v1/payment/charge/{id}",
                get(handlers::retrieve_charge::<P>),
            )
            .route("/api/v1/payment/refund", post(handlers::create_refund::<P>))
            .route(
                "/api/v1/payment/refund/{id}",
                get(handlers::retrieve_refund::<P>),
            )
            // Payment methods
            .route(
                "/api/v1/payment-method",
                get(handlers::list_payment_methods::<P>)
                    .post(handlers::create_payment_method::<P>),
            )
            .route(
                "/api/v1/payment-method/attach",
                post(handlers::attach_payment_method::<P>),
            )
            .route(
                "/api/v1/payment-method/detach",
                post(handlers::detach_payment_method::<P>),
            )
            .route(
                "/api/v1/payment-method/{id}",
                get(handlers::retrieve_payment_method::<P>),
            )
            // Prices
            .route(
                "/api/v1/price",
                get(handlers::list_prices::<P>).post(handlers::create_price::<P>),
            )
            .route(
                "/api/v1/price/{id}",
                get(handlers::retrieve_price::<P>)
                    .put(handlers::update_price::<P>)
                    .delete(handlers::delete_price::<P>),
            )
            // Products
            .route(
                "/api/v1/product",
                get(handlers::list_products::<P>).post(handlers::create_product::<P>),
            )
            .route(
                "/api/v1/product/{id}",
                get(handlers::retrieve_product::<P>)
                    .put(handlers::update_product::<P>)
                    .delete(handlers::delete_product::<P>),
            )
            // Subscriptions
            .route(
                "/api/v1/subscription",
                get(handlers::list_subscriptions::<P>).post(handlers::create_subscription::<P>),
            )
            .route(
                "/api/v1/subscription/{id}",
                get(handlers::retrieve_subscription::<P>)
                    .put(handlers::update_subscription::<P>)
                    .delete(handlers::cancel_subscription::<P>),
            )
            // Webhook
            .route("/api/v1/webhook", post(handlers::webhook::<P>))
            .merge(
                SwaggerUi::new("/api/v1/docs").url("/api/v1/openapi.json", ApiDoc::openapi()),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
