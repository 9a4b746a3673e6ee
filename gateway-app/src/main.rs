//! # Gateway Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the Stripe adapter
//! - Create the gateway service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_hex::{GatewayService, inbound::HttpServer};
use gateway_stripe::StripeClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gateway_app=debug,gateway_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting Stripe gateway on port {}", config.port);

    // Build the Stripe adapter
    let provider = StripeClient::new(config.stripe_secret_key);

    // Create the gateway service
    let service = GatewayService::new(provider, config.stripe_webhook_secret);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
