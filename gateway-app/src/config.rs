//! Configuration loading from environment.

use std::env;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub stripe_secret_key: String,
    pub stripe_webhook_secret: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let stripe_secret_key = env::var("STRIPE_SECRET_KEY")
            .map_err(|_| anyhow::anyhow!("STRIPE_SECRET_KEY environment variable is required"))?;

        let stripe_webhook_secret = env::var("STRIPE_WEBHOOK_SECRET").map_err(|_| {
            anyhow::anyhow!("STRIPE_WEBHOOK_SECRET environment variable is required")
        })?;

        Ok(Self {
            port,
            stripe_secret_key,
            stripe_webhook_secret,
        })
    }
}
