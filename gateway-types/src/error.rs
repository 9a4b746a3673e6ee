//! Error types for the gateway.

/// Errors raised by the outbound provider adapter.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Stripe answered with its error envelope; carries `error.message` only.
    #[error("{0}")]
    Api(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected provider response: {0}")]
    Decode(String),
}

/// Application-level errors.
///
/// The gateway deliberately has a single failure taxonomy: every variant
/// renders as HTTP 400 with the stringified error as detail. Variants exist
/// for readability and testing, not for status-code differentiation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Upstream(String),

    #[error("Missing Stripe-Signature header")]
    MissingSignature,

    #[error("Invalid webhook signature")]
    InvalidSignature,

    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Api(msg) => AppError::Upstream(msg),
            other => AppError::Upstream(other.to_string()),
        }
    }
}
