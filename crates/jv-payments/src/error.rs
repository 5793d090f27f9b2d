//! Payment Error Types

use jv_core::{CoreError, INVALID_REQUEST_MESSAGE};
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Fallback when the provider error carries no message
pub const PROVIDER_FALLBACK_MESSAGE: &str = "Failed to create payment intent";

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Missing or unusable credentials
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Stripe API error
    #[error("Stripe error: {0}")]
    Provider(String),

    /// Datastore mirror write failed
    #[error("Mirror error: {0}")]
    Mirror(String),

    /// Agreement listing failed
    #[error("Agreements error: {0}")]
    Agreements(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PaymentError {
    /// HTTP status the endpoint answers with
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Agreements(_) | Self::Network(_) => 502,
            Self::Config(_) | Self::Provider(_) | Self::Mirror(_) | Self::Serialization(_) => 500,
        }
    }

    /// Message placed in the `{ "error": ... }` body
    pub fn response_message(&self) -> String {
        match self {
            Self::Config(msg) | Self::Mirror(msg) | Self::Agreements(msg) => msg.clone(),
            Self::Validation(_) => INVALID_REQUEST_MESSAGE.into(),
            Self::Provider(msg) if msg.is_empty() => PROVIDER_FALLBACK_MESSAGE.into(),
            Self::Provider(msg) => msg.clone(),
            Self::Network(e) => e.to_string(),
            Self::Serialization(e) => e.to_string(),
        }
    }
}

impl From<CoreError> for PaymentError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) | CoreError::Checkout(msg) => Self::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PaymentError::Validation("x".into()).status_code(), 400);
        assert_eq!(PaymentError::Config("x".into()).status_code(), 500);
        assert_eq!(PaymentError::Provider("x".into()).status_code(), 500);
        assert_eq!(PaymentError::Agreements("x".into()).status_code(), 502);

        let malformed = serde_json::from_str::<serde_json::Value>("{amount:").unwrap_err();
        assert_eq!(PaymentError::from(malformed).status_code(), 500);
    }

    #[test]
    fn test_response_messages() {
        assert_eq!(
            PaymentError::Validation("amount".into()).response_message(),
            INVALID_REQUEST_MESSAGE
        );
        assert_eq!(
            PaymentError::Provider(String::new()).response_message(),
            PROVIDER_FALLBACK_MESSAGE
        );
        assert_eq!(
            PaymentError::Provider("Your card was declined".into()).response_message(),
            "Your card was declined"
        );
    }
}
