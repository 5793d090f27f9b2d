//! Payments Configuration
//!
//! Credentials are read once at startup and injected into the service. A
//! configuration that fails validation is kept around so the endpoint can
//! answer every request with the same 500 instead of refusing to boot.

use crate::error::{PaymentError, Result};

pub const INVALID_SECRET_KEY_MESSAGE: &str = "Server misconfiguration: Invalid Stripe secret key";
pub const DATASTORE_KEYS_MISSING_MESSAGE: &str = "Server misconfiguration: Supabase keys missing";

/// Upper bound on any single datastore request
pub const DATASTORE_TIMEOUT_SECS: u64 = 10;

/// Raw configuration as found in the environment
#[derive(Clone, Default)]
pub struct PaymentsConfig {
    /// `STRIPE_SECRET_KEY`
    pub stripe_secret_key: Option<String>,

    /// `SUPABASE_URL`
    pub datastore_url: Option<String>,

    /// `SERVICE_ROLE_KEY`
    pub datastore_service_key: Option<String>,
}

impl PaymentsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (tests pass a map)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            stripe_secret_key: non_empty("STRIPE_SECRET_KEY"),
            datastore_url: non_empty("SUPABASE_URL"),
            datastore_service_key: non_empty("SERVICE_ROLE_KEY"),
        }
    }

    /// Check credentials. The secret key is checked first.
    pub fn validate(&self) -> Result<ValidatedConfig> {
        let stripe_secret_key = match &self.stripe_secret_key {
            Some(key) if !looks_publishable(key) => key.clone(),
            _ => {
                tracing::error!("STRIPE_SECRET_KEY is missing or is a publishable key");
                return Err(PaymentError::Config(INVALID_SECRET_KEY_MESSAGE.into()));
            }
        };

        Ok(ValidatedConfig {
            stripe_secret_key,
            datastore: self.datastore()?,
        })
    }

    /// Datastore credentials alone, for consumers that never touch Stripe
    pub fn datastore(&self) -> Result<DatastoreConfig> {
        let (Some(url), Some(service_key)) = (&self.datastore_url, &self.datastore_service_key)
        else {
            tracing::error!("SUPABASE_URL or SERVICE_ROLE_KEY is missing");
            return Err(PaymentError::Config(DATASTORE_KEYS_MISSING_MESSAGE.into()));
        };

        Ok(DatastoreConfig {
            url: url.trim_end_matches('/').to_string(),
            service_key: service_key.clone(),
            timeout_secs: DATASTORE_TIMEOUT_SECS,
        })
    }
}

impl std::fmt::Debug for PaymentsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentsConfig")
            .field("stripe_secret_key", &self.stripe_secret_key.as_ref().map(|_| "***"))
            .field("datastore_url", &self.datastore_url)
            .field("datastore_service_key", &self.datastore_service_key.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Publishable keys (`pk_live_...`, `pk_test_...`) must never reach the server
fn looks_publishable(key: &str) -> bool {
    key.starts_with("pk_")
}

/// Configuration that passed validation
#[derive(Clone)]
pub struct ValidatedConfig {
    pub stripe_secret_key: String,
    pub datastore: DatastoreConfig,
}

/// Datastore REST endpoint and privileged key
#[derive(Clone)]
pub struct DatastoreConfig {
    /// Base URL without trailing slash
    pub url: String,
    pub service_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for DatastoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatastoreConfig")
            .field("url", &self.url)
            .field("service_key", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> PaymentsConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        PaymentsConfig::from_lookup(|k| map.get(k).cloned())
    }

    fn message(config: &PaymentsConfig) -> String {
        config.validate().err().map(|e| e.response_message()).unwrap_or_default()
    }

    #[test]
    fn test_valid_config() {
        let validated = config(&[
            ("STRIPE_SECRET_KEY", "sk_test_123"),
            ("SUPABASE_URL", "https://proj.supabase.co/"),
            ("SERVICE_ROLE_KEY", "service"),
        ])
        .validate()
        .unwrap();
        assert_eq!(validated.datastore.url, "https://proj.supabase.co");
    }

    #[test]
    fn test_publishable_key_rejected() {
        let cfg = config(&[
            ("STRIPE_SECRET_KEY", "pk_test_123"),
            ("SUPABASE_URL", "https://proj.supabase.co"),
            ("SERVICE_ROLE_KEY", "service"),
        ]);
        assert_eq!(message(&cfg), INVALID_SECRET_KEY_MESSAGE);
    }

    #[test]
    fn test_missing_secret_checked_before_datastore() {
        assert_eq!(message(&config(&[])), INVALID_SECRET_KEY_MESSAGE);
        assert_eq!(
            message(&config(&[("STRIPE_SECRET_KEY", "sk_test_123"), ("SERVICE_ROLE_KEY", "k")])),
            DATASTORE_KEYS_MISSING_MESSAGE
        );
    }

    #[test]
    fn test_datastore_without_stripe() {
        let cfg = config(&[("SUPABASE_URL", "https://proj.supabase.co"), ("SERVICE_ROLE_KEY", "k")]);
        assert!(cfg.validate().is_err());
        assert_eq!(cfg.datastore().unwrap().url, "https://proj.supabase.co");
    }

    #[test]
    fn test_blank_values_are_missing() {
        let cfg = config(&[("STRIPE_SECRET_KEY", "  ")]);
        assert!(cfg.stripe_secret_key.is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cfg = config(&[("STRIPE_SECRET_KEY", "sk_live_secret")]);
        assert!(!format!("{cfg:?}").contains("sk_live_secret"));
    }
}
