//! Application State

use std::sync::Arc;

use jv_payments::{AgreementSource, DatastoreClient, IntentService, PaymentsConfig};

/// A backend that is either wired up or explains why it is not
pub enum Configured<T: ?Sized> {
    Ready(Arc<T>),
    Misconfigured(Arc<str>),
}

impl<T: ?Sized> Clone for Configured<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Ready(inner) => Self::Ready(inner.clone()),
            Self::Misconfigured(msg) => Self::Misconfigured(msg.clone()),
        }
    }
}

impl<T: ?Sized> Configured<T> {
    pub fn get(&self) -> Result<&Arc<T>, &str> {
        match self {
            Self::Ready(inner) => Ok(inner),
            Self::Misconfigured(msg) => Err(msg),
        }
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment-intent creation (Stripe + datastore mirror)
    pub intents: Configured<IntentService>,

    /// Joint-venture agreement listing
    pub agreements: Configured<dyn AgreementSource>,
}

impl AppState {
    pub fn new(intents: IntentService, agreements: Arc<dyn AgreementSource>) -> Self {
        Self {
            intents: Configured::Ready(Arc::new(intents)),
            agreements: Configured::Ready(agreements),
        }
    }

    /// Wire real backends. Invalid credentials become per-request 500s.
    pub fn from_config(config: &PaymentsConfig) -> Self {
        let intents = match config.validate().and_then(|v| IntentService::from_config(&v)) {
            Ok(service) => Configured::Ready(Arc::new(service)),
            Err(e) => Configured::Misconfigured(e.response_message().into()),
        };

        let agreements: Configured<dyn AgreementSource> =
            match config.datastore().and_then(DatastoreClient::new) {
                Ok(client) => Configured::Ready(Arc::new(client)),
                Err(e) => Configured::Misconfigured(e.response_message().into()),
            };

        Self {
            intents,
            agreements,
        }
    }
}
