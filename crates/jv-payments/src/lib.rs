//! # jv-payments
//!
//! Server-side half of the investment payment flow.
//!
//! ## Creating an intent
//!
//! ```text
//! request ─▶ validate ─▶ PaymentProvider::create_intent ─▶ PaymentMirror::record ─▶ response
//!              │ 400              │ 500                        │ failure hook only
//! ```
//!
//! The provider call is authoritative. The mirror write is advisory and runs
//! on a spawned task: the client secret is returned without waiting for it,
//! and a failed write only fires the failure hook.
//! There is no idempotency key, so a client retry after a timeout may create
//! a second intent and a second mirror row.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jv_payments::{IntentService, PaymentsConfig};
//!
//! let config = PaymentsConfig::from_env().validate()?;
//! let service = IntentService::from_config(&config)?;
//!
//! let created = service.create_from_json(br#"{"amount":75000,"user_id":"u1"}"#).await?;
//! // Hand created.client_secret to the browser
//! ```

mod agreements;
mod config;
mod datastore;
mod error;
mod mirror;
mod provider;
mod service;

pub use agreements::{AgreementSource, MemoryAgreementSource};
pub use config::{
    DatastoreConfig, PaymentsConfig, ValidatedConfig, DATASTORE_KEYS_MISSING_MESSAGE,
    DATASTORE_TIMEOUT_SECS, INVALID_SECRET_KEY_MESSAGE,
};
pub use datastore::DatastoreClient;
pub use error::{PaymentError, Result};
pub use mirror::{
    log_mirror_failure, MemoryMirror, MirrorFailure, MirrorFailureHook, MirrorRow, PaymentMirror,
};
pub use provider::{CreateIntentParams, MockPaymentProvider, PaymentProvider, StripeProvider};
pub use service::IntentService;
