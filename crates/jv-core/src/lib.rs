//! # jv-core
//!
//! Shared domain for the jv-investor dashboard and its payment endpoint.
//!
//! ## Payment flow
//!
//! ```text
//! ┌──────────┐  amount, user_id  ┌──────────┐  create intent  ┌──────────┐
//! │ Browser  │──────────────────▶│  Server  │────────────────▶│  Stripe  │
//! │  (form)  │◀──────────────────│          │◀────────────────│          │
//! └──────────┘   client secret   └──────────┘                 └──────────┘
//!      │                              │ mirror (best effort)
//!      │                              ▼
//!      │                        ┌───────────┐
//!      │                        │ Datastore │
//!      │                        └───────────┘
//!      │        confirm card payment (direct)        ┌──────────┐
//!      └────────────────────────────────────────────▶│  Stripe  │
//!                                                    └──────────┘
//! ```
//!
//! Everything in this crate compiles for both the native server and the
//! `wasm32` frontend, so it carries no runtime or HTTP client.

pub mod agreement;
pub mod checkout;
pub mod error;
pub mod intent;
pub mod money;

pub use agreement::{AgreementStatus, JvAgreement};
pub use checkout::{
    CardConfirmer, CheckoutForm, ConfirmOutcome, FormEvent, FormState, IntentApi, Readiness,
};
pub use error::{CoreError, Result};
pub use intent::{
    ErrorBody, PaymentIntentCreated, PaymentIntentRecord, PaymentIntentRequest, CURRENCY,
    INVALID_REQUEST_MESSAGE,
};
