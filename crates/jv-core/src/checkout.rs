//! Client Payment Form
//!
//! State machine behind the card payment form. The browser component owns the
//! Stripe.js handles; this type owns every decision about when a network call
//! may happen and which callback fires.
//!
//! ```text
//! Initializing ──secret──▶ Ready ──submit──▶ Processing ──▶ Succeeded
//!                                               │  ▲
//!                                               ▼  │ manual resubmit
//!                                              Failed
//! ```

use async_trait::async_trait;

use crate::error::{CoreError, Result};
use crate::intent::{PaymentIntentCreated, PaymentIntentRequest};
use crate::money::format_minor_units;

pub const INIT_FAILED_MESSAGE: &str = "Failed to initialize payment. Please try again.";
pub const NOT_READY_MESSAGE: &str = "Stripe is not ready. Please refresh the page.";
pub const PAYMENT_FAILED_MESSAGE: &str = "Payment failed";

/// Requests a client secret from the intent endpoint
#[async_trait(?Send)]
pub trait IntentApi {
    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> std::result::Result<PaymentIntentCreated, String>;
}

/// Confirms a card payment directly with the provider
#[async_trait(?Send)]
pub trait CardConfirmer {
    async fn confirm_card_payment(&self, client_secret: &str) -> ConfirmOutcome;
}

/// Result of one confirmation round trip
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Provider answered with an intent
    Confirmed { intent_id: String, status: String },

    /// Provider (or the network) reported an error
    Error(Option<String>),
}

/// Browser-side prerequisites besides the client secret
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Readiness {
    /// Stripe.js loaded and instantiated
    pub sdk_loaded: bool,

    /// Card element mounted in the page
    pub card_mounted: bool,
}

impl Readiness {
    pub const fn ready() -> Self {
        Self {
            sdk_loaded: true,
            card_mounted: true,
        }
    }

    const fn is_ready(self) -> bool {
        self.sdk_loaded && self.card_mounted
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormState {
    Initializing,
    Ready,
    Processing,
    Succeeded { intent_id: String },
    Failed { message: String },
}

/// Callback to fire after a confirmation round trip
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    Succeeded(String),
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct CheckoutForm {
    amount: i64,
    user_id: String,
    client_secret: Option<String>,
    state: FormState,
    error: Option<String>,
    /// Set once when Stripe.js or the card element is unavailable
    setup_error: Option<String>,
}

impl CheckoutForm {
    pub fn new(amount: i64, user_id: impl Into<String>) -> Self {
        Self {
            amount,
            user_id: user_id.into(),
            client_secret: None,
            state: FormState::Initializing,
            error: None,
            setup_error: None,
        }
    }

    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Inline error message, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().or(self.setup_error.as_deref())
    }

    /// Stripe.js failed to load or the card element failed to mount.
    /// The form stays unable to submit and shows the not-ready message.
    pub fn card_unavailable(&mut self, reason: &str) {
        tracing::warn!(%reason, "card element unavailable");
        self.setup_error = Some(NOT_READY_MESSAGE.into());
    }

    pub const fn is_processing(&self) -> bool {
        matches!(self.state, FormState::Processing)
    }

    pub const fn is_succeeded(&self) -> bool {
        matches!(self.state, FormState::Succeeded { .. })
    }

    /// Request body for the intent endpoint
    pub fn intent_request(&self) -> Result<PaymentIntentRequest> {
        PaymentIntentRequest::new(self.amount, self.user_id.clone())
    }

    /// Record the outcome of the initial intent request
    pub fn secret_received(&mut self, result: std::result::Result<PaymentIntentCreated, String>) {
        if self.state != FormState::Initializing {
            return;
        }
        match result {
            Ok(created) if !created.client_secret.is_empty() => {
                self.client_secret = Some(created.client_secret);
                self.state = FormState::Ready;
                self.error = None;
            }
            Ok(_) => {
                tracing::warn!("intent endpoint returned an empty client secret");
                self.error = Some(INIT_FAILED_MESSAGE.into());
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to create payment intent");
                self.error = Some(INIT_FAILED_MESSAGE.into());
            }
        }
    }

    /// Fetch the client secret. Only the first call in `Initializing` talks to the API.
    pub async fn initialize(&mut self, api: &dyn IntentApi) {
        if self.state != FormState::Initializing || self.client_secret.is_some() {
            return;
        }
        let result = match self.intent_request() {
            Ok(request) => api.create_intent(&request).await,
            Err(e) => Err(e.to_string()),
        };
        self.secret_received(result);
    }

    /// Whether the submit control should be enabled
    pub const fn can_submit(&self, readiness: Readiness) -> bool {
        readiness.is_ready()
            && self.client_secret.is_some()
            && matches!(self.state, FormState::Ready | FormState::Failed { .. })
    }

    /// Move to `Processing` and hand back the secret to confirm with.
    ///
    /// Fails without side effects on the network when prerequisites are
    /// missing, a confirmation is in flight, or the payment already succeeded.
    pub fn begin_submit(&mut self, readiness: Readiness) -> Result<String> {
        match self.state {
            FormState::Succeeded { .. } => {
                return Err(CoreError::Checkout("Payment already completed".into()));
            }
            FormState::Processing => {
                return Err(CoreError::Checkout("Payment is already processing".into()));
            }
            _ => {}
        }

        let secret = match (&self.client_secret, readiness.is_ready()) {
            (Some(secret), true) => secret.clone(),
            _ => {
                self.error = Some(NOT_READY_MESSAGE.into());
                return Err(CoreError::Validation(NOT_READY_MESSAGE.into()));
            }
        };

        self.state = FormState::Processing;
        self.error = None;
        Ok(secret)
    }

    /// Apply the confirmation result and return the callback to fire
    pub fn finish_submit(&mut self, outcome: ConfirmOutcome) -> Option<FormEvent> {
        if self.state != FormState::Processing {
            return None;
        }
        match outcome {
            ConfirmOutcome::Confirmed { intent_id, status } if status == "succeeded" => {
                self.state = FormState::Succeeded {
                    intent_id: intent_id.clone(),
                };
                Some(FormEvent::Succeeded(intent_id))
            }
            ConfirmOutcome::Confirmed { status, .. } => {
                tracing::debug!(%status, "confirmation returned a non-terminal status");
                Some(self.fail(PAYMENT_FAILED_MESSAGE.into()))
            }
            ConfirmOutcome::Error(message) => Some(self.fail(
                message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| PAYMENT_FAILED_MESSAGE.into()),
            )),
        }
    }

    fn fail(&mut self, message: String) -> FormEvent {
        self.error = Some(message.clone());
        self.state = FormState::Failed {
            message: message.clone(),
        };
        FormEvent::Failed(message)
    }

    /// Run one full submit: validation, confirmation round trip, transition
    pub async fn submit(
        &mut self,
        confirmer: &dyn CardConfirmer,
        readiness: Readiness,
    ) -> Option<FormEvent> {
        let secret = self.begin_submit(readiness).ok()?;
        let outcome = confirmer.confirm_card_payment(&secret).await;
        self.finish_submit(outcome)
    }

    pub fn button_label(&self) -> String {
        if self.is_processing() {
            "Processing...".into()
        } else {
            format!("Pay {}", format_minor_units(self.amount))
        }
    }
}
