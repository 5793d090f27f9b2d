//! Payment Intent Service
//!
//! One canonical path from a request body to a client secret.

use std::sync::Arc;

use jv_core::{PaymentIntentCreated, PaymentIntentRecord, PaymentIntentRequest, CURRENCY};

use crate::config::ValidatedConfig;
use crate::datastore::DatastoreClient;
use crate::error::Result;
use crate::mirror::{log_mirror_failure, MirrorFailure, MirrorFailureHook, MirrorRow, PaymentMirror};
use crate::provider::{CreateIntentParams, PaymentProvider, StripeProvider};

/// Creates payment intents and mirrors them
#[derive(Clone)]
pub struct IntentService {
    provider: Arc<dyn PaymentProvider>,
    mirror: Arc<dyn PaymentMirror>,
    on_mirror_failure: MirrorFailureHook,
}

impl IntentService {
    pub fn new(provider: Arc<dyn PaymentProvider>, mirror: Arc<dyn PaymentMirror>) -> Self {
        Self {
            provider,
            mirror,
            on_mirror_failure: log_mirror_failure(),
        }
    }

    /// Stripe provider plus datastore mirror
    pub fn from_config(config: &ValidatedConfig) -> Result<Self> {
        Ok(Self::new(
            Arc::new(StripeProvider::new(&config.stripe_secret_key)),
            Arc::new(DatastoreClient::new(config.datastore.clone())?),
        ))
    }

    /// Replace the default log-only failure hook
    #[must_use]
    pub fn with_mirror_failure_hook(mut self, hook: MirrorFailureHook) -> Self {
        self.on_mirror_failure = hook;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Parse, validate and create. Malformed JSON is a 500, not a 400.
    pub async fn create_from_json(&self, body: &[u8]) -> Result<PaymentIntentCreated> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        let request = PaymentIntentRequest::from_json(&value)?;
        self.create(&request).await
    }

    pub async fn create(&self, request: &PaymentIntentRequest) -> Result<PaymentIntentCreated> {
        request.validate()?;

        let params = CreateIntentParams {
            amount: request.amount,
            currency: CURRENCY.into(),
            automatic_payment_methods: true,
        };

        let intent = self.provider.create_intent(&params).await.inspect_err(|e| {
            tracing::error!(error = %e, amount = request.amount, "Error creating payment intent");
        })?;

        tracing::info!(
            payment_intent_id = %intent.id,
            amount = intent.amount,
            status = %intent.status,
            "Created payment intent"
        );

        self.mirror_intent(&request.user_id, &intent);

        Ok(PaymentIntentCreated::from(&intent))
    }

    /// Detached write; the response never waits on the datastore
    fn mirror_intent(&self, user_id: &str, intent: &PaymentIntentRecord) {
        let row = MirrorRow::new(user_id, intent);
        let mirror = Arc::clone(&self.mirror);
        let on_failure = Arc::clone(&self.on_mirror_failure);

        tokio::spawn(async move {
            if let Err(e) = mirror.record(&row).await {
                on_failure(&MirrorFailure {
                    row,
                    message: e.response_message(),
                });
            }
        });
    }
}
