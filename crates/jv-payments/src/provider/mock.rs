//! Mock Payment Provider
//!
//! For tests and local demos. Hands out a fixed intent (or a fixed error)
//! and remembers every request it saw.

use async_trait::async_trait;
use jv_core::PaymentIntentRecord;
use std::sync::Mutex;

use super::{CreateIntentParams, PaymentProvider};
use crate::error::{PaymentError, Result};

/// Mock provider with a canned response
pub struct MockPaymentProvider {
    response: std::result::Result<PaymentIntentRecord, String>,
    calls: Mutex<Vec<CreateIntentParams>>,
}

impl Default for MockPaymentProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPaymentProvider {
    /// Echoes the requested amount back in a `pi_mock` intent
    pub fn new() -> Self {
        Self::with_intent(PaymentIntentRecord {
            id: "pi_mock".into(),
            client_secret: "pi_mock_secret_mock".into(),
            amount: 0,
            currency: "eur".into(),
            status: "requires_payment_method".into(),
        })
    }

    /// Always return this intent. An `amount` of 0 echoes the request amount.
    pub fn with_intent(intent: PaymentIntentRecord) -> Self {
        Self {
            response: Ok(intent),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with this message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far
    pub fn calls(&self) -> Vec<CreateIntentParams> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_intent(&self, params: &CreateIntentParams) -> Result<PaymentIntentRecord> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(params.clone());
        }

        let mut intent = self.response.clone().map_err(PaymentError::Provider)?;
        if intent.amount == 0 {
            intent.amount = params.amount;
            intent.currency.clone_from(&params.currency);
        }
        Ok(intent)
    }

    fn name(&self) -> &str {
        "MockProvider"
    }
}
