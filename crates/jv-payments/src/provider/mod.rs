//! Payment Provider Integration
//!
//! The provider mints payment intents. Stripe is the production backend;
//! the mock records every call for tests.

mod mock;
mod stripe;

pub use mock::MockPaymentProvider;
pub use self::stripe::StripeProvider;

use async_trait::async_trait;
use jv_core::PaymentIntentRecord;

use crate::error::Result;

/// Parameters for a new payment intent
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateIntentParams {
    /// Minor currency units
    pub amount: i64,

    /// ISO currency code, lowercase
    pub currency: String,

    /// Let the provider pick the available payment methods
    pub automatic_payment_methods: bool,
}

/// Payment provider trait (Strategy pattern)
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent and return it with its client secret
    async fn create_intent(&self, params: &CreateIntentParams) -> Result<PaymentIntentRecord>;

    /// Provider name
    fn name(&self) -> &str;
}
