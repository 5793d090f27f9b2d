//! Stripe Payment Intents

use async_trait::async_trait;
use jv_core::PaymentIntentRecord;
use stripe::{
    Client, CreatePaymentIntent, CreatePaymentIntentAutomaticPaymentMethods, Currency,
    PaymentIntent,
};

use super::{CreateIntentParams, PaymentProvider};
use crate::error::{PaymentError, Result};

/// Stripe client wrapper
pub struct StripeProvider {
    client: Client,
}

impl StripeProvider {
    /// Create a new Stripe provider from a secret key
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(secret_key),
        }
    }
}

fn currency(code: &str) -> Result<Currency> {
    match code {
        "eur" => Ok(Currency::EUR),
        "usd" => Ok(Currency::USD),
        "gbp" => Ok(Currency::GBP),
        other => Err(PaymentError::Config(format!("Unsupported currency: {other}"))),
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    async fn create_intent(&self, params: &CreateIntentParams) -> Result<PaymentIntentRecord> {
        let mut create = CreatePaymentIntent::new(params.amount, currency(&params.currency)?);
        if params.automatic_payment_methods {
            create.automatic_payment_methods = Some(CreatePaymentIntentAutomaticPaymentMethods {
                enabled: true,
                allow_redirects: None,
            });
        }

        let intent = PaymentIntent::create(&self.client, create)
            .await
            .map_err(|e| PaymentError::Provider(e.to_string()))?;

        let client_secret = intent
            .client_secret
            .ok_or_else(|| PaymentError::Provider("No client secret returned".into()))?;

        Ok(PaymentIntentRecord {
            id: intent.id.to_string(),
            client_secret,
            amount: intent.amount,
            currency: intent.currency.to_string(),
            status: intent.status.as_str().to_string(),
        })
    }

    fn name(&self) -> &str {
        "Stripe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_mapping() {
        assert_eq!(currency("eur").unwrap(), Currency::EUR);
        assert!(currency("xyz").is_err());
    }
}
