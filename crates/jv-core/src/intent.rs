//! Payment Intent Types
//!
//! Wire types exchanged between the browser, the intent endpoint and the
//! datastore mirror.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, Result};

/// Every intent is created in euros
pub const CURRENCY: &str = "eur";

/// Message returned for any request that fails validation
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request: amount and user_id required";

/// A validated request to create a payment intent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    /// Amount in minor currency units (cents)
    pub amount: i64,

    /// Opaque user identifier from the auth provider
    pub user_id: String,
}

impl PaymentIntentRequest {
    pub fn new(amount: i64, user_id: impl Into<String>) -> Result<Self> {
        let request = Self {
            amount,
            user_id: user_id.into(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Build a request from an arbitrary JSON body.
    ///
    /// `amount` must be a positive integral number. `user_id` must be a
    /// non-empty string or a non-zero number, which is kept in its decimal
    /// form. Anything else is a validation error.
    pub fn from_json(body: &Value) -> Result<Self> {
        let amount = body.get("amount").and_then(integral_amount);
        let user_id = body.get("user_id").and_then(user_id_text);

        match (amount, user_id) {
            (Some(amount), Some(user_id)) => Self::new(amount, user_id),
            _ => Err(CoreError::Validation(INVALID_REQUEST_MESSAGE.into())),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.amount <= 0 || self.user_id.is_empty() {
            return Err(CoreError::Validation(INVALID_REQUEST_MESSAGE.into()));
        }
        Ok(())
    }
}

fn user_id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Accepts `75000` and `75000.0`, rejects fractions and non-numbers
fn integral_amount(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    #[allow(clippy::cast_possible_truncation)]
    (f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
}

/// A payment intent as reported by the provider
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentRecord {
    /// Provider-assigned id (`pi_...`)
    pub id: String,

    /// Bearer token the browser uses to confirm this intent
    pub client_secret: String,

    pub amount: i64,

    pub currency: String,

    /// Provider-defined status, e.g. `requires_payment_method`
    pub status: String,
}

/// Successful endpoint response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentCreated {
    pub client_secret: String,
    pub payment_intent_id: String,
}

impl From<&PaymentIntentRecord> for PaymentIntentCreated {
    fn from(record: &PaymentIntentRecord) -> Self {
        Self {
            client_secret: record.client_secret.clone(),
            payment_intent_id: record.id.clone(),
        }
    }
}

/// Error body returned by every failing endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_request() {
        let req = PaymentIntentRequest::from_json(&json!({"amount": 75000, "user_id": "u1"})).unwrap();
        assert_eq!(req.amount, 75000);
        assert_eq!(req.user_id, "u1");
    }

    #[test]
    fn test_integral_float_amount() {
        let req = PaymentIntentRequest::from_json(&json!({"amount": 500.0, "user_id": "u1"})).unwrap();
        assert_eq!(req.amount, 500);
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        for amount in [json!(0), json!(-1), json!(12.5), json!("100"), json!(null)] {
            let err = PaymentIntentRequest::from_json(&json!({"amount": amount, "user_id": "u1"}))
                .unwrap_err();
            assert_eq!(err, CoreError::Validation(INVALID_REQUEST_MESSAGE.into()));
        }
    }

    #[test]
    fn test_rejects_missing_user() {
        assert!(PaymentIntentRequest::from_json(&json!({"amount": 100})).is_err());
        assert!(PaymentIntentRequest::from_json(&json!({"amount": 100, "user_id": ""})).is_err());
        assert!(PaymentIntentRequest::from_json(&json!({"amount": 100, "user_id": 0})).is_err());
        assert!(PaymentIntentRequest::from_json(&json!({"amount": 100, "user_id": true})).is_err());
        assert!(PaymentIntentRequest::from_json(&json!({"amount": 100, "user_id": {}})).is_err());
    }

    #[test]
    fn test_numeric_user_id_is_kept_as_text() {
        let req = PaymentIntentRequest::from_json(&json!({"amount": 100, "user_id": 7})).unwrap();
        assert_eq!(req.user_id, "7");
    }

    #[test]
    fn test_created_wire_format() {
        let created = PaymentIntentCreated {
            client_secret: "secret_abc".into(),
            payment_intent_id: "pi_123".into(),
        };
        assert_eq!(
            serde_json::to_string(&created).unwrap(),
            r#"{"clientSecret":"secret_abc","paymentIntentId":"pi_123"}"#
        );
    }
}
