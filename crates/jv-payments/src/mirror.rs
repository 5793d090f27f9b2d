//! Datastore Mirror
//!
//! Bookkeeping copy of each created intent. Not authoritative and never
//! reconciled against the provider.

use async_trait::async_trait;
use jv_core::PaymentIntentRecord;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::error::{PaymentError, Result};

/// Row written to the `payments` table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorRow {
    pub user_id: String,
    pub payment_intent_id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

impl MirrorRow {
    pub fn new(user_id: &str, intent: &PaymentIntentRecord) -> Self {
        Self {
            user_id: user_id.to_string(),
            payment_intent_id: intent.id.clone(),
            amount: intent.amount,
            currency: intent.currency.clone(),
            status: intent.status.clone(),
        }
    }
}

/// A mirror write that did not make it
#[derive(Clone, Debug)]
pub struct MirrorFailure {
    pub row: MirrorRow,
    pub message: String,
}

/// Called for every failed mirror write
pub type MirrorFailureHook = Arc<dyn Fn(&MirrorFailure) + Send + Sync>;

/// Default hook: log and move on
pub fn log_mirror_failure() -> MirrorFailureHook {
    Arc::new(|failure: &MirrorFailure| {
        tracing::error!(
            payment_intent_id = %failure.row.payment_intent_id,
            user_id = %failure.row.user_id,
            error = %failure.message,
            "Failed to mirror payment intent to datastore"
        );
    })
}

/// Mirror storage trait
#[async_trait]
pub trait PaymentMirror: Send + Sync {
    /// Insert one row
    async fn record(&self, row: &MirrorRow) -> Result<()>;
}

/// In-memory mirror (for development and tests)
#[derive(Default)]
pub struct MemoryMirror {
    rows: Mutex<Vec<MirrorRow>>,
    fail_with: Option<String>,
}

impl MemoryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mirror whose every write fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    pub fn rows(&self) -> Vec<MirrorRow> {
        self.rows.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PaymentMirror for MemoryMirror {
    async fn record(&self, row: &MirrorRow) -> Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(PaymentError::Mirror(message.clone()));
        }
        self.rows
            .lock()
            .map_err(|e| PaymentError::Mirror(e.to_string()))?
            .push(row.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent() -> PaymentIntentRecord {
        PaymentIntentRecord {
            id: "pi_123".into(),
            client_secret: "secret_abc".into(),
            amount: 75_000,
            currency: "eur".into(),
            status: "requires_payment_method".into(),
        }
    }

    #[test]
    fn test_row_from_intent() {
        let row = MirrorRow::new("u1", &intent());
        assert_eq!(row.payment_intent_id, "pi_123");
        assert_eq!(row.amount, 75_000);
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("client_secret").is_none());
    }

    #[tokio::test]
    async fn test_memory_mirror() {
        let mirror = MemoryMirror::new();
        mirror.record(&MirrorRow::new("u1", &intent())).await.unwrap();
        assert_eq!(mirror.rows().len(), 1);

        let failing = MemoryMirror::failing("down");
        assert!(failing.record(&MirrorRow::new("u1", &intent())).await.is_err());
        assert!(failing.rows().is_empty());
    }
}
