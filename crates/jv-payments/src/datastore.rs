//! Datastore REST Client
//!
//! Talks to the PostgREST interface of the hosted datastore with the
//! service-role key. Backs both the payment mirror and the agreement list.

use std::time::Duration;

use async_trait::async_trait;
use jv_core::JvAgreement;

use crate::agreements::AgreementSource;
use crate::config::DatastoreConfig;
use crate::error::{PaymentError, Result};
use crate::mirror::{MirrorRow, PaymentMirror};

const PAYMENTS_TABLE: &str = "payments";
const AGREEMENTS_TABLE: &str = "jv_agreements";

/// Datastore client
pub struct DatastoreClient {
    http: reqwest::Client,
    config: DatastoreConfig,
}

impl DatastoreClient {
    pub fn new(config: DatastoreConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// `{base}/rest/v1/{table}`
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
    }
}

async fn error_text(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    format!("{status}: {body}")
}

#[async_trait]
impl PaymentMirror for DatastoreClient {
    async fn record(&self, row: &MirrorRow) -> Result<()> {
        let response = self
            .authorized(self.http.post(self.table_url(PAYMENTS_TABLE)))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(|e| PaymentError::Mirror(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentError::Mirror(error_text(response).await));
        }

        tracing::debug!(payment_intent_id = %row.payment_intent_id, "Mirrored payment intent");
        Ok(())
    }
}

#[async_trait]
impl AgreementSource for DatastoreClient {
    async fn list(&self) -> Result<Vec<JvAgreement>> {
        let response = self
            .authorized(self.http.get(self.table_url(AGREEMENTS_TABLE)))
            .query(&[("select", "*"), ("order", "published_date.desc")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PaymentError::Agreements(error_text(response).await));
        }

        let agreements: Vec<JvAgreement> = response
            .json()
            .await
            .map_err(|e| PaymentError::Agreements(e.to_string()))?;
        Ok(agreements)
    }
}
