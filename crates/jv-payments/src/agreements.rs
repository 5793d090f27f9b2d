//! Agreement Sources
//!
//! The dashboard's agreement list always comes from a source behind this
//! trait, never from data baked into the frontend.

use async_trait::async_trait;
use jv_core::JvAgreement;

use crate::error::Result;

/// Agreement listing trait
#[async_trait]
pub trait AgreementSource: Send + Sync {
    /// All agreements visible on the dashboard, newest first
    async fn list(&self) -> Result<Vec<JvAgreement>>;
}

/// Fixed list of agreements (for development and tests)
#[derive(Default)]
pub struct MemoryAgreementSource {
    agreements: Vec<JvAgreement>,
}

impl MemoryAgreementSource {
    pub fn new(mut agreements: Vec<JvAgreement>) -> Self {
        agreements.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        Self { agreements }
    }
}

#[async_trait]
impl AgreementSource for MemoryAgreementSource {
    async fn list(&self) -> Result<Vec<JvAgreement>> {
        Ok(self.agreements.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use jv_core::AgreementStatus;

    fn agreement(id: &str, published: (i32, u32, u32)) -> JvAgreement {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        JvAgreement {
            id: id.into(),
            title: format!("Agreement {id}"),
            partner_name: "Partner".into(),
            agreement_type: "Joint Venture".into(),
            status: AgreementStatus::Pending,
            start_date: date(2024, 1, 1),
            end_date: date(2025, 1, 1),
            value: 1_000_000,
            document_url: format!("/documents/{id}.pdf"),
            published_date: date(published.0, published.1, published.2),
            version: 1,
        }
    }

    #[tokio::test]
    async fn test_memory_source_orders_newest_first() {
        let source = MemoryAgreementSource::new(vec![
            agreement("old", (2024, 1, 10)),
            agreement("new", (2024, 2, 20)),
        ]);
        let ids: Vec<_> = source.list().await.unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }
}
