//! Joint-Venture Agreements
//!
//! Read-only records shown on the investor dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an agreement
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgreementStatus {
    Active,
    Pending,
    Expired,
    Other(String),
}

impl AgreementStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Expired => "Expired",
            Self::Other(s) => s,
        }
    }

    /// CSS modifier used by the dashboard badge
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Active => "status-active",
            Self::Pending => "status-pending",
            Self::Expired => "status-expired",
            Self::Other(_) => "status-other",
        }
    }
}

impl From<String> for AgreementStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "active" => Self::Active,
            "pending" => Self::Pending,
            "expired" => Self::Expired,
            _ => Self::Other(s),
        }
    }
}

impl From<AgreementStatus> for String {
    fn from(status: AgreementStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for AgreementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A joint-venture agreement row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JvAgreement {
    pub id: String,

    pub title: String,

    pub partner_name: String,

    /// e.g. "Joint Venture", "Research Partnership"
    pub agreement_type: String,

    pub status: AgreementStatus,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    /// Contract value in whole euros
    pub value: i64,

    /// Link to the signed PDF
    pub document_url: String,

    pub published_date: NaiveDate,

    pub version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "id": "1",
            "title": "Strategic Partnership Agreement",
            "partner_name": "TechCorp Industries",
            "agreement_type": "Joint Venture",
            "status": "active",
            "start_date": "2024-01-15",
            "end_date": "2025-01-15",
            "value": 2_500_000,
            "document_url": "/documents/jv-agreement-1.pdf",
            "published_date": "2024-01-10",
            "version": 1
        })
    }

    #[test]
    fn test_parse_datastore_row() {
        let agreement: JvAgreement = serde_json::from_value(sample()).unwrap();
        assert_eq!(agreement.status, AgreementStatus::Active);
        assert_eq!(agreement.value, 2_500_000);
        assert_eq!(agreement.start_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_unknown_status_preserved() {
        let status = AgreementStatus::from("Under Review".to_string());
        assert_eq!(status, AgreementStatus::Other("Under Review".into()));
        assert_eq!(status.css_class(), "status-other");
        assert_eq!(String::from(status), "Under Review");
    }
}
