//! The report record served by the backend, and the client that fetches it.

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::ApiError;

/// A submitted claim awaiting, or having received, on-chain verification.
///
/// The backend is the source of truth; the panel only ever holds a copy of
/// the whole list as it was last fetched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: u64,
    pub reporter: String,
    pub location: String,
    pub description: String,
    pub evidence_link: String,
    /// Reward in ether, exactly as the backend rendered it.
    #[serde(deserialize_with = "decimal_text")]
    pub reward: String,
    pub verified: bool,
}

/// Accepts either `"0.5"` or `0.5` and keeps the decimal text.
fn decimal_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Decimal::deserialize(deserializer)? {
        Decimal::Text(s) => s,
        Decimal::Number(n) => n.to_string(),
    })
}

/// A trait for anything that can produce the current list of reports.
pub trait ReportSource {
    /// Fetches the complete report list.
    async fn fetch_reports(&self) -> Result<Vec<Report>, ApiError>;
}

/// Fetches reports from the backend's REST endpoint.
#[derive(Clone, Debug)]
pub struct ReportsClient {
    url: String,
    http: reqwest::Client,
}

impl ReportsClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
        }
    }
}

impl ReportSource for ReportsClient {
    async fn fetch_reports(&self) -> Result<Vec<Report>, ApiError> {
        let reports = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Report>>()
            .await?;

        dioxus_logger::tracing::info!("fetched {} reports from {}", reports.len(), self.url);

        Ok(reports)
    }
}
