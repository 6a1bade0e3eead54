use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review state of a submitted report. This service only ever writes
/// `UnderReview`; the triage states are set by the review tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    #[serde(rename = "Under Review")]
    UnderReview,
    Confirmed,
    Dismissed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::UnderReview => "Under Review",
            ReportStatus::Confirmed => "Confirmed",
            ReportStatus::Dismissed => "Dismissed",
        }
    }
}

/// A user-submitted phishing report, appended to the report store.
///
/// Write-only from this service: reports are never read back, deduplicated
/// or validated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhishingReport {
    pub url: String,
    pub hacker_destination: String,
    pub reported_at: DateTime<Utc>,
    pub status: ReportStatus,
}

impl PhishingReport {
    pub fn new(url: String, hacker_destination: String) -> Self {
        Self {
            url,
            hacker_destination,
            reported_at: Utc::now(),
            status: ReportStatus::UnderReview,
        }
    }
}
