use serde::{Deserialize, Serialize};

/// Body of `POST /analyze`. Both fields optional; the extension sends
/// whatever it managed to capture from the page.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    pub text: Option<String>,
    /// Screenshot as raw base64 or a `data:` URI.
    pub image: Option<String>,
}

/// Body of `POST /report`.
#[derive(Debug, Default, Deserialize)]
pub struct ReportRequest {
    pub url: Option<String>,
    pub destination: Option<String>,
}

/// Body of every `POST /report` response.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub status: ReportOutcome,
}

/// Outcome token for a report submission. "offline" means the store never
/// initialized; "error" means a write was attempted and failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportOutcome {
    Saved,
    Offline,
    Error,
}
