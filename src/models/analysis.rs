use serde::{Deserialize, Serialize};

use super::verdict::Verdict;

/// Classification payload returned to the extension for one analyzed page.
///
/// This is exactly the shape the model is instructed to emit. Replies that
/// do not deserialize into it are replaced wholesale by
/// [`AnalysisResult::server_error`], so callers always receive this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub verdict: Verdict,
    /// 0-100 risk score.
    pub confidence_score: u8,
    pub explanation: String,
    /// URL the page appears to send data or clicks to, or "N/A"/"Unknown".
    pub hacker_dest: String,
}

impl AnalysisResult {
    /// Fixed fallback for any failure on the analyze path.
    pub fn server_error() -> Self {
        Self {
            verdict: Verdict::Error,
            confidence_score: 0,
            explanation: "Server Error".to_string(),
            hacker_dest: "Unknown".to_string(),
        }
    }
}
