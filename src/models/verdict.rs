use serde::{Deserialize, Serialize};

/// Coarse classification assigned to one analyzed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// No phishing indicators.
    Safe,
    /// Indicators present but inconclusive.
    Suspicious,
    /// Strong indicators of an active phishing attempt.
    Malicious,
    /// Analysis could not be completed.
    Error,
}

impl Verdict {
    /// Whether the extension should warn the user about the page.
    pub fn is_flagged(&self) -> bool {
        matches!(self, Verdict::Suspicious | Verdict::Malicious)
    }
}
