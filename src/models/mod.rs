pub mod analysis;
pub mod report;
pub mod verdict;

pub use analysis::AnalysisResult;
pub use report::{PhishingReport, ReportStatus};
pub use verdict::Verdict;
