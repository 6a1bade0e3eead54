pub mod firestore;

use async_trait::async_trait;

use crate::errors::PhishguardError;
use crate::models::PhishingReport;

pub use firestore::FirestoreStore;

/// Append-only sink for user phishing reports.
///
/// Absence of a store (failed initialization at startup) is represented by
/// `Option<Arc<dyn ReportStore>>` in the app state, not by an erroring
/// implementation.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Append one report document to the backing collection.
    async fn append(&self, report: &PhishingReport) -> Result<(), PhishguardError>;
}
