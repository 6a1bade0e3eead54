use axum::extract::State;
use axum::Json;
use tracing::{error, info, warn};

use crate::api::models::{ReportOutcome, ReportRequest, ReportResponse};
use crate::api::AppState;
use crate::models::PhishingReport;

/// `POST /report`.
///
/// Appends a report document when the store is up; answers "offline" when
/// persistence never initialized and "error" when a write fails. Always
/// HTTP 200. Reports are accepted as opaque strings, no validation.
pub async fn report(
    State(state): State<AppState>,
    body: Option<Json<ReportRequest>>,
) -> Json<ReportResponse> {
    let Some(Json(req)) = body else {
        warn!("Unreadable report body");
        return Json(ReportResponse { status: ReportOutcome::Error });
    };

    let url = req.url.unwrap_or_else(|| "Unknown URL".to_string());
    let destination = req.destination.unwrap_or_else(|| "Unknown Dest".to_string());
    info!(url = %url, destination = %destination, "Phishing report received");

    let Some(store) = &state.store else {
        return Json(ReportResponse { status: ReportOutcome::Offline });
    };

    let report = PhishingReport::new(url, destination);
    match store.append(&report).await {
        Ok(()) => Json(ReportResponse { status: ReportOutcome::Saved }),
        Err(e) => {
            error!(error = %e, "Report write failed");
            Json(ReportResponse { status: ReportOutcome::Error })
        }
    }
}
