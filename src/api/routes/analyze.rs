use axum::extract::State;
use axum::Json;
use tracing::{error, warn};

use crate::analysis::parse_analysis;
use crate::api::models::AnalyzeRequest;
use crate::api::AppState;
use crate::errors::PhishguardError;
use crate::image::{decode_inline_image, InlineImage};
use crate::models::AnalysisResult;
use crate::prompts::build_analysis_prompt;
use crate::scrub::scrub;

/// `POST /analyze`.
///
/// Always answers 200 with a well-formed [`AnalysisResult`]; every failure
/// on the path (unreadable body, model error, unparseable reply) collapses
/// into the fixed `Error` payload. The extension keys its UI off the
/// verdict field, not the HTTP status.
pub async fn analyze(
    State(state): State<AppState>,
    body: Option<Json<AnalyzeRequest>>,
) -> Json<AnalysisResult> {
    let Some(Json(req)) = body else {
        warn!("Unreadable analyze body");
        return Json(AnalysisResult::server_error());
    };

    let text = req.text.unwrap_or_default();
    let prompt = build_analysis_prompt(&scrub(&text));

    // A broken screenshot is dropped, not fatal: analysis proceeds text-only.
    let image = req.image.as_deref().and_then(decode_inline_image);

    match run_analysis(&state, &prompt, image.as_ref()).await {
        Ok(result) => Json(result),
        Err(e) => {
            error!(error = %e, "Analysis failed");
            Json(AnalysisResult::server_error())
        }
    }
}

async fn run_analysis(
    state: &AppState,
    prompt: &str,
    image: Option<&InlineImage>,
) -> Result<AnalysisResult, PhishguardError> {
    let reply = state.model.analyze(prompt, image).await?;
    parse_analysis(&reply.content)
}
