use crate::errors::PhishguardError;
use crate::models::AnalysisResult;

/// Strip the Markdown code-fence artifacts models wrap around JSON.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let stripped = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    stripped.strip_suffix("```").unwrap_or(stripped).trim()
}

/// Parse the model's reply into an [`AnalysisResult`].
///
/// Tries a direct parse, then a fence-stripped parse, then the outermost
/// `{...}` slice of the reply. Anything the model wraps around the object
/// (prose, fences) is discarded; a reply with no parseable object is an
/// error and the handler substitutes the fallback payload.
pub fn parse_analysis(reply: &str) -> Result<AnalysisResult, PhishguardError> {
    if let Ok(result) = serde_json::from_str::<AnalysisResult>(reply) {
        return Ok(normalize(result));
    }

    let stripped = strip_code_fences(reply);
    if let Ok(result) = serde_json::from_str::<AnalysisResult>(stripped) {
        return Ok(normalize(result));
    }

    if let (Some(start), Some(end)) = (stripped.find('{'), stripped.rfind('}')) {
        if start < end {
            let candidate = &stripped[start..=end];
            return serde_json::from_str::<AnalysisResult>(candidate)
                .map(normalize)
                .map_err(|e| PhishguardError::LLMApi(format!("JSON parse error: {}", e)));
        }
    }

    Err(PhishguardError::LLMApi("No valid JSON in model reply".into()))
}

/// Scores outside the 0-100 rubric are clamped rather than rejected.
fn normalize(mut result: AnalysisResult) -> AnalysisResult {
    if result.confidence_score > 100 {
        result.confidence_score = 100;
    }
    result
}
