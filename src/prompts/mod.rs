/// Instructional prompt sent with every analysis. `{{PAGE_TEXT}}` is
/// replaced with the already-scrubbed page text.
///
/// The extension serializes the page as labeled sections ("FORM
/// DESTINATIONS", "LINKS"), which is why the prompt refers to them by name.
const ANALYSIS_PROMPT: &str = r#"Act as a Cybersecurity Expert. Analyze this website content.

DATA FROM PAGE:
"{{PAGE_TEXT}}"

INSTRUCTIONS:
1. **ANALYZE RISK:** Look for phishing signs (urgency, fake login, suspicious domains).
2. **IDENTIFY DESTINATION:** - Look at "FORM DESTINATIONS".
   - If that says "No forms found", look at "LINKS" and pick the most suspicious link (the one the user is urged to click).

SCORING: 0-10 (Safe) to 80-100 (Phishing).

Return ONLY valid JSON:
{
    "verdict": "Safe/Suspicious/Malicious",
    "confidence_score": 0,
    "explanation": "Brief reason.",
    "hacker_dest": "The specific URL where data/clicks are going (or N/A)"
}"#;

/// Build the analysis prompt around scrubbed page text.
pub fn build_analysis_prompt(scrubbed_text: &str) -> String {
    ANALYSIS_PROMPT.replace("{{PAGE_TEXT}}", scrubbed_text)
}
