use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").unwrap());

/// Replace every email address in `text` with `[REDACTED_EMAIL]`.
///
/// Page text is forwarded verbatim to a third-party model, so addresses
/// scraped from the page must not leave the process. Email is the only PII
/// class handled here.
pub fn scrub(text: &str) -> String {
    EMAIL_RE.replace_all(text, "[REDACTED_EMAIL]").into_owned()
}
