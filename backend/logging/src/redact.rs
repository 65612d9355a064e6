//! Log Redaction
//!
//! Scrubs API tokens and e-mail addresses from text before it is logged.
//! OCR output of ID cards routinely contains the latter.

use regex::Regex;
use std::sync::LazyLock;

static API_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)|(hf_[a-zA-Z0-9]{20,})|(sk-[a-zA-Z0-9]{32,})").unwrap()
});
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = API_TOKEN_RE.replace_all(input, "[REDACTED_TOKEN]");
    EMAIL_RE.replace_all(&redacted, "[REDACTED_EMAIL]").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_tokens() {
        let raw = "calling router with Bearer hf_abcdefghijklmnopqrstuvwx and sk-0123456789abcdef0123456789abcdef";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("hf_abcdefghijklmnopqrstuvwx"));
        assert!(!clean.contains("sk-0123456789abcdef0123456789abcdef"));
        assert!(clean.starts_with("calling router with [REDACTED_TOKEN]"));
    }

    #[test]
    fn redacts_emails_and_keeps_document_text() {
        let clean = redact_sensitive_data("student id card jane.doe@uni.edu roll 42");
        assert_eq!(clean, "student id card [REDACTED_EMAIL] roll 42");
    }
}
