//! Keyword Classifier.
//!
//! A crude rule: a document is academic when at least
//! [`ACADEMIC_THRESHOLD`] distinct keywords occur in its text. There is no
//! confidence, calibration or false-positive model behind it; `score` is a count.

use tracing::debug;

use crate::keywords::{KeywordSet, SentinelSet};
use crate::sanitize::sanitize;
use crate::verdict::{ClassificationVerdict, REJECTION_REASON};

/// Minimum number of matched keywords for an academic verdict.
pub const ACADEMIC_THRESHOLD: usize = 2;

/// Characters of sanitized text carried in the verdict.
pub const MAX_TEXT_CHARS: usize = 500;

/// Matched keywords named in an academic reason.
pub const REASON_KEYWORD_LIMIT: usize = 5;

/// Score already-sanitized, lower-case text against `keywords`.
pub fn classify_text(text: &str, keywords: &KeywordSet) -> ClassificationVerdict {
    let matched_keywords: Vec<String> = keywords
        .iter()
        .filter(|keyword| text.contains(keyword))
        .map(str::to_string)
        .collect();

    let score = matched_keywords.len();
    let is_academic = score >= ACADEMIC_THRESHOLD;

    let reason = if is_academic {
        let named: Vec<&str> = matched_keywords
            .iter()
            .take(REASON_KEYWORD_LIMIT)
            .map(String::as_str)
            .collect();
        format!(
            "Document classified as academic (matched {} keywords: {})",
            score,
            named.join(", ")
        )
    } else {
        REJECTION_REASON.to_string()
    };

    ClassificationVerdict {
        is_academic,
        score,
        text: truncate_chars(text, MAX_TEXT_CHARS),
        reason,
        matched_keywords,
        error: None,
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Keyword set and sentinel set, built once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    keywords: KeywordSet,
    sentinels: SentinelSet,
}

impl KeywordClassifier {
    pub fn new(keywords: KeywordSet, sentinels: SentinelSet) -> Self {
        Self { keywords, sentinels }
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    pub fn sentinels(&self) -> &SentinelSet {
        &self.sentinels
    }

    pub fn sanitize(&self, raw: &str) -> String {
        sanitize(raw, &self.sentinels)
    }

    /// Sanitize raw extracted text, then score it.
    pub fn classify(&self, raw: &str) -> ClassificationVerdict {
        let text = self.sanitize(raw);
        self.classify_sanitized(&text)
    }

    /// Score text that has already been through [`KeywordClassifier::sanitize`].
    pub fn classify_sanitized(&self, text: &str) -> ClassificationVerdict {
        let verdict = classify_text(text, &self.keywords);
        debug!(
            score = verdict.score,
            is_academic = verdict.is_academic,
            chars = text.chars().count(),
            "Scored document text"
        );
        verdict
    }
}
