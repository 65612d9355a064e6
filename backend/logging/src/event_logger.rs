//! Verdict Event Logger
//!
//! One structured event per classified document, emitted through `tracing`
//! so it lands in the NDJSON file log alongside everything else.

use chrono::{DateTime, Utc};
use docgate_core::ClassificationVerdict;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::redact::redact_sensitive_data;

/// Characters of document text kept in an event.
const PREVIEW_CHARS: usize = 80;

#[derive(Debug, Clone, Serialize)]
pub struct VerdictEvent {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Where the document came from (file path, "stdin", ...).
    pub source: String,
    pub is_academic: bool,
    pub score: usize,
    pub matched_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub text_preview: String,
}

impl VerdictEvent {
    pub fn new(source: impl Into<String>, verdict: &ClassificationVerdict, redact: bool) -> Self {
        let preview: String = verdict.text.chars().take(PREVIEW_CHARS).collect();
        let text_preview = if redact {
            redact_sensitive_data(&preview)
        } else {
            preview
        };

        Self {
            request_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: source.into(),
            is_academic: verdict.is_academic,
            score: verdict.score,
            matched_keywords: verdict.matched_keywords.clone(),
            error: verdict.error.clone(),
            text_preview,
        }
    }

    pub fn log(&self) {
        info!(
            target: "verdicts",
            request_id = %self.request_id,
            source = %self.source,
            is_academic = self.is_academic,
            score = self.score,
            error = self.error.as_deref().unwrap_or(""),
            event = ?self,
            "Document verdict"
        );
    }
}
