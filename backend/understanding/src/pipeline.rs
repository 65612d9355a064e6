//! Image → text → verdict.
//!
//! Every outcome is a [`ClassificationVerdict`]: extraction failures and
//! unusable text short-circuit to failure verdicts without touching the classifier.

use std::sync::Arc;
use std::time::Duration;

use docgate_core::{ClassificationVerdict, KeywordClassifier};
use tracing::{info, instrument, warn};

use crate::extractor::{ExtractionError, TextExtractor};
use crate::payload::{decode_payload, ImagePayload};

/// Default extraction timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Sanitized texts shorter than this are treated as "no text extracted".
pub const DEFAULT_MIN_TEXT_CHARS: usize = 5;

#[derive(Clone)]
pub struct ClassifyPipeline {
    extractor: Arc<dyn TextExtractor>,
    classifier: Arc<KeywordClassifier>,
    timeout: Duration,
    min_text_chars: usize,
}

impl ClassifyPipeline {
    pub fn new(extractor: Arc<dyn TextExtractor>, classifier: Arc<KeywordClassifier>) -> Self {
        Self {
            extractor,
            classifier,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_min_text_chars(mut self, min_text_chars: usize) -> Self {
        self.min_text_chars = min_text_chars;
        self
    }

    pub fn classifier(&self) -> &KeywordClassifier {
        &self.classifier
    }

    /// Decode a client payload, then classify it.
    pub async fn run_payload(
        &self,
        payload: Option<ImagePayload<'_>>,
        max_bytes: usize,
    ) -> ClassificationVerdict {
        match decode_payload(payload, max_bytes) {
            Ok(image) => self.run(&image).await,
            Err(e) => {
                warn!(error = %e, "Rejected image payload");
                e.verdict()
            }
        }
    }

    #[instrument(skip_all, fields(extractor = %self.extractor.name(), bytes = image.len()))]
    pub async fn run(&self, image: &[u8]) -> ClassificationVerdict {
        let raw = match tokio::time::timeout(self.timeout, self.extractor.extract(image)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                warn!(error = %e, "Text extraction failed");
                return e.verdict();
            }
            Err(_) => {
                let e = ExtractionError::Timeout { secs: whole_secs(self.timeout) };
                warn!(error = %e, "Text extraction timed out");
                return e.verdict();
            }
        };

        let text = self.classifier.sanitize(&raw);
        if text.chars().count() < self.min_text_chars {
            warn!(chars = text.chars().count(), "Extracted text too short to classify");
            return ExtractionError::NoTextExtracted.verdict();
        }

        let verdict = self.classifier.classify_sanitized(&text);
        info!(score = verdict.score, is_academic = verdict.is_academic, "Classified document");
        verdict
    }
}

/// Seconds rounded up, so a sub-second timeout never reads as "0 seconds".
fn whole_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    secs.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{FailingExtractor, StaticExtractor};
    use async_trait::async_trait;

    fn pipeline(extractor: impl TextExtractor + 'static) -> ClassifyPipeline {
        ClassifyPipeline::new(Arc::new(extractor), Arc::new(KeywordClassifier::default()))
    }

    struct SlowExtractor;

    #[async_trait]
    impl TextExtractor for SlowExtractor {
        fn name(&self) -> &str {
            "slow"
        }

        async fn extract(&self, _image: &[u8]) -> Result<String, ExtractionError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("student exam".into())
        }
    }

    #[tokio::test]
    async fn classifies_extracted_text() {
        let v = pipeline(StaticExtractor::new("<s_cord-v2>STUDENT ID CARD</s>"))
            .run(b"img")
            .await;
        assert!(v.is_academic);
        assert_eq!(v.score, 2);
        assert_eq!(v.text, "student id card");
        assert!(v.error.is_none());
    }

    #[tokio::test]
    async fn extraction_failure_short_circuits() {
        let v = pipeline(FailingExtractor::new(ExtractionError::ModelLoading)).run(b"img").await;
        assert!(!v.is_academic);
        assert_eq!(v.score, 0);
        assert_eq!(v.error.as_deref(), Some("Model loading"));
    }

    #[tokio::test]
    async fn slow_extraction_times_out() {
        let v = pipeline(SlowExtractor)
            .with_timeout(Duration::from_millis(20))
            .run(b"img")
            .await;
        assert_eq!(v.error.as_deref(), Some("Timeout"));
        assert!(v.reason.contains("within 1 seconds"), "{}", v.reason);
        assert!(!v.is_academic);
    }

    #[test]
    fn timeout_seconds_round_up() {
        assert_eq!(whole_secs(Duration::from_millis(20)), 1);
        assert_eq!(whole_secs(Duration::from_millis(1500)), 2);
        assert_eq!(whole_secs(Duration::from_secs(60)), 60);
        assert_eq!(whole_secs(Duration::ZERO), 1);
    }

    #[tokio::test]
    async fn short_text_is_no_text_extracted() {
        let v = pipeline(StaticExtractor::new("<pad> ok </s>")).run(b"img").await;
        assert_eq!(v.error.as_deref(), Some("No text extracted"));

        // With the guard disabled the classifier sees the empty text and rejects it normally.
        let v = pipeline(StaticExtractor::new("</s>"))
            .with_min_text_chars(0)
            .run(b"img")
            .await;
        assert!(v.error.is_none());
        assert_eq!(v.score, 0);
        assert_eq!(v.reason, docgate_core::REJECTION_REASON);
    }

    #[tokio::test]
    async fn payload_errors_become_verdicts() {
        let p = pipeline(StaticExtractor::new("exam result"));
        let v = p.run_payload(None, 1024).await;
        assert_eq!(v.reason, "No image data provided");

        let v = p.run_payload(Some(ImagePayload::File(&[7u8; 32])), 16).await;
        assert_eq!(v.reason, "Image too large");

        let v = p.run_payload(Some(ImagePayload::File(b"img")), 16).await;
        assert!(v.is_academic);
    }
}
