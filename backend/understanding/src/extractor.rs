//! Text extraction collaborator seam.
//!
//! Anything that turns image bytes into text (a local OCR program, a hosted
//! vision model) implements [`TextExtractor`]. Its failures never reach the
//! classifier; they are turned into failure verdicts by [`ExtractionError::verdict`].

use async_trait::async_trait;
use docgate_core::ClassificationVerdict;
use thiserror::Error;

/// Why text extraction produced nothing usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("text extraction timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("text extraction model is still loading")]
    ModelLoading,

    #[error("text extraction service requires an API token")]
    MissingToken,

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("model '{model}' not found")]
    ModelNotFound { model: String },

    #[error("endpoint deprecated: {0}")]
    EndpointDeprecated(String),

    #[error("text extraction failed with status {status}: {detail}")]
    Remote { status: i32, detail: String },

    #[error("text extractor unavailable: {0}")]
    Unavailable(String),

    #[error("no text extracted")]
    NoTextExtracted,
}

impl ExtractionError {
    /// Short label carried in the verdict's `error` field.
    pub fn label(&self) -> String {
        match self {
            Self::Timeout { .. } => "Timeout".into(),
            Self::ModelLoading => "Model loading".into(),
            Self::MissingToken => "Missing API token".into(),
            Self::AuthenticationFailed(_) => "Authentication failed".into(),
            Self::ModelNotFound { .. } => "Model not found".into(),
            Self::EndpointDeprecated(_) => "Deprecated endpoint".into(),
            Self::Remote { status, .. } => format!("API error: {status}"),
            Self::Unavailable(detail) => detail.clone(),
            Self::NoTextExtracted => "No text extracted".into(),
        }
    }

    /// Human-readable reason carried in the verdict's `reason` field.
    pub fn reason(&self) -> String {
        match self {
            Self::Timeout { secs } => format!(
                "Request timeout: text extraction did not respond within {secs} seconds."
            ),
            Self::ModelLoading => {
                "Text extraction model is loading. Please wait 30-60 seconds and try again.".into()
            }
            Self::MissingToken => "An API token is required by the text extraction service.".into(),
            Self::AuthenticationFailed(detail) => format!("Authentication error: {detail}"),
            Self::ModelNotFound { model } => {
                format!("Model not found: the model '{model}' is not available.")
            }
            Self::EndpointDeprecated(detail) => format!(
                "API endpoint deprecated: {detail}. The endpoint is no longer supported."
            ),
            Self::Remote { status, detail } => format!("Text extraction error: {status} - {detail}"),
            Self::Unavailable(detail) => format!("Classification failed: {detail}"),
            Self::NoTextExtracted => "Failed to extract text from image. The image format may not be supported or it contains no readable text.".into(),
        }
    }

    /// The "not academic, score 0" verdict reported in place of a classification.
    pub fn verdict(&self) -> ClassificationVerdict {
        ClassificationVerdict::failure(self.reason(), self.label())
    }
}

/// Turns image bytes into raw text. Output may still contain model sentinels.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extractor name for logs (e.g., "tesseract", "static").
    fn name(&self) -> &str;

    async fn extract(&self, image: &[u8]) -> Result<String, ExtractionError>;
}

/// Returns the same text for every image.
pub struct StaticExtractor {
    text: String,
}

impl StaticExtractor {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl TextExtractor for StaticExtractor {
    fn name(&self) -> &str {
        "static"
    }

    async fn extract(&self, _image: &[u8]) -> Result<String, ExtractionError> {
        Ok(self.text.clone())
    }
}

/// Always fails with the given error.
pub struct FailingExtractor {
    error: ExtractionError,
}

impl FailingExtractor {
    pub fn new(error: ExtractionError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl TextExtractor for FailingExtractor {
    fn name(&self) -> &str {
        "failing"
    }

    async fn extract(&self, _image: &[u8]) -> Result<String, ExtractionError> {
        Err(self.error.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_verdicts_carry_reason_and_label() {
        let v = ExtractionError::Timeout { secs: 60 }.verdict();
        assert!(!v.is_academic);
        assert_eq!(v.score, 0);
        assert_eq!(v.error.as_deref(), Some("Timeout"));
        assert!(v.reason.contains("60 seconds"));

        let v = ExtractionError::Remote { status: 502, detail: "bad gateway".into() }.verdict();
        assert_eq!(v.error.as_deref(), Some("API error: 502"));
        assert_eq!(v.reason, "Text extraction error: 502 - bad gateway");

        let v = ExtractionError::NoTextExtracted.verdict();
        assert_eq!(v.error.as_deref(), Some("No text extracted"));
        assert!(v.matched_keywords.is_empty());
    }

    #[test]
    fn every_variant_maps_to_its_reason_and_label() {
        let cases = [
            (
                ExtractionError::Timeout { secs: 60 },
                "Request timeout: text extraction did not respond within 60 seconds.",
                "Timeout",
            ),
            (
                ExtractionError::ModelLoading,
                "Text extraction model is loading. Please wait 30-60 seconds and try again.",
                "Model loading",
            ),
            (
                ExtractionError::MissingToken,
                "An API token is required by the text extraction service.",
                "Missing API token",
            ),
            (
                ExtractionError::AuthenticationFailed("invalid token".into()),
                "Authentication error: invalid token",
                "Authentication failed",
            ),
            (
                ExtractionError::ModelNotFound { model: "donut-base".into() },
                "Model not found: the model 'donut-base' is not available.",
                "Model not found",
            ),
            (
                ExtractionError::EndpointDeprecated("use the router".into()),
                "API endpoint deprecated: use the router. The endpoint is no longer supported.",
                "Deprecated endpoint",
            ),
            (
                ExtractionError::Remote { status: 500, detail: "boom".into() },
                "Text extraction error: 500 - boom",
                "API error: 500",
            ),
            (
                ExtractionError::Unavailable("tesseract missing".into()),
                "Classification failed: tesseract missing",
                "tesseract missing",
            ),
            (
                ExtractionError::NoTextExtracted,
                "Failed to extract text from image. The image format may not be supported or it contains no readable text.",
                "No text extracted",
            ),
        ];

        for (error, reason, label) in cases {
            let v = error.verdict();
            assert_eq!(v.reason, reason, "reason for {error:?}");
            assert_eq!(v.error.as_deref(), Some(label), "label for {error:?}");
            assert!(!v.is_academic);
            assert_eq!(v.score, 0);
            assert!(v.text.is_empty());
        }
    }

    #[tokio::test]
    async fn static_extractor_returns_its_text() {
        let extractor = StaticExtractor::new("<pad>Exam Result");
        assert_eq!(extractor.extract(b"png").await.unwrap(), "<pad>Exam Result");
    }

    #[tokio::test]
    async fn failing_extractor_returns_its_error() {
        let extractor = FailingExtractor::new(ExtractionError::ModelLoading);
        assert_eq!(extractor.extract(b"png").await, Err(ExtractionError::ModelLoading));
    }
}
