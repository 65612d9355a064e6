use serde::{Deserialize, Serialize};

/// Rejection reason for text that does not score as academic.
pub const REJECTION_REASON: &str = "Only academic documents (marks cards, certificates, ID cards) are allowed. This image does not appear to be an academic document.";

/// Outcome of classifying one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationVerdict {
    pub is_academic: bool,
    /// Number of distinct keywords found. Not a probability.
    pub score: usize,
    /// Sanitized text, cut to the first 500 characters.
    pub text: String,
    pub reason: String,
    /// Every matched keyword, in keyword-set order.
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    /// Short failure label, set only when the document never reached the classifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClassificationVerdict {
    /// Verdict for a request that failed before classification.
    pub fn failure(reason: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            is_academic: false,
            score: 0,
            text: String::new(),
            reason: reason.into(),
            matched_keywords: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_field_names() {
        let verdict = ClassificationVerdict {
            is_academic: true,
            score: 2,
            text: "student id card".into(),
            reason: "ok".into(),
            matched_keywords: vec!["student".into(), "id card".into()],
            error: None,
        };
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["is_academic"], true);
        assert_eq!(json["score"], 2);
        assert_eq!(json["matched_keywords"][1], "id card");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failure_verdict_is_not_academic() {
        let verdict = ClassificationVerdict::failure("Image too large", "Image too large. Maximum size is 10MB.");
        assert!(!verdict.is_academic);
        assert_eq!(verdict.score, 0);
        assert!(verdict.text.is_empty());
        assert!(verdict.is_failure());
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["error"], "Image too large. Maximum size is 10MB.");
    }
}
