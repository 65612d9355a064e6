//! docgate runtime configuration schema.
//!
//! Every field is optional in the file; [`crate::defaults`] fills the gaps
//! after loading, so accessors on a prepared config never see `None`.

use std::path::PathBuf;
use std::time::Duration;

use docgate_core::{DocgateError, KeywordClassifier, KeywordSet, SentinelSet};
use docgate_understanding::{
    DEFAULT_MAX_IMAGE_BYTES, DEFAULT_MIN_TEXT_CHARS, DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};

use crate::defaults::DEFAULT_LOG_LEVEL;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocgateConfig {
    /// Keyword and sentinel lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<ClassifierConfig>,

    /// Text extraction collaborator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction: Option<ExtractionConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfig {
    /// Ordered keyword list; order decides which matches a reason names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Model marker substrings stripped before matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentinels: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionConfig {
    /// OCR command line; receives the image on stdin, prints text on stdout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_text_chars: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_image_bytes: Option<usize>,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Directory for the daily-rolling JSON log file. No file log when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Emit console logs as JSON lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,

    /// Scrub tokens and keys from logged document text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redact_sensitive: Option<bool>,
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl DocgateConfig {
    /// Build the process-wide classifier. Fails on an invalid keyword or sentinel list.
    pub fn build_classifier(&self) -> Result<KeywordClassifier, DocgateError> {
        let classifier = self.classifier.as_ref();

        let keywords = match classifier.and_then(|c| c.keywords.as_ref()) {
            Some(list) => KeywordSet::new(list.iter().cloned())?,
            None => KeywordSet::default(),
        };
        let sentinels = match classifier.and_then(|c| c.sentinels.as_ref()) {
            Some(list) => SentinelSet::new(list.iter().cloned())?,
            None => SentinelSet::default(),
        };

        Ok(KeywordClassifier::new(keywords, sentinels))
    }

    /// Configured OCR command line, if any and not blank.
    pub fn extraction_command(&self) -> Option<&str> {
        self.extraction
            .as_ref()
            .and_then(|e| e.command.as_deref())
            .filter(|c| !c.trim().is_empty())
    }

    pub fn extraction_timeout(&self) -> Duration {
        let secs = self
            .extraction
            .as_ref()
            .and_then(|e| e.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn min_text_chars(&self) -> usize {
        self.extraction
            .as_ref()
            .and_then(|e| e.min_text_chars)
            .unwrap_or(DEFAULT_MIN_TEXT_CHARS)
    }

    pub fn max_image_bytes(&self) -> usize {
        self.extraction
            .as_ref()
            .and_then(|e| e.max_image_bytes)
            .unwrap_or(DEFAULT_MAX_IMAGE_BYTES)
    }

    /// Configured log filter; a blank value means the default.
    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .filter(|level| !level.trim().is_empty())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<&PathBuf> {
        self.logging.as_ref().and_then(|l| l.dir.as_ref())
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn redact_sensitive(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.redact_sensitive)
            .unwrap_or(true)
    }
}
