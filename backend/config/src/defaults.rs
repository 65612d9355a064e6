//! Config defaults: fills every unset field of a freshly loaded config.

use docgate_core::{DEFAULT_KEYWORDS, DEFAULT_SENTINELS};
use docgate_understanding::{DEFAULT_MAX_IMAGE_BYTES, DEFAULT_MIN_TEXT_CHARS, DEFAULT_TIMEOUT_SECS};

use crate::schema::{ClassifierConfig, DocgateConfig, ExtractionConfig, LoggingConfig};

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub fn apply_all_defaults(config: DocgateConfig) -> DocgateConfig {
    let config = apply_classifier_defaults(config);
    let config = apply_extraction_defaults(config);
    apply_logging_defaults(config)
}

fn apply_classifier_defaults(mut config: DocgateConfig) -> DocgateConfig {
    let classifier = config.classifier.get_or_insert_with(ClassifierConfig::default);
    if classifier.keywords.is_none() {
        classifier.keywords = Some(DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect());
    }
    if classifier.sentinels.is_none() {
        classifier.sentinels = Some(DEFAULT_SENTINELS.iter().map(|s| s.to_string()).collect());
    }
    config
}

fn apply_extraction_defaults(mut config: DocgateConfig) -> DocgateConfig {
    let extraction = config.extraction.get_or_insert_with(ExtractionConfig::default);
    extraction.timeout_secs.get_or_insert(DEFAULT_TIMEOUT_SECS);
    extraction.min_text_chars.get_or_insert(DEFAULT_MIN_TEXT_CHARS);
    extraction.max_image_bytes.get_or_insert(DEFAULT_MAX_IMAGE_BYTES);
    config
}

fn apply_logging_defaults(mut config: DocgateConfig) -> DocgateConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    logging.json.get_or_insert(false);
    logging.redact_sensitive.get_or_insert(true);
    config
}
