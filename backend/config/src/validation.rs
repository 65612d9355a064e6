//! Startup validation of a prepared config.
//!
//! Keyword and sentinel problems are configuration errors; they are caught
//! here rather than on the first classification request.

use docgate_core::{find_overlaps, KeywordSet, SentinelSet};
use thiserror::Error;

use crate::schema::DocgateConfig;

#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

pub fn validate(config: &DocgateConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_classifier(config, &mut report);
    validate_extraction(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_classifier(config: &DocgateConfig, report: &mut ValidationReport) {
    let classifier = config.classifier.as_ref();

    let keywords = match classifier.and_then(|c| c.keywords.as_ref()) {
        Some(list) => KeywordSet::new(list.iter().cloned()),
        None => Ok(KeywordSet::default()),
    };
    let sentinels = match classifier.and_then(|c| c.sentinels.as_ref()) {
        Some(list) => SentinelSet::new(list.iter().cloned()),
        None => Ok(SentinelSet::default()),
    };

    if let Err(e) = &keywords {
        report.error("classifier.keywords", e.to_string());
    }
    if let Err(e) = &sentinels {
        report.error("classifier.sentinels", e.to_string());
    }

    if let (Ok(keywords), Ok(sentinels)) = (&keywords, &sentinels) {
        for overlap in find_overlaps(keywords, sentinels) {
            report.warn(
                "classifier.sentinels",
                format!(
                    "Sentinel '{}' overlaps keyword '{}'; stripping it changes which keywords match",
                    overlap.sentinel, overlap.keyword
                ),
            );
        }
    }
}

fn validate_extraction(config: &DocgateConfig, report: &mut ValidationReport) {
    let Some(extraction) = &config.extraction else { return };

    if extraction.timeout_secs == Some(0) {
        report.error("extraction.timeoutSecs", "timeoutSecs must be >= 1");
    }
    if extraction.max_image_bytes == Some(0) {
        report.error("extraction.maxImageBytes", "maxImageBytes must be > 0");
    }
    if let Some(command) = &extraction.command {
        if command.trim().is_empty() {
            report.warn("extraction.command", "Command is blank; image classification is disabled");
        }
    }
}

fn validate_logging(config: &DocgateConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    if let Some(level) = &logging.level {
        if level.trim().is_empty() {
            report.warn("logging.level", "Empty log level; falling back to 'info'");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ClassifierConfig, ExtractionConfig};

    #[test]
    fn default_config_is_valid() {
        let report = validate(&DocgateConfig::default());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    }

    #[test]
    fn bad_keywords_and_sentinels_are_errors() {
        let cfg = DocgateConfig {
            classifier: Some(ClassifierConfig {
                keywords: Some(vec!["Grade".into()]),
                sentinels: Some(vec!["".into()]),
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].path, "classifier.keywords");
        assert!(report.errors[0].message.contains("not lowercase"));
        assert_eq!(report.errors[1].path, "classifier.sentinels");
    }

    #[test]
    fn overlap_is_a_warning() {
        let cfg = DocgateConfig {
            classifier: Some(ClassifierConfig {
                keywords: None,
                sentinels: Some(vec!["<class>".into()]),
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("'class'"));
    }

    #[test]
    fn zero_limits_are_errors() {
        let cfg = DocgateConfig {
            extraction: Some(ExtractionConfig {
                timeout_secs: Some(0),
                max_image_bytes: Some(0),
                command: Some(" ".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.warnings.len(), 1);
    }
}
