//! Classification commands: raw text and image files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use docgate_config::DocgateConfig;
use docgate_core::{ClassificationVerdict, KeywordClassifier};
use docgate_logging::VerdictEvent;
use docgate_understanding::{
    ClassifyPipeline, CommandExtractor, ExtractionError, FailingExtractor, ImagePayload,
    TextExtractor,
};
use tokio::io::AsyncReadExt;
use tracing::info;

/// Classify raw extracted text from an argument, a file, or stdin.
pub async fn classify_text(
    config: &DocgateConfig,
    classifier: &KeywordClassifier,
    text: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let (source, raw) = match (text, file) {
        (Some(text), _) => ("argument".to_string(), text),
        (None, Some(path)) => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read text file: {}", path.display()))?;
            (path.display().to_string(), raw)
        }
        (None, None) => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read text from stdin")?;
            ("stdin".to_string(), raw)
        }
    };

    let verdict = classifier.classify(&raw);
    report(config, &source, &verdict)
}

/// Run an image file through the configured extraction command, then classify it.
pub async fn classify_image(
    config: &DocgateConfig,
    classifier: KeywordClassifier,
    path: &Path,
    base64: bool,
    command: Option<String>,
) -> Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image: {}", path.display()))?;

    let extractor = build_extractor(command.as_deref().or(config.extraction_command()));
    info!(extractor = %extractor.name(), path = %path.display(), "Classifying image");

    let pipeline = ClassifyPipeline::new(extractor, Arc::new(classifier))
        .with_timeout(config.extraction_timeout())
        .with_min_text_chars(config.min_text_chars());

    let verdict = if base64 {
        let text = String::from_utf8_lossy(&bytes);
        pipeline
            .run_payload(Some(ImagePayload::Base64(&text)), config.max_image_bytes())
            .await
    } else {
        pipeline
            .run_payload(Some(ImagePayload::File(&bytes)), config.max_image_bytes())
            .await
    };

    report(config, &path.display().to_string(), &verdict)
}

fn build_extractor(command_line: Option<&str>) -> Arc<dyn TextExtractor> {
    match command_line.and_then(CommandExtractor::from_command_line) {
        Some(command) => Arc::new(command),
        None => Arc::new(FailingExtractor::new(ExtractionError::Unavailable(
            "no text extraction command configured".into(),
        ))),
    }
}

fn report(config: &DocgateConfig, source: &str, verdict: &ClassificationVerdict) -> Result<()> {
    VerdictEvent::new(source, verdict, config.redact_sensitive()).log();
    println!("{}", serde_json::to_string_pretty(verdict)?);
    Ok(())
}
