//! Config inspection commands.

use std::path::Path;

use anyhow::{bail, Result};
use docgate_config::{
    apply_all_defaults, collect_referenced_vars, load_raw_config, write_config, DocgateConfig,
    ValidationReport,
};
use docgate_core::KeywordClassifier;

/// Print the active keyword set, one per line, in match order.
pub fn keywords(classifier: &KeywordClassifier) {
    for keyword in classifier.keywords().iter() {
        println!("{keyword}");
    }
}

/// Summarize a config that loaded and validated.
pub async fn check(
    path: &Path,
    config: &DocgateConfig,
    classifier: &KeywordClassifier,
    report: &ValidationReport,
) -> Result<()> {
    let env_vars = referenced_env_vars(path).await?;

    println!("Config: {}", path.display());
    println!("  keywords:   {}", classifier.keywords().len());
    println!(
        "  sentinels:  {}",
        classifier.sentinels().iter().collect::<Vec<_>>().join(" ")
    );
    println!(
        "  extraction: {}",
        config.extraction_command().unwrap_or("(none)")
    );
    println!("  timeout:    {}s", config.extraction_timeout().as_secs());
    if env_vars.is_empty() {
        println!("  env vars:   (none)");
    } else {
        println!("  env vars:   {}", env_vars.join(", "));
    }

    if report.warnings.is_empty() {
        println!("OK");
    } else {
        for warning in &report.warnings {
            println!("warning: {warning}");
        }
    }
    Ok(())
}

/// `${VAR}` names the config file depends on, before substitution.
async fn referenced_env_vars(path: &Path) -> Result<Vec<String>> {
    let raw = load_raw_config(path).await?;
    Ok(collect_referenced_vars(&raw))
}

/// Write a config file holding every default value.
pub async fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite", path.display());
    }
    let config = apply_all_defaults(DocgateConfig::default());
    write_config(&config, path).await?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_env_vars_the_config_references() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        tokio::fs::write(
            &path,
            "extraction:\n  command: \"${OCR_BIN} stdin stdout\"\nlogging:\n  dir: \"${LOG_ROOT}/docgate\"\n",
        )
        .await
        .unwrap();

        assert_eq!(referenced_env_vars(&path).await.unwrap(), vec!["LOG_ROOT", "OCR_BIN"]);
        assert!(referenced_env_vars(&dir.path().join("missing.yaml"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        init(&path, false).await.unwrap();
        assert!(path.exists());
        let err = init(&path, false).await.unwrap_err();
        assert!(err.to_string().contains("--force"));
        init(&path, true).await.unwrap();

        let (config, report) = docgate_config::load_and_prepare(&path).await.unwrap();
        assert!(report.is_valid());
        assert_eq!(config.build_classifier().unwrap().keywords().len(), 32);
    }
}
