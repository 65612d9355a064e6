//! `docgate-config`: runtime configuration for docgate.
//!
//! Provides:
//! - Typed config schema (classifier lists, extraction collaborator, logging)
//! - YAML read/write with a backup of the previous file
//! - `${ENV_VAR}` substitution
//! - Default value application
//! - Startup validation of the keyword and sentinel lists

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{collect_referenced_vars, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_raw_config, write_config};
pub use schema::{ClassifierConfig, DocgateConfig, ExtractionConfig, LoggingConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load, substitute env vars, apply defaults and validate a config file.
///
/// Returns the config together with its validation report (warnings only;
/// any validation error fails the load).
pub async fn load_and_prepare(path: &Path) -> Result<(DocgateConfig, ValidationReport)> {
    let raw = load_raw_config(path).await?;
    let value = resolve_env_vars(&raw).context("Failed to resolve env vars in config")?;
    prepare(value)
}

/// The load pipeline after reading: deserialize, apply defaults, validate.
pub fn prepare(value: Value) -> Result<(DocgateConfig, ValidationReport)> {
    let config: DocgateConfig =
        serde_json::from_value(value).context("Failed to deserialize config")?;
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if !report.is_valid() {
        let messages: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        bail!("Invalid config: {}", messages.join("; "));
    }

    Ok((config, report))
}
