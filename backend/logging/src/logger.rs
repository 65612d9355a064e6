//! Structured Logger
//!
//! Console output (human or JSON lines), an optional daily-rolling NDJSON
//! file, and `RUST_LOG`-aware level control.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when the configured level is blank or unparsable.
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_FILE_PREFIX: &str = "docgate.log";

/// Initialize the global subscriber.
///
/// `RUST_LOG` overrides `level`. With `log_dir` set, JSON lines also go to
/// `<log_dir>/docgate.log.YYYY-MM-DD`; a directory that cannot be created is
/// an error. Once a subscriber is installed, later calls are no-ops.
pub fn init_logger(level: &str, json: bool, log_dir: Option<&Path>) -> Result<()> {
    let file_appender = log_dir.map(open_log_file).transpose()?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(level));

    // Logs go to stderr; stdout carries verdict JSON.
    let console_json = json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_ansi(false)
    });
    let console_text = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
    });

    let file_layer = file_appender
        .map(|appender| fmt::layer().json().with_writer(appender).with_ansi(false));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_json)
        .with(console_text)
        .with(file_layer)
        .try_init();
    Ok(())
}

/// Filter for a configured level. Blank means [`DEFAULT_LOG_LEVEL`], not "off".
fn level_filter(level: &str) -> EnvFilter {
    let level = match level.trim() {
        "" => DEFAULT_LOG_LEVEL,
        trimmed => trimmed,
    };
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

fn open_log_file(dir: &Path) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(dir)
        .with_context(|| format!("Failed to open log directory: {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn blank_level_means_info() {
        assert_eq!(level_filter("").max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(level_filter("   ").max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(level_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn unparsable_level_means_info() {
        assert_eq!(level_filter("docgate=loud").max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn log_dir_under_a_file_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let bad_dir = file.path().join("logs");

        let err = init_logger("info", false, Some(&bad_dir)).unwrap_err();
        assert!(err.to_string().contains("Failed to open log directory"));
    }

    #[test]
    fn log_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        assert!(open_log_file(&nested).is_ok());
        assert!(nested.is_dir());
    }
}
