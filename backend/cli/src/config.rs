use std::path::PathBuf;

use docgate_config::{config_dir, config_file_path};

/// Settings taken from the environment before the config file is read.
#[derive(Debug, Clone)]
pub struct CliEnv {
    /// Config file path
    pub config_path: PathBuf,
    /// Directory for rolling file logs; overrides `logging.dir`
    pub log_dir: Option<PathBuf>,
}

impl CliEnv {
    /// `DOCGATE_CONFIG` names the file directly; otherwise `config.yaml`
    /// inside the config directory.
    pub fn from_env() -> Self {
        Self {
            config_path: std::env::var("DOCGATE_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| config_file_path(&config_dir())),
            log_dir: std::env::var("DOCGATE_LOG_DIR").ok().map(PathBuf::from),
        }
    }
}
