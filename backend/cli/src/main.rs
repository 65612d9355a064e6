mod classify_cmd;
mod config;
mod config_cmd;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docgate_config::{DocgateConfig, ValidationReport};
use docgate_core::KeywordClassifier;
use tracing::{info, warn};

use config::CliEnv;

#[derive(Parser)]
#[command(name = "docgate")]
#[command(about = "docgate: classify documents as academic by keyword evidence")]
#[command(version)]
struct Cli {
    /// Config file (default: $DOCGATE_CONFIG or ~/.docgate/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" (RUST_LOG still wins)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify already-extracted text
    Classify {
        /// Text to classify; read from --file or stdin when omitted
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
    /// Extract text from an image with the configured command, then classify it
    ClassifyImage {
        /// Image file
        path: PathBuf,

        /// The file holds base64 (optionally a data: URL) instead of raw bytes
        #[arg(long)]
        base64: bool,

        /// Extraction command line, overriding `extraction.command`
        #[arg(long)]
        command: Option<String>,
    },
    /// Print the active keyword set
    Keywords,
    /// Load and validate the config file
    CheckConfig,
    /// Write a config file with all defaults filled in
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let env = CliEnv::from_env();
    let config_path = cli.config.clone().unwrap_or_else(|| env.config_path.clone());
    let log_level = cli.log_level.as_deref();

    match cli.command {
        Commands::InitConfig { force } => config_cmd::init(&config_path, force).await?,
        Commands::Classify { text, file } => {
            let session = Session::start(&config_path, log_level, &env).await?;
            classify_cmd::classify_text(&session.config, &session.classifier, text, file).await?;
        }
        Commands::ClassifyImage { path, base64, command } => {
            let session = Session::start(&config_path, log_level, &env).await?;
            classify_cmd::classify_image(
                &session.config,
                session.classifier,
                &path,
                base64,
                command,
            )
            .await?;
        }
        Commands::Keywords => {
            let session = Session::start(&config_path, log_level, &env).await?;
            config_cmd::keywords(&session.classifier);
        }
        Commands::CheckConfig => {
            let session = Session::start(&config_path, log_level, &env).await?;
            let Session {
                config,
                report,
                classifier,
            } = &session;
            config_cmd::check(&config_path, config, classifier, report).await?;
        }
    }

    Ok(())
}

/// A loaded config, its validation report, and the classifier built from it.
struct Session {
    config: DocgateConfig,
    report: ValidationReport,
    classifier: KeywordClassifier,
}

impl Session {
    /// Load the config, start logging, then build the classifier every
    /// classification in this process shares read-only.
    async fn start(config_path: &Path, log_level: Option<&str>, env: &CliEnv) -> Result<Self> {
        let (config, report) = docgate_config::load_and_prepare(config_path)
            .await
            .with_context(|| format!("Failed to load config: {}", config_path.display()))?;

        let level = log_level.unwrap_or(config.log_level());
        let log_dir = env
            .log_dir
            .as_deref()
            .or(config.log_dir().map(PathBuf::as_path));
        docgate_logging::init_logger(level, config.log_json(), log_dir)?;

        for warning in &report.warnings {
            warn!(path = %warning.path, message = %warning.message, "Config warning");
        }

        let classifier = config
            .build_classifier()
            .context("Invalid classifier configuration")?;
        info!(
            keywords = classifier.keywords().len(),
            sentinels = classifier.sentinels().len(),
            config = %config_path.display(),
            "Classifier ready"
        );

        Ok(Self {
            config,
            report,
            classifier,
        })
    }
}
