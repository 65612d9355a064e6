//! External-program text extractor.
//!
//! Pipes the image into a configured OCR program's stdin and reads the
//! recognised text from its stdout, e.g. `tesseract stdin stdout`.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::extractor::{ExtractionError, TextExtractor};

/// Characters of stderr kept in a failure detail.
const MAX_STDERR_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: String,
    args: Vec<String>,
}

impl CommandExtractor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parse a whitespace-separated command line. `None` if it is blank.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl TextExtractor for CommandExtractor {
    fn name(&self) -> &str {
        &self.program
    }

    async fn extract(&self, image: &[u8]) -> Result<String, ExtractionError> {
        info!(program = %self.program, bytes = image.len(), "Running text extraction command");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ExtractionError::Unavailable(format!("failed to start '{}': {e}", self.program))
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            ExtractionError::Unavailable(format!("no stdin for '{}'", self.program))
        })?;

        // Feed stdin while stdout drains, so large images cannot deadlock on a full pipe.
        let feed = async move {
            let written = stdin.write_all(image).await;
            drop(stdin);
            written
        };
        let (written, output) = tokio::join!(feed, child.wait_with_output());

        if let Err(e) = written {
            // Programs that stop reading early close the pipe; the exit status decides.
            debug!(program = %self.program, error = %e, "Extraction command closed stdin early");
        }

        let output = output.map_err(|e| {
            ExtractionError::Unavailable(format!("failed to wait for '{}': {e}", self.program))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail: String = stderr.trim().chars().take(MAX_STDERR_CHARS).collect();
            let status = output.status.code().unwrap_or(-1);
            warn!(program = %self.program, status, "Extraction command failed");
            return Err(ExtractionError::Remote { status, detail });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(program = %self.program, chars = text.chars().count(), "Extraction command finished");
        Ok(text)
    }
}
