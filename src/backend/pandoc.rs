use super::types::{BackendStatus, OutputFormat};
use crate::error::{BackendError, BackendResult};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Thin wrapper over the `pandoc` executable used for non-text documents.
#[derive(Debug, Clone)]
pub struct Pandoc {
    program: PathBuf,
}

impl Default for Pandoc {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Pandoc {
    pub fn new(program: Option<PathBuf>) -> Self {
        Self {
            program: program.unwrap_or_else(|| PathBuf::from("pandoc")),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub async fn probe(&self) -> BackendStatus {
        match Command::new(&self.program).arg("--version").output().await {
            Ok(output) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let version = stdout.lines().next().unwrap_or("pandoc").trim().to_string();
                tracing::info!("Found {} at {}", version, self.program.display());
                BackendStatus {
                    message: format!("Pandoc ready ({}).", version),
                    ready: true,
                }
            }
            Ok(output) => {
                tracing::warn!("pandoc --version exited with {}", output.status);
                BackendStatus {
                    message: format!("Pandoc unusable (exit status {}).", output.status),
                    ready: false,
                }
            }
            Err(e) => {
                tracing::warn!("Pandoc not found at {}: {}", self.program.display(), e);
                BackendStatus {
                    message: "Pandoc not found. Only .md and .txt files can be processed to .md or .txt."
                        .to_string(),
                    ready: false,
                }
            }
        }
    }

    /// Converts a document to markdown, returning the text.
    pub async fn to_markdown(&self, input: &Path, from: &str) -> BackendResult<String> {
        let output = Command::new(&self.program)
            .arg("-f")
            .arg(from)
            .arg("-t")
            .arg("markdown_strict")
            .arg("--wrap=none")
            .arg(input)
            .output()
            .await
            .map_err(|e| self.launch_error(e))?;

        if !output.status.success() {
            return Err(BackendError::Conversion(format!(
                "pandoc could not read {}: {}",
                input.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Renders markdown into `output`; the target format follows its extension.
    pub async fn render(
        &self,
        markdown: &str,
        format: OutputFormat,
        output: &Path,
    ) -> BackendResult<()> {
        let mut command = Command::new(&self.program);
        command
            .arg("-f")
            .arg("markdown")
            .arg("--standalone")
            .arg("-o")
            .arg(output);
        if format == OutputFormat::Pdf {
            command.arg("--toc");
        }

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.launch_error(e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(markdown.as_bytes()).await?;
        }

        let result = child.wait_with_output().await?;
        if !result.status.success() {
            return Err(BackendError::Conversion(format!(
                "pandoc could not write .{}: {}",
                format,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }
        Ok(())
    }

    fn launch_error(&self, e: std::io::Error) -> BackendError {
        BackendError::Unavailable(format!(
            "Pandoc not found/executable at {}: {}",
            self.program.display(),
            e
        ))
    }
}
