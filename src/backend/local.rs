use super::catalog::PatternCatalog;
use super::pandoc::Pandoc;
use super::redactor::Redactor;
use super::types::{
    BackendStatus, BatchRequest, FileOutcome, OutputFormat, PatternOption, SaveResponse,
};
use super::RedactionBackend;
use crate::config::Settings;
use crate::error::{BackendError, BackendResult};
use crate::utils::paths::{display_name, redacted_file_name};
use async_trait::async_trait;
use rfd::AsyncFileDialog;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::OnceCell;

const TEXT_EXTENSIONS: [&str; 2] = ["md", "txt"];
const CONVERTED_EXTENSIONS: [&str; 2] = ["docx", "rtf"];

/// In-process backend: native dialogs, the built-in pattern catalog and
/// pandoc for anything that is not plain text.
pub struct LocalBackend {
    pandoc: Pandoc,
    work_dir: PathBuf,
    status: OnceCell<BackendStatus>,
    batches: AtomicU64,
}

impl LocalBackend {
    pub fn new(settings: &Settings) -> Self {
        Self::with_parts(Pandoc::new(settings.pandoc_path.clone()), settings.work_dir())
    }

    pub fn with_parts(pandoc: Pandoc, work_dir: PathBuf) -> Self {
        Self {
            pandoc,
            work_dir,
            status: OnceCell::new(),
            batches: AtomicU64::new(0),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Removes every processed file. Called once when the window closes.
    pub fn cleanup(&self) {
        if !self.work_dir.exists() {
            return;
        }
        match std::fs::remove_dir_all(&self.work_dir) {
            Ok(()) => tracing::info!("Cleaned up work directory {}", self.work_dir.display()),
            Err(e) => tracing::error!(
                "Could not remove work directory {}: {}",
                self.work_dir.display(),
                e
            ),
        }
    }

    /// Fresh `batch-<n>` directory under the work dir. Earlier batches keep
    /// their outputs so their download buttons stay valid.
    async fn next_batch_dir(&self) -> BackendResult<PathBuf> {
        tokio::fs::create_dir_all(&self.work_dir).await?;
        loop {
            let n = self.batches.fetch_add(1, Ordering::Relaxed);
            let dir = self.work_dir.join(format!("batch-{}", n));
            match tokio::fs::create_dir(&dir).await {
                Ok(()) => return Ok(dir),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn process_file(
        &self,
        path: &Path,
        redactor: &Redactor,
        format: OutputFormat,
        out_dir: &Path,
    ) -> BackendResult<PathBuf> {
        let name = display_name(path);
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let text = if TEXT_EXTENSIONS.contains(&extension.as_str()) {
            let bytes = tokio::fs::read(path).await?;
            String::from_utf8_lossy(&bytes).into_owned()
        } else if CONVERTED_EXTENSIONS.contains(&extension.as_str()) {
            self.pandoc.to_markdown(path, &extension).await?
        } else {
            return Err(BackendError::Unsupported(name));
        };

        let redacted = redactor.redact(&text);
        tokio::fs::create_dir_all(out_dir).await?;
        let output_path = out_dir.join(redacted_file_name(&name, format.extension()));

        if format.needs_conversion() {
            self.pandoc.render(&redacted, format, &output_path).await?;
        } else {
            tokio::fs::write(&output_path, redacted).await?;
        }

        tracing::debug!("Wrote {}", output_path.display());
        Ok(output_path)
    }
}

#[async_trait]
impl RedactionBackend for LocalBackend {
    async fn initial_status(&self) -> BackendStatus {
        self.status
            .get_or_init(|| self.pandoc.probe())
            .await
            .clone()
    }

    async fn available_patterns(&self) -> BackendResult<Vec<PatternOption>> {
        Ok(PatternCatalog::options())
    }

    async fn select_files(&self) -> BackendResult<Vec<PathBuf>> {
        let picked = AsyncFileDialog::new()
            .set_title("Select documents to redact")
            .add_filter("All supported types", &["docx", "rtf", "md", "txt"])
            .add_filter("Word documents", &["docx"])
            .add_filter("Markdown files", &["md"])
            .add_filter("Text files", &["txt"])
            .add_filter("Rich Text Format", &["rtf"])
            .pick_files()
            .await;

        let paths: Vec<PathBuf> = picked
            .unwrap_or_default()
            .iter()
            .map(|handle| handle.path().to_path_buf())
            .collect();
        tracing::debug!("File dialog result: {:?}", paths);
        Ok(paths)
    }

    async fn process_batch(&self, request: BatchRequest) -> BackendResult<Vec<FileOutcome>> {
        tracing::info!(
            "Processing {} file(s) to .{} with patterns {:?} and {} custom keyword(s)",
            request.filepaths.len(),
            request.output_format,
            request.redaction_options.selected_patterns,
            request.redaction_options.custom_keywords.len()
        );

        let selection = PatternCatalog::compile(&request.redaction_options.selected_patterns)?;
        let redactor = Redactor::new(selection, &request.redaction_options.custom_keywords);
        let batch_dir = self.next_batch_dir().await?;

        // One directory per input so same-stem files never share an output path.
        let mut results = Vec::with_capacity(request.filepaths.len());
        for (index, path) in request.filepaths.iter().enumerate() {
            let original_name = display_name(path);
            let out_dir = batch_dir.join(index.to_string());
            match self
                .process_file(path, &redactor, request.output_format, &out_dir)
                .await
            {
                Ok(output_path) => results.push(FileOutcome::Processed {
                    original_name,
                    output_path,
                    output_format: request.output_format,
                }),
                Err(e) => {
                    tracing::error!("Error processing {}: {}", original_name, e);
                    results.push(FileOutcome::failed(original_name, e.to_string()));
                }
            }
        }

        Ok(results)
    }

    async fn save_processed_file(
        &self,
        output_path: &Path,
        suggested_name: &str,
        format: OutputFormat,
    ) -> BackendResult<SaveResponse> {
        if !tokio::fs::try_exists(output_path).await.unwrap_or(false) {
            tracing::error!("Processed file {} not found", output_path.display());
            return Ok(SaveResponse::error("Processed file not found."));
        }

        let file_name = redacted_file_name(suggested_name, format.extension());
        let mut dialog = AsyncFileDialog::new()
            .set_title("Save redacted file")
            .set_file_name(file_name.as_str());
        if let Some(dirs) = directories::UserDirs::new() {
            dialog = dialog.set_directory(dirs.home_dir());
        }

        let Some(target) = dialog.save_file().await else {
            tracing::info!("Save dialog cancelled");
            return Ok(SaveResponse::cancelled());
        };

        let target = target.path().to_path_buf();
        match tokio::fs::copy(output_path, &target).await {
            Ok(_) => {
                tracing::info!("Saved {} to {}", file_name, target.display());
                Ok(SaveResponse::saved(target))
            }
            Err(e) => {
                tracing::error!("Error saving to {}: {}", target.display(), e);
                Ok(SaveResponse::error(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::types::RedactionOptions;

    fn backend(dir: &Path) -> LocalBackend {
        LocalBackend::with_parts(
            Pandoc::new(Some(PathBuf::from("/nonexistent/redax-pandoc"))),
            dir.join("work"),
        )
    }

    fn request(paths: Vec<PathBuf>, format: OutputFormat) -> BatchRequest {
        BatchRequest {
            filepaths: paths,
            redaction_options: RedactionOptions {
                selected_patterns: vec!["redact_email_address".into()],
                custom_keywords: vec!["Acme".into()],
            },
            output_format: format,
        }
    }

    #[tokio::test]
    async fn redacts_text_files_into_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, "Acme contact: jo@example.com\n").unwrap();

        let backend = backend(dir.path());
        let results = backend
            .process_batch(request(vec![input], OutputFormat::Md))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        match &results[0] {
            FileOutcome::Processed {
                original_name,
                output_path,
                output_format,
            } => {
                assert_eq!(original_name, "notes.txt");
                assert_eq!(*output_format, OutputFormat::Md);
                assert!(output_path.ends_with("notes_redacted.md"));
                let written = std::fs::read_to_string(output_path).unwrap();
                assert_eq!(written, "[REDACTED] contact: [REDACTED]\n");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn reports_per_file_errors_in_request_order() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.md");
        let unsupported = dir.path().join("b.exe");
        let missing = dir.path().join("c.txt");
        let needs_pandoc = dir.path().join("d.docx");
        std::fs::write(&good, "Acme").unwrap();
        std::fs::write(&unsupported, "x").unwrap();
        std::fs::write(&needs_pandoc, "x").unwrap();

        let backend = backend(dir.path());
        let results = backend
            .process_batch(request(
                vec![good, unsupported, missing, needs_pandoc],
                OutputFormat::Txt,
            ))
            .await
            .unwrap();

        assert_eq!(results.len(), 4);
        assert!(results[0].is_success());
        assert_eq!(
            results[1],
            FileOutcome::failed("b.exe", "Unsupported file type: b.exe")
        );
        assert!(matches!(
            &results[2],
            FileOutcome::Failed { original_name: Some(n), .. } if n == "c.txt"
        ));
        assert!(matches!(
            &results[3],
            FileOutcome::Failed { error, .. } if error.contains("Pandoc not found")
        ));
    }

    #[tokio::test]
    async fn same_stem_inputs_get_distinct_outputs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a")).unwrap();
        std::fs::create_dir_all(dir.path().join("b")).unwrap();
        let first = dir.path().join("a").join("notes.txt");
        let second = dir.path().join("b").join("notes.md");
        std::fs::write(&first, "first file body").unwrap();
        std::fs::write(&second, "second file body").unwrap();

        let backend = backend(dir.path());
        let results = backend
            .process_batch(request(vec![first, second], OutputFormat::Md))
            .await
            .unwrap();

        let outputs: Vec<&PathBuf> = results
            .iter()
            .map(|r| match r {
                FileOutcome::Processed { output_path, .. } => output_path,
                other => panic!("unexpected outcome {:?}", other),
            })
            .collect();
        assert_ne!(outputs[0], outputs[1]);
        assert!(outputs.iter().all(|p| p.ends_with("notes_redacted.md")));
        assert_eq!(std::fs::read_to_string(outputs[0]).unwrap(), "first file body");
        assert_eq!(std::fs::read_to_string(outputs[1]).unwrap(), "second file body");
    }

    #[tokio::test]
    async fn later_batches_keep_earlier_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        let backend = backend(dir.path());

        std::fs::write(&input, "version one").unwrap();
        let earlier = backend
            .process_batch(request(vec![input.clone()], OutputFormat::Txt))
            .await
            .unwrap();
        std::fs::write(&input, "version two").unwrap();
        let later = backend
            .process_batch(request(vec![input], OutputFormat::Txt))
            .await
            .unwrap();

        let path_of = |r: &FileOutcome| match r {
            FileOutcome::Processed { output_path, .. } => output_path.clone(),
            other => panic!("unexpected outcome {:?}", other),
        };
        let (earlier, later) = (path_of(&earlier[0]), path_of(&later[0]));
        assert_ne!(earlier, later);
        assert_eq!(std::fs::read_to_string(earlier).unwrap(), "version one");
        assert_eq!(std::fs::read_to_string(later).unwrap(), "version two");
    }

    #[tokio::test]
    async fn pdf_output_without_pandoc_fails_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.txt");
        std::fs::write(&input, "Acme").unwrap();

        let results = backend(dir.path())
            .process_batch(request(vec![input], OutputFormat::Pdf))
            .await
            .unwrap();
        assert!(!results[0].is_success());
    }

    #[tokio::test]
    async fn saving_a_missing_file_is_an_error_response() {
        let dir = tempfile::tempdir().unwrap();
        let response = backend(dir.path())
            .save_processed_file(&dir.path().join("gone.md"), "gone.txt", OutputFormat::Md)
            .await
            .unwrap();
        assert_eq!(response, SaveResponse::error("Processed file not found."));
    }

    #[tokio::test]
    async fn catalog_and_status_are_served_locally() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(dir.path());
        assert_eq!(backend.available_patterns().await.unwrap().len(), 12);
        assert!(!backend.initial_status().await.ready);
    }

    #[test]
    fn cleanup_removes_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(dir.path());
        std::fs::create_dir_all(backend.work_dir()).unwrap();
        std::fs::write(backend.work_dir().join("x_redacted.md"), "x").unwrap();

        backend.cleanup();
        assert!(!backend.work_dir().exists());
    }
}
