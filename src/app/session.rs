use super::picker::PatternPicker;
use super::state::*;
use crate::backend::{
    parse_custom_keywords, BatchRequest, FileOutcome, OutputFormat, PatternOption,
    RedactionBackend, RedactionOptions, SaveOutcome, SaveResponse,
};
use crate::config::Settings;
use crate::error::BackendResult;
use crate::utils::paths::display_name;
use std::path::PathBuf;

/// Arguments for one save call, taken from a processed result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub output_path: PathBuf,
    pub original_name: String,
    pub format: OutputFormat,
}

/// A submitted batch. `generation` must be handed back to
/// [`RedactionSession::finish_processing`] with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBatch {
    pub generation: u64,
    pub request: BatchRequest,
}

/// All transient UI state for one window. Each user action has an async form
/// that awaits the backend directly and a `begin_*`/`finish_*` pair for
/// callers that run the backend call elsewhere.
#[derive(Debug, Clone)]
pub struct RedactionSession {
    max_files: usize,
    default_format: OutputFormat,
    selected_files: Vec<PathBuf>,
    pub picker: Option<PatternPicker>,
    pub custom_keywords: String,
    pub output_format: OutputFormat,
    results: Vec<FileOutcome>,
    output_visible: bool,
    status: StatusLine,
    processing: bool,
    batch_generation: u64,
}

impl RedactionSession {
    pub fn new(max_files: usize, default_format: OutputFormat) -> Self {
        Self {
            max_files,
            default_format,
            selected_files: Vec::new(),
            picker: None,
            custom_keywords: String::new(),
            output_format: default_format,
            results: Vec::new(),
            output_visible: false,
            status: StatusLine::default(),
            processing: false,
            batch_generation: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.max_files, settings.default_output_format)
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn selected_files(&self) -> &[PathBuf] {
        &self.selected_files
    }

    pub fn file_names(&self) -> Vec<String> {
        self.selected_files.iter().map(|p| display_name(p)).collect()
    }

    pub fn file_list_placeholder(&self) -> String {
        format!(
            "Upload documents for processing redactions (Max {}).",
            self.max_files
        )
    }

    pub fn results(&self) -> &[FileOutcome] {
        &self.results
    }

    pub fn output_visible(&self) -> bool {
        self.output_visible
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn selected_pattern_keys(&self) -> Vec<String> {
        self.picker
            .as_ref()
            .map(|p| p.selected_keys().to_vec())
            .unwrap_or_default()
    }

    pub fn redaction_options(&self) -> RedactionOptions {
        RedactionOptions {
            selected_patterns: self.selected_pattern_keys(),
            custom_keywords: parse_custom_keywords(&self.custom_keywords),
        }
    }

    pub fn reset(&mut self) {
        self.selected_files.clear();
        if let Some(picker) = self.picker.as_mut() {
            picker.clear_selection();
        }
        self.custom_keywords.clear();
        self.output_format = self.default_format;
        self.results.clear();
        self.output_visible = false;
        self.status = StatusLine::default();
        self.processing = false;
        self.batch_generation += 1;
        tracing::info!("Application state reset");
    }

    pub fn finish_pattern_load(&mut self, result: BackendResult<Vec<PatternOption>>) {
        match result {
            Ok(options) if !options.is_empty() => {
                tracing::info!("Redaction options loaded ({} patterns)", options.len());
                self.picker = Some(PatternPicker::new(options));
            }
            Ok(_) => {
                tracing::error!("Backend returned no redaction patterns");
                self.status = StatusLine::new(StatusTone::Error, PATTERNS_EMPTY_TEXT);
            }
            Err(e) => {
                tracing::error!("Error loading redaction patterns: {}", e);
                self.status = StatusLine::new(StatusTone::Error, PATTERNS_ERROR_TEXT);
            }
        }
    }

    pub fn finish_file_selection(&mut self, result: BackendResult<Vec<PathBuf>>) {
        let paths = match result {
            Ok(paths) => paths,
            Err(e) => {
                tracing::error!("Error selecting files: {}", e);
                self.status = StatusLine::new(StatusTone::Error, SELECT_ERROR_TEXT);
                return;
            }
        };

        if paths.len() > self.max_files {
            tracing::warn!(
                "Rejected selection of {} files (max {})",
                paths.len(),
                self.max_files
            );
            self.status = StatusLine::new(
                StatusTone::Warning,
                format!(
                    "Too many files selected. Please select a maximum of {} files.",
                    self.max_files
                ),
            );
            return;
        }

        if paths.is_empty() {
            self.status = if self.selected_files.is_empty() {
                StatusLine::default()
            } else {
                StatusLine::new(
                    StatusTone::Info,
                    format!(
                        "{} file(s) previously selected. Selection cancelled.",
                        self.selected_files.len()
                    ),
                )
            };
            return;
        }

        tracing::info!("Selected {} file(s)", paths.len());
        self.selected_files = paths;
        self.status = StatusLine::new(
            StatusTone::Info,
            format!(
                "{} file(s) selected. Ready to process.",
                self.selected_files.len()
            ),
        );
    }

    /// Checks the guards and marks the session busy. `None` means no backend
    /// call should be made.
    pub fn begin_processing(&mut self) -> Option<PendingBatch> {
        if self.processing {
            tracing::warn!("Batch already in flight, ignoring submit");
            return None;
        }
        if self.selected_files.is_empty() {
            self.status = StatusLine::new(StatusTone::Warning, NO_FILES_TEXT);
            return None;
        }
        if self.selected_files.len() > self.max_files {
            self.status = StatusLine::new(
                StatusTone::Warning,
                format!(
                    "Cannot process more than {} files. Please reduce your selection.",
                    self.max_files
                ),
            );
            return None;
        }

        let redaction_options = self.redaction_options();
        if redaction_options.is_empty() {
            self.status = StatusLine::new(StatusTone::Warning, NO_CRITERIA_TEXT);
            return None;
        }

        self.status = StatusLine::busy(PROCESSING_TEXT);
        self.processing = true;
        self.output_visible = false;
        self.results.clear();
        self.batch_generation += 1;

        Some(PendingBatch {
            generation: self.batch_generation,
            request: BatchRequest {
                filepaths: self.selected_files.clone(),
                redaction_options,
                output_format: self.output_format,
            },
        })
    }

    /// Results of a batch that was reset away or superseded are dropped.
    pub fn finish_processing(
        &mut self,
        generation: u64,
        result: BackendResult<Vec<FileOutcome>>,
    ) {
        if generation != self.batch_generation {
            tracing::info!(
                "Discarding result of stale batch {} (current {})",
                generation,
                self.batch_generation
            );
            return;
        }

        match result {
            Ok(results) if !results.is_empty() => {
                let all_successful = results.iter().all(FileOutcome::is_success);
                self.results = results;
                self.output_visible = true;
                self.status = if all_successful {
                    StatusLine::new(StatusTone::Success, ALL_PROCESSED_TEXT)
                } else {
                    StatusLine::new(StatusTone::Warning, SOME_FAILED_TEXT)
                };
            }
            Ok(_) => {
                tracing::error!("Batch returned no results");
                self.status = StatusLine::new(StatusTone::Error, NO_RESULTS_TEXT);
            }
            Err(e) => {
                tracing::error!("Error processing batch: {}", e);
                self.status = StatusLine::new(
                    StatusTone::Error,
                    format!("Critical error during processing: {}", e),
                );
            }
        }

        self.processing = false;
        self.status.busy = false;
    }

    /// `None` for out-of-range indices and failed entries.
    pub fn begin_download(&self, index: usize) -> Option<DownloadRequest> {
        match self.results.get(index)? {
            FileOutcome::Processed {
                original_name,
                output_path,
                output_format,
            } => Some(DownloadRequest {
                output_path: output_path.clone(),
                original_name: original_name.clone(),
                format: *output_format,
            }),
            FileOutcome::Failed { .. } => None,
        }
    }

    pub fn finish_download(
        &mut self,
        request: &DownloadRequest,
        result: BackendResult<SaveResponse>,
    ) {
        let name = &request.original_name;
        let outcome = match result {
            Ok(response) => response.outcome(),
            Err(e) => {
                tracing::error!("Error saving {}: {}", name, e);
                SaveOutcome::Failed(e.to_string())
            }
        };

        self.status = match outcome {
            SaveOutcome::Saved(path) => {
                if let Some(path) = path {
                    tracing::info!("Saved {} to {}", name, path.display());
                }
                StatusLine::new(StatusTone::Success, format!("File '{}' saved.", name))
            }
            SaveOutcome::Cancelled => StatusLine::new(
                StatusTone::Warning,
                format!("Save cancelled for '{}'.", name),
            ),
            SaveOutcome::Failed(message) => StatusLine::new(
                StatusTone::Error,
                format!("Error saving '{}': {}", name, message),
            ),
        };
    }

    pub async fn initialize(&mut self, backend: &dyn RedactionBackend) {
        let result = backend.available_patterns().await;
        self.finish_pattern_load(result);
    }

    pub async fn select_files(&mut self, backend: &dyn RedactionBackend) {
        let result = backend.select_files().await;
        self.finish_file_selection(result);
    }

    pub async fn process_files(&mut self, backend: &dyn RedactionBackend) {
        if let Some(batch) = self.begin_processing() {
            let result = backend.process_batch(batch.request).await;
            self.finish_processing(batch.generation, result);
        }
    }

    pub async fn download(&mut self, backend: &dyn RedactionBackend, index: usize) {
        let Some(request) = self.begin_download(index) else {
            return;
        };
        let result = backend
            .save_processed_file(&request.output_path, &request.original_name, request.format)
            .await;
        self.finish_download(&request, result);
    }
}
