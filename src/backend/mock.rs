use super::{
    BackendStatus, BatchRequest, FileOutcome, OutputFormat, PatternOption, RedactionBackend,
    SaveResponse,
};
use crate::error::{BackendError, BackendResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Patterns,
    SelectFiles,
    Batch(BatchRequest),
    Save(PathBuf, String, OutputFormat),
}

/// Scripted backend for session tests. Each queue is popped once per call;
/// `None` entries produce an `Unavailable` error.
#[derive(Default)]
pub struct MockBackend {
    pub patterns: Mutex<VecDeque<Option<Vec<PatternOption>>>>,
    pub selections: Mutex<VecDeque<Option<Vec<PathBuf>>>>,
    pub batches: Mutex<VecDeque<Option<Vec<FileOutcome>>>>,
    pub saves: Mutex<VecDeque<Option<SaveResponse>>>,
    pub calls: Mutex<Vec<Call>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patterns(self, patterns: Option<Vec<PatternOption>>) -> Self {
        self.patterns.lock().unwrap().push_back(patterns);
        self
    }

    pub fn with_selection(self, selection: Option<Vec<PathBuf>>) -> Self {
        self.selections.lock().unwrap().push_back(selection);
        self
    }

    pub fn with_batch(self, batch: Option<Vec<FileOutcome>>) -> Self {
        self.batches.lock().unwrap().push_back(batch);
        self
    }

    pub fn with_save(self, save: Option<SaveResponse>) -> Self {
        self.saves.lock().unwrap().push_back(save);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn batch_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Batch(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn next<T>(queue: &Mutex<VecDeque<Option<T>>>, what: &str) -> BackendResult<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .flatten()
        .ok_or_else(|| BackendError::Unavailable(format!("mock {} failed", what)))
}

#[async_trait]
impl RedactionBackend for MockBackend {
    async fn initial_status(&self) -> BackendStatus {
        BackendStatus {
            message: "Mock backend ready.".to_string(),
            ready: true,
        }
    }

    async fn available_patterns(&self) -> BackendResult<Vec<PatternOption>> {
        self.record(Call::Patterns);
        next(&self.patterns, "catalog")
    }

    async fn select_files(&self) -> BackendResult<Vec<PathBuf>> {
        self.record(Call::SelectFiles);
        next(&self.selections, "dialog")
    }

    async fn process_batch(&self, request: BatchRequest) -> BackendResult<Vec<FileOutcome>> {
        self.record(Call::Batch(request));
        next(&self.batches, "batch")
    }

    async fn save_processed_file(
        &self,
        output_path: &Path,
        suggested_name: &str,
        format: OutputFormat,
    ) -> BackendResult<SaveResponse> {
        self.record(Call::Save(
            output_path.to_path_buf(),
            suggested_name.to_string(),
            format,
        ));
        next(&self.saves, "save")
    }
}
