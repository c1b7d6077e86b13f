mod catalog;
mod local;
#[cfg(test)]
pub mod mock;
mod pandoc;
mod redactor;
mod types;

use crate::error::BackendResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub use catalog::{label_for_key, PatternCatalog};
pub use local::LocalBackend;
pub use pandoc::Pandoc;
pub use redactor::Redactor;
pub use types::{
    parse_custom_keywords, BackendStatus, BatchRequest, FileOutcome, OutputFormat, PatternOption,
    RedactionOptions, SaveOutcome, SaveResponse,
};

/// Everything the UI needs from the outside world: the pattern catalog,
/// a file picker, the batch processor and a way to save results.
#[async_trait]
pub trait RedactionBackend: Send + Sync {
    async fn initial_status(&self) -> BackendStatus;

    async fn available_patterns(&self) -> BackendResult<Vec<PatternOption>>;

    /// Empty when the user cancels the dialog.
    async fn select_files(&self) -> BackendResult<Vec<PathBuf>>;

    /// One outcome per input path, in request order.
    async fn process_batch(&self, request: BatchRequest) -> BackendResult<Vec<FileOutcome>>;

    async fn save_processed_file(
        &self,
        output_path: &Path,
        suggested_name: &str,
        format: OutputFormat,
    ) -> BackendResult<SaveResponse>;
}
