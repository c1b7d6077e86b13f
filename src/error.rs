use thiserror::Error;

/// Failures raised at the backend boundary. The session never inspects the
/// variant, it only logs the error and shows a status line for it.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file type: {0}")]
    Unsupported(String),

    #[error("Conversion failed: {0}")]
    Conversion(String),

    #[error("Invalid redaction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

pub type BackendResult<T> = Result<T, BackendError>;
