#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Idle,
    Info,
    Success,
    Warning,
    Error,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: StatusTone,
    pub busy: bool,
}

pub const READY_TEXT: &str = "Ready. Select files to begin.";
pub const PROCESSING_TEXT: &str = "Processing... Please wait.";
pub const ALL_PROCESSED_TEXT: &str = "Processing complete. All files processed successfully.";
pub const SOME_FAILED_TEXT: &str = "Processing complete. Some files had errors.";
pub const NO_RESULTS_TEXT: &str =
    "Processing finished, but no results were returned. Check the log for backend errors.";
pub const NO_FILES_TEXT: &str = "Please select files before processing.";
pub const NO_CRITERIA_TEXT: &str =
    "Please select at least one redaction option or provide custom keywords.";
pub const SELECT_ERROR_TEXT: &str = "Error selecting files. Please try again.";
pub const PATTERNS_EMPTY_TEXT: &str = "Error: Could not load redaction types.";
pub const PATTERNS_ERROR_TEXT: &str = "Error loading redaction options.";

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(StatusTone::Idle, READY_TEXT)
    }
}

impl StatusLine {
    pub fn new(tone: StatusTone, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone,
            busy: false,
        }
    }

    pub fn busy(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Busy,
            busy: true,
        }
    }
}
