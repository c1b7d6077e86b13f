use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const SAVE_CANCELLED_MESSAGE: &str = "Save cancelled.";
pub const UNKNOWN_SAVE_ERROR: &str = "Unknown save error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternOption {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Md,
    Txt,
    Pdf,
    Docx,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Md,
        OutputFormat::Txt,
        OutputFormat::Pdf,
        OutputFormat::Docx,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Md => "md",
            OutputFormat::Txt => "txt",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Md => "Markdown (.md)",
            OutputFormat::Txt => "Plain text (.txt)",
            OutputFormat::Pdf => "PDF (.pdf)",
            OutputFormat::Docx => "Word document (.docx)",
        }
    }

    /// Formats that need pandoc to render.
    pub fn needs_conversion(&self) -> bool {
        matches!(self, OutputFormat::Pdf | OutputFormat::Docx)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionOptions {
    #[serde(default)]
    pub selected_patterns: Vec<String>,
    #[serde(default)]
    pub custom_keywords: Vec<String>,
}

impl RedactionOptions {
    pub fn is_empty(&self) -> bool {
        self.selected_patterns.is_empty() && self.custom_keywords.is_empty()
    }
}

/// Splits comma separated keyword text, trimming each entry and dropping
/// the empty ones.
pub fn parse_custom_keywords(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub filepaths: Vec<PathBuf>,
    pub redaction_options: RedactionOptions,
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// One entry of a batch response. Any object carrying `error` is a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileOutcome {
    Failed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        original_name: Option<String>,
        error: String,
    },
    Processed {
        original_name: String,
        output_path: PathBuf,
        output_format: OutputFormat,
    },
}

impl FileOutcome {
    pub fn failed(original_name: impl Into<String>, error: impl Into<String>) -> Self {
        FileOutcome::Failed {
            original_name: Some(original_name.into()),
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Processed { .. })
    }

    /// Line shown in the output list for this entry.
    pub fn summary(&self) -> String {
        match self {
            FileOutcome::Processed {
                original_name,
                output_format,
                ..
            } => format!("{} (redacted to .{})", original_name, output_format),
            FileOutcome::Failed {
                original_name,
                error,
            } => format!(
                "Error: {} - {}",
                original_name.as_deref().unwrap_or("unknown file"),
                error
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(Option<PathBuf>),
    Cancelled,
    Failed(String),
}

impl SaveResponse {
    pub fn saved(path: PathBuf) -> Self {
        Self {
            success: true,
            path: Some(path),
            ..Default::default()
        }
    }

    pub fn cancelled() -> Self {
        Self {
            message: Some(SAVE_CANCELLED_MESSAGE.to_string()),
            ..Default::default()
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn outcome(&self) -> SaveOutcome {
        if self.success {
            SaveOutcome::Saved(self.path.clone())
        } else if self.message.as_deref() == Some(SAVE_CANCELLED_MESSAGE) {
            SaveOutcome::Cancelled
        } else {
            SaveOutcome::Failed(
                self.error
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_SAVE_ERROR.to_string()),
            )
        }
    }
}

/// Readiness of the document converter, shown once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendStatus {
    pub message: String,
    pub ready: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keywords_are_trimmed_and_empties_dropped() {
        assert_eq!(parse_custom_keywords("a, b ,,c"), vec!["a", "b", "c"]);
        assert!(parse_custom_keywords(" , ,").is_empty());
        assert!(parse_custom_keywords("").is_empty());
    }

    #[test]
    fn batch_entries_deserialize_from_backend_json() {
        let results: Vec<FileOutcome> = serde_json::from_value(json!([
            {"original_name": "a.txt", "output_path": "/tmp/a_redacted.md", "output_format": "md"},
            {"original_name": "b.exe", "error": "Unsupported file type: b.exe"},
            {"error": "boom"}
        ]))
        .unwrap();

        assert!(results[0].is_success());
        assert_eq!(results[1].summary(), "Error: b.exe - Unsupported file type: b.exe");
        assert_eq!(results[2].summary(), "Error: unknown file - boom");
        assert_eq!(results[0].summary(), "a.txt (redacted to .md)");
    }

    #[test]
    fn batch_request_uses_backend_field_names() {
        let request = BatchRequest {
            filepaths: vec![PathBuf::from("/docs/a.txt")],
            redaction_options: RedactionOptions {
                selected_patterns: vec!["redact_ips".into()],
                custom_keywords: vec!["acme".into()],
            },
            output_format: OutputFormat::Pdf,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["output_format"], "pdf");
        assert_eq!(value["redaction_options"]["selected_patterns"][0], "redact_ips");
        assert_eq!(value["redaction_options"]["custom_keywords"][0], "acme");
        assert_eq!(value["filepaths"][0], "/docs/a.txt");
    }

    #[test]
    fn save_response_maps_to_three_outcomes() {
        let saved: SaveResponse =
            serde_json::from_value(json!({"success": true, "path": "/home/u/a.md"})).unwrap();
        assert_eq!(
            saved.outcome(),
            SaveOutcome::Saved(Some(PathBuf::from("/home/u/a.md")))
        );

        let cancelled: SaveResponse =
            serde_json::from_value(json!({"success": false, "message": "Save cancelled."})).unwrap();
        assert_eq!(cancelled.outcome(), SaveOutcome::Cancelled);

        let failed: SaveResponse =
            serde_json::from_value(json!({"error": "disk full"})).unwrap();
        assert_eq!(failed.outcome(), SaveOutcome::Failed("disk full".into()));

        assert_eq!(
            SaveResponse::default().outcome(),
            SaveOutcome::Failed(UNKNOWN_SAVE_ERROR.into())
        );
    }
}
