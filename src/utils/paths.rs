use std::path::Path;

/// Last path segment, splitting on both separators so Windows paths display
/// correctly everywhere.
pub fn display_name(path: &Path) -> String {
    let raw = path.to_string_lossy();
    raw.rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// `report.docx` + `pdf` -> `report_redacted.pdf`
pub fn redacted_file_name(original_name: &str, extension: &str) -> String {
    let stem = Path::new(original_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| original_name.to_string());
    format!("{}_redacted.{}", stem, extension)
}
