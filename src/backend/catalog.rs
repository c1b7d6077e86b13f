use super::types::PatternOption;
use crate::error::BackendResult;
use regex::Regex;

pub const CREDENTIAL_LINES_KEY: &str = "redact_credential_lines";

const ACRONYMS: [&str; 7] = ["AU", "IP", "IPS", "TFN", "ABN", "BSB", "DOB"];

/// Built-in patterns in display order. `None` marks an entry that switches on
/// line-level handling instead of a regex.
const PATTERNS: &[(&str, Option<&str>)] = &[
    (
        "redact_credit_cards",
        Some(r"\b(?:(?:\d[ -]*?){13,16}|(?:\d{4} ){3}\d{4}|\d{13,16})\b"),
    ),
    (
        "redact_email_address",
        Some(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}\b"),
    ),
    ("redact_ips", Some(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b")),
    ("redact_au_tfn", Some(r"\b\d{3}\s?\d{3}\s?\d{3}\b")),
    ("redact_au_medicare", Some(r"\b[2-6]\d{3}\s?\d{5}\s?\d\b")),
    (
        "redact_dob",
        Some(r"\b(?:\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4}|\d{4}[-/.]\d{1,2}[-/.]\d{1,2})\b"),
    ),
    ("redact_au_abn", Some(r"\b\d{2}\s?\d{3}\s?\d{3}\s?\d{3}\b")),
    (
        "redact_au_tel",
        Some(r"(?:(?:\+?61\s?)?\(?0?[23478]\)?\s?\d{4}\s?\d{4}|\b1[389]\s?\d{2}\s?\d{2}\s?\d{2}|\b1300\s?\d{3}\s?\d{3})\b"),
    ),
    (
        "redact_au_bsb",
        Some(r"\b(?:BSB\s*[:\-]?\s*)?(?:\d{3}[-\s]?\d{3}|\d{6})\b"),
    ),
    (
        "redact_au_account_number",
        Some(r"\b(?:Acct\s*[:\-]?\s*|Account\s*No\s*[:\-]?\s*)?\d{5,9}\b"),
    ),
    (
        "redact_au_mobile",
        Some(r"(?:\b04|\+?61\s*4|\b0011\s*61\s*4)(?:\d{2}\s?\d{3}\s?\d{3}|\d{8})\b"),
    ),
    (CREDENTIAL_LINES_KEY, None),
];

/// Patterns picked for one batch, ready to hand to the redactor.
#[derive(Debug, Default)]
pub struct CompiledSelection {
    pub patterns: Vec<Regex>,
    pub credential_lines: bool,
}

pub struct PatternCatalog;

impl PatternCatalog {
    pub fn options() -> Vec<PatternOption> {
        PATTERNS
            .iter()
            .map(|(key, _)| PatternOption {
                key: key.to_string(),
                label: label_for_key(key),
            })
            .collect()
    }

    pub fn compile(keys: &[String]) -> BackendResult<CompiledSelection> {
        let mut selection = CompiledSelection::default();

        for key in keys {
            match PATTERNS.iter().find(|(k, _)| k == key) {
                Some((_, Some(pattern))) => {
                    selection.patterns.push(Regex::new(pattern)?);
                    tracing::debug!("Compiled regex for pattern key: {}", key);
                }
                Some((_, None)) => selection.credential_lines = true,
                None => tracing::warn!("Unknown pattern key selected: {}", key),
            }
        }

        Ok(selection)
    }
}

/// `redact_au_tfn` -> `Redact AU TFN`
pub fn label_for_key(key: &str) -> String {
    let mut parts = key.split('_').filter(|p| !p.is_empty()).peekable();
    if parts
        .peek()
        .is_some_and(|first| first.eq_ignore_ascii_case("redact"))
    {
        parts.next();
    }

    let mut words = vec!["Redact".to_string()];
    for part in parts {
        let upper = part.to_uppercase();
        if ACRONYMS.contains(&upper.as_str()) {
            words.push(upper);
        } else {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                words.push(first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect());
            }
        }
    }
    words.join(" ")
}
