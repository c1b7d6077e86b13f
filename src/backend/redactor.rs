use super::catalog::CompiledSelection;
use regex::Regex;

pub const REDACTED: &str = "[REDACTED]";
pub const REDACTED_LINE: &str = "[REDACTED LINE]";

const CREDENTIAL_KEYWORDS: &[&str] = &[
    "password",
    "pwd",
    "secret",
    "username",
    "user name",
    "login",
    "user id",
    "credential",
    "credentials",
    "authorization",
    "bearer token",
    "api key",
    "client secret",
    "token",
    "auth key",
    "private key",
    "secret key",
    "access key",
];

/// Applies line blanking, then regex patterns, then literal keywords.
#[derive(Debug, Default)]
pub struct Redactor {
    patterns: Vec<Regex>,
    keywords: Vec<String>,
    credential_lines: bool,
}

impl Redactor {
    pub fn new(selection: CompiledSelection, keywords: &[String]) -> Self {
        Self {
            patterns: selection.patterns,
            keywords: keywords.iter().filter(|k| !k.is_empty()).cloned().collect(),
            credential_lines: selection.credential_lines,
        }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut output = if self.credential_lines {
            text.lines()
                .map(|line| {
                    if is_credential_line(line) {
                        REDACTED_LINE
                    } else {
                        line
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            text.to_string()
        };

        for pattern in &self.patterns {
            output = pattern.replace_all(&output, REDACTED).into_owned();
        }

        for keyword in &self.keywords {
            output = output.replace(keyword.as_str(), REDACTED);
        }

        output
    }
}

fn is_credential_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    CREDENTIAL_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::catalog::PatternCatalog;

    fn redactor(keys: &[&str], keywords: &[&str]) -> Redactor {
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let keywords: Vec<String> = keywords.iter().map(|k| k.to_string()).collect();
        Redactor::new(PatternCatalog::compile(&keys).unwrap(), &keywords)
    }

    #[test]
    fn replaces_pattern_matches() {
        let r = redactor(&["redact_email_address", "redact_ips"], &[]);
        assert_eq!(
            r.redact("mail jo@example.com from 10.0.0.12 now"),
            "mail [REDACTED] from [REDACTED] now"
        );
    }

    #[test]
    fn replaces_custom_keywords_literally() {
        let r = redactor(&[], &["Acme Corp", "Project X"]);
        assert_eq!(
            r.redact("Acme Corp owns Project X."),
            "[REDACTED] owns [REDACTED]."
        );
    }

    #[test]
    fn blanks_lines_mentioning_credentials() {
        let r = redactor(&["redact_credential_lines"], &[]);
        let text = "host: db1\nPassword = hunter2\nport: 5432\nAPI Key: abc";
        assert_eq!(
            r.redact(text),
            "host: db1\n[REDACTED LINE]\nport: 5432\n[REDACTED LINE]"
        );
    }

    #[test]
    fn leaves_text_alone_without_criteria() {
        let r = Redactor::default();
        assert_eq!(r.redact("nothing to hide"), "nothing to hide");
    }

    #[test]
    fn line_blanking_runs_before_keywords() {
        let r = redactor(&["redact_credential_lines"], &["LINE"]);
        assert_eq!(r.redact("token: x"), "[REDACTED [REDACTED]]");
    }
}
