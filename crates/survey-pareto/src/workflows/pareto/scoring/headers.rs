use regex::Regex;
use std::sync::OnceLock;

static SKIP_HEADER_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

/// Columns that identify the respondent or hold free text are never scored.
pub fn should_skip_header(label: &str) -> bool {
    let label = label.trim();
    skip_header_patterns()
        .iter()
        .any(|pattern| pattern.is_match(label))
}

fn skip_header_patterns() -> &'static [Regex] {
    SKIP_HEADER_PATTERNS.get_or_init(|| {
        const PATTERNS: &[&str] = &[
            r"(?i)timestamp|marca temporal",
            r"(?i)e-?mail|correo",
            r"(?i)\bname\b|\bnombre\b",
            r"(?i)^id$",
            r"(?i)comment|comentario|observa",
        ];

        PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("header pattern compiles"))
            .collect()
    })
}
