use std::collections::HashMap;
use std::sync::OnceLock;

static QUALITATIVE_LEXICON: OnceLock<HashMap<String, f64>> = OnceLock::new();

const FALLBACK_SEVERITY: f64 = 0.4;

const HIGH_TOKENS: &[&str] = &["high", "alto", "alta"];
const MEDIUM_TOKENS: &[&str] = &["medium", "medio"];
const LOW_TOKENS: &[&str] = &["low", "bajo", "baja", "poco"];

/// Best-effort severity in `[0, 1]` for a free-text answer. Never fails.
pub fn normalize_answer(raw: &str) -> f64 {
    let clean = fold_answer(raw);
    if clean.is_empty() {
        return 0.0;
    }

    if let Some(score) = qualitative_lexicon().get(&clean) {
        return *score;
    }

    if let Some(number) = parse_number(&clean) {
        return scale_number(number);
    }

    if contains_any(&clean, HIGH_TOKENS) {
        return 0.85;
    }
    if contains_any(&clean, MEDIUM_TOKENS) {
        return 0.6;
    }
    if contains_any(&clean, LOW_TOKENS) {
        return 0.25;
    }

    FALLBACK_SEVERITY
}

/// Trims, lower-cases and strips accents. Inner whitespace is kept as is, so
/// "very  high" misses the lexicon and falls to the substring checks.
pub(crate) fn fold_answer(raw: &str) -> String {
    raw.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(strip_accent)
        .collect()
}

fn strip_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        other => other,
    }
}

fn parse_number(clean: &str) -> Option<f64> {
    let candidate = clean.replace(',', ".");
    candidate
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

// Answers arrive on 0-5, 0-10 or 0-100 scales; the magnitude picks the scale.
fn scale_number(value: f64) -> f64 {
    let scaled = if value > 10.0 {
        value / 100.0
    } else if value > 5.0 {
        value / 10.0
    } else {
        value / 5.0
    };
    scaled.clamp(0.0, 1.0)
}

fn contains_any(haystack: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| haystack.contains(token))
}

fn qualitative_lexicon() -> &'static HashMap<String, f64> {
    QUALITATIVE_LEXICON.get_or_init(|| {
        const TERMS: &[(&str, f64)] = &[
            ("very high", 1.0),
            ("muy alto", 1.0),
            ("high", 0.85),
            ("alto", 0.85),
            ("medium", 0.6),
            ("medio", 0.6),
            ("low", 0.25),
            ("bajo", 0.25),
            ("very low", 0.1),
            ("muy bajo", 0.1),
            ("yes", 0.8),
            ("si", 0.8),
            ("no", 0.2),
            ("critical", 1.0),
            ("critico", 1.0),
            ("relevant", 0.7),
            ("relevante", 0.7),
            ("neutral", 0.5),
            ("irrelevant", 0.2),
            ("irrelevante", 0.2),
        ];

        let mut map = HashMap::with_capacity(TERMS.len());
        for (term, score) in TERMS {
            map.insert(fold_answer(term), *score);
        }
        map
    })
}
