use regex::Regex;
use std::sync::OnceLock;

static WEIGHT_RULES: OnceLock<Vec<WeightRule>> = OnceLock::new();

pub const BASE_WEIGHT: f64 = 1.0;

/// Semantic family a question label falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionCategory {
    Impact,
    Effort,
    Frequency,
    Satisfaction,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuestionWeight {
    pub category: QuestionCategory,
    pub weight: f64,
    /// A high answer lowers severity (e.g. high satisfaction).
    pub invert: bool,
}

impl QuestionWeight {
    const GENERAL: Self = Self {
        category: QuestionCategory::General,
        weight: BASE_WEIGHT,
        invert: false,
    };
}

struct WeightRule {
    pattern: Regex,
    weight: QuestionWeight,
}

/// Weight and inversion for a question label. The first matching rule wins.
pub fn resolve_weight(label: &str) -> QuestionWeight {
    weight_rules()
        .iter()
        .find(|rule| rule.pattern.is_match(label))
        .map(|rule| rule.weight)
        .unwrap_or(QuestionWeight::GENERAL)
}

fn weight_rules() -> &'static [WeightRule] {
    WEIGHT_RULES.get_or_init(|| {
        // Order matters: "Impact of the cost" is an impact question.
        const RULES: &[(&str, QuestionCategory, f64, bool)] = &[
            (
                r"(?i)impact|affect|loss|afecta|p[eé]rdida",
                QuestionCategory::Impact,
                1.4,
                false,
            ),
            (
                r"(?i)effort|cost|esfuerzo",
                QuestionCategory::Effort,
                0.8,
                true,
            ),
            (
                r"(?i)frequen|frecuen|repeti|recurren",
                QuestionCategory::Frequency,
                1.2,
                false,
            ),
            (
                r"(?i)satisf|experien",
                QuestionCategory::Satisfaction,
                1.1,
                true,
            ),
        ];

        RULES
            .iter()
            .map(|(pattern, category, weight, invert)| WeightRule {
                pattern: Regex::new(pattern).expect("weight rule pattern compiles"),
                weight: QuestionWeight {
                    category: *category,
                    weight: *weight,
                    invert: *invert,
                },
            })
            .collect()
    })
}
