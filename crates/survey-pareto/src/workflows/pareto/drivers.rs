use super::domain::{DriverClassification, ParetoDriver, SurveyRecord};
use super::scoring::{normalize_answer, resolve_weight, should_skip_header};

/// Impacts below this are noise rather than drivers.
pub const IMPACT_FLOOR: f64 = 0.05;
/// Cumulative share up to which drivers are the "vital few".
pub const VITAL_CUMULATIVE_SHARE: f64 = 0.8;
/// Past the vital line, drivers with at least this share still merit review.
pub const REVIEW_SHARE: f64 = 0.1;

struct ScoredAnswer<'a> {
    question: &'a str,
    answer: &'a str,
    impact: f64,
}

/// Ranked, classified drivers for one row, highest impact first.
///
/// Ties keep column order. A row whose answers all fall under
/// [`IMPACT_FLOOR`] has no drivers.
pub fn compute_drivers(record: &SurveyRecord) -> Vec<ParetoDriver> {
    let mut scored: Vec<ScoredAnswer<'_>> = record
        .iter()
        .filter(|(question, _)| !question.trim().is_empty() && !should_skip_header(question))
        .map(|(question, answer)| ScoredAnswer {
            question,
            answer,
            impact: weighted_impact(question, answer),
        })
        .filter(|scored| scored.impact >= IMPACT_FLOOR)
        .collect();

    let total_impact: f64 = scored.iter().map(|scored| scored.impact).sum();
    if scored.is_empty() || total_impact <= 0.0 {
        return Vec::new();
    }

    // `sort_by` is stable, which keeps column order among equal impacts.
    scored.sort_by(|a, b| b.impact.total_cmp(&a.impact));

    let mut cumulative = 0.0;
    scored
        .into_iter()
        .map(|scored| {
            cumulative += scored.impact;
            let share = scored.impact / total_impact;
            let cumulative_share = cumulative / total_impact;

            ParetoDriver {
                question: scored.question.to_string(),
                answer: scored.answer.to_string(),
                impact: scored.impact,
                share,
                cumulative_share,
                classification: classify(share, cumulative_share),
            }
        })
        .collect()
}

pub(crate) fn weighted_impact(question: &str, answer: &str) -> f64 {
    let weight = resolve_weight(question);
    let normalized = normalize_answer(answer);
    let severity = if weight.invert {
        1.0 - normalized
    } else {
        normalized
    };
    severity * weight.weight
}

// A driver landing exactly on the 80% line is still vital.
fn classify(share: f64, cumulative_share: f64) -> DriverClassification {
    if cumulative_share <= VITAL_CUMULATIVE_SHARE {
        DriverClassification::Vital
    } else if share >= REVIEW_SHARE {
        DriverClassification::Review
    } else {
        DriverClassification::Maintain
    }
}
