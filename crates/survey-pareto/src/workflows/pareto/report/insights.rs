use super::super::domain::DriverClassification;
use super::views::{AggregateInsights, RecurrentDriver, RowParetoReport};
use std::collections::HashMap;

pub const TOP_RISK_ROWS: usize = 5;
pub const TOP_RECURRENT_DRIVERS: usize = 5;

/// Cross-row insights. `reports` must be in original row order: every
/// tie-break below falls back to it.
pub fn aggregate_reports(reports: &[RowParetoReport]) -> AggregateInsights {
    let total_impact: f64 = reports.iter().map(|report| report.total_impact).sum();
    let average_impact = total_impact / reports.len().max(1) as f64;

    AggregateInsights {
        average_impact,
        highest_risk_rows: highest_impact_rows(reports),
        recurrent_drivers: recurrent_vital_drivers(reports),
    }
}

fn highest_impact_rows(reports: &[RowParetoReport]) -> Vec<RowParetoReport> {
    let mut ranked: Vec<&RowParetoReport> = reports.iter().collect();
    ranked.sort_by(|a, b| b.total_impact.total_cmp(&a.total_impact));
    ranked
        .into_iter()
        .take(TOP_RISK_ROWS)
        .cloned()
        .collect()
}

fn recurrent_vital_drivers(reports: &[RowParetoReport]) -> Vec<RecurrentDriver> {
    let mut occurrences: Vec<RecurrentDriver> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    let vital_questions = reports.iter().flat_map(|report| {
        report
            .drivers
            .iter()
            .filter(|driver| driver.classification == DriverClassification::Vital)
            .map(|driver| driver.question.as_str())
    });

    for question in vital_questions {
        match positions.get(question) {
            Some(&position) => occurrences[position].count += 1,
            None => {
                positions.insert(question, occurrences.len());
                occurrences.push(RecurrentDriver {
                    question: question.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable: equal counts stay in first-seen order.
    occurrences.sort_by(|a, b| b.count.cmp(&a.count));
    occurrences.truncate(TOP_RECURRENT_DRIVERS);
    occurrences
}

#[cfg(test)]
mod tests {
    use super::super::super::domain::{ParetoDriver, RiskLevel, SurveyRecord};
    use super::*;
    use std::sync::Arc;

    fn report(row_index: usize, total_impact: f64, vital: &[&str]) -> RowParetoReport {
        let drivers = vital
            .iter()
            .map(|question| ParetoDriver {
                question: question.to_string(),
                answer: "high".to_string(),
                impact: 0.5,
                share: 0.5,
                cumulative_share: 0.5,
                classification: DriverClassification::Vital,
            })
            .collect();

        RowParetoReport {
            row_index,
            identifier: format!("Row {}", row_index + 2),
            total_impact,
            normalized_impact: total_impact,
            drivers,
            recommendation: String::new(),
            risk_level: RiskLevel::Low,
            raw: Arc::new(SurveyRecord::new()),
        }
    }

    #[test]
    fn empty_run_has_zero_average_and_no_rankings() {
        let insights = aggregate_reports(&[]);
        assert_eq!(insights.average_impact, 0.0);
        assert!(insights.highest_risk_rows.is_empty());
        assert!(insights.recurrent_drivers.is_empty());
    }

    #[test]
    fn highest_rows_are_capped_sorted_and_stable() {
        let reports: Vec<_> = [1.0, 3.0, 2.0, 3.0, 0.5, 4.0, 2.0]
            .iter()
            .enumerate()
            .map(|(index, impact)| report(index, *impact, &[]))
            .collect();

        let insights = aggregate_reports(&reports);
        let order: Vec<_> = insights
            .highest_risk_rows
            .iter()
            .map(|report| report.row_index)
            .collect();
        assert_eq!(order, vec![5, 1, 3, 2, 6]);
        assert!((insights.average_impact - 15.5 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn recurrent_drivers_count_vital_occurrences_in_first_seen_order() {
        let reports = vec![
            report(0, 1.0, &["Cost", "Impact"]),
            report(1, 1.0, &["Impact", "Frequency"]),
            report(2, 1.0, &["Frequency", "Delay", "Scope"]),
            report(3, 1.0, &["Budget", "Staff"]),
        ];

        let insights = aggregate_reports(&reports);
        let summary: Vec<_> = insights
            .recurrent_drivers
            .iter()
            .map(|entry| (entry.question.as_str(), entry.count))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Impact", 2),
                ("Frequency", 2),
                ("Cost", 1),
                ("Delay", 1),
                ("Scope", 1),
            ]
        );
    }

    #[test]
    fn non_vital_drivers_are_not_counted() {
        let mut row = report(0, 1.0, &["Impact"]);
        row.drivers[0].classification = DriverClassification::Review;

        let insights = aggregate_reports(&[row]);
        assert!(insights.recurrent_drivers.is_empty());
    }
}
