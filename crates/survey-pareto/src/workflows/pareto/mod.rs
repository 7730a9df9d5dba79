//! Weighted 80/20 analysis of survey rows.
//!
//! Each answer becomes a driver whose impact is `severity * weight`; the
//! drivers that make up the first 80% of a row's impact are its "vital few".
//! Rows are then ranked and their vital drivers tallied across the run.

pub mod domain;
mod drivers;
pub mod report;
pub mod scoring;

pub use domain::{DriverClassification, ParetoDriver, RiskLevel, SurveyRecord};
pub use drivers::{compute_drivers, IMPACT_FLOOR, REVIEW_SHARE, VITAL_CUMULATIVE_SHARE};
pub use report::views::{AggregateInsights, ParetoAnalysis, RecurrentDriver, RowParetoReport};

use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

/// Analyzes a fully materialized, ordered set of records.
///
/// Pure: the same input always produces the same output. Rows are scored in
/// parallel but reports come back in input order.
pub fn analyze(records: &[Arc<SurveyRecord>]) -> ParetoAnalysis {
    let reports: Vec<RowParetoReport> = records
        .par_iter()
        .enumerate()
        .map(|(row_index, record)| report::analyze_row(row_index, record))
        .collect();

    let aggregate = report::aggregate_reports(&reports);

    info!(
        rows = reports.len(),
        average_impact = aggregate.average_impact,
        recurrent_drivers = aggregate.recurrent_drivers.len(),
        "pareto analysis complete"
    );

    ParetoAnalysis { reports, aggregate }
}

/// Convenience wrapper for callers that own their records outright.
pub fn analyze_records<I>(records: I) -> ParetoAnalysis
where
    I: IntoIterator<Item = SurveyRecord>,
{
    let shared: Vec<Arc<SurveyRecord>> = records.into_iter().map(Arc::new).collect();
    analyze(&shared)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_analysis() {
        let analysis = analyze(&[]);

        assert!(analysis.reports.is_empty());
        assert_eq!(analysis.aggregate.average_impact, 0.0);
        assert!(analysis.aggregate.highest_risk_rows.is_empty());
        assert!(analysis.aggregate.recurrent_drivers.is_empty());
    }

    #[test]
    fn single_driver_rows_have_no_recurrent_drivers() {
        let record: SurveyRecord = [("Email", "a@example.com"), ("Impact", "high")]
            .into_iter()
            .collect();
        let analysis = analyze_records(vec![record]);

        let report = &analysis.reports[0];
        assert_eq!(report.drivers.len(), 1);
        assert_eq!(report.drivers[0].classification, DriverClassification::Review);
        assert_eq!(report.risk_level, RiskLevel::High);
        assert!(analysis.aggregate.recurrent_drivers.is_empty());
    }

    #[test]
    fn reports_keep_input_order() {
        let records: Vec<SurveyRecord> = (0..64)
            .map(|index| {
                [("ID", format!("R-{index}")), ("Impact", (index % 6).to_string())]
                    .into_iter()
                    .collect()
            })
            .collect();

        let analysis = analyze_records(records);
        for (position, report) in analysis.reports.iter().enumerate() {
            assert_eq!(report.row_index, position);
            assert_eq!(report.identifier, format!("R-{position}"));
        }
    }
}
