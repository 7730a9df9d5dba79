use super::super::domain::SurveyRecord;
use super::super::drivers::compute_drivers;
use super::risk::{assess_risk, build_recommendation};
use super::views::RowParetoReport;
use std::sync::Arc;
use tracing::debug;

// Checked in order; Spanish aliases follow their English counterpart.
const IDENTIFIER_COLUMNS: &[&str] = &["ID", "Email", "Correo", "Name", "Nombre"];

/// Scores one record. `row_index` is the record's 0-based position in the run.
pub fn analyze_row(row_index: usize, record: &Arc<SurveyRecord>) -> RowParetoReport {
    let drivers = compute_drivers(record);
    let total_impact: f64 = drivers.iter().map(|driver| driver.impact).sum();
    let normalized_impact = total_impact / drivers.len().max(1) as f64;
    let risk_level = assess_risk(&drivers);
    let recommendation = build_recommendation(&drivers);
    let identifier = row_identifier(row_index, record);

    debug!(
        row_index,
        %identifier,
        drivers = drivers.len(),
        total_impact,
        risk = risk_level.label(),
        "scored survey row"
    );

    RowParetoReport {
        row_index,
        identifier,
        total_impact,
        normalized_impact,
        drivers,
        recommendation,
        risk_level,
        raw: Arc::clone(record),
    }
}

/// Human-facing row label; falls back to the spreadsheet row number, which
/// sits one below the header row.
pub fn row_identifier(row_index: usize, record: &SurveyRecord) -> String {
    IDENTIFIER_COLUMNS
        .iter()
        .filter_map(|column| record.get(column))
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Row {}", row_index + 2))
}
