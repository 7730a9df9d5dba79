use super::super::domain::{ParetoDriver, RiskLevel, SurveyRecord};
use serde::Serialize;
use std::sync::Arc;

/// Per-row outcome of the Pareto analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowParetoReport {
    pub row_index: usize,
    pub identifier: String,
    pub total_impact: f64,
    pub normalized_impact: f64,
    pub drivers: Vec<ParetoDriver>,
    pub recommendation: String,
    pub risk_level: RiskLevel,
    /// The analyzed record, shared with the caller rather than copied.
    pub raw: Arc<SurveyRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurrentDriver {
    pub question: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateInsights {
    pub average_impact: f64,
    pub highest_risk_rows: Vec<RowParetoReport>,
    pub recurrent_drivers: Vec<RecurrentDriver>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoAnalysis {
    pub reports: Vec<RowParetoReport>,
    pub aggregate: AggregateInsights,
}
