mod insights;
mod risk;
mod row;
pub mod views;

pub use insights::{aggregate_reports, TOP_RECURRENT_DRIVERS, TOP_RISK_ROWS};
pub use risk::{assess_risk, build_recommendation, NO_FINDINGS_RECOMMENDATION};
pub use row::{analyze_row, row_identifier};
