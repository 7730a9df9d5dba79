use super::super::domain::{DriverClassification, ParetoDriver, RiskLevel};

pub const HIGH_RISK_SHARE: f64 = 0.6;
pub const HIGH_RISK_IMPACT: f64 = 0.9;
pub const MEDIUM_RISK_SHARE: f64 = 0.35;

pub const NO_FINDINGS_RECOMMENDATION: &str =
    "No significant findings; continue routine monitoring.";
const PRIORITY_PREFIX: &str = "Prioritize interventions on:";
const MAX_RECOMMENDED_DRIVERS: usize = 3;

/// Row risk from how dominant its top driver is.
pub fn assess_risk(drivers: &[ParetoDriver]) -> RiskLevel {
    let Some(top) = drivers.first() else {
        return RiskLevel::Low;
    };

    if top.share >= HIGH_RISK_SHARE || top.impact >= HIGH_RISK_IMPACT {
        RiskLevel::High
    } else if top.share >= MEDIUM_RISK_SHARE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn build_recommendation(drivers: &[ParetoDriver]) -> String {
    let targets: Vec<String> = drivers
        .iter()
        .filter(|driver| driver.classification == DriverClassification::Vital)
        .take(MAX_RECOMMENDED_DRIVERS)
        .map(|driver| {
            let answer = if driver.answer.is_empty() {
                "n/a"
            } else {
                driver.answer.as_str()
            };
            format!("• {} (answer: {answer})", driver.question)
        })
        .collect();

    if targets.is_empty() {
        return NO_FINDINGS_RECOMMENDATION.to_string();
    }

    format!("{PRIORITY_PREFIX} {}", targets.join(" "))
}
