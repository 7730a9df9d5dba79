use crate::infra::{AppState, SheetAnalysis};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use survey_pareto::error::AppError;
use survey_pareto::workflows::pareto::{
    analyze, AggregateInsights, ParetoAnalysis, RowParetoReport, SurveyRecord,
};
use survey_pareto::workflows::sheets::{SheetGateway, SheetRecordImporter};
use tracing::error;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeRequest {
    #[serde(default)]
    pub(crate) records: Option<Vec<SurveyRecord>>,
    #[serde(default)]
    pub(crate) csv: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AnalysisSource {
    Sheet,
    Records,
    Csv,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalysisMetadata {
    pub(crate) total_rows: usize,
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) source: AnalysisSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) range: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalysisResponse {
    pub(crate) metadata: AnalysisMetadata,
    pub(crate) reports: Vec<RowParetoReport>,
    pub(crate) aggregate: AggregateInsights,
}

impl AnalysisResponse {
    pub(crate) fn new(
        analysis: ParetoAnalysis,
        source: AnalysisSource,
        range: Option<String>,
    ) -> Self {
        let ParetoAnalysis { reports, aggregate } = analysis;
        Self {
            metadata: AnalysisMetadata {
                total_rows: reports.len(),
                generated_at: Utc::now(),
                source,
                range,
            },
            reports,
            aggregate,
        }
    }
}

pub(crate) fn with_analysis_routes<G>(sheets: Arc<SheetAnalysis<G>>) -> axum::Router
where
    G: SheetGateway + 'static,
{
    axum::Router::new()
        .route("/api/analyze", get(sheet_analysis_endpoint::<G>))
        .with_state(sheets)
        .route("/api/v1/analyze", post(analyze_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// 503 until the listener is bound.
pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let (status, label) = if state.readiness.load(Ordering::Acquire) {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "starting")
    };

    (status, Json(json!({ "status": label })))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let body = state.metrics.render();
    ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body)
}

/// Analyzes every row of the configured spreadsheet range.
pub(crate) async fn sheet_analysis_endpoint<G>(
    State(sheets): State<Arc<SheetAnalysis<G>>>,
) -> Result<Json<AnalysisResponse>, AppError>
where
    G: SheetGateway + 'static,
{
    let (records, range) = sheets
        .fetch_records()
        .await
        .inspect_err(|err| error!(error = %err, "sheet analysis failed"))?;

    let analysis = analyze(&records);
    Ok(Json(AnalysisResponse::new(
        analysis,
        AnalysisSource::Sheet,
        Some(range),
    )))
}

/// Analyzes records posted inline. When both `records` and `csv` are sent,
/// `records` wins.
pub(crate) async fn analyze_endpoint(
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let AnalyzeRequest { records, csv } = payload;

    let (records, source) = match (records, csv) {
        (Some(records), _) => (
            records.into_iter().map(Arc::new).collect::<Vec<_>>(),
            AnalysisSource::Records,
        ),
        (None, Some(csv)) => {
            let reader = Cursor::new(csv.into_bytes());
            (
                SheetRecordImporter::from_reader(reader)?,
                AnalysisSource::Csv,
            )
        }
        (None, None) => {
            return Err(AppError::InvalidRequest(
                "request body must include `records` or `csv`".to_string(),
            ))
        }
    };

    let analysis = analyze(&records);
    Ok(Json(AnalysisResponse::new(analysis, source, None)))
}
