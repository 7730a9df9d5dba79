use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use survey_pareto::config::{ConfigError, SheetsConfig};
use survey_pareto::error::AppError;
use survey_pareto::workflows::pareto::SurveyRecord;
use survey_pareto::workflows::sheets::{
    GoogleSheetsClient, HttpsConnector, SheetGateway, SheetSource,
};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The configured spreadsheet, or the reason sheet analysis is unavailable.
pub(crate) struct SheetAnalysis<G> {
    source: Result<SheetSource<G>, ConfigError>,
}

impl<G: SheetGateway> SheetAnalysis<G> {
    pub(crate) fn ready(source: SheetSource<G>) -> Self {
        Self { source: Ok(source) }
    }

    pub(crate) fn unavailable(reason: ConfigError) -> Self {
        Self {
            source: Err(reason),
        }
    }

    /// All rows of the configured range plus the range label.
    pub(crate) async fn fetch_records(
        &self,
    ) -> Result<(Vec<Arc<SurveyRecord>>, String), AppError> {
        let source = self
            .source
            .as_ref()
            .map_err(|reason| AppError::Config(reason.clone()))?;
        let records = source.fetch_records().await?;
        Ok((records, source.range().to_string()))
    }
}

/// Connects to Google Sheets when credentials are configured. Missing
/// configuration is not fatal: the sheet endpoint reports it per request.
pub(crate) async fn configured_sheet_analysis(
    config: &SheetsConfig,
) -> Result<SheetAnalysis<GoogleSheetsClient<HttpsConnector>>, AppError> {
    match config.credentials() {
        Ok(credentials) => {
            let client = GoogleSheetsClient::connect(&credentials).await?;
            info!(range = %credentials.range, "google sheet analysis enabled");
            Ok(SheetAnalysis::ready(SheetSource::new(
                client,
                credentials.spreadsheet_id,
                credentials.range,
            )))
        }
        Err(reason) => {
            warn!(%reason, "google sheet analysis disabled");
            Ok(SheetAnalysis::unavailable(reason))
        }
    }
}
