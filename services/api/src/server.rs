use crate::cli::ServeArgs;
use crate::infra::{configured_sheet_analysis, AppState};
use crate::routes::with_analysis_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use survey_pareto::config::{AppConfig, ServerConfig};
use survey_pareto::error::AppError;
use survey_pareto::telemetry;
use tracing::info;

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    apply_overrides(&mut config.server, args);
    telemetry::init(&config.telemetry)?;

    let (metrics_layer, metrics_handle) = PrometheusMetricLayer::pair();
    let readiness = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: Arc::clone(&readiness),
        metrics: Arc::new(metrics_handle),
    };

    let sheets = Arc::new(configured_sheet_analysis(&config.sheets).await?);
    let app = with_analysis_routes(sheets)
        .layer(Extension(state))
        .layer(metrics_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness.store(true, Ordering::Release);
    info!(environment = ?config.environment, %addr, "survey analysis service listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn apply_overrides(server: &mut ServerConfig, args: ServeArgs) {
    let ServeArgs { host, port } = args;
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
}
