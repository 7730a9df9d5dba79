use crate::routes::{AnalysisResponse, AnalysisSource};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use survey_pareto::config::{AppConfig, SheetsConfig};
use survey_pareto::error::AppError;
use survey_pareto::telemetry;
use survey_pareto::workflows::pareto::{analyze, ParetoAnalysis, SurveyRecord};
use survey_pareto::workflows::sheets::{GoogleSheetsClient, SheetRecordImporter, SheetSource};

#[derive(Args, Debug, Default)]
pub(crate) struct AnalyzeArgs {
    /// CSV export to analyze instead of the configured Google Sheet
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Print the same JSON payload the HTTP service returns
    #[arg(long)]
    pub(crate) json: bool,
    /// List every row with its drivers
    #[arg(long)]
    pub(crate) list_rows: bool,
}

pub(crate) async fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        csv,
        json,
        list_rows,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init_stderr(&config.telemetry)?;

    let (records, source, range) = match csv {
        Some(path) => (
            SheetRecordImporter::from_path(path)?,
            AnalysisSource::Csv,
            None,
        ),
        None => {
            let (records, range) = fetch_configured_sheet(&config.sheets).await?;
            (records, AnalysisSource::Sheet, Some(range))
        }
    };

    let analysis = analyze(&records);

    if json {
        let response = AnalysisResponse::new(analysis, source, range);
        let rendered = serde_json::to_string_pretty(&response).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_analysis(&analysis, range.as_deref(), list_rows);
    }

    Ok(())
}

async fn fetch_configured_sheet(
    sheets: &SheetsConfig,
) -> Result<(Vec<Arc<SurveyRecord>>, String), AppError> {
    let credentials = sheets.credentials()?;
    let client = GoogleSheetsClient::connect(&credentials).await?;
    let source = SheetSource::new(client, credentials.spreadsheet_id, credentials.range);
    let records = source.fetch_records().await?;
    Ok((records, source.range().to_string()))
}

fn render_analysis(analysis: &ParetoAnalysis, range: Option<&str>, list_rows: bool) {
    let ParetoAnalysis { reports, aggregate } = analysis;

    println!("Survey Pareto analysis");
    match range {
        Some(range) => println!("Data source: Google Sheet range {range}"),
        None => println!("Data source: CSV export"),
    }
    println!("Rows analyzed: {}", reports.len());
    println!("Average impact per row: {:.2}", aggregate.average_impact);

    if aggregate.highest_risk_rows.is_empty() {
        println!("\nHighest impact rows: none");
    } else {
        println!("\nHighest impact rows");
        for report in &aggregate.highest_risk_rows {
            println!(
                "- {} (sheet row {}): impact {:.2}, risk {}",
                report.identifier,
                report.row_index + 2,
                report.total_impact,
                report.risk_level.label()
            );
        }
    }

    if aggregate.recurrent_drivers.is_empty() {
        println!("\nRecurrent vital drivers: none");
    } else {
        println!("\nRecurrent vital drivers");
        for driver in &aggregate.recurrent_drivers {
            println!("- {}: vital in {} row(s)", driver.question, driver.count);
        }
    }

    if list_rows {
        println!("\nRows");
        for report in reports {
            println!(
                "- {} [{}] impact {:.2}, {:.2} per driver",
                report.identifier,
                report.risk_level.label(),
                report.total_impact,
                report.normalized_impact
            );
            for driver in &report.drivers {
                println!(
                    "  * {} = {:?}: impact {:.2}, share {:.0}%, {}",
                    driver.question,
                    driver.answer,
                    driver.impact,
                    driver.share * 100.0,
                    driver.classification.label()
                );
            }
            println!("  {}", report.recommendation);
        }
    }
}
