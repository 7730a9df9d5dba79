mod analyze;
mod cli;
mod infra;
mod routes;
mod server;

use survey_pareto::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
