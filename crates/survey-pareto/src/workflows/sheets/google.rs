use super::SheetImportError;
use crate::config::SheetCredentials;
use google_sheets4::{hyper_rustls, hyper_util, yup_oauth2, Sheets};
use serde_json::{json, Value};
use std::future::Future;

const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Source of raw spreadsheet cell values, header row first.
pub trait SheetGateway: Send + Sync {
    fn fetch_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> impl Future<Output = Result<Vec<Vec<String>>, SheetImportError>> + Send;
}

pub type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;

/// Thin wrapper around the generated google-sheets4 client reading a single
/// value range with service-account credentials.
pub struct GoogleSheetsClient<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    hub: Sheets<C>,
}

impl<C> GoogleSheetsClient<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    pub fn new(hub: Sheets<C>) -> Self {
        Self { hub }
    }

    fn map_error<E: std::fmt::Display>(err: E) -> SheetImportError {
        SheetImportError::Backend(err.to_string())
    }
}

impl GoogleSheetsClient<HttpsConnector> {
    /// Authenticates as the configured service account with read-only access.
    pub async fn connect(credentials: &SheetCredentials) -> Result<Self, SheetImportError> {
        let key: yup_oauth2::ServiceAccountKey = serde_json::from_value(json!({
            "type": "service_account",
            "client_email": credentials.client_email,
            "private_key": credentials.private_key,
            "token_uri": GOOGLE_TOKEN_URI,
        }))
        .map_err(|err| SheetImportError::Auth(err.to_string()))?;

        let auth = yup_oauth2::ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|err| SheetImportError::Auth(err.to_string()))?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|err| SheetImportError::Auth(err.to_string()))?
            .https_or_http()
            .enable_http1()
            .build();
        let client =
            hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
                .build(connector);

        Ok(Self::new(Sheets::new(client, auth)))
    }
}

impl<C> std::fmt::Debug for GoogleSheetsClient<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsClient").finish_non_exhaustive()
    }
}

impl<C> SheetGateway for GoogleSheetsClient<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    async fn fetch_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, SheetImportError> {
        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(spreadsheet_id, range)
            .doit()
            .await
            .map_err(GoogleSheetsClient::<C>::map_error)?;

        Ok(value_range
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
