mod google;
mod normalizer;
mod parser;

pub use google::{GoogleSheetsClient, HttpsConnector, SheetGateway};

use crate::workflows::pareto::SurveyRecord;
use normalizer::normalize_header;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum SheetImportError {
    #[error("failed to read sheet export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("google sheets authentication failed: {0}")]
    Auth(String),
    #[error("google sheets request failed: {0}")]
    Backend(String),
}

/// Turns tabular exports into survey records: the first row is the header,
/// every later row becomes one record, and missing cells read as empty strings.
pub struct SheetRecordImporter;

impl SheetRecordImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Arc<SurveyRecord>>, SheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Arc<SurveyRecord>>, SheetImportError> {
        let grid = parser::parse_grid(reader)?;
        Ok(Self::from_grid(grid))
    }

    pub fn from_grid(rows: Vec<Vec<String>>) -> Vec<Arc<SurveyRecord>> {
        let mut rows = rows.into_iter();
        let Some(header_row) = rows.next() else {
            return Vec::new();
        };
        let headers: Vec<String> = header_row
            .iter()
            .map(|header| normalize_header(header))
            .collect();

        let records: Vec<Arc<SurveyRecord>> = rows
            .map(|row| {
                let record: SurveyRecord = headers
                    .iter()
                    .enumerate()
                    .map(|(column, header)| {
                        (header.clone(), row.get(column).cloned().unwrap_or_default())
                    })
                    .collect();
                Arc::new(record)
            })
            .collect();

        debug!(columns = headers.len(), rows = records.len(), "imported sheet rows");
        records
    }
}

/// A configured spreadsheet range read through a [`SheetGateway`].
pub struct SheetSource<G> {
    gateway: G,
    spreadsheet_id: String,
    range: String,
}

impl<G: SheetGateway> SheetSource<G> {
    pub fn new(gateway: G, spreadsheet_id: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            gateway,
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
        }
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn range(&self) -> &str {
        &self.range
    }

    /// Fetches the whole range before returning; a failure yields no records.
    pub async fn fetch_records(&self) -> Result<Vec<Arc<SurveyRecord>>, SheetImportError> {
        let values = self
            .gateway
            .fetch_values(&self.spreadsheet_id, &self.range)
            .await?;
        Ok(SheetRecordImporter::from_grid(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn empty_grid_has_no_records() {
        assert!(SheetRecordImporter::from_grid(Vec::new()).is_empty());
        assert!(SheetRecordImporter::from_grid(grid(&[&["Impact", "Cost"]])).is_empty());
    }

    #[test]
    fn short_rows_are_padded_and_extra_cells_ignored() {
        let records = SheetRecordImporter::from_grid(grid(&[
            &[" Impact ", "Cost", "Email"],
            &["high"],
            &["low", "medium", "a@example.com", "stray"],
        ]));

        assert_eq!(records.len(), 2);
        let first: Vec<_> = records[0].iter().collect();
        assert_eq!(first, vec![("Impact", "high"), ("Cost", ""), ("Email", "")]);
        assert_eq!(records[1].len(), 3);
        assert_eq!(records[1].get("Email"), Some("a@example.com"));
    }

    #[test]
    fn csv_reader_maps_headers_to_answers() {
        let csv = "\u{feff}ID,Impact,Cost\nA-1,high,low\nA-2,3,\n";
        let records = SheetRecordImporter::from_reader(Cursor::new(csv)).expect("csv imports");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("ID"), Some("A-1"));
        assert_eq!(records[1].get("Impact"), Some("3"));
        assert_eq!(records[1].get("Cost"), Some(""));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = SheetRecordImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");

        match error {
            SheetImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    struct StaticGateway(Vec<Vec<String>>);

    impl SheetGateway for StaticGateway {
        async fn fetch_values(
            &self,
            spreadsheet_id: &str,
            range: &str,
        ) -> Result<Vec<Vec<String>>, SheetImportError> {
            assert_eq!(spreadsheet_id, "sheet-1");
            assert_eq!(range, "Respuestas!A:Z");
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn sheet_source_imports_fetched_values() {
        let gateway = StaticGateway(grid(&[&["Nombre", "Impacto"], &["Ana", "alto"]]));
        let source = SheetSource::new(gateway, "sheet-1", "Respuestas!A:Z");

        let records = source.fetch_records().await.expect("fetch succeeds");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Impacto"), Some("alto"));
        assert_eq!(source.range(), "Respuestas!A:Z");
    }
}
