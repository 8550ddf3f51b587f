//! CSV batch update implementation
//!
//! This module reads a price file row by row and applies each row through the
//! single-item updater, collecting every outcome into a batch report.

use crate::error::BatchError;
use crate::observer::BatchObserver;
use crate::sniff::{sniff_delimiter, DEFAULT_DELIMITER, SAMPLE_SIZE};
use price_sink::{CatalogSink, PriceUpdater};
use price_types::{BatchReport, FailureKind, UpdateResult};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const BARCODE_COLUMN: &str = "barcode";
pub const PRICE_COLUMN: &str = "price";

/// Barcode reported for a row whose barcode cell could not be read.
pub const MISSING_BARCODE: &str = "N/A";

/// Configuration for a batch update
#[derive(Clone, Debug)]
pub struct Config {
    /// Price file to read
    pub path: PathBuf,

    /// Delimiter to use instead of sniffing one
    pub delimiter: Option<u8>,

    /// Search but do not write prices
    pub dry_run: bool,
}

impl Config {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: None,
            dry_run: false,
        }
    }
}

/// Pick the delimiter from the first [`SAMPLE_SIZE`] bytes, then rewind.
fn detect_delimiter(file: &mut File) -> Result<u8, BatchError> {
    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    file.by_ref()
        .take(SAMPLE_SIZE as u64)
        .read_to_end(&mut sample)?;
    file.seek(SeekFrom::Start(0))?;

    match sniff_delimiter(&sample, sample.len() == SAMPLE_SIZE) {
        Some(delimiter) => Ok(delimiter),
        None => {
            warn!(
                "Could not detect delimiter, defaulting to '{}'",
                char::from(DEFAULT_DELIMITER)
            );
            Ok(DEFAULT_DELIMITER)
        }
    }
}

/// Apply every row of a price file.
///
/// Fails only when the file is missing or unreadable, or when its header lacks
/// a required column; in that case no row is processed. Every data row,
/// malformed or not, yields exactly one result in the report, in input order.
/// Row numbers count the header as row 1.
pub async fn process_file<S, O>(
    sink: &S,
    config: &Config,
    observer: &O,
) -> Result<BatchReport, BatchError>
where
    S: CatalogSink + ?Sized,
    O: BatchObserver + ?Sized,
{
    if !config.path.exists() {
        return Err(BatchError::NotFound(config.path.clone()));
    }

    info!("Processing batch update from CSV: {}", config.path.display());

    let mut file = File::open(&config.path)?;
    let delimiter = match config.delimiter {
        Some(delimiter) => delimiter,
        None => detect_delimiter(&mut file)?,
    };
    info!("Using delimiter: '{}'", char::from(delimiter).escape_default());

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(file);

    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    info!("CSV columns detected: {columns:?}");

    let column_index = |name: &str| columns.iter().position(|c| c == name);
    let (barcode_idx, price_idx) = match (column_index(BARCODE_COLUMN), column_index(PRICE_COLUMN))
    {
        (Some(b), Some(p)) => (b, p),
        _ => {
            return Err(BatchError::Schema {
                required: vec![BARCODE_COLUMN, PRICE_COLUMN],
                found: columns,
            })
        }
    };

    observer.on_start(&config.path, delimiter, &columns);

    let updater = PriceUpdater::new(sink).dry_run(config.dry_run);
    let mut report = BatchReport::new();

    for (row_number, record) in (2..).zip(csv_reader.records()) {
        let result = match record {
            Ok(record) => match (record.get(barcode_idx), record.get(price_idx)) {
                (Some(barcode), Some(price)) => updater
                    .update_price(barcode, price)
                    .await
                    .at_row(row_number, barcode),
                (barcode, _) => UpdateResult::failed(
                    FailureKind::MalformedRow,
                    format!(
                        "Row {row_number} error: expected at least {} fields, found {}",
                        barcode_idx.max(price_idx) + 1,
                        record.len()
                    ),
                )
                .at_row(row_number, barcode.unwrap_or(MISSING_BARCODE)),
            },
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => UpdateResult::failed(
                FailureKind::MalformedRow,
                format!("Row {row_number} error: {e}"),
            )
            .at_row(row_number, MISSING_BARCODE),
        };

        debug!(
            "Row {row_number}: success={} updated={}",
            result.success, result.updated_count
        );
        observer.on_row(&result);
        report.record(result);
    }

    info!(
        "Batch update completed. Successful: {}, Failed: {}",
        report.successful_updates, report.failed_updates
    );
    observer.on_finish(&report);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use price_sink::MemoryCatalog;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_config_new() {
        let config = Config::new("prices.csv");
        assert_eq!(config.path, PathBuf::from("prices.csv"));
        assert!(config.delimiter.is_none());
        assert!(!config.dry_run);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let catalog = MemoryCatalog::new();
        let config = Config::new("/definitely/not/here.csv");

        let err = process_file(&catalog, &config, &()).await.unwrap_err();
        assert!(matches!(err, BatchError::NotFound(_)));
        assert_eq!(err.to_string(), "CSV file not found: /definitely/not/here.csv");
    }

    #[tokio::test]
    async fn test_missing_price_column_aborts_before_any_row() {
        let catalog = MemoryCatalog::new();
        catalog.add_product("123", 1.0);
        let file = csv_file("barcode,cost\n123,19.99\n");

        let err = process_file(&catalog, &Config::new(file.path()), &())
            .await
            .unwrap_err();

        match err {
            BatchError::Schema { required, found } => {
                assert_eq!(required, vec!["barcode", "price"]);
                assert_eq!(found, vec!["barcode", "cost"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
        assert_eq!(catalog.search_calls(), 0);
    }

    #[tokio::test]
    async fn test_header_match_is_case_sensitive() {
        let catalog = MemoryCatalog::new();
        let file = csv_file("Barcode,Price\n123,1\n");

        let err = process_file(&catalog, &Config::new(file.path()), &())
            .await
            .unwrap_err();
        assert!(matches!(err, BatchError::Schema { .. }));
    }

    #[tokio::test]
    async fn test_empty_file_is_a_schema_error() {
        let catalog = MemoryCatalog::new();
        let file = csv_file("");

        let err = process_file(&catalog, &Config::new(file.path()), &())
            .await
            .unwrap_err();
        assert!(matches!(err, BatchError::Schema { .. }));
    }

    #[tokio::test]
    async fn test_header_only_file_yields_empty_report() {
        let catalog = MemoryCatalog::new();
        let file = csv_file("barcode,price\n");

        let report = process_file(&catalog, &Config::new(file.path()), &())
            .await
            .unwrap();
        assert_eq!(report, BatchReport::new());
    }

    #[tokio::test]
    async fn test_semicolon_file_with_extra_columns() {
        let catalog = MemoryCatalog::new();
        let id = catalog.add_product("123", 1.0);
        let file = csv_file("name;barcode;price\nWidget;123;7.5\n");

        let report = process_file(&catalog, &Config::new(file.path()), &())
            .await
            .unwrap();

        assert_eq!(report.successful_updates, 1);
        assert_eq!(catalog.price_of(id), Some(7.5));
    }

    #[tokio::test]
    async fn test_forced_delimiter_skips_sniffing() {
        let catalog = MemoryCatalog::new();
        let id = catalog.add_product("123", 1.0);
        // A single column sniffs as undecided; the forced tab still splits it.
        let file = csv_file("barcode\tprice\n123\t2\n");

        let config = Config {
            delimiter: Some(b'\t'),
            ..Config::new(file.path())
        };
        let report = process_file(&catalog, &config, &()).await.unwrap();

        assert_eq!(report.successful_updates, 1);
        assert_eq!(catalog.price_of(id), Some(2.0));
    }

    #[tokio::test]
    async fn test_short_rows_are_malformed_but_do_not_abort() {
        let catalog = MemoryCatalog::new();
        catalog.add_product("123", 1.0);
        let file = csv_file("barcode,price\n999\n\n123,3\n");

        let report = process_file(&catalog, &Config::new(file.path()), &())
            .await
            .unwrap();

        assert_eq!(report.total_processed, 2);
        let bad = &report.results[0];
        assert_eq!(bad.row_number, Some(2));
        assert_eq!(bad.barcode.as_deref(), Some("999"));
        assert_eq!(bad.failure, Some(FailureKind::MalformedRow));
        assert!(bad.message.starts_with("Row 2 error:"));

        // Blank lines are skipped and do not take a row number.
        let good = &report.results[1];
        assert!(good.success);
        assert_eq!(good.row_number, Some(3));
    }

    #[tokio::test]
    async fn test_invalid_utf8_row_is_malformed() {
        let catalog = MemoryCatalog::new();
        catalog.add_product("123", 1.0);
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"barcode,price\n\xff\xfe,1\n123,2\n").unwrap();
        temp_file.flush().unwrap();

        let report = process_file(&catalog, &Config::new(temp_file.path()), &())
            .await
            .unwrap();

        assert_eq!(report.total_processed, 2);
        assert_eq!(report.results[0].failure, Some(FailureKind::MalformedRow));
        assert_eq!(report.results[0].barcode.as_deref(), Some(MISSING_BARCODE));
        assert!(report.results[1].success);
    }

    #[tokio::test]
    async fn test_raw_barcode_is_reported() {
        let catalog = MemoryCatalog::new();
        catalog.add_product("123", 1.0);
        let file = csv_file("barcode,price\n\" 123 \",4\n");

        let report = process_file(&catalog, &Config::new(file.path()), &())
            .await
            .unwrap();

        assert!(report.results[0].success);
        assert_eq!(report.results[0].barcode.as_deref(), Some(" 123 "));
    }

    #[tokio::test]
    async fn test_dry_run_leaves_prices() {
        let catalog = MemoryCatalog::new();
        let id = catalog.add_product("123", 1.0);
        let file = csv_file("barcode,price\n123,9\n");

        let config = Config {
            dry_run: true,
            ..Config::new(file.path())
        };
        let report = process_file(&catalog, &config, &()).await.unwrap();

        assert_eq!(report.successful_updates, 1);
        assert_eq!(catalog.price_of(id), Some(1.0));
        assert_eq!(catalog.write_calls(), 0);
    }
}
