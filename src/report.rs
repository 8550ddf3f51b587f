//! Batch progress logging and report files.

use anyhow::Context;
use price_sync_csv_source::BatchObserver;
use price_types::{BatchReport, UpdateResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Logs batch progress: the header, each failed row, the summary.
pub struct LoggingObserver;

impl BatchObserver for LoggingObserver {
    fn on_start(&self, source: &Path, delimiter: u8, columns: &[String]) {
        info!(
            "Updating prices from {} (delimiter '{}', columns {columns:?})",
            source.display(),
            char::from(delimiter).escape_default()
        );
    }

    fn on_row(&self, result: &UpdateResult) {
        if !result.success {
            warn!(
                "Row {} failed (barcode {:?}): {}",
                result.row_number.unwrap_or_default(),
                result.barcode.as_deref().unwrap_or_default(),
                result.message
            );
        }
    }

    fn on_finish(&self, report: &BatchReport) {
        info!(
            "{report}; {} product(s) updated",
            report.products_updated()
        );
    }
}

/// Write the full report as pretty-printed JSON.
pub fn write_json_report(report: &BatchReport, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    writeln!(writer)?;
    writer.flush()?;
    info!("Wrote batch report to {}", path.display());
    Ok(())
}

/// Write the failed rows as CSV so they can be fixed and re-run.
pub fn write_failures(report: &BatchReport, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create failures file {}", path.display()))?;
    report
        .write_failures_csv(BufWriter::new(file))
        .with_context(|| format!("Failed to write failures to {}", path.display()))?;
    info!(
        "Wrote {} failed row(s) to {}",
        report.failed_updates,
        path.display()
    );
    Ok(())
}
