//! Progress hooks for a running batch.

use price_types::{BatchReport, UpdateResult};
use std::path::Path;

/// Receives batch progress. Every method defaults to doing nothing, and `()`
/// is the silent observer.
pub trait BatchObserver {
    /// Called once the header has been validated, before the first row.
    fn on_start(&self, _source: &Path, _delimiter: u8, _columns: &[String]) {}

    /// Called for every row, in input order, after its result is final.
    fn on_row(&self, _result: &UpdateResult) {}

    /// Called once with the finished report.
    fn on_finish(&self, _report: &BatchReport) {}
}

impl BatchObserver for () {}
