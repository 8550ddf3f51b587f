//! Aggregation of update results into a batch report.

use crate::result::{FailureKind, UpdateResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Counts plus the ordered per-row results of one batch.
///
/// `total_processed` always equals `results.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub successful_updates: usize,
    pub failed_updates: usize,
    pub total_processed: usize,
    pub results: Vec<UpdateResult>,
}

/// One line of the failed-rows CSV.
#[derive(Serialize)]
struct FailureRow<'a> {
    row_number: Option<usize>,
    barcode: Option<&'a str>,
    failure: Option<FailureKind>,
    message: &'a str,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result, keeping the counters in step.
    pub fn record(&mut self, result: UpdateResult) {
        if result.success {
            self.successful_updates += 1;
        } else {
            self.failed_updates += 1;
        }
        self.results.push(result);
        self.total_processed = self.results.len();
    }

    pub fn failures(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Number of catalog products touched across all successful rows.
    pub fn products_updated(&self) -> usize {
        self.results.iter().map(|r| r.updated_count).sum()
    }

    /// Write the failed rows as `row_number,barcode,failure,message`.
    pub fn write_failures_csv(&self, writer: impl Write) -> Result<(), csv::Error> {
        let mut wrt = csv::Writer::from_writer(writer);
        for result in self.failures() {
            wrt.serialize(FailureRow {
                row_number: result.row_number,
                barcode: result.barcode.as_deref(),
                failure: result.failure,
                message: &result.message,
            })?;
        }
        wrt.flush()?;
        Ok(())
    }
}

impl FromIterator<UpdateResult> for BatchReport {
    fn from_iter<I: IntoIterator<Item = UpdateResult>>(iter: I) -> Self {
        let mut report = BatchReport::new();
        report.extend(iter);
        report
    }
}

impl Extend<UpdateResult> for BatchReport {
    fn extend<I: IntoIterator<Item = UpdateResult>>(&mut self, iter: I) {
        for result in iter {
            self.record(result);
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successful: {}, Failed: {}, Total: {}",
            self.successful_updates, self.failed_updates, self.total_processed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BatchReport {
        vec![
            UpdateResult::updated(2, "Updated 2 product(s) to $1.00").at_row(2, "111"),
            UpdateResult::failed(FailureKind::Validation, "Barcode cannot be empty").at_row(3, ""),
            UpdateResult::failed(FailureKind::NotFound, "No products found with barcode: 9")
                .at_row(4, "9"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_counts_follow_results() {
        let report = sample();
        assert_eq!(report.successful_updates, 1);
        assert_eq!(report.failed_updates, 2);
        assert_eq!(report.total_processed, 3);
        assert_eq!(report.products_updated(), 2);
        assert_eq!(report.to_string(), "Successful: 1, Failed: 2, Total: 3");
    }

    #[test]
    fn test_empty_report() {
        let report = BatchReport::new();
        assert_eq!(report.total_processed, 0);
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["successful_updates"], 1);
        assert_eq!(json["failed_updates"], 2);
        assert_eq!(json["total_processed"], 3);
        assert_eq!(json["results"].as_array().unwrap().len(), 3);
        assert_eq!(json["results"][1]["row_number"], 3);
    }

    #[test]
    fn test_write_failures_csv() {
        let mut out = Vec::new();
        sample().write_failures_csv(&mut out).unwrap();
        let actual = String::from_utf8(out).unwrap();

        let expected = "row_number,barcode,failure,message
3,,validation,Barcode cannot be empty
4,9,not_found,No products found with barcode: 9
";
        assert_eq!(actual, expected);
    }
}
