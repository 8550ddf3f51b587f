//! Outcome of one price update attempt.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an update attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The barcode or price was rejected before any remote call.
    Validation,
    /// The catalog has no product with the barcode.
    NotFound,
    /// The search or write call failed on the remote side or in transit.
    Remote,
    /// The input row could not be read into a (barcode, price) pair.
    MalformedRow,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Validation => "validation",
            FailureKind::NotFound => "not_found",
            FailureKind::Remote => "remote",
            FailureKind::MalformedRow => "malformed_row",
        };
        write!(f, "{s}")
    }
}

/// Result of a single update attempt.
///
/// `row_number` and `barcode` are only set when the attempt came from a batch
/// input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub success: bool,
    pub message: String,
    pub updated_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_number: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl UpdateResult {
    pub fn updated(updated_count: usize, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            updated_count,
            row_number: None,
            barcode: None,
            failure: None,
        }
    }

    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            updated_count: 0,
            row_number: None,
            barcode: None,
            failure: Some(kind),
        }
    }

    /// Tag the result with the input row it was produced from.
    pub fn at_row(mut self, row_number: usize, barcode: impl Into<String>) -> Self {
        self.row_number = Some(row_number);
        self.barcode = Some(barcode.into());
        self
    }
}
