//! Validation of a single price update request.
//!
//! Both inputs come straight from untrusted sources (a CSV cell or a CLI
//! flag), so nothing here assumes the values are well formed.

use std::fmt;
use thiserror::Error;

/// Reasons a (barcode, price) pair is rejected before any remote call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Barcode cannot be empty")]
    EmptyBarcode,

    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    #[error("Price cannot be negative: {0}")]
    NegativePrice(String),
}

/// A price as it arrived: either raw text or an already-numeric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceInput<'a> {
    Text(&'a str),
    Number(f64),
}

impl<'a> From<&'a str> for PriceInput<'a> {
    fn from(value: &'a str) -> Self {
        PriceInput::Text(value)
    }
}

impl<'a> From<&'a String> for PriceInput<'a> {
    fn from(value: &'a String) -> Self {
        PriceInput::Text(value.as_str())
    }
}

impl From<f64> for PriceInput<'_> {
    fn from(value: f64) -> Self {
        PriceInput::Number(value)
    }
}

impl fmt::Display for PriceInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceInput::Text(s) => write!(f, "{s}"),
            PriceInput::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Trim a barcode and reject it when nothing is left.
pub fn validate_barcode(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyBarcode);
    }
    Ok(trimmed.to_string())
}

/// Parse and check a price.
///
/// Text is trimmed before parsing and may use scientific notation. Zero is a
/// valid price; negative zero is normalized to `0.0`. NaN and infinities are
/// treated as non-numeric.
pub fn validate_price<'a>(raw: impl Into<PriceInput<'a>>) -> Result<f64, ValidationError> {
    let raw = raw.into();
    let value = match raw {
        PriceInput::Number(n) => n,
        PriceInput::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidPrice(s.to_string()))?,
    };

    if !value.is_finite() {
        return Err(ValidationError::InvalidPrice(raw.to_string()));
    }
    if value < 0.0 {
        return Err(ValidationError::NegativePrice(raw.to_string()));
    }

    // -0.0 + 0.0 == +0.0
    Ok(value + 0.0)
}
