//! Price update types shared by the catalog client, the sink and the batch engine.
//!
//! - [`validate`] - normalization of one (barcode, price) pair
//! - [`result`] - the outcome of a single update attempt
//! - [`report`] - aggregation of many outcomes into one batch report

pub mod report;
pub mod result;
pub mod validate;

pub use report::BatchReport;
pub use result::{FailureKind, UpdateResult};
pub use validate::{validate_barcode, validate_price, PriceInput, ValidationError};

/// Remote identifier of a catalog product.
pub type ProductId = i64;
