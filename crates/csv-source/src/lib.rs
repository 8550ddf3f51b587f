//! CSV batch price updates.
//!
//! This crate reads a delimited price file (delimiter sniffed from the first
//! 1024 bytes), checks that it carries `barcode` and `price` columns, and
//! applies every row through a [`price_sink::CatalogSink`]. Bad rows never
//! stop the batch; the outcome of every row lands in one
//! [`price_types::BatchReport`].

mod error;
mod observer;
mod sniff;
mod sync;

pub use error::BatchError;
pub use observer::BatchObserver;
pub use sniff::{sniff_delimiter, DEFAULT_DELIMITER, SAMPLE_SIZE};
pub use sync::{process_file, Config, BARCODE_COLUMN, MISSING_BARCODE, PRICE_COLUMN};
