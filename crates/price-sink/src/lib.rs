//! Catalog sink trait abstraction.
//!
//! This crate defines the `CatalogSink` trait covering the two remote
//! operations a price update needs (search by barcode, write price). The
//! JSON-RPC client in `catalog-client` implements it for a live server and
//! `MemoryCatalog` implements it in-process, so the updater and the batch
//! engine are written once against the trait.

mod error;
mod memory;
mod traits;
mod updater;

pub use error::RemoteOperationError;
pub use memory::MemoryCatalog;
pub use traits::CatalogSink;
pub use updater::PriceUpdater;
