//! CatalogSink trait definition.

use crate::RemoteOperationError;
use price_types::ProductId;

/// Remote operations needed to update product prices.
///
/// # Usage Pattern
///
/// Callers take the sink as a generic so the batch path is statically
/// dispatched:
///
/// ```ignore
/// pub async fn process_file<S: CatalogSink>(sink: &S, config: &Config) -> Result<BatchReport, BatchError> {
///     let updater = PriceUpdater::new(sink);
///     // ...
/// }
/// ```
#[async_trait::async_trait]
pub trait CatalogSink: Send + Sync {
    /// Ids of every product whose barcode equals `barcode` exactly.
    ///
    /// An empty vector means no match and is not an error.
    async fn search_by_barcode(&self, barcode: &str)
        -> Result<Vec<ProductId>, RemoteOperationError>;

    /// Set the price of all `product_ids` in one call.
    async fn write_price(
        &self,
        product_ids: &[ProductId],
        price: f64,
    ) -> Result<(), RemoteOperationError>;
}
