//! Single-item price update: validate, search, write, report.

use crate::{CatalogSink, RemoteOperationError};
use price_types::{
    validate_barcode, validate_price, FailureKind, PriceInput, UpdateResult, ValidationError,
};
use thiserror::Error;
use tracing::{error, info, warn};

/// Everything that can stop one update, tagged where it is detected.
#[derive(Error, Debug)]
enum UpdateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No products found with barcode: {0}")]
    NotFound(String),

    #[error(transparent)]
    Remote(#[from] RemoteOperationError),
}

impl UpdateError {
    fn kind(&self) -> FailureKind {
        match self {
            UpdateError::Validation(_) => FailureKind::Validation,
            UpdateError::NotFound(_) => FailureKind::NotFound,
            UpdateError::Remote(_) => FailureKind::Remote,
        }
    }
}

/// Render a price the way it is written: two decimals when that is exact,
/// full precision otherwise.
fn display_price(price: f64) -> String {
    let cents = format!("{price:.2}");
    if cents.parse::<f64>() == Ok(price) {
        cents
    } else {
        price.to_string()
    }
}

/// Applies one price change at a time through a [`CatalogSink`].
pub struct PriceUpdater<'a, S: CatalogSink + ?Sized> {
    sink: &'a S,
    dry_run: bool,
}

impl<'a, S: CatalogSink + ?Sized> PriceUpdater<'a, S> {
    pub fn new(sink: &'a S) -> Self {
        Self {
            sink,
            dry_run: false,
        }
    }

    /// Search but never write.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Update the price of every product carrying `barcode`.
    ///
    /// Never fails: validation errors, missing products and remote errors all
    /// come back as an unsuccessful [`UpdateResult`].
    pub async fn update_price<'p>(
        &self,
        barcode: &str,
        price: impl Into<PriceInput<'p>>,
    ) -> UpdateResult {
        let price = price.into();
        match self.try_update(barcode, price).await {
            Ok(result) => result,
            Err(e @ UpdateError::NotFound(_)) => {
                warn!("{e}");
                UpdateResult::failed(e.kind(), e.to_string())
            }
            Err(e) => {
                let message = format!("Error updating product with barcode {barcode}: {e}");
                error!("{message}");
                UpdateResult::failed(e.kind(), message)
            }
        }
    }

    async fn try_update(
        &self,
        barcode: &str,
        price: PriceInput<'_>,
    ) -> Result<UpdateResult, UpdateError> {
        let barcode = validate_barcode(barcode)?;
        let price = validate_price(price)?;

        info!("Searching for products with barcode: {barcode}");
        let product_ids = self.sink.search_by_barcode(&barcode).await?;
        if product_ids.is_empty() {
            return Err(UpdateError::NotFound(barcode));
        }

        let count = product_ids.len();
        let shown = display_price(price);
        info!("Found {count} product(s) with barcode: {barcode}");

        if self.dry_run {
            info!("Dry run: would update {count} product(s) with barcode {barcode} to ${shown}");
            return Ok(UpdateResult::updated(
                count,
                format!("Would update {count} product(s) to ${shown}"),
            ));
        }

        self.sink.write_price(&product_ids, price).await?;
        info!("Successfully updated {count} product(s) with barcode {barcode} to ${shown}");

        Ok(UpdateResult::updated(
            count,
            format!("Updated {count} product(s) to ${shown}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryCatalog;

    #[tokio::test]
    async fn test_update_single_match() {
        let catalog = MemoryCatalog::new();
        let id = catalog.add_product("123", 10.0);

        let result = PriceUpdater::new(&catalog).update_price("123", "19.99").await;

        assert!(result.success);
        assert_eq!(result.updated_count, 1);
        assert_eq!(result.message, "Updated 1 product(s) to $19.99");
        assert_eq!(result.failure, None);
        assert_eq!(catalog.price_of(id), Some(19.99));
    }

    #[tokio::test]
    async fn test_update_all_products_sharing_a_barcode() {
        let catalog = MemoryCatalog::new();
        let a = catalog.add_product("dup", 1.0);
        let b = catalog.add_product("dup", 2.0);
        catalog.add_product("other", 3.0);

        let result = PriceUpdater::new(&catalog).update_price(" dup ", 4.5).await;

        assert!(result.success);
        assert_eq!(result.updated_count, 2);
        assert_eq!(catalog.price_of(a), Some(4.5));
        assert_eq!(catalog.price_of(b), Some(4.5));
        assert_eq!(catalog.write_calls(), 1);
    }

    #[tokio::test]
    async fn test_no_match_is_a_failed_result() {
        let catalog = MemoryCatalog::new();

        let result = PriceUpdater::new(&catalog).update_price("999", "1.00").await;

        assert!(!result.success);
        assert_eq!(result.updated_count, 0);
        assert_eq!(result.failure, Some(FailureKind::NotFound));
        assert_eq!(result.message, "No products found with barcode: 999");
        assert_eq!(catalog.write_calls(), 0);
    }

    #[tokio::test]
    async fn test_validation_failure_skips_remote_calls() {
        let catalog = MemoryCatalog::new();
        let updater = PriceUpdater::new(&catalog);

        let empty = updater.update_price("  ", "5.00").await;
        assert_eq!(empty.failure, Some(FailureKind::Validation));
        assert_eq!(
            empty.message,
            "Error updating product with barcode   : Barcode cannot be empty"
        );

        let negative = updater.update_price("456", "-3").await;
        assert_eq!(negative.failure, Some(FailureKind::Validation));
        assert!(negative.message.contains("Price cannot be negative"));

        assert_eq!(catalog.search_calls(), 0);
    }

    #[tokio::test]
    async fn test_remote_failures_become_results() {
        let catalog = MemoryCatalog::new();
        catalog.add_product("s", 1.0);
        catalog.add_product("w", 1.0);
        catalog.fail_search_for("s");
        catalog.fail_write_for("w");
        let updater = PriceUpdater::new(&catalog);

        let search = updater.update_price("s", 2.0).await;
        assert!(!search.success);
        assert_eq!(search.failure, Some(FailureKind::Remote));
        assert_eq!(search.updated_count, 0);

        let write = updater.update_price("w", 2.0).await;
        assert!(!write.success);
        assert_eq!(write.failure, Some(FailureKind::Remote));
        assert!(write.message.starts_with("Error updating product with barcode w:"));
    }

    #[tokio::test]
    async fn test_dry_run_does_not_write() {
        let catalog = MemoryCatalog::new();
        let id = catalog.add_product("123", 10.0);

        let result = PriceUpdater::new(&catalog)
            .dry_run(true)
            .update_price("123", "0")
            .await;

        assert!(result.success);
        assert_eq!(result.updated_count, 1);
        assert_eq!(result.message, "Would update 1 product(s) to $0.00");
        assert_eq!(catalog.price_of(id), Some(10.0));
        assert_eq!(catalog.write_calls(), 0);
    }

    #[tokio::test]
    async fn test_message_shows_the_price_written() {
        let catalog = MemoryCatalog::new();
        let id = catalog.add_product("123", 10.0);

        let result = PriceUpdater::new(&catalog)
            .update_price("123", "19.999")
            .await;

        assert!(result.success);
        assert_eq!(catalog.price_of(id), Some(19.999));
        assert_eq!(result.message, "Updated 1 product(s) to $19.999");

        let result = PriceUpdater::new(&catalog).update_price("123", "7.5").await;
        assert_eq!(result.message, "Updated 1 product(s) to $7.50");
    }
}
