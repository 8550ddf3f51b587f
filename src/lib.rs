//! price-sync library
//!
//! Applies price changes to products of a remote catalog, addressing products
//! by barcode, either one at a time or in bulk from a CSV file.
//!
//! # Crates
//!
//! - `catalog_client` - JSON-RPC session against the catalog server
//! - `price_sink` - the `CatalogSink` seam and the single-item updater
//! - `price_sync_csv_source` - the CSV batch engine
//! - `price_types` - validation, per-row results and batch reports
//!
//! # CLI Usage
//!
//! ```bash
//! # Update one barcode
//! price-sync --db shop --username admin update --barcode 610377036979 --price 29.99
//!
//! # Update from a CSV file with `barcode` and `price` columns
//! price-sync batch price_updates.csv --report report.json --failures failed.csv
//! ```

use catalog_client::{ClientOptions, ConfigurationError, ConnectionConfig, DEFAULT_ENDPOINT};
use clap::Parser;
use std::time::Duration;

pub mod config;
pub mod logging;
pub mod report;

// Re-export the CSV batch crate for convenience
pub use price_sync_csv_source as csv;

#[derive(Parser, Clone, Debug)]
pub struct CatalogOpts {
    /// Catalog server URL
    #[arg(long = "url", default_value = DEFAULT_ENDPOINT, env = "ODOO_URL")]
    pub catalog_url: String,

    /// Catalog database name
    #[arg(long = "db", env = "ODOO_DB")]
    pub catalog_db: Option<String>,

    /// Catalog username
    #[arg(long = "username", env = "ODOO_USERNAME")]
    pub catalog_username: Option<String>,

    /// Catalog password or API key
    #[arg(long = "password", env = "ODOO_PASSWORD", hide_env_values = true)]
    pub catalog_password: Option<String>,

    /// Product model to search and write
    #[arg(long, default_value = "product.template")]
    pub model: String,

    /// Field receiving the new price
    #[arg(long, default_value = "list_price")]
    pub price_field: String,

    /// Per-request timeout (e.g. "30s", "5m"); waits indefinitely when unset
    #[arg(long, value_parser = config::parse_duration)]
    pub request_timeout: Option<Duration>,
}

// CLI options → catalog client types
impl TryFrom<&CatalogOpts> for ConnectionConfig {
    type Error = ConfigurationError;

    fn try_from(opts: &CatalogOpts) -> Result<Self, Self::Error> {
        ConnectionConfig::new(
            opts.catalog_url.as_str(),
            opts.catalog_db.clone().unwrap_or_default(),
            opts.catalog_username.clone().unwrap_or_default(),
            opts.catalog_password.clone().unwrap_or_default(),
        )
    }
}

impl From<&CatalogOpts> for ClientOptions {
    fn from(opts: &CatalogOpts) -> Self {
        Self {
            model: opts.model.clone(),
            price_field: opts.price_field.clone(),
            request_timeout: opts.request_timeout,
        }
    }
}
