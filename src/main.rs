//! Command-line interface for price-sync
//!
//! # Usage Examples
//!
//! Connection settings come from flags, the environment or a `.env` file
//! (`ODOO_URL`, `ODOO_DB`, `ODOO_USERNAME`, `ODOO_PASSWORD`).
//!
//! ## Single update
//! ```bash
//! price-sync update --barcode 610377036979 --price 29.99
//! ```
//!
//! ## Batch update
//! ```bash
//! # Delimiter is detected from the file
//! price-sync batch price_updates.csv --report report.json
//!
//! # Check which rows would apply without writing anything
//! price-sync --dry-run batch price_updates.csv --failures failed.csv
//! ```

use anyhow::Context;
use catalog_client::{CatalogClient, ClientOptions, ConnectionConfig};
use clap::{Parser, Subcommand};
use price_sink::PriceUpdater;
use price_sync::report::{write_failures, write_json_report, LoggingObserver};
use price_sync::{config, csv, logging, CatalogOpts};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "price-sync")]
#[command(about = "Apply price updates to a remote product catalog by barcode")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog connection options
    #[command(flatten)]
    catalog: CatalogOpts,

    /// Search products but do not write prices
    #[arg(long, global = true)]
    dry_run: bool,

    /// Append-only log file (also logged to stdout)
    #[arg(long, default_value = "priceupdate.log", global = true)]
    log_file: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Update the price of every product with one barcode
    Update {
        /// Product barcode (exact match)
        #[arg(long)]
        barcode: String,

        /// New price
        #[arg(long, allow_hyphen_values = true)]
        price: String,
    },

    /// Update prices from a CSV file with `barcode` and `price` columns
    Batch {
        /// CSV file to read
        file: PathBuf,

        /// Write the batch report as JSON to this path
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,

        /// Write failed rows as CSV to this path
        #[arg(long, value_name = "PATH")]
        failures: Option<PathBuf>,

        /// Use this delimiter instead of detecting one (e.g. ";" or "\t")
        #[arg(long, value_parser = config::parse_delimiter)]
        delimiter: Option<u8>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        tracing::error!("Application error: {e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    logging::init(&cli.log_file)?;

    let connection =
        ConnectionConfig::try_from(&cli.catalog).context("Invalid catalog configuration")?;
    let mut client = CatalogClient::new(connection, ClientOptions::from(&cli.catalog))
        .context("Failed to create catalog client")?;

    if !client.connect().await {
        anyhow::bail!("Failed to connect to the catalog");
    }

    match cli.command {
        Commands::Update { barcode, price } => {
            let result = PriceUpdater::new(&client)
                .dry_run(cli.dry_run)
                .update_price(&barcode, &price)
                .await;
            info!("Single update result: {}", result.message);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Batch {
            file,
            report,
            failures,
            delimiter,
        } => {
            let config = csv::Config {
                path: file,
                delimiter,
                dry_run: cli.dry_run,
            };

            let batch = csv::process_file(&client, &config, &LoggingObserver)
                .await
                .with_context(|| format!("Batch update from {} failed", config.path.display()))?;

            if let Some(path) = report {
                write_json_report(&batch, &path)?;
            }
            if let Some(path) = failures {
                write_failures(&batch, &path)?;
            }
            println!("{batch}");
        }
    }

    Ok(())
}
