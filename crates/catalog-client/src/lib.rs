//! Client for a remote product catalog reached over JSON-RPC.
//!
//! The catalog speaks the Odoo external API: `common.version`,
//! `common.authenticate` and `object.execute_kw` posted to `{endpoint}/jsonrpc`.
//! [`CatalogClient`] authenticates once and then implements
//! [`price_sink::CatalogSink`] for product search and price writes.

mod client;
mod config;
mod rpc;

pub use client::{CatalogClient, ClientOptions, ConnectionError, Session};
pub use config::{ConfigurationError, ConnectionConfig, DEFAULT_ENDPOINT};
