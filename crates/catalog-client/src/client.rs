//! Authenticated catalog session and the two product operations.

use crate::config::ConnectionConfig;
use crate::rpc::JsonRpc;
use price_sink::{CatalogSink, RemoteOperationError};
use price_types::ProductId;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// Authenticated user identity returned by `common.authenticate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub uid: i64,
}

#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Authentication failed - invalid credentials for user '{username}' on database '{database}'")]
    AuthenticationRejected { database: String, username: String },

    #[error(transparent)]
    Remote(#[from] RemoteOperationError),
}

/// Which model and field a price write targets, plus transport settings.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Catalog model searched and written (default: `product.template`)
    pub model: String,

    /// Field receiving the new price (default: `list_price`)
    pub price_field: String,

    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            model: "product.template".to_string(),
            price_field: "list_price".to_string(),
            request_timeout: None,
        }
    }
}

pub struct CatalogClient {
    config: ConnectionConfig,
    options: ClientOptions,
    rpc: JsonRpc,
    session: Option<Session>,
}

impl CatalogClient {
    pub fn new(
        config: ConnectionConfig,
        options: ClientOptions,
    ) -> Result<Self, RemoteOperationError> {
        let rpc = JsonRpc::new(config.endpoint(), options.request_timeout)?;
        Ok(Self {
            config,
            options,
            rpc,
            session: None,
        })
    }

    pub fn session(&self) -> Option<Session> {
        self.session
    }

    /// Connect and authenticate, logging the cause on failure.
    ///
    /// Returns `false` instead of an error; see [`Self::try_connect`] for the
    /// typed variant.
    pub async fn connect(&mut self) -> bool {
        match self.try_connect().await {
            Ok(_) => true,
            Err(e) => {
                error!("Connection failed: {e}");
                false
            }
        }
    }

    /// Connect and authenticate. Any previous session is dropped first.
    pub async fn try_connect(&mut self) -> Result<Session, ConnectionError> {
        self.session = None;
        info!("Connecting to catalog at {}", self.config.endpoint());

        let version = self.server_version().await?;
        info!(
            "Connected to catalog server {}",
            version.as_deref().unwrap_or("Unknown version")
        );

        let uid = self
            .rpc
            .call(
                "common",
                "authenticate",
                json!([
                    self.config.database(),
                    self.config.username(),
                    self.config.secret(),
                    {}
                ]),
            )
            .await?;

        let session = match uid {
            Value::Number(ref n) => match n.as_i64() {
                Some(0) => None,
                Some(uid) => Some(Session { uid }),
                None => {
                    return Err(RemoteOperationError::UnexpectedResponse {
                        operation: "authenticate",
                        detail: format!("user id {n} is not an integer"),
                    }
                    .into())
                }
            },
            Value::Bool(false) | Value::Null => None,
            other => {
                return Err(RemoteOperationError::UnexpectedResponse {
                    operation: "authenticate",
                    detail: format!("expected a user id, got {other}"),
                }
                .into())
            }
        };

        let session = session.ok_or_else(|| ConnectionError::AuthenticationRejected {
            database: self.config.database().to_string(),
            username: self.config.username().to_string(),
        })?;

        info!("Successfully authenticated as user ID: {}", session.uid);
        self.session = Some(session);
        Ok(session)
    }

    /// Server version string, if the server reports one in the usual place.
    pub async fn server_version(&self) -> Result<Option<String>, RemoteOperationError> {
        let version = self.rpc.call("common", "version", json!([])).await?;
        Ok(version
            .get("server_version")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// `object.execute_kw` on the configured model.
    async fn execute(&self, operation: &str, args: Value) -> Result<Value, RemoteOperationError> {
        let session = self.session.ok_or(RemoteOperationError::NotConnected)?;
        self.rpc
            .call(
                "object",
                "execute_kw",
                json!([
                    self.config.database(),
                    session.uid,
                    self.config.secret(),
                    self.options.model,
                    operation,
                    args
                ]),
            )
            .await
    }
}

#[async_trait::async_trait]
impl CatalogSink for CatalogClient {
    async fn search_by_barcode(
        &self,
        barcode: &str,
    ) -> Result<Vec<ProductId>, RemoteOperationError> {
        let ids = self
            .execute("search", json!([[["barcode", "=", barcode]]]))
            .await?;
        serde_json::from_value(ids.clone()).map_err(|_| {
            RemoteOperationError::UnexpectedResponse {
                operation: "search",
                detail: format!("expected a list of ids, got {ids}"),
            }
        })
    }

    async fn write_price(
        &self,
        product_ids: &[ProductId],
        price: f64,
    ) -> Result<(), RemoteOperationError> {
        let mut values = serde_json::Map::new();
        values.insert(self.options.price_field.clone(), json!(price));

        match self
            .execute("write", json!([product_ids, values]))
            .await?
        {
            Value::Bool(true) => Ok(()),
            other => Err(RemoteOperationError::UnexpectedResponse {
                operation: "write",
                detail: format!("expected true, got {other}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_ENDPOINT;

    fn client() -> CatalogClient {
        let config = ConnectionConfig::new(DEFAULT_ENDPOINT, "db", "user", "pw").unwrap();
        CatalogClient::new(config, ClientOptions::default()).unwrap()
    }

    #[test]
    fn test_default_options() {
        let options = ClientOptions::default();
        assert_eq!(options.model, "product.template");
        assert_eq!(options.price_field, "list_price");
        assert!(options.request_timeout.is_none());
    }

    #[tokio::test]
    async fn test_operations_require_a_session() {
        let client = client();
        assert!(client.session().is_none());

        let err = client.search_by_barcode("123").await.unwrap_err();
        assert_eq!(err, RemoteOperationError::NotConnected);

        let err = client.write_price(&[1], 1.0).await.unwrap_err();
        assert_eq!(err, RemoteOperationError::NotConnected);
    }
}
