//! Connection settings for the catalog.

use std::fmt;
use thiserror::Error;

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8069";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Every required setting that was absent or blank, by variable name.
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Endpoint, database and credentials. All four are non-empty.
#[derive(Clone, PartialEq)]
pub struct ConnectionConfig {
    endpoint: String,
    database: String,
    username: String,
    secret: String,
}

impl ConnectionConfig {
    /// Build a config, reporting every blank field at once.
    pub fn new(
        endpoint: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let config = Self {
            endpoint: endpoint.into().trim().trim_end_matches('/').to_string(),
            database: database.into(),
            username: username.into(),
            secret: secret.into(),
        };

        let missing: Vec<&'static str> = [
            ("ODOO_URL", config.endpoint.as_str()),
            ("ODOO_DB", config.database.as_str()),
            ("ODOO_USERNAME", config.username.as_str()),
            ("ODOO_PASSWORD", config.secret.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ConfigurationError::MissingFields(missing));
        }
        Ok(config)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("endpoint", &self.endpoint)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("secret", &"****")
            .finish()
    }
}
