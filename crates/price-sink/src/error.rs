//! Errors raised by remote catalog operations.

use thiserror::Error;

/// Failure of a search or write call against the catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteOperationError {
    /// No authenticated session; `connect` was never called or failed.
    #[error("Not connected to the catalog")]
    NotConnected,

    /// The request never produced a readable response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with an RPC error.
    #[error("Server error {code}: {message}")]
    Server { code: i64, message: String },

    /// The server answered, but not with the shape the operation expects.
    #[error("Unexpected response to {operation}: {detail}")]
    UnexpectedResponse {
        operation: &'static str,
        detail: String,
    },
}
