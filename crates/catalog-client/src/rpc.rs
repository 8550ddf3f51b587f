//! JSON-RPC 2.0 transport for the catalog's `/jsonrpc` endpoint.

use price_sink::RemoteOperationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: CallParams<'a>,
    id: u64,
}

#[derive(Serialize)]
struct CallParams<'a> {
    service: &'a str,
    method: &'a str,
    args: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<RpcErrorData>,
}

#[derive(Deserialize)]
struct RpcErrorData {
    #[serde(default)]
    message: Option<String>,
}

impl From<RpcErrorBody> for RemoteOperationError {
    fn from(body: RpcErrorBody) -> Self {
        // Odoo puts the useful text (e.g. "Access Denied") in data.message.
        let message = body
            .data
            .and_then(|d| d.message)
            .filter(|m| !m.is_empty())
            .unwrap_or(body.message);
        RemoteOperationError::Server {
            code: body.code,
            message,
        }
    }
}

pub(crate) struct JsonRpc {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpc {
    pub(crate) fn new(
        endpoint: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, RemoteOperationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RemoteOperationError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            url: format!("{}/jsonrpc", endpoint.trim_end_matches('/')),
            next_id: AtomicU64::new(1),
        })
    }

    /// Invoke `service.method(args)` and return the raw `result` member.
    pub(crate) async fn call(
        &self,
        service: &str,
        method: &str,
        args: Value,
    ) -> Result<Value, RemoteOperationError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            jsonrpc: "2.0",
            method: "call",
            params: CallParams {
                service,
                method,
                args,
            },
            id,
        };

        tracing::debug!("JSON-RPC #{id} {service}.{method} -> {}", self.url);

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RemoteOperationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            return Err(RemoteOperationError::Transport(format!(
                "HTTP {status} from {}: {preview}",
                self.url
            )));
        }

        let body: RpcResponse =
            response
                .json()
                .await
                .map_err(|e| RemoteOperationError::UnexpectedResponse {
                    operation: "call",
                    detail: format!("response to {service}.{method} is not JSON-RPC: {e}"),
                })?;

        if let Some(error) = body.error {
            return Err(error.into());
        }
        Ok(body.result)
    }
}
