//! chain-rpc-client: JSON-RPC client for router and factory contracts
//!
//! This crate provides a thin Ethereum JSON-RPC client plus the two contract
//! bindings the router needs: the on-chain router as a quoting oracle and the
//! pair factory as a pair registry.

pub mod abi;
pub mod factory;
pub mod probe;
pub mod router;

#[cfg(test)]
pub(crate) mod test_endpoint;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use route_core::{OracleError, RpcConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use factory::FactoryRegistry;
pub use probe::{probe_endpoint, probe_endpoints, EndpointProbe};
pub use router::RouterContract;

/// Result type for RPC client operations
pub type Result<T> = std::result::Result<T, OracleError>;

/// Geth's error code for `execution reverted`
const REVERT_ERROR_CODE: i64 = 3;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl RpcErrorObject {
    fn into_oracle_error(self) -> OracleError {
        if self.code == REVERT_ERROR_CODE || self.message.to_lowercase().contains("revert") {
            let message = match self.data {
                Some(serde_json::Value::String(data)) => format!("{} ({})", self.message, data),
                _ => self.message,
            };
            OracleError::Reverted { message }
        } else {
            OracleError::ApiError {
                message: format!("{} (code {})", self.message, self.code),
            }
        }
    }
}

/// JSON-RPC client over HTTP
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
    next_id: Arc<AtomicU64>,
}

impl RpcClient {
    /// Create a client for the configured endpoint
    pub fn new(config: &RpcConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs.max(1));
        let http = reqwest::Client::builder()
            .user_agent("chain-rpc-client")
            .build()
            .map_err(|e| OracleError::Unreachable {
                url: format!("{}: {}", config.url, e),
            })?;

        Ok(Self {
            http,
            url: config.url.clone(),
            timeout,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one JSON-RPC request and decode its `result`
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response: RpcResponse<T> = timed_request(self.timeout, async {
            let response = self
                .http
                .post(&self.url)
                .json(&request)
                .send()
                .await
                .map_err(|e| OracleError::Unreachable {
                    url: format!("{}: {}", self.url, e),
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(OracleError::ApiError {
                    message: format!("HTTP {} from {}", status, self.url),
                });
            }

            response
                .json::<RpcResponse<T>>()
                .await
                .map_err(|e| OracleError::ParseError(e.to_string()))
        })
        .await?;

        if let Some(error) = response.error {
            return Err(error.into_oracle_error());
        }
        response
            .result
            .ok_or_else(|| OracleError::ParseError(format!("{} returned no result", method)))
    }

    /// `eth_call` against the latest block; returns hex return data
    pub async fn eth_call(&self, to: &str, data: &str) -> Result<String> {
        self.request(
            "eth_call",
            serde_json::json!([{ "to": to, "data": data }, "latest"]),
        )
        .await
    }

    pub async fn chain_id(&self) -> Result<u64> {
        let raw: String = self.request("eth_chainId", serde_json::json!([])).await?;
        parse_quantity(&raw)
    }

    pub async fn block_number(&self) -> Result<u64> {
        let raw: String = self.request("eth_blockNumber", serde_json::json!([])).await?;
        parse_quantity(&raw)
    }
}

/// Parse a hex quantity such as `0x1a`
pub fn parse_quantity(raw: &str) -> Result<u64> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| OracleError::ParseError(format!("quantity {:?} lacks 0x prefix", raw)))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| OracleError::ParseError(format!("invalid quantity {:?}: {}", raw, e)))
}

/// Wrap a request with a timeout
async fn timed_request<T>(
    limit: Duration,
    fut: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| OracleError::Timeout {
            millis: limit.as_millis() as u64,
        })?
}
