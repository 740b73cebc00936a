//! Configuration types for the swap router

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Lower bound on the re-quote interval (seconds)
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 10;

/// JSON-RPC endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Endpoint URL (e.g., "http://127.0.0.1:8545")
    pub url: String,

    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8545".to_string(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// How registry listings are indexed into the adjacency map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjacencyMode {
    /// Index token0 -> token1 and token1 -> token0
    #[default]
    Symmetric,
    /// Index only token0 -> token1, as listed by the registry
    DiscoveryOrder,
}

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// RPC endpoint settings
    #[serde(default)]
    pub rpc: RpcConfig,

    /// On-chain router contract used for quoting
    #[serde(default)]
    pub router_address: String,

    /// Factory contract used for pair discovery
    #[serde(default)]
    pub factory_address: String,

    /// Maximum search depth for path discovery
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,

    /// Number of ranked routes kept per query
    #[serde(default = "default_max_routes")]
    pub max_routes: usize,

    /// Slippage fraction in [0, 1] applied to the best quote
    #[serde(default = "default_slippage")]
    pub default_slippage: Decimal,

    /// Re-quote interval for watched queries
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Optional bound on a single quote call; unbounded when absent
    #[serde(default)]
    pub quote_timeout_ms: Option<u64>,

    #[serde(default)]
    pub adjacency_mode: AdjacencyMode,
}

fn default_max_hops() -> usize {
    3
}

fn default_max_routes() -> usize {
    5
}

fn default_slippage() -> Decimal {
    // 0.5%
    Decimal::new(5, 3)
}

fn default_refresh_interval_secs() -> u64 {
    MIN_REFRESH_INTERVAL_SECS
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            router_address: String::new(),
            factory_address: String::new(),
            max_hops: default_max_hops(),
            max_routes: default_max_routes(),
            default_slippage: default_slippage(),
            refresh_interval_secs: default_refresh_interval_secs(),
            quote_timeout_ms: None,
            adjacency_mode: AdjacencyMode::default(),
        }
    }
}

impl RouterConfig {
    /// Parse a JSON configuration document and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.max_hops == 0 {
            return Err(Error::Config("max_hops must be at least 1".into()));
        }
        if self.max_routes == 0 {
            return Err(Error::Config("max_routes must be at least 1".into()));
        }
        if self.default_slippage < Decimal::ZERO || self.default_slippage > Decimal::ONE {
            return Err(Error::Config(format!(
                "default_slippage {} is outside [0, 1]",
                self.default_slippage
            )));
        }
        if self.rpc.url.is_empty() {
            return Err(Error::Config("rpc.url must not be empty".into()));
        }
        Ok(())
    }

    /// Refresh interval, clamped to the minimum
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_interval_secs.max(MIN_REFRESH_INTERVAL_SECS))
    }

    pub fn quote_timeout(&self) -> Option<std::time::Duration> {
        self.quote_timeout_ms.map(std::time::Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default();
        assert_eq!(config.rpc.url, "http://127.0.0.1:8545");
        assert_eq!(config.max_hops, 3);
        assert_eq!(config.max_routes, 5);
        assert_eq!(config.default_slippage, Decimal::new(5, 3));
        assert_eq!(config.adjacency_mode, AdjacencyMode::Symmetric);
        assert!(config.quote_timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = RouterConfig::from_json_str(
            r#"{
                "router_address": "0xRouter",
                "max_hops": 2,
                "default_slippage": "0.01",
                "adjacency_mode": "discovery_order"
            }"#,
        )
        .unwrap();
        assert_eq!(config.max_hops, 2);
        assert_eq!(config.default_slippage, Decimal::new(1, 2));
        assert_eq!(config.adjacency_mode, AdjacencyMode::DiscoveryOrder);
        assert_eq!(config.rpc.request_timeout_secs, 30);
    }

    #[test]
    fn test_config_rejects_out_of_range() {
        let config = RouterConfig {
            default_slippage: Decimal::new(15, 1),
            ..RouterConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = RouterConfig {
            max_hops: 0,
            ..RouterConfig::default()
        };
        assert!(config.validate().is_err());

        assert!(matches!(
            RouterConfig::from_json_str("not json"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_refresh_interval_is_clamped() {
        let config = RouterConfig {
            refresh_interval_secs: 2,
            ..RouterConfig::default()
        };
        assert_eq!(config.refresh_interval().as_secs(), MIN_REFRESH_INTERVAL_SECS);
    }
}
