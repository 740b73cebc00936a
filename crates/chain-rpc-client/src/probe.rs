//! RPC endpoint probing

use std::time::Instant;

use futures::future::join_all;
use route_core::RpcConfig;
use serde::Serialize;

use crate::RpcClient;

const PROBE_TIMEOUT_SECS: u64 = 4;

/// Result of a successful endpoint probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointProbe {
    pub url: String,
    pub chain_id: u64,
    pub block_number: u64,
    pub latency_ms: u64,
}

/// Probe a single RPC URL. Returns None on failure (timeout/unreachable).
/// Uses a 4-second timeout per request.
pub async fn probe_endpoint(url: &str) -> Option<EndpointProbe> {
    let start = Instant::now();

    let client = RpcClient::new(&RpcConfig {
        url: url.to_string(),
        request_timeout_secs: PROBE_TIMEOUT_SECS,
    })
    .ok()?;

    let chain_id = client.chain_id().await.ok()?;
    let latency_ms = start.elapsed().as_millis() as u64;

    let block_number = match client.block_number().await {
        Ok(height) => height,
        Err(e) => {
            tracing::debug!("Probe of {} got chain id but no block number: {}", url, e);
            return None;
        }
    };

    Some(EndpointProbe {
        url: url.to_string(),
        chain_id,
        block_number,
        latency_ms,
    })
}

/// Probe several URLs concurrently; reachable endpoints, fastest first
pub async fn probe_endpoints(urls: &[String]) -> Vec<EndpointProbe> {
    let probes: Vec<_> = urls.iter().map(|url| probe_endpoint(url)).collect();
    let mut reachable: Vec<EndpointProbe> = join_all(probes).await.into_iter().flatten().collect();
    reachable.sort_by_key(|p| p.latency_ms);

    tracing::info!(
        "Probed {} RPC endpoints, {} reachable",
        urls.len(),
        reachable.len()
    );
    reachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_endpoint::TestEndpoint;
    use serde_json::json;

    #[tokio::test]
    async fn test_probe_healthy_endpoint() {
        let endpoint = TestEndpoint::start(|method, _| match method {
            "eth_chainId" => json!({ "result": "0x89" }),
            _ => json!({ "result": "0x2a" }),
        })
        .await;

        let probe = probe_endpoint(&endpoint.url()).await.unwrap();
        assert_eq!(probe.chain_id, 137);
        assert_eq!(probe.block_number, 42);
        assert_eq!(probe.url, endpoint.url());
    }

    #[tokio::test]
    async fn test_probe_endpoints_drops_failures() {
        let healthy = TestEndpoint::start(|_, _| json!({ "result": "0x1" })).await;
        let broken = TestEndpoint::start(|_, _| {
            json!({ "error": { "code": -32603, "message": "internal error" } })
        })
        .await;

        let urls = vec![
            broken.url(),
            healthy.url(),
            "http://127.0.0.1:1".to_string(),
        ];
        let reachable = probe_endpoints(&urls).await;
        assert_eq!(reachable.len(), 1);
        assert_eq!(reachable[0].url, healthy.url());
    }
}
