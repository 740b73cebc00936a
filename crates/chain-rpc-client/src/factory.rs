//! Pair factory as a pair registry
//!
//! Enumerates `allPairs(i)` for `i < allPairsLength()` and reads each pair's
//! `token0` / `token1`. Calls go out in bounded batches; a pair whose
//! lookups fail is skipped rather than failing the whole listing.

use async_trait::async_trait;
use futures::future::join_all;
use num_traits::ToPrimitive;
use route_core::{Error, OracleError, PairAddress, PairListing, PairRegistry, RouterConfig};

use crate::abi::{self, ALL_PAIRS, ALL_PAIRS_LENGTH, TOKEN0, TOKEN1};
use crate::RpcClient;

/// Pairs looked up concurrently per batch
const BATCH_SIZE: u64 = 32;

/// Largest `allPairsLength` accepted without an explicit `max_pairs`
const MAX_PAIR_COUNT: u64 = 1_000_000;

#[derive(Clone)]
pub struct FactoryRegistry {
    client: RpcClient,
    factory: String,
    max_pairs: Option<u64>,
}

impl FactoryRegistry {
    pub fn new(client: RpcClient, factory: impl Into<String>) -> Self {
        Self {
            client,
            factory: factory.into(),
            max_pairs: None,
        }
    }

    /// Factory at `config.factory_address`, reached through `config.rpc`
    pub fn from_config(config: &RouterConfig) -> route_core::Result<Self> {
        if config.factory_address.trim().is_empty() {
            return Err(Error::Config("factory_address must be set".into()));
        }
        let client = RpcClient::new(&config.rpc)?;
        Ok(Self::new(client, config.factory_address.trim()))
    }

    pub fn factory(&self) -> &str {
        &self.factory
    }

    /// Only enumerate the first `limit` pairs
    pub fn with_max_pairs(mut self, limit: u64) -> Self {
        self.max_pairs = Some(limit);
        self
    }

    pub async fn pair_count(&self) -> Result<u64, OracleError> {
        let raw = self
            .client
            .eth_call(&self.factory, &abi::encode_call(ALL_PAIRS_LENGTH))
            .await?;
        abi::decode_uint(&raw)?
            .to_u64()
            .ok_or_else(|| OracleError::ParseError("allPairsLength out of range".to_string()))
    }

    async fn pair_at(&self, index: u64) -> Result<PairListing, OracleError> {
        let raw = self
            .client
            .eth_call(&self.factory, &abi::encode_index_call(ALL_PAIRS, index)?)
            .await?;
        let pair = abi::decode_address(&raw)?;

        let token0_call = abi::encode_call(TOKEN0);
        let token1_call = abi::encode_call(TOKEN1);
        let (token0, token1) = futures::join!(
            self.client.eth_call(pair.as_str(), &token0_call),
            self.client.eth_call(pair.as_str(), &token1_call),
        );

        Ok(PairListing {
            pair: PairAddress::new(pair.as_str()),
            token0: abi::decode_address(&token0?)?,
            token1: abi::decode_address(&token1?)?,
        })
    }
}

#[async_trait]
impl PairRegistry for FactoryRegistry {
    async fn list_pairs(&self) -> Result<Vec<PairListing>, OracleError> {
        let total = self.pair_count().await?;
        let count = match self.max_pairs {
            Some(limit) => total.min(limit),
            None if total > MAX_PAIR_COUNT => {
                return Err(OracleError::ParseError(format!(
                    "allPairsLength {} exceeds {}; set max_pairs to enumerate a prefix",
                    total, MAX_PAIR_COUNT
                )));
            }
            None => total,
        };
        tracing::info!("Factory {} lists {} pairs, reading {}", self.factory, total, count);

        let mut listings = Vec::with_capacity(count.min(BATCH_SIZE * 4) as usize);
        let mut start = 0;
        while start < count {
            let end = (start + BATCH_SIZE).min(count);
            let batch: Vec<_> = (start..end).map(|i| self.pair_at(i)).collect();
            for (offset, result) in join_all(batch).await.into_iter().enumerate() {
                match result {
                    Ok(listing) => listings.push(listing),
                    Err(e) => {
                        tracing::warn!("Skipping pair #{}: {}", start + offset as u64, e)
                    }
                }
            }
            start = end;
        }

        Ok(listings)
    }
}
