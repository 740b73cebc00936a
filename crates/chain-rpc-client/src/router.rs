//! On-chain router as a quoting oracle

use async_trait::async_trait;
use route_core::{Amount, Error, OracleError, QuotingOracle, RouterConfig, TokenAddress};

use crate::abi::{self, GET_AMOUNTS_IN, GET_AMOUNTS_OUT};
use crate::RpcClient;

/// `getAmountsOut` / `getAmountsIn` on a deployed router contract
#[derive(Clone)]
pub struct RouterContract {
    client: RpcClient,
    address: String,
}

impl RouterContract {
    pub fn new(client: RpcClient, address: impl Into<String>) -> Self {
        Self {
            client,
            address: address.into(),
        }
    }

    /// Router at `config.router_address`, reached through `config.rpc`
    pub fn from_config(config: &RouterConfig) -> route_core::Result<Self> {
        if config.router_address.trim().is_empty() {
            return Err(Error::Config("router_address must be set".into()));
        }
        let client = RpcClient::new(&config.rpc)?;
        Ok(Self::new(client, config.router_address.trim()))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn call_amounts(
        &self,
        selector: [u8; 4],
        amount: &Amount,
        path: &[TokenAddress],
    ) -> Result<Vec<Amount>, OracleError> {
        let data = abi::encode_amounts_call(selector, amount, path)?;
        let raw = self.client.eth_call(&self.address, &data).await?;
        let amounts = abi::decode_uint_array(&raw)?;
        tracing::trace!(
            router = %self.address,
            hops = path.len().saturating_sub(1),
            "Router returned {} amounts",
            amounts.len()
        );
        Ok(amounts)
    }
}

#[async_trait]
impl QuotingOracle for RouterContract {
    async fn get_amounts_out(
        &self,
        amount_in: &Amount,
        path: &[TokenAddress],
    ) -> Result<Vec<Amount>, OracleError> {
        self.call_amounts(GET_AMOUNTS_OUT, amount_in, path).await
    }

    async fn get_amounts_in(
        &self,
        amount_out: &Amount,
        path: &[TokenAddress],
    ) -> Result<Vec<Amount>, OracleError> {
        self.call_amounts(GET_AMOUNTS_IN, amount_out, path).await
    }
}
