//! External capabilities consumed by the router
//!
//! The quoting oracle is the on-chain router's amount formula; the pair
//! registry supplies the listings the adjacency map is built from.

use async_trait::async_trait;

use crate::errors::OracleError;
use crate::types::{Amount, PairListing, TokenAddress};

/// Deterministic amount quoting along a token path.
///
/// Both calls return one amount per path token. A hop without enough
/// liquidity fails the whole call.
#[async_trait]
pub trait QuotingOracle: Send + Sync {
    /// Amounts realized at each hop boundary for a fixed input
    async fn get_amounts_out(
        &self,
        amount_in: &Amount,
        path: &[TokenAddress],
    ) -> Result<Vec<Amount>, OracleError>;

    /// Amounts required at each hop boundary for a fixed output
    async fn get_amounts_in(
        &self,
        amount_out: &Amount,
        path: &[TokenAddress],
    ) -> Result<Vec<Amount>, OracleError>;
}

/// Source of tradable pairs
#[async_trait]
pub trait PairRegistry: Send + Sync {
    async fn list_pairs(&self) -> Result<Vec<PairListing>, OracleError>;
}

#[async_trait]
impl<T: QuotingOracle + ?Sized> QuotingOracle for std::sync::Arc<T> {
    async fn get_amounts_out(
        &self,
        amount_in: &Amount,
        path: &[TokenAddress],
    ) -> Result<Vec<Amount>, OracleError> {
        (**self).get_amounts_out(amount_in, path).await
    }

    async fn get_amounts_in(
        &self,
        amount_out: &Amount,
        path: &[TokenAddress],
    ) -> Result<Vec<Amount>, OracleError> {
        (**self).get_amounts_in(amount_out, path).await
    }
}
