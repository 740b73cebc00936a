//! Reserve Oracle
//!
//! Offline [`QuotingOracle`] over a snapshot of pair reserves. Mirrors the
//! on-chain router: each hop uses the constant product formula and a hop
//! without liquidity reverts the whole call.

use std::collections::HashMap;

use async_trait::async_trait;
use num_bigint::BigUint;
use route_core::{Amount, OracleError, QuotingOracle, TokenAddress};

use crate::calculator::{calculate_input, calculate_output};

/// Reserve snapshot keyed by directed token pair
#[derive(Debug, Clone, Default)]
pub struct ReserveOracle {
    reserves: HashMap<(TokenAddress, TokenAddress), (BigUint, BigUint)>,
}

impl ReserveOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pool holding `reserve_a` of `token_a` and `reserve_b` of `token_b`
    pub fn insert_pool(
        &mut self,
        token_a: impl Into<TokenAddress>,
        reserve_a: impl Into<BigUint>,
        token_b: impl Into<TokenAddress>,
        reserve_b: impl Into<BigUint>,
    ) {
        let (token_a, token_b) = (token_a.into(), token_b.into());
        let (reserve_a, reserve_b) = (reserve_a.into(), reserve_b.into());
        self.reserves.insert(
            (token_a.clone(), token_b.clone()),
            (reserve_a.clone(), reserve_b.clone()),
        );
        self.reserves.insert((token_b, token_a), (reserve_b, reserve_a));
    }

    /// Builder-style [`insert_pool`](Self::insert_pool)
    pub fn with_pool(
        mut self,
        token_a: impl Into<TokenAddress>,
        reserve_a: impl Into<BigUint>,
        token_b: impl Into<TokenAddress>,
        reserve_b: impl Into<BigUint>,
    ) -> Self {
        self.insert_pool(token_a, reserve_a, token_b, reserve_b);
        self
    }

    pub fn pool_count(&self) -> usize {
        self.reserves.len() / 2
    }

    fn reserves(
        &self,
        token_in: &TokenAddress,
        token_out: &TokenAddress,
    ) -> Result<&(BigUint, BigUint), OracleError> {
        self.reserves
            .get(&(token_in.clone(), token_out.clone()))
            .ok_or_else(|| OracleError::Reverted {
                message: format!("no pair for {} -> {}", token_in, token_out),
            })
    }
}

fn check_path(path: &[TokenAddress]) -> Result<(), OracleError> {
    if path.len() < 2 {
        return Err(OracleError::Reverted {
            message: "INVALID_PATH".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl QuotingOracle for ReserveOracle {
    async fn get_amounts_out(
        &self,
        amount_in: &Amount,
        path: &[TokenAddress],
    ) -> Result<Vec<Amount>, OracleError> {
        check_path(path)?;

        let mut amounts = Vec::with_capacity(path.len());
        let mut current = amount_in.as_biguint().clone();
        amounts.push(Amount::from(current.clone()));

        for hop in path.windows(2) {
            let (reserve_in, reserve_out) = self.reserves(&hop[0], &hop[1])?;
            current = calculate_output(reserve_in, reserve_out, &current).ok_or_else(|| {
                OracleError::Reverted {
                    message: "INSUFFICIENT_LIQUIDITY".to_string(),
                }
            })?;
            amounts.push(Amount::from(current.clone()));
        }

        Ok(amounts)
    }

    async fn get_amounts_in(
        &self,
        amount_out: &Amount,
        path: &[TokenAddress],
    ) -> Result<Vec<Amount>, OracleError> {
        check_path(path)?;

        let mut amounts = Vec::with_capacity(path.len());
        let mut current = amount_out.as_biguint().clone();
        amounts.push(Amount::from(current.clone()));

        for hop in path.windows(2).rev() {
            let (reserve_in, reserve_out) = self.reserves(&hop[0], &hop[1])?;
            current = calculate_input(reserve_in, reserve_out, &current).ok_or_else(|| {
                OracleError::Reverted {
                    message: "INSUFFICIENT_LIQUIDITY".to_string(),
                }
            })?;
            amounts.push(Amount::from(current.clone()));
        }

        amounts.reverse();
        Ok(amounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(ids: &[&str]) -> Vec<TokenAddress> {
        ids.iter().map(|s| TokenAddress::new(s)).collect()
    }

    #[tokio::test]
    async fn test_amounts_out_single_hop() {
        let oracle = ReserveOracle::new().with_pool("a", 1_000_000u64, "b", 1_000_000u64);
        let amounts = oracle
            .get_amounts_out(&Amount::from(1000u64), &tokens(&["a", "b"]))
            .await
            .unwrap();
        assert_eq!(amounts, vec![Amount::from(1000u64), Amount::from(996u64)]);
    }

    #[tokio::test]
    async fn test_amounts_in_multi_hop_covers_output() {
        let oracle = ReserveOracle::new()
            .with_pool("a", 5_000_000u64, "b", 2_000_000u64)
            .with_pool("b", 3_000_000u64, "c", 9_000_000u64);
        let path = tokens(&["a", "b", "c"]);

        let amounts_in = oracle
            .get_amounts_in(&Amount::from(50_000u64), &path)
            .await
            .unwrap();
        assert_eq!(amounts_in.len(), 3);
        assert_eq!(amounts_in[2], Amount::from(50_000u64));

        let amounts_out = oracle.get_amounts_out(&amounts_in[0], &path).await.unwrap();
        assert!(amounts_out[2] >= Amount::from(50_000u64));
    }

    #[tokio::test]
    async fn test_missing_pair_reverts() {
        let oracle = ReserveOracle::new().with_pool("a", 1000u64, "b", 1000u64);
        let err = oracle
            .get_amounts_out(&Amount::from(10u64), &tokens(&["a", "c"]))
            .await
            .unwrap_err();
        assert!(matches!(err, OracleError::Reverted { .. }));
    }

    #[tokio::test]
    async fn test_draining_output_reverts() {
        let oracle = ReserveOracle::new().with_pool("a", 1000u64, "b", 1000u64);
        let err = oracle
            .get_amounts_in(&Amount::from(1000u64), &tokens(&["a", "b"]))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OracleError::Reverted {
                message: "INSUFFICIENT_LIQUIDITY".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_short_path_reverts() {
        let oracle = ReserveOracle::new();
        assert!(oracle
            .get_amounts_out(&Amount::from(1u64), &tokens(&["a"]))
            .await
            .is_err());
        assert_eq!(oracle.pool_count(), 0);
    }
}
