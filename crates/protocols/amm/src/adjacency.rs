//! Pair Adjacency
//!
//! Token graph built from registry listings. Ordered maps give a canonical,
//! lexicographic neighbor order so path discovery is reproducible.

use std::collections::BTreeMap;

use route_core::{AdjacencyMode, PairAddress, PairListing, TokenAddress};

/// Directed token -> token -> pair map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairAdjacency {
    edges: BTreeMap<TokenAddress, BTreeMap<TokenAddress, PairAddress>>,
}

impl PairAdjacency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from registry listings.
    ///
    /// Listings with an empty or self-referencing token are skipped. When two
    /// listings cover the same directed pair, the first one wins.
    pub fn from_listings(listings: &[PairListing], mode: AdjacencyMode) -> Self {
        let mut adjacency = Self::new();
        let mut skipped = 0usize;

        for listing in listings {
            if listing.token0.is_empty()
                || listing.token1.is_empty()
                || listing.token0 == listing.token1
            {
                skipped += 1;
                continue;
            }

            adjacency.insert_if_absent(&listing.token0, &listing.token1, &listing.pair);
            if mode == AdjacencyMode::Symmetric {
                adjacency.insert_if_absent(&listing.token1, &listing.token0, &listing.pair);
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} malformed pair listings", skipped);
        }
        tracing::debug!(
            tokens = adjacency.token_count(),
            edges = adjacency.edge_count(),
            ?mode,
            "Built pair adjacency"
        );

        adjacency
    }

    /// Add a directed edge, replacing any existing pair for it
    pub fn insert(
        &mut self,
        from: impl Into<TokenAddress>,
        to: impl Into<TokenAddress>,
        pair: impl Into<PairAddress>,
    ) {
        self.edges
            .entry(from.into())
            .or_default()
            .insert(to.into(), pair.into());
    }

    fn insert_if_absent(&mut self, from: &TokenAddress, to: &TokenAddress, pair: &PairAddress) {
        self.edges
            .entry(from.clone())
            .or_default()
            .entry(to.clone())
            .or_insert_with(|| pair.clone());
    }

    /// Tokens directly reachable from `token`, in canonical order
    pub fn neighbors<'a>(
        &'a self,
        token: &TokenAddress,
    ) -> impl Iterator<Item = (&'a TokenAddress, &'a PairAddress)> + 'a {
        self.edges.get(token).into_iter().flat_map(|m| m.iter())
    }

    /// Pair contract for a directed hop
    pub fn pair(&self, from: &TokenAddress, to: &TokenAddress) -> Option<&PairAddress> {
        self.edges.get(from).and_then(|m| m.get(to))
    }

    /// Pair contracts traversed by a token path, if every hop exists
    pub fn pairs_along(&self, tokens: &[TokenAddress]) -> Option<Vec<PairAddress>> {
        tokens
            .windows(2)
            .map(|w| self.pair(&w[0], &w[1]).cloned())
            .collect()
    }

    pub fn contains_token(&self, token: &TokenAddress) -> bool {
        self.edges.contains_key(token)
    }

    /// Number of tokens with at least one outgoing edge
    pub fn token_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(pair: &str, token0: &str, token1: &str) -> PairListing {
        PairListing {
            pair: pair.into(),
            token0: token0.into(),
            token1: token1.into(),
        }
    }

    #[test]
    fn test_symmetric_listing_indexes_both_directions() {
        let adjacency =
            PairAdjacency::from_listings(&[listing("p1", "weth", "usdc")], AdjacencyMode::Symmetric);

        assert_eq!(adjacency.token_count(), 2);
        assert_eq!(adjacency.edge_count(), 2);
        assert_eq!(
            adjacency.pair(&"usdc".into(), &"weth".into()),
            Some(&PairAddress::new("p1"))
        );
    }

    #[test]
    fn test_discovery_order_indexes_one_direction() {
        let adjacency = PairAdjacency::from_listings(
            &[listing("p1", "weth", "usdc")],
            AdjacencyMode::DiscoveryOrder,
        );

        assert_eq!(adjacency.edge_count(), 1);
        assert!(adjacency.pair(&"weth".into(), &"usdc".into()).is_some());
        assert!(adjacency.pair(&"usdc".into(), &"weth".into()).is_none());
    }

    #[test]
    fn test_malformed_listings_skipped() {
        let adjacency = PairAdjacency::from_listings(
            &[
                listing("p1", "weth", "weth"),
                listing("p2", "", "usdc"),
                listing("p3", "dai", "usdc"),
            ],
            AdjacencyMode::Symmetric,
        );
        assert_eq!(adjacency.edge_count(), 2);
        assert!(!adjacency.contains_token(&"weth".into()));
    }

    #[test]
    fn test_first_listing_wins_for_duplicate_pair() {
        let adjacency = PairAdjacency::from_listings(
            &[listing("p1", "a", "b"), listing("p2", "b", "a")],
            AdjacencyMode::Symmetric,
        );
        assert_eq!(adjacency.pair(&"a".into(), &"b".into()).unwrap().as_str(), "p1");
        assert_eq!(adjacency.pair(&"b".into(), &"a".into()).unwrap().as_str(), "p1");
    }

    #[test]
    fn test_neighbors_are_sorted() {
        let mut adjacency = PairAdjacency::new();
        adjacency.insert("a", "zeta", "p1");
        adjacency.insert("a", "beta", "p2");
        adjacency.insert("a", "Mid", "p3");

        let order: Vec<&str> = adjacency
            .neighbors(&"a".into())
            .map(|(t, _)| t.as_str())
            .collect();
        assert_eq!(order, vec!["beta", "mid", "zeta"]);
        assert_eq!(adjacency.neighbors(&"missing".into()).count(), 0);
    }

    #[test]
    fn test_pairs_along_path() {
        let mut adjacency = PairAdjacency::new();
        adjacency.insert("a", "b", "ab");
        adjacency.insert("b", "c", "bc");

        let tokens: Vec<TokenAddress> = vec!["a".into(), "b".into(), "c".into()];
        let pairs = adjacency.pairs_along(&tokens).unwrap();
        assert_eq!(pairs, vec![PairAddress::new("ab"), PairAddress::new("bc")]);

        let broken: Vec<TokenAddress> = vec!["a".into(), "c".into()];
        assert!(adjacency.pairs_along(&broken).is_none());
    }
}
