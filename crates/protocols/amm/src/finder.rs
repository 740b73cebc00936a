//! Route Finder
//!
//! Facade tying together the pair adjacency, path discovery, oracle quoting
//! and slippage bounds for a single query.

use std::sync::Arc;

use route_core::{
    Amount, PairRegistry, QuotedPath, QuotingOracle, RouteError, RouterConfig, SwapDirection,
    TokenAddress,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::adjacency::PairAdjacency;
use crate::paths::find_paths;
use crate::quote::{quote_amounts_with_timeout, rank_quotes};
use crate::slippage::apply_slippage;

/// A single route query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub source: TokenAddress,
    pub destination: TokenAddress,
    pub amount: Amount,
    pub direction: SwapDirection,
}

impl RouteQuery {
    pub fn exact_in(
        source: impl Into<TokenAddress>,
        destination: impl Into<TokenAddress>,
        amount: impl Into<Amount>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            amount: amount.into(),
            direction: SwapDirection::ExactIn,
        }
    }

    pub fn exact_out(
        source: impl Into<TokenAddress>,
        destination: impl Into<TokenAddress>,
        amount: impl Into<Amount>,
    ) -> Self {
        Self {
            direction: SwapDirection::ExactOut,
            ..Self::exact_in(source, destination, amount)
        }
    }
}

/// Ranked routes for one query, best first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteQuote {
    pub query: RouteQuery,
    /// Quoted candidates, best first, truncated to `max_routes`
    pub routes: Vec<QuotedPath>,
    /// Candidate paths found before quoting
    pub candidates: usize,
    pub slippage: Decimal,
    /// Slippage-adjusted bound on the best route: minimum output for
    /// exact-in, maximum input for exact-out
    pub bound: Amount,
}

impl RouteQuote {
    /// Best route; `None` only for a quote built without routes
    pub fn best(&self) -> Option<&QuotedPath> {
        self.routes.first()
    }

    /// Quoted amount on the variable side of the best route
    pub fn quoted_amount(&self) -> Option<&Amount> {
        let best = self.best()?;
        match self.query.direction {
            SwapDirection::ExactIn => best.amount_out(),
            SwapDirection::ExactOut => best.amount_in(),
        }
    }
}

/// Route finder over a replaceable adjacency snapshot
pub struct RouteFinder<O> {
    oracle: O,
    adjacency: Arc<RwLock<Arc<PairAdjacency>>>,
    config: RouterConfig,
}

impl<O: QuotingOracle> RouteFinder<O> {
    pub fn new(oracle: O, adjacency: PairAdjacency, config: RouterConfig) -> Self {
        Self {
            oracle,
            adjacency: Arc::new(RwLock::new(Arc::new(adjacency))),
            config,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Current adjacency snapshot
    pub async fn adjacency(&self) -> Arc<PairAdjacency> {
        self.adjacency.read().await.clone()
    }

    /// Swap in a new adjacency; in-flight queries keep their snapshot
    pub async fn replace_adjacency(&self, adjacency: PairAdjacency) {
        let mut lock = self.adjacency.write().await;
        *lock = Arc::new(adjacency);
    }

    /// Rebuild the adjacency from a pair registry
    pub async fn refresh_adjacency<R>(&self, registry: &R) -> Result<usize, route_core::Error>
    where
        R: PairRegistry + ?Sized,
    {
        let listings = registry.list_pairs().await?;
        let adjacency = PairAdjacency::from_listings(&listings, self.config.adjacency_mode);
        let edges = adjacency.edge_count();
        tracing::info!(
            pairs = listings.len(),
            tokens = adjacency.token_count(),
            edges,
            "Pair adjacency refreshed"
        );
        self.replace_adjacency(adjacency).await;
        Ok(edges)
    }

    /// Find, quote and rank routes using the configured slippage
    pub async fn find_routes(&self, query: &RouteQuery) -> Result<RouteQuote, RouteError> {
        self.find_routes_with_slippage(query, self.config.default_slippage)
            .await
    }

    /// Find, quote and rank routes with an explicit slippage rate
    pub async fn find_routes_with_slippage(
        &self,
        query: &RouteQuery,
        slippage: Decimal,
    ) -> Result<RouteQuote, RouteError> {
        if query.amount.is_zero() {
            return Err(RouteError::invalid("amount must be positive"));
        }
        // Reject a bad rate before any oracle traffic
        apply_slippage(&query.amount, slippage, query.direction)?;

        let adjacency = self.adjacency().await;
        let paths = find_paths(
            &adjacency,
            &query.source,
            &query.destination,
            self.config.max_hops,
        )?;

        if paths.is_empty() {
            return Err(RouteError::NoRouteFound {
                source_token: query.source.to_string(),
                destination_token: query.destination.to_string(),
            });
        }

        let candidates = paths.len();
        let mut routes = quote_amounts_with_timeout(
            &self.oracle,
            &paths,
            &query.amount,
            query.direction,
            self.config.quote_timeout(),
        )
        .await?;

        if routes.is_empty() {
            return Err(RouteError::QuoteUnavailable { candidates });
        }

        rank_quotes(&mut routes, query.direction);
        routes.truncate(self.config.max_routes.max(1));

        let quoted = match query.direction {
            SwapDirection::ExactIn => routes[0].amount_out(),
            SwapDirection::ExactOut => routes[0].amount_in(),
        }
        .cloned()
        .unwrap_or_default();
        let bound = apply_slippage(&quoted, slippage, query.direction)?;

        tracing::debug!(
            source = %query.source,
            destination = %query.destination,
            candidates,
            quoted = routes.len(),
            best = %routes[0].path,
            "Route quote ready"
        );

        Ok(RouteQuote {
            query: query.clone(),
            routes,
            candidates,
            slippage,
            bound,
        })
    }
}
