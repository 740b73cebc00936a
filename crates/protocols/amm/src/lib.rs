//! Constant Product AMM Router
//!
//! Finds multi-hop swap paths across liquidity pairs, quotes them against an
//! on-chain router, and computes slippage bounds for the chosen route.

pub mod adjacency;
pub mod calculator;
pub mod finder;
pub mod paths;
pub mod quote;
pub mod reserve_oracle;
pub mod slippage;
pub mod watcher;

// Re-exports
pub use adjacency::PairAdjacency;
pub use calculator::{calculate_input, calculate_output};
pub use finder::{RouteFinder, RouteQuery, RouteQuote};
pub use paths::{find_paths, DEFAULT_MAX_HOPS};
pub use quote::{quote_amounts, quote_amounts_with_timeout, rank_quotes, select_best};
pub use reserve_oracle::ReserveOracle;
pub use slippage::{apply_slippage, slippage_max, slippage_min};
pub use watcher::{QuoteUpdate, QuoteWatcher};
