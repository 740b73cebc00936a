//! Background quote watcher
//!
//! Re-quotes the current query on a fixed interval and publishes results on a
//! watch channel. Submitting a new query supersedes the old one immediately;
//! a result computed for a superseded query is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use route_core::{QuotingOracle, RouteError, MIN_REFRESH_INTERVAL_SECS};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::finder::{RouteFinder, RouteQuery, RouteQuote};

/// One published quote result
#[derive(Debug, Clone)]
pub struct QuoteUpdate {
    /// Increments with every submitted query
    pub generation: u64,
    pub query: RouteQuery,
    pub result: Result<RouteQuote, RouteError>,
}

type QuerySlot = Option<(u64, RouteQuery)>;

/// Handle to a running watcher task
pub struct QuoteWatcher {
    query_tx: watch::Sender<QuerySlot>,
    updates_rx: watch::Receiver<Option<QuoteUpdate>>,
    generation: AtomicU64,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl QuoteWatcher {
    /// Start a watcher using the finder's configured refresh interval
    pub fn spawn<O>(finder: Arc<RouteFinder<O>>) -> Self
    where
        O: QuotingOracle + 'static,
    {
        let interval = finder.config().refresh_interval();
        Self::spawn_with_interval(finder, interval)
    }

    /// Start a watcher; intervals below the minimum are raised to it
    pub fn spawn_with_interval<O>(finder: Arc<RouteFinder<O>>, interval: Duration) -> Self
    where
        O: QuotingOracle + 'static,
    {
        let interval = interval.max(Duration::from_secs(MIN_REFRESH_INTERVAL_SECS));
        let (query_tx, query_rx) = watch::channel::<QuerySlot>(None);
        let (updates_tx, updates_rx) = watch::channel(None);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(run(finder, interval, query_rx, updates_tx, shutdown_rx));

        Self {
            query_tx,
            updates_rx,
            generation: AtomicU64::new(0),
            shutdown_tx: Some(shutdown_tx),
            handle,
        }
    }

    /// Replace the watched query. Returns its generation.
    pub fn submit(&self, query: RouteQuery) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.query_tx.send_replace(Some((generation, query)));
        generation
    }

    /// Receiver for published updates
    pub fn subscribe(&self) -> watch::Receiver<Option<QuoteUpdate>> {
        self.updates_rx.clone()
    }

    /// Most recent published update
    pub fn latest(&self) -> Option<QuoteUpdate> {
        self.updates_rx.borrow().clone()
    }

    /// Stop the task and wait for it to exit
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.handle).await {
            tracing::warn!("Quote watcher task ended abnormally: {}", e);
        }
    }
}

async fn run<O>(
    finder: Arc<RouteFinder<O>>,
    interval: Duration,
    mut query_rx: watch::Receiver<QuerySlot>,
    updates_tx: watch::Sender<Option<QuoteUpdate>>,
    mut shutdown_rx: oneshot::Receiver<()>,
) where
    O: QuotingOracle + 'static,
{
    tracing::info!("Quote watcher started (interval {}s)", interval.as_secs());

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Set when a new query arrived mid-quote and must be quoted at once
    let mut superseded = false;

    loop {
        if !superseded {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                changed = query_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    ticker.reset();
                }
                _ = ticker.tick() => {}
            }
        }
        superseded = false;

        let Some((generation, query)) = query_rx.borrow_and_update().clone() else {
            continue;
        };

        let result = tokio::select! {
            _ = &mut shutdown_rx => break,
            changed = query_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                tracing::debug!(generation, "Dropping in-flight quote for superseded query");
                ticker.reset();
                superseded = true;
                continue;
            }
            result = finder.find_routes(&query) => result,
        };

        let current = query_rx.borrow().as_ref().map(|(g, _)| *g);
        if current != Some(generation) {
            tracing::debug!(generation, "Discarding quote for superseded query");
            continue;
        }

        if let Err(e) = &result {
            tracing::warn!(generation, "Quote refresh failed: {}", e);
        }

        updates_tx.send_replace(Some(QuoteUpdate {
            generation,
            query,
            result,
        }));
    }

    tracing::info!("Quote watcher stopped");
}
