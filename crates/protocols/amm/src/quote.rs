//! Amount Quoting & Selection
//!
//! Fans one oracle call out per candidate path and collects the survivors.
//! No AMM math happens here; amounts come from the oracle as-is.

use std::cmp::Ordering;
use std::time::Duration;

use futures::future::join_all;
use route_core::{Amount, Path, QuotedPath, QuotingOracle, RouteError, SwapDirection};

/// Quote every path concurrently.
///
/// A path whose call fails is dropped; if all fail the result is empty.
/// Output order follows `paths`.
pub async fn quote_amounts<O>(
    oracle: &O,
    paths: &[Path],
    amount: &Amount,
    direction: SwapDirection,
) -> Result<Vec<QuotedPath>, RouteError>
where
    O: QuotingOracle + ?Sized,
{
    quote_amounts_with_timeout(oracle, paths, amount, direction, None).await
}

/// [`quote_amounts`] with an optional bound on each oracle call
pub async fn quote_amounts_with_timeout<O>(
    oracle: &O,
    paths: &[Path],
    amount: &Amount,
    direction: SwapDirection,
    call_timeout: Option<Duration>,
) -> Result<Vec<QuotedPath>, RouteError>
where
    O: QuotingOracle + ?Sized,
{
    if amount.is_zero() {
        return Err(RouteError::invalid("amount must be positive"));
    }

    let calls: Vec<_> = paths
        .iter()
        .map(|path| quote_path(oracle, path, amount, direction, call_timeout))
        .collect();
    let results = join_all(calls).await;

    let mut quoted = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(q) => quoted.push(q),
            Err(e) => tracing::warn!("Excluding path from quote set: {}", e),
        }
    }

    tracing::debug!(
        %direction,
        candidates = paths.len(),
        quoted = quoted.len(),
        "Quoting complete"
    );

    Ok(quoted)
}

async fn quote_path<O>(
    oracle: &O,
    path: &Path,
    amount: &Amount,
    direction: SwapDirection,
    call_timeout: Option<Duration>,
) -> Result<QuotedPath, RouteError>
where
    O: QuotingOracle + ?Sized,
{
    let failed = |message: String| RouteError::OracleCallFailed {
        path: path.to_string(),
        message,
    };

    let call = async {
        match direction {
            SwapDirection::ExactIn => oracle.get_amounts_out(amount, path.tokens()).await,
            SwapDirection::ExactOut => oracle.get_amounts_in(amount, path.tokens()).await,
        }
    };

    let amounts = match call_timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| failed(format!("timed out after {}ms", limit.as_millis())))?,
        None => call.await,
    }
    .map_err(|e| failed(e.to_string()))?;

    if amounts.len() != path.tokens().len() {
        return Err(failed(format!(
            "expected {} amounts, oracle returned {}",
            path.tokens().len(),
            amounts.len()
        )));
    }

    Ok(QuotedPath {
        path: path.clone(),
        amounts,
    })
}

/// Compare two quotes; `Less` means `a` is the better quote
fn compare(a: &QuotedPath, b: &QuotedPath, direction: SwapDirection) -> Ordering {
    match direction {
        // Larger output first
        SwapDirection::ExactIn => b.amount_out().cmp(&a.amount_out()),
        // Smaller input first
        SwapDirection::ExactOut => a.amount_in().cmp(&b.amount_in()),
    }
}

/// Best quote for the direction. Ties keep the earliest candidate.
pub fn select_best(quotes: &[QuotedPath], direction: SwapDirection) -> Option<&QuotedPath> {
    quotes.iter().reduce(|best, candidate| {
        if compare(candidate, best, direction) == Ordering::Less {
            candidate
        } else {
            best
        }
    })
}

/// Stable best-first ordering
pub fn rank_quotes(quotes: &mut [QuotedPath], direction: SwapDirection) {
    quotes.sort_by(|a, b| compare(a, b, direction));
}
