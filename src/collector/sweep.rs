//! Recursive range-splitting collection over a capped paginated source.
//!
//! The upstream answers any price-range query with at most one page of
//! results plus the true match count for that range. There is no cursor and
//! no offset, so the only way to get everything is to keep narrowing the
//! range until every sub-query fits inside a single page, then merge the
//! pieces back together without double-counting the split boundaries.

use crate::collector::error::CollectError;
use crate::collector::provider::PageProvider;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::future::Future;
use std::hash::Hash;
use std::pin::Pin;
use tracing::debug;

/// Bounds and granularity for one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepOptions {
    /// Inclusive lower price bound.
    #[serde(default = "default_low_bound")]
    pub low_bound: f64,

    /// Inclusive upper price bound.
    #[serde(default = "default_high_bound")]
    pub high_bound: f64,

    /// Smallest meaningful increment between two distinct query bounds.
    /// The right half of a split starts this far past the midpoint, so a
    /// boundary price is only ever queried by one half.
    #[serde(default = "default_step")]
    pub step: f64,

    /// Maximum split depth before a still-truncated range fails with
    /// [`CollectError::RangeExhausted`]. `None` splits without limit, which
    /// matches upstreams that eventually tell the truth and loops forever on
    /// ones that never do.
    #[serde(default)]
    pub max_depth: Option<u32>,
}

fn default_low_bound() -> f64 {
    0.0
}

fn default_high_bound() -> f64 {
    100_000.0
}

fn default_step() -> f64 {
    1.0
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            low_bound: default_low_bound(),
            high_bound: default_high_bound(),
            step: default_step(),
            max_depth: None,
        }
    }
}

/// Collects the complete, deduplicated item set for a price range.
///
/// The identity function supplies the dedup key; it is shared by every
/// recursion level, never cloned per call.
pub struct Collector<P, F> {
    provider: P,
    identity: F,
    options: SweepOptions,
}

impl<P, F, K> Collector<P, F>
where
    P: PageProvider,
    F: Fn(&P::Item) -> K + Send + Sync,
    K: Eq + Hash,
{
    /// Creates a collector with default options.
    pub fn new(provider: P, identity: F) -> Self {
        Self::with_options(provider, identity, SweepOptions::default())
    }

    /// Creates a collector with explicit options.
    pub fn with_options(provider: P, identity: F, options: SweepOptions) -> Self {
        Self { provider, identity, options }
    }

    /// Runs the sweep and returns every unique item in first-seen order.
    pub async fn collect(&self) -> Result<Vec<P::Item>, CollectError> {
        self.collect_range(self.options.low_bound, self.options.high_bound, 0).await
    }

    /// One recursion level: validate, fetch, classify, split, merge.
    fn collect_range(
        &self,
        low: f64,
        high: f64,
        depth: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<P::Item>, CollectError>> + Send + '_>> {
        Box::pin(async move {
            if low > high {
                return Err(CollectError::InvalidRange { low, high });
            }

            let page = self.provider.fetch_page(low, high).await?;
            debug!("[{}, {}] total={} count={} (depth {})", low, high, page.total, page.count, depth);

            if page.total < page.count {
                return Err(CollectError::UpstreamInconsistency {
                    total: page.total,
                    count: page.count,
                    low,
                    high,
                });
            }

            if page.total == page.count {
                // The whole range fits in one page. A missing or malformed
                // items payload is a legitimate "no items" signal.
                return Ok(self.dedup(page.into_items()));
            }

            // Page cap hit: the partial items are superseded by the halves.
            if let Some(limit) = self.options.max_depth {
                if depth >= limit {
                    return Err(CollectError::RangeExhausted { low, high, depth });
                }
            }

            let mid = low + ((high - low) / 2.0).floor();
            debug!("splitting [{}, {}] at {}", low, high, mid);

            let mut merged = self.collect_range(low, mid, depth + 1).await?;
            merged.extend(self.collect_range(mid + self.options.step, high, depth + 1).await?);
            Ok(self.dedup(merged))
        })
    }

    /// First key seen wins; later duplicates are dropped silently.
    fn dedup(&self, items: Vec<P::Item>) -> Vec<P::Item> {
        let mut seen = HashSet::with_capacity(items.len());
        let mut unique = Vec::with_capacity(items.len());
        for item in items {
            if seen.insert((self.identity)(&item)) {
                unique.push(item);
            }
        }
        unique
    }
}
