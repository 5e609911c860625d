//! Integration tests for the range collector against synthetic catalogs.
//!
//! These exercise the whole-sweep properties: a capped corpus of N items is
//! always reconstructed completely, with no duplicates and no omissions,
//! regardless of how far N exceeds the page cap.

use anyhow::Result;
use async_trait::async_trait;
use price_sweep::{CollectError, Collector, Page, PageProvider, SweepOptions};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: u32,
    price: f64,
}

/// Serves a fixed corpus through a hard page cap. `total` is always the
/// true match count for the queried range; at most `cap` items come back.
struct CappedCatalog {
    items: Vec<Item>,
    cap: usize,
    calls: AtomicU32,
}

impl CappedCatalog {
    fn new(items: Vec<Item>, cap: usize) -> Self {
        Self { items, cap, calls: AtomicU32::new(0) }
    }

    /// `n` items spread over `0..span` with no two sharing an exact price.
    fn scattered(n: u32, span: u32, cap: usize) -> Self {
        assert!(n <= span);
        let items =
            (0..n).map(|i| Item { id: i, price: (i as u64 * 7919 % span as u64) as f64 }).collect();
        Self::new(items, cap)
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageProvider for CappedCatalog {
    type Item = Item;

    async fn fetch_page(&self, low: f64, high: f64) -> Result<Page<Item>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let matching: Vec<Item> =
            self.items.iter().filter(|i| i.price >= low && i.price <= high).cloned().collect();

        let total = matching.len() as u64;
        let page: Vec<Item> = matching.into_iter().take(self.cap).collect();
        Ok(Page { total, count: page.len() as u64, items: Some(page) })
    }
}

fn options(low: f64, high: f64) -> SweepOptions {
    SweepOptions { low_bound: low, high_bound: high, ..SweepOptions::default() }
}

fn by_id(item: &Item) -> u32 {
    item.id
}

fn assert_complete(items: &[Item], n: u32) {
    assert_eq!(items.len(), n as usize, "expected {} items, got {}", n, items.len());
    let ids: HashSet<u32> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids.len(), n as usize, "duplicate ids in result");
    for id in 0..n {
        assert!(ids.contains(&id), "item {} missing from result", id);
    }
}

#[tokio::test]
async fn harvest_just_above_the_cap() {
    let catalog = CappedCatalog::scattered(55, 1000, 50);
    let collector = Collector::with_options(&catalog, by_id, options(0.0, 1000.0));

    let items = collector.collect().await.unwrap();
    assert_complete(&items, 55);
    // One truncated root plus at least two halves
    assert!(catalog.call_count() >= 3);
}

#[tokio::test]
async fn harvest_far_above_the_cap() {
    let catalog = CappedCatalog::scattered(5000, 10_000, 25);
    let collector = Collector::with_options(&catalog, by_id, options(0.0, 10_000.0));

    let items = collector.collect().await.unwrap();
    assert_complete(&items, 5000);
}

#[tokio::test]
async fn harvest_cap_of_one_collects_everything() {
    let items: Vec<Item> = (0..8).map(|i| Item { id: i, price: i as f64 }).collect();
    let catalog = CappedCatalog::new(items, 1);
    let collector = Collector::with_options(&catalog, by_id, options(0.0, 7.0));

    let collected = collector.collect().await.unwrap();
    assert_complete(&collected, 8);

    // [0, 7] splits into a perfect binary tree over 8 single-price leaves:
    // 7 internal queries + 8 leaf queries.
    assert_eq!(catalog.call_count(), 15);

    // Left-to-right traversal yields ascending prices.
    let prices: Vec<f64> = collected.iter().map(|i| i.price).collect();
    assert_eq!(prices, (0..8).map(f64::from).collect::<Vec<_>>());
}

#[tokio::test]
async fn midpoint_pileup_is_not_lost_or_doubled() {
    // 40 items sit exactly on the first split's midpoint (50), flanked by
    // two clusters. Every midpoint item must land in exactly one half.
    let mut items = Vec::new();
    for i in 0..30 {
        items.push(Item { id: i, price: 20.0 });
    }
    for i in 30..70 {
        items.push(Item { id: i, price: 50.0 });
    }
    for i in 70..100 {
        items.push(Item { id: i, price: 80.0 });
    }

    let catalog = CappedCatalog::new(items, 50);
    let collector = Collector::with_options(&catalog, by_id, options(0.0, 100.0));

    let collected = collector.collect().await.unwrap();
    assert_complete(&collected, 100);
}

#[tokio::test]
async fn repeated_sweeps_agree() {
    let catalog = CappedCatalog::scattered(200, 500, 16);
    let collector = Collector::with_options(&catalog, by_id, options(0.0, 500.0));

    let first = collector.collect().await.unwrap();
    let second = collector.collect().await.unwrap();

    let first_ids: HashSet<u32> = first.iter().map(|i| i.id).collect();
    let second_ids: HashSet<u32> = second.iter().map(|i| i.id).collect();
    assert_eq!(first_ids, second_ids);
    // The provider is deterministic, so order agrees too
    assert_eq!(first, second);
}

#[tokio::test]
async fn fractional_step_sweeps_cent_prices() {
    let items: Vec<Item> = (0..4).map(|i| Item { id: i, price: 1.0 + 0.5 * i as f64 }).collect();
    let catalog = CappedCatalog::new(items, 1);

    let opts = SweepOptions { low_bound: 1.0, high_bound: 2.5, step: 0.5, max_depth: None };
    let collector = Collector::with_options(&catalog, by_id, opts);

    let collected = collector.collect().await.unwrap();
    assert_complete(&collected, 4);
}

#[tokio::test]
async fn empty_catalog_yields_empty_result() {
    let catalog = CappedCatalog::new(Vec::new(), 10);
    let collector = Collector::with_options(&catalog, by_id, options(0.0, 100_000.0));

    let collected = collector.collect().await.unwrap();
    assert!(collected.is_empty());
    assert_eq!(catalog.call_count(), 1);
}

#[tokio::test]
async fn provider_failure_aborts_the_sweep() {
    struct BrokenCatalog;

    #[async_trait]
    impl PageProvider for BrokenCatalog {
        type Item = Item;

        async fn fetch_page(&self, _low: f64, _high: f64) -> Result<Page<Item>> {
            anyhow::bail!("upstream timed out")
        }
    }

    let collector = Collector::with_options(BrokenCatalog, by_id, options(0.0, 100.0));
    let err = collector.collect().await.unwrap_err();
    assert!(matches!(err, CollectError::Provider(_)));
    assert_eq!(err.to_string(), "upstream timed out");
}

#[tokio::test]
async fn depth_guard_turns_runaway_recursion_into_an_error() {
    // Claims truncation at every width, including degenerate intervals.
    struct LyingCatalog;

    #[async_trait]
    impl PageProvider for LyingCatalog {
        type Item = Item;

        async fn fetch_page(&self, low: f64, _high: f64) -> Result<Page<Item>> {
            Ok(Page { total: 10, count: 1, items: Some(vec![Item { id: 0, price: low }]) })
        }
    }

    let opts = SweepOptions { low_bound: 0.0, high_bound: 1024.0, step: 1.0, max_depth: Some(12) };
    let collector = Collector::with_options(LyingCatalog, by_id, opts);

    let err = collector.collect().await.unwrap_err();
    assert!(matches!(err, CollectError::RangeExhausted { depth: 12, .. }));
}
