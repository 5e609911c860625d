//! The provider seam: one bounded page per call, injected by the host.

use crate::collector::page::Page;
use anyhow::Result;
use async_trait::async_trait;

/// Trait for fetching one bounded page of results - enables mocking for tests.
///
/// Implementations are treated as pure async functions of the two bounds:
/// the collector never assumes ordering between calls, never retries, and
/// propagates errors to its caller unchanged. Timeouts, retries, and
/// backpressure all belong behind this seam.
#[async_trait]
pub trait PageProvider: Send + Sync {
    /// The item type carried by this provider's pages.
    type Item: Send;

    /// Fetches the page of items priced within `[low, high]`, both inclusive.
    async fn fetch_page(&self, low: f64, high: f64) -> Result<Page<Self::Item>>;
}

#[async_trait]
impl<P: PageProvider + ?Sized> PageProvider for &P {
    type Item = P::Item;

    async fn fetch_page(&self, low: f64, high: f64) -> Result<Page<Self::Item>> {
        (**self).fetch_page(low, high).await
    }
}
