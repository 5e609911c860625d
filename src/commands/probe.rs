//! Probe command implementation.

use crate::catalog::{CatalogClient, Listing};
use crate::collector::PageProvider;
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::info;

/// Fetches a single bounded page and reports its truncation verdict.
///
/// Useful for sizing up an endpoint before committing to a full harvest.
pub struct ProbeCommand {
    config: Config,
}

impl ProbeCommand {
    /// Creates a new probe command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Probes one price interval and returns formatted output.
    pub async fn execute(&self, query: &str, low: f64, high: f64) -> Result<String> {
        let client =
            CatalogClient::new(&self.config, query).context("Failed to create catalog client")?;

        self.execute_with_provider(&client, low, high).await
    }

    /// Probes with a provided page source (for testing).
    pub async fn execute_with_provider<P>(&self, provider: P, low: f64, high: f64) -> Result<String>
    where
        P: PageProvider<Item = Listing>,
    {
        anyhow::ensure!(low <= high, "invalid range: low bound {} exceeds high bound {}", low, high);

        info!("Probing [{}, {}]", low, high);
        let page = provider.fetch_page(low, high).await?;

        let verdict = if page.total < page.count {
            "inconsistent (more items returned than the claimed total)"
        } else if page.is_truncated() {
            "truncated (page cap hit; a harvest would split this range)"
        } else {
            "complete (everything in range fits in one page)"
        };

        let mut out = String::new();
        out.push_str(&format!("Range:    [{}, {}]\n", low, high));
        out.push_str(&format!("Total:    {}\n", page.total));
        out.push_str(&format!("Returned: {}\n", page.count));
        out.push_str(&format!("Verdict:  {}", verdict));

        let items = page.into_items();
        if !items.is_empty() {
            out.push_str("\n\n");
            out.push_str(&Formatter::new(self.config.format).format_listings(&items));
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ListingPrice;
    use crate::collector::Page;
    use async_trait::async_trait;

    struct OnePageCatalog {
        page: Page<Listing>,
    }

    #[async_trait]
    impl PageProvider for OnePageCatalog {
        type Item = Listing;

        async fn fetch_page(&self, _low: f64, _high: f64) -> Result<Page<Listing>> {
            Ok(self.page.clone())
        }
    }

    fn make_listing(id: &str, price: f64) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("Listing {}", id),
            url: None,
            price: Some(ListingPrice::new(price, "USD")),
            brand: None,
        }
    }

    #[tokio::test]
    async fn test_probe_complete_page() {
        let catalog = OnePageCatalog {
            page: Page::of(2, vec![make_listing("L-1", 10.0), make_listing("L-2", 20.0)]),
        };
        let cmd = ProbeCommand::new(Config::default());

        let output = cmd.execute_with_provider(&catalog, 0.0, 100.0).await.unwrap();
        assert!(output.contains("Range:    [0, 100]"));
        assert!(output.contains("Total:    2"));
        assert!(output.contains("Returned: 2"));
        assert!(output.contains("complete"));
        assert!(output.contains("L-1"));
        assert!(output.contains("L-2"));
    }

    #[tokio::test]
    async fn test_probe_truncated_page() {
        let catalog =
            OnePageCatalog { page: Page { total: 50, count: 1, items: Some(vec![make_listing("L-1", 10.0)]) } };
        let cmd = ProbeCommand::new(Config::default());

        let output = cmd.execute_with_provider(&catalog, 0.0, 100.0).await.unwrap();
        assert!(output.contains("Total:    50"));
        assert!(output.contains("Returned: 1"));
        assert!(output.contains("truncated"));
    }

    #[tokio::test]
    async fn test_probe_inconsistent_page() {
        let catalog = OnePageCatalog { page: Page { total: 1, count: 2, items: None } };
        let cmd = ProbeCommand::new(Config::default());

        let output = cmd.execute_with_provider(&catalog, 0.0, 100.0).await.unwrap();
        assert!(output.contains("inconsistent"));
    }

    #[tokio::test]
    async fn test_probe_empty_page_has_no_listing_block() {
        let catalog = OnePageCatalog { page: Page::empty() };
        let cmd = ProbeCommand::new(Config::default());

        let output = cmd.execute_with_provider(&catalog, 0.0, 100.0).await.unwrap();
        assert!(output.ends_with("complete (everything in range fits in one page)"));
        assert!(!output.contains("No listings found"));
    }

    #[tokio::test]
    async fn test_probe_crossed_bounds_fail() {
        let catalog = OnePageCatalog { page: Page::empty() };
        let cmd = ProbeCommand::new(Config::default());

        let result = cmd.execute_with_provider(&catalog, 10.0, 5.0).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid range"));
    }
}
