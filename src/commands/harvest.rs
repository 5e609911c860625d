//! Harvest command implementation.

use crate::catalog::{CatalogClient, Listing};
use crate::collector::{Collector, PageProvider};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::info;

/// Executes a full range harvest: every unique listing in the configured
/// price range, no matter how hard the upstream caps its pages.
pub struct HarvestCommand {
    config: Config,
}

impl HarvestCommand {
    /// Creates a new harvest command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the harvest and returns formatted output.
    pub async fn execute(&self, query: &str) -> Result<String> {
        let client =
            CatalogClient::new(&self.config, query).context("Failed to create catalog client")?;

        self.execute_with_provider(&client).await
    }

    /// Executes the harvest with a provided page source (for testing).
    pub async fn execute_with_provider<P>(&self, provider: P) -> Result<String>
    where
        P: PageProvider<Item = Listing>,
    {
        let sweep = self.config.sweep;
        info!(
            "Harvesting [{}, {}] with step {}",
            sweep.low_bound, sweep.high_bound, sweep.step
        );

        let collector = Collector::with_options(provider, |l: &Listing| l.id.clone(), sweep);
        let listings = collector.collect().await?;

        info!("Harvested {} unique listings", listings.len());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_listings(&listings))
    }
}
