//! HTTP page provider for JSON catalog endpoints using wreq for TLS
//! fingerprint emulation.

use crate::catalog::models::Listing;
use crate::collector::{Page, PageProvider};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Catalog HTTP client with browser impersonation and anti-bot measures.
///
/// Implements [`PageProvider`] against a search endpoint of the shape
/// `GET {endpoint}/search?q=...&price_from=...&price_to=...` returning a
/// JSON `{total, count, items}` body.
pub struct CatalogClient {
    client: Client,
    endpoint: String,
    query: String,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl CatalogClient {
    /// Creates a client for the endpoint configured in `config`.
    pub fn new(config: &Config, query: impl Into<String>) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .context("No catalog endpoint configured. Pass --endpoint or set it in config.toml.")?;
        Self::with_endpoint(config, query, endpoint)
    }

    /// Creates a client against an explicit endpoint (for testing).
    pub fn with_endpoint(
        config: &Config,
        query: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            query: query.into(),
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    /// Returns the search term this client queries with.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Builds the search URL for a price interval.
    fn search_url(&self, low: f64, high: f64) -> String {
        format!(
            "{}/search?q={}&price_from={}&price_to={}",
            self.endpoint,
            urlencoding::encode(&self.query),
            low,
            high
        )
    }

    /// Performs a GET request with all anti-bot measures.
    async fn get(&self, url: &str) -> Result<String> {
        // Add human-like delay with jitter
        self.delay().await;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "application/json")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 503 {
            warn!("Rate limited (503). Consider using a proxy or increasing delay.");
            anyhow::bail!("Rate limited by the catalog. Try increasing --delay or using a proxy.");
        }

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }

    /// Adds a random delay to mimic human behavior.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }

    /// Updates the delay settings.
    pub fn set_delay(&mut self, delay_ms: u64, jitter_ms: u64) {
        self.delay_ms = delay_ms;
        self.delay_jitter_ms = jitter_ms;
    }
}

#[async_trait]
impl PageProvider for CatalogClient {
    type Item = Listing;

    async fn fetch_page(&self, low: f64, high: f64) -> Result<Page<Listing>> {
        let body = self.get(&self.search_url(low, high)).await?;
        serde_json::from_str(&body).context("Failed to decode page response")
    }
}
