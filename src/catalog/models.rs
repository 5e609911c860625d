//! Data models for catalog listings.

use serde::{Deserialize, Serialize};

/// One listing as the catalog endpoint reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Stable listing identifier; the dedup key for harvests.
    pub id: String,
    /// Listing title
    pub title: String,
    /// Full listing URL
    #[serde(default)]
    pub url: Option<String>,
    /// Asking price, absent for unlisted-price items
    #[serde(default)]
    pub price: Option<ListingPrice>,
    /// Brand if the catalog exposes one
    #[serde(default)]
    pub brand: Option<String>,
}

impl Listing {
    /// Returns the asking price amount if the listing carries one.
    pub fn amount(&self) -> Option<f64> {
        self.price.as_ref().map(|p| p.amount)
    }
}

/// Price of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingPrice {
    pub amount: f64,
    /// Currency code (USD, EUR, etc.)
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl ListingPrice {
    /// Creates a new price.
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self { amount, currency: currency.into() }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}
