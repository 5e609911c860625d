//! Catalog-specific modules: HTTP page provider and listing models.

pub mod client;
pub mod models;

pub use client::CatalogClient;
pub use models::{Listing, ListingPrice};
