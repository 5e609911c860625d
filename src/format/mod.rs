//! Output formatting for harvested listings (table, JSON, CSV).

use crate::catalog::Listing;
use crate::config::OutputFormat;

/// Formats listings for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a collection of listings.
    pub fn format_listings(&self, listings: &[Listing]) -> String {
        if listings.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                OutputFormat::Table => "No listings found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_listings(listings),
            OutputFormat::Table => self.table_listings(listings),
            OutputFormat::Csv => self.csv_listings(listings),
        }
    }

    // JSON formatting

    fn json_listings(&self, listings: &[Listing]) -> String {
        serde_json::to_string_pretty(listings).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_listings(&self, listings: &[Listing]) -> String {
        let mut lines = Vec::new();

        lines.push(format!("{:<12} {:<12} {:<14} {}", "ID", "PRICE", "BRAND", "TITLE"));
        lines.push(format!("{:-<12} {:-<12} {:-<14} {:-<40}", "", "", "", ""));

        for listing in listings {
            let price = match &listing.price {
                Some(p) => format!("{} {:.2}", p.currency, p.amount),
                None => "N/A".to_string(),
            };
            let brand = listing.brand.as_deref().unwrap_or("-");

            lines.push(format!(
                "{:<12} {:<12} {:<14} {}",
                truncate(&listing.id, 12),
                price,
                truncate(brand, 14),
                truncate(&listing.title, 60)
            ));
        }

        lines.push(String::new());
        lines.push(format!("{} listings", listings.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "id,title,price,currency,brand,url".to_string()
    }

    fn csv_listings(&self, listings: &[Listing]) -> String {
        let mut lines = vec![self.csv_header()];

        for listing in listings {
            let (price, currency) = match &listing.price {
                Some(p) => (format!("{:.2}", p.amount), p.currency.clone()),
                None => (String::new(), String::new()),
            };

            lines.push(format!(
                "{},{},{},{},{},{}",
                csv_escape(&listing.id),
                csv_escape(&listing.title),
                price,
                currency,
                csv_escape(listing.brand.as_deref().unwrap_or("")),
                csv_escape(listing.url.as_deref().unwrap_or(""))
            ));
        }

        lines.join("\n")
    }
}

/// Truncates a string to `max` characters, appending an ellipsis if cut.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Quotes a CSV field if it contains a comma, quote, or newline.
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
