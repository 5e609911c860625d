//! Error types for the range collector.

use thiserror::Error;

/// Failures surfaced by a sweep. Provider errors pass through unchanged.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The queried interval is crossed. Raised at entry to every recursion
    /// level, so a bad `step` or caller bug is caught where it happens.
    #[error("invalid range: low bound {low} exceeds high bound {high}")]
    InvalidRange { low: f64, high: f64 },

    /// The upstream returned more items than it claims exist.
    #[error("upstream returned {count} items but claims only {total} exist in [{low}, {high}]")]
    UpstreamInconsistency { total: u64, count: u64, low: f64, high: f64 },

    /// A range was still truncated after `max_depth` splits.
    #[error("range [{low}, {high}] still truncated after {depth} splits; giving up")]
    RangeExhausted { low: f64, high: f64, depth: u32 },

    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}
