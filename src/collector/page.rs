//! The page response model shared by every provider.

use serde::{Deserialize, Deserializer, Serialize};

/// One bounded page of results for a price-range query.
///
/// `total` is the upstream's authoritative count of all matches in range,
/// independent of the page cap; `count` is how many items this response
/// actually carries. Upstreams ship `items` as null, omit it entirely, or
/// (when broken) put a non-array there; all of those decode to `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    pub count: u64,
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Option<Vec<T>>,
}

impl<T> Page<T> {
    /// Creates a page carrying the given items, with `count` set to match.
    pub fn of(total: u64, items: Vec<T>) -> Self {
        Self { total, count: items.len() as u64, items: Some(items) }
    }

    /// Creates a page with no items payload at all.
    pub fn empty() -> Self {
        Self { total: 0, count: 0, items: None }
    }

    /// True when the upstream claims more matches than this page carries.
    pub fn is_truncated(&self) -> bool {
        self.total > self.count
    }

    /// Consumes the page, normalizing a missing payload to no items.
    pub fn into_items(self) -> Vec<T> {
        self.items.unwrap_or_default()
    }
}

/// Decodes `items` tolerantly: only a proper JSON array yields `Some`;
/// null or any other value type is normalized to `None` instead of failing.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(values) => {
            let mut items = Vec::with_capacity(values.len());
            for value in values {
                items.push(T::deserialize(value).map_err(serde::de::Error::custom)?);
            }
            Ok(Some(items))
        }
        _ => Ok(None),
    }
}
