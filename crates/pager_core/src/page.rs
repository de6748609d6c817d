use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pagination metadata as delivered by the upstream API.
///
/// Cursors are opaque: they are only ever compared and handed back to the
/// page source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo<C> {
    pub count: u64,
    #[serde(rename = "pages")]
    pub total_pages: u64,
    pub next: Option<C>,
    pub prev: Option<C>,
}

/// One fetched batch of items plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<C, T> {
    pub info: PageInfo<C>,
    pub results: Vec<T>,
    /// When the response backing this page was first received, if it came
    /// through a cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_since: Option<DateTime<Utc>>,
}

impl<C, T> Page<C, T> {
    pub fn new(info: PageInfo<C>, results: Vec<T>) -> Self {
        Self {
            info,
            results,
            cached_since: None,
        }
    }

    pub fn with_cached_since(mut self, cached_since: Option<DateTime<Utc>>) -> Self {
        self.cached_since = cached_since;
        self
    }
}
