use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use pager_logging::{pager_debug, pager_warn};

/// Independent cache partitions, cleared separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheCategory {
    Shared,
    Episodes,
    Characters,
    Locations,
}

impl CacheCategory {
    pub const ALL: [CacheCategory; 4] = [
        CacheCategory::Shared,
        CacheCategory::Episodes,
        CacheCategory::Characters,
        CacheCategory::Locations,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Byte budget per category.
    pub capacity_bytes: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity_bytes: 5_000_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub bytes: Vec<u8>,
    pub cached_since: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheReport {
    pub category: CacheCategory,
    pub capacity_bytes: u64,
    pub usage_bytes: u64,
    pub entries: usize,
}

#[derive(Debug, Default)]
struct Bucket {
    entries: HashMap<String, CachedResponse>,
    order: VecDeque<String>,
    usage: u64,
}

impl Bucket {
    fn remove(&mut self, key: &str) {
        if let Some(previous) = self.entries.remove(key) {
            self.usage -= previous.bytes.len() as u64;
            self.order.retain(|existing| existing != key);
        }
    }
}

/// In-memory response cache keyed by request URL.
///
/// Each category evicts its oldest stored responses once the byte budget
/// is exceeded.
#[derive(Debug, Default)]
pub struct ResponseCache {
    settings: CacheSettings,
    buckets: Mutex<HashMap<CacheCategory, Bucket>>,
}

impl ResponseCache {
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            settings,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    pub fn lookup(&self, category: CacheCategory, key: &str) -> Option<CachedResponse> {
        let buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        buckets
            .get(&category)
            .and_then(|bucket| bucket.entries.get(key))
            .cloned()
    }

    pub fn insert(&self, category: CacheCategory, key: &str, response: CachedResponse) {
        let size = response.bytes.len() as u64;
        if size > self.settings.capacity_bytes {
            pager_warn!(
                "response for {} ({} bytes) exceeds {:?} cache capacity; not cached",
                key,
                size,
                category
            );
            return;
        }

        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        let bucket = buckets.entry(category).or_default();
        bucket.remove(key);
        while bucket.usage + size > self.settings.capacity_bytes {
            let Some(oldest) = bucket.order.pop_front() else {
                break;
            };
            if let Some(evicted) = bucket.entries.remove(&oldest) {
                bucket.usage -= evicted.bytes.len() as u64;
                pager_debug!("evicted {} from {:?} cache", oldest, category);
            }
        }
        bucket.usage += size;
        bucket.order.push_back(key.to_string());
        bucket.entries.insert(key.to_string(), response);
    }

    pub fn remove(&self, category: CacheCategory, key: &str) {
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(bucket) = buckets.get_mut(&category) {
            bucket.remove(key);
        }
    }

    pub fn clear(&self, category: CacheCategory) {
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        buckets.remove(&category);
        pager_debug!("cleared {:?} cache", category);
    }

    pub fn report(&self, category: CacheCategory) -> CacheReport {
        let buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        let (usage_bytes, entries) = buckets
            .get(&category)
            .map(|bucket| (bucket.usage, bucket.entries.len()))
            .unwrap_or((0, 0));
        CacheReport {
            category,
            capacity_bytes: self.settings.capacity_bytes,
            usage_bytes,
            entries,
        }
    }

    pub fn reports(&self) -> Vec<CacheReport> {
        CacheCategory::ALL
            .into_iter()
            .map(|category| self.report(category))
            .collect()
    }
}
