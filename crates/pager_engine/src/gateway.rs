use std::sync::Arc;

use chrono::{DateTime, Utc};
use pager_logging::{pager_debug, pager_warn};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    CacheCategory, CachedResponse, Clock, FailureKind, FetchError, Fetcher, ResponseCache,
};

/// A decoded response and when it was first received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    pub output: T,
    pub cached_since: Option<DateTime<Utc>>,
}

/// Entry point into the network: cache first, then the fetcher.
#[derive(Clone)]
pub struct NetworkGateway {
    fetcher: Arc<dyn Fetcher>,
    cache: Arc<ResponseCache>,
    clock: Clock,
}

impl NetworkGateway {
    pub fn new(fetcher: Arc<dyn Fetcher>, cache: Arc<ResponseCache>, clock: Clock) -> Self {
        Self {
            fetcher,
            cache,
            clock,
        }
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Decodes a cached response for `url`, without touching the network.
    pub fn get_cached<T: DeserializeOwned>(
        &self,
        url: &Url,
        category: CacheCategory,
    ) -> Result<Option<Fetched<T>>, FetchError> {
        let Some(cached) = self.cache.lookup(category, url.as_str()) else {
            return Ok(None);
        };
        let output = decode(&cached.bytes)?;
        Ok(Some(Fetched {
            output,
            cached_since: Some(cached.cached_since),
        }))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &Url,
        category: CacheCategory,
    ) -> Result<Fetched<T>, FetchError> {
        match self.get_cached(url, category) {
            Ok(Some(hit)) => {
                pager_debug!("cache hit for {}", url);
                return Ok(hit);
            }
            Ok(None) => {}
            Err(err) => {
                pager_warn!("dropping undecodable cached response for {}: {}", url, err);
                self.cache.remove(category, url.as_str());
            }
        }

        let fetched = self.fetcher.fetch(url).await?;
        let output = decode(&fetched.bytes)?;
        let cached_since = (self.clock)();
        self.cache.insert(
            category,
            url.as_str(),
            CachedResponse {
                bytes: fetched.bytes,
                cached_since,
            },
        );
        Ok(Fetched {
            output,
            cached_since: Some(cached_since),
        })
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(bytes).map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
}
