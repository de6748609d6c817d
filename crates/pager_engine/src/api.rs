use std::sync::Arc;

use pager_core::{Identified, Page};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    CacheCategory, Character, Endpoints, Episode, FailureKind, FetchError, Fetched, Location,
    NetworkGateway,
};

/// A page of the API, with next/prev links as cursors.
pub type ApiPage<T> = Page<Url, T>;

/// Item type served by one of the API's paginated collections.
pub trait ApiResource: DeserializeOwned + Identified + Clone + Send + Sync + 'static {
    const CATEGORY: CacheCategory;

    /// Collection root, which doubles as the first page URL.
    fn collection(endpoints: &Endpoints) -> &Url;
}

impl ApiResource for Episode {
    const CATEGORY: CacheCategory = CacheCategory::Episodes;

    fn collection(endpoints: &Endpoints) -> &Url {
        &endpoints.episodes
    }
}

impl ApiResource for Character {
    const CATEGORY: CacheCategory = CacheCategory::Characters;

    fn collection(endpoints: &Endpoints) -> &Url {
        &endpoints.characters
    }
}

impl ApiResource for Location {
    const CATEGORY: CacheCategory = CacheCategory::Locations;

    fn collection(endpoints: &Endpoints) -> &Url {
        &endpoints.locations
    }
}

/// Typed Rick and Morty API operations over a [`NetworkGateway`].
#[derive(Clone)]
pub struct RickAndMortyApi {
    gateway: Arc<NetworkGateway>,
}

impl RickAndMortyApi {
    pub fn new(gateway: Arc<NetworkGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<NetworkGateway> {
        &self.gateway
    }

    pub async fn endpoints(&self, api_url: &Url) -> Result<Fetched<Endpoints>, FetchError> {
        self.gateway.get(api_url, CacheCategory::Shared).await
    }

    pub fn cached_endpoints(&self, api_url: &Url) -> Result<Option<Fetched<Endpoints>>, FetchError> {
        self.gateway.get_cached(api_url, CacheCategory::Shared)
    }

    pub async fn page_of<T: ApiResource>(&self, page_url: &Url) -> Result<ApiPage<T>, FetchError> {
        let fetched = self
            .gateway
            .get::<ApiPage<T>>(page_url, T::CATEGORY)
            .await?;
        Ok(fetched.output.with_cached_since(fetched.cached_since))
    }

    pub fn cached_page_of<T: ApiResource>(
        &self,
        page_url: &Url,
    ) -> Result<Option<ApiPage<T>>, FetchError> {
        let cached = self.gateway.get_cached::<ApiPage<T>>(page_url, T::CATEGORY)?;
        Ok(cached.map(|fetched| fetched.output.with_cached_since(fetched.cached_since)))
    }

    pub async fn page_of_episodes(&self, page_url: &Url) -> Result<ApiPage<Episode>, FetchError> {
        self.page_of(page_url).await
    }

    pub async fn page_of_characters(
        &self,
        page_url: &Url,
    ) -> Result<ApiPage<Character>, FetchError> {
        self.page_of(page_url).await
    }

    pub async fn page_of_locations(&self, page_url: &Url) -> Result<ApiPage<Location>, FetchError> {
        self.page_of(page_url).await
    }

    /// Fetches a single resource by its own URL.
    pub async fn resource_at<T: ApiResource>(&self, url: &Url) -> Result<Fetched<T>, FetchError> {
        self.gateway.get(url, T::CATEGORY).await
    }

    /// Fetches a single resource by id, below its collection root.
    pub async fn resource<T: ApiResource>(
        &self,
        endpoints: &Endpoints,
        id: u32,
    ) -> Result<Fetched<T>, FetchError> {
        let url = resource_url(T::collection(endpoints), id)?;
        self.resource_at(&url).await
    }

    pub async fn episode(&self, endpoints: &Endpoints, id: u32) -> Result<Fetched<Episode>, FetchError> {
        self.resource(endpoints, id).await
    }

    pub async fn character(
        &self,
        endpoints: &Endpoints,
        id: u32,
    ) -> Result<Fetched<Character>, FetchError> {
        self.resource(endpoints, id).await
    }

    pub async fn location(
        &self,
        endpoints: &Endpoints,
        id: u32,
    ) -> Result<Fetched<Location>, FetchError> {
        self.resource(endpoints, id).await
    }
}

/// `collection/{id}`, keeping every existing path segment.
pub fn resource_url(collection: &Url, id: u32) -> Result<Url, FetchError> {
    let mut url = collection.clone();
    url.path_segments_mut()
        .map_err(|()| {
            FetchError::new(
                FailureKind::InvalidUrl,
                format!("{collection} cannot have path segments"),
            )
        })?
        .pop_if_empty()
        .push(&id.to_string());
    Ok(url)
}
