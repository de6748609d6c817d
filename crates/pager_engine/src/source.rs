use std::marker::PhantomData;

use pager_core::Page;
use url::Url;

use crate::{ApiResource, FetchError, RickAndMortyApi};

/// Async `(input) -> Page` function a paginator is fed from.
#[async_trait::async_trait]
pub trait PageSource<I, T>: Send + Sync {
    async fn fetch_page(&self, input: &I) -> Result<Page<I, T>, FetchError>;
}

/// Pages of one API collection, fetched through the gateway cache.
pub struct ApiPageSource<T> {
    api: RickAndMortyApi,
    _resource: PhantomData<fn() -> T>,
}

impl<T> ApiPageSource<T> {
    pub fn new(api: RickAndMortyApi) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<T: ApiResource> PageSource<Url, T> for ApiPageSource<T> {
    async fn fetch_page(&self, input: &Url) -> Result<Page<Url, T>, FetchError> {
        self.api.page_of::<T>(input).await
    }
}
