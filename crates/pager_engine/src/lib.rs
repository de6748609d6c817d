//! Pager engine: network access, response caching and effect execution.
mod api;
mod cache;
mod clock;
mod engine;
mod fetch;
mod gateway;
mod model;
mod source;
mod types;

pub use api::{resource_url, ApiPage, ApiResource, RickAndMortyApi};
pub use cache::{CacheCategory, CacheReport, CacheSettings, CachedResponse, ResponseCache};
pub use clock::{fixed_clock, system_clock, Clock};
pub use engine::{Cursor, PageItem, PageResult, PageWaiter, Paginator};
pub use fetch::{FetchOutput, FetchSettings, Fetcher, ReqwestFetcher};
pub use gateway::{Fetched, NetworkGateway};
pub use model::{
    Character, CharacterId, CharacterPlace, CharacterSpecies, CharacterStatus, Endpoints,
    Episode, EpisodeId, Location, LocationId,
};
pub use source::{ApiPageSource, PageSource};
pub use types::{EngineError, FailureKind, FetchError, PageLoadError};
