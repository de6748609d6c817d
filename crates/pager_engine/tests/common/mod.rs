#![allow(dead_code)]

use std::sync::{Arc, Once};

use chrono::{DateTime, Utc};
use pager_engine::{
    fixed_clock, CacheSettings, FetchSettings, NetworkGateway, ReqwestFetcher, ResponseCache,
    RickAndMortyApi,
};
use serde_json::{json, Value};
use wiremock::MockServer;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pager_logging::initialize_for_tests);
}

pub fn received_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
        .expect("timestamp")
        .with_timezone(&Utc)
}

pub fn api_for_tests() -> (RickAndMortyApi, Arc<ResponseCache>) {
    let fetcher = ReqwestFetcher::new(&FetchSettings::default()).expect("client");
    let cache = Arc::new(ResponseCache::new(CacheSettings::default()));
    let gateway = NetworkGateway::new(Arc::new(fetcher), cache.clone(), fixed_clock(received_at()));
    (RickAndMortyApi::new(Arc::new(gateway)), cache)
}

pub fn episode_json(server: &MockServer, id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "air_date": "December 2, 2013",
        "episode": format!("S01E{id:02}"),
        "characters": [format!("{}/api/character/1", server.uri())],
        "url": format!("{}/api/episode/{id}", server.uri()),
        "created": "2017-11-10T12:56:33.798Z"
    })
}

pub fn page_json(next: Option<String>, prev: Option<String>, results: Vec<Value>) -> Value {
    json!({
        "info": {
            "count": 51,
            "pages": 3,
            "next": next,
            "prev": prev
        },
        "results": results
    })
}
