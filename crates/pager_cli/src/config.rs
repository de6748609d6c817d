use std::fs;
use std::path::Path;
use std::time::Duration;

use pager_engine::{CacheSettings, FetchSettings};
use pager_logging::{pager_info, pager_warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "pager.ron";
pub const DEFAULT_API_URL: &str = "https://rickandmortyapi.com/api";

/// Settings read from `pager.ron`. Missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Byte budget of each response cache category.
    pub cache_capacity_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            cache_capacity_bytes: CacheSettings::default().capacity_bytes,
        }
    }
}

impl Config {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..FetchSettings::default()
        }
    }

    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            capacity_bytes: self.cache_capacity_bytes,
        }
    }
}

/// Reads the config file, falling back to defaults when it is absent or
/// unreadable.
pub fn load(path: &Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Config::default();
        }
        Err(err) => {
            pager_warn!("Failed to read config from {:?}: {}", path, err);
            return Config::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            pager_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            pager_warn!("Failed to parse config from {:?}: {}", path, err);
            Config::default()
        }
    }
}
