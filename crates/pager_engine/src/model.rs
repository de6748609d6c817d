//! Domain models of the Rick and Morty REST API.

use std::fmt;

use chrono::{DateTime, Utc};
use pager_core::Identified;
use serde::{Deserialize, Serialize};
use url::Url;

pub type EpisodeId = u32;
pub type CharacterId = u32;
pub type LocationId = u32;

/// Collection roots advertised by the API root document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub characters: Url,
    pub locations: Url,
    pub episodes: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub name: String,
    pub air_date: String,
    /// Season/episode code such as `S01E01`.
    pub episode: String,
    pub characters: Vec<Url>,
    pub url: Url,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub status: CharacterStatus,
    pub species: CharacterSpecies,
    #[serde(rename = "type")]
    pub kind: String,
    pub gender: String,
    pub origin: CharacterPlace,
    pub location: CharacterPlace,
    pub image: Url,
    pub episode: Vec<Url>,
    pub url: Url,
    pub created: DateTime<Utc>,
}

/// Named reference to a location; `url` is empty when the place is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPlace {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub dimension: String,
    pub residents: Vec<Url>,
    pub url: Url,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CharacterStatus {
    Alive,
    Dead,
    Unknown,
    Other(String),
}

impl From<String> for CharacterStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Alive" => CharacterStatus::Alive,
            "Dead" => CharacterStatus::Dead,
            "unknown" => CharacterStatus::Unknown,
            _ => CharacterStatus::Other(raw),
        }
    }
}

impl From<CharacterStatus> for String {
    fn from(status: CharacterStatus) -> Self {
        match status {
            CharacterStatus::Alive => "Alive".to_string(),
            CharacterStatus::Dead => "Dead".to_string(),
            CharacterStatus::Unknown => "unknown".to_string(),
            CharacterStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for CharacterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterStatus::Alive => f.write_str("Alive"),
            CharacterStatus::Dead => f.write_str("Dead"),
            CharacterStatus::Unknown => f.write_str("unknown"),
            CharacterStatus::Other(raw) => f.write_str(raw),
        }
    }
}

/// Open set of species names as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterSpecies(pub String);

impl CharacterSpecies {
    pub const HUMAN: &'static str = "Human";
    pub const HUMANOID: &'static str = "Humanoid";
    pub const UNKNOWN: &'static str = "unknown";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_human(&self) -> bool {
        self.0 == Self::HUMAN
    }
}

impl fmt::Display for CharacterSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Identified for Episode {
    type Id = EpisodeId;

    fn id(&self) -> EpisodeId {
        self.id
    }
}

impl Identified for Character {
    type Id = CharacterId;

    fn id(&self) -> CharacterId {
        self.id
    }
}

impl Identified for Location {
    type Id = LocationId;

    fn id(&self) -> LocationId {
        self.id
    }
}
