//! Filter and ordering options for the episode list

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Episode;

/// What the search text is matched against, and how results are sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterMode {
    /// Match character references, sort by episode name
    #[serde(rename = "character_name")]
    ByCharacterName,
    /// Match the episode code, sort by episode code
    #[default]
    #[serde(rename = "episode_number")]
    ByEpisodeNumber,
}

impl FilterMode {
    /// Get the display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ByCharacterName => "Character Name",
            Self::ByEpisodeNumber => "Episode Number",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "name" | "character" | "character_name" => Some(Self::ByCharacterName),
            "number" | "episode" | "episode_number" => Some(Self::ByEpisodeNumber),
            _ => None,
        }
    }

    /// Whether `episode` passes this mode's search predicate.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, episode: &Episode, needle: &str) -> bool {
        match self {
            Self::ByCharacterName => episode
                .character_urls
                .iter()
                .any(|url| url.to_lowercase().contains(needle)),
            Self::ByEpisodeNumber => episode.episode_code.to_lowercase().contains(needle),
        }
    }

    /// Sort comparator for this mode
    pub fn compare(&self, order: EpisodeOrder, a: &Episode, b: &Episode) -> Ordering {
        match self {
            Self::ByCharacterName => a.name.cmp(&b.name),
            Self::ByEpisodeNumber => order.compare_codes(a, b),
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How episode codes are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeOrder {
    /// Plain string order ("S01E10" before "S01E2")
    #[default]
    Lexicographic,
    /// Season then episode number; unparseable codes sort after, in string order
    Natural,
}

impl EpisodeOrder {
    fn compare_codes(self, a: &Episode, b: &Episode) -> Ordering {
        match self {
            Self::Lexicographic => a.episode_code.cmp(&b.episode_code),
            Self::Natural => natural_key(a).cmp(&natural_key(b)),
        }
    }
}

// One key for every code keeps the order total when parsed and raw codes mix.
fn natural_key(episode: &Episode) -> (bool, Option<(u32, u32)>, &str) {
    let parsed = episode.season_and_number();
    (parsed.is_none(), parsed, &episode.episode_code)
}
