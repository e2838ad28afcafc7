//! Episode model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Episode identifier as assigned by the API
pub type EpisodeId = u32;

/// A single show episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Unique episode ID
    pub id: EpisodeId,
    /// Episode title
    pub name: String,
    /// Air date as sent by the API (e.g. "December 2, 2013")
    #[serde(rename = "air_date")]
    pub air_date: String,
    /// Season/episode code (e.g. "S01E01")
    #[serde(rename = "episode")]
    pub episode_code: String,
    /// Character resource URLs, in API order
    #[serde(rename = "characters", default)]
    pub character_urls: Vec<String>,
    /// Canonical URL of this episode resource
    #[serde(rename = "url")]
    pub source_url: String,
    /// Creation timestamp as sent by the API
    #[serde(rename = "created")]
    pub created_at: String,
}

impl Episode {
    /// Parse the episode code into `(season, number)`.
    ///
    /// Returns `None` for anything that isn't shaped like `S<digits>E<digits>`.
    pub fn season_and_number(&self) -> Option<(u32, u32)> {
        let code = self.episode_code.trim().to_ascii_uppercase();
        let rest = code.strip_prefix('S')?;
        let (season, number) = rest.split_once('E')?;
        Some((season.parse().ok()?, number.parse().ok()?))
    }

    /// Parse the air date
    pub fn aired_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.air_date.trim(), "%B %d, %Y").ok()
    }

    /// Parse the creation timestamp
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Number of characters appearing in the episode
    pub fn character_count(&self) -> usize {
        self.character_urls.len()
    }
}
