//! Resolved thumbnail URLs, keyed by episode.

use std::collections::HashMap;

use crate::models::EpisodeId;

/// Episode ID → resolved character image URL.
///
/// Entries live for the whole session; nothing is evicted.
#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    urls: HashMap<EpisodeId, String>,
}

impl ImageCache {
    /// Create a new image cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a resolved URL. A later write for the same episode wins.
    pub fn insert(&mut self, episode_id: EpisodeId, url: impl Into<String>) {
        self.urls.insert(episode_id, url.into());
    }

    /// Get the resolved URL for an episode.
    pub fn get(&self, episode_id: EpisodeId) -> Option<&str> {
        self.urls.get(&episode_id).map(String::as_str)
    }

    /// Check if an episode has a resolved URL.
    pub fn contains(&self, episode_id: EpisodeId) -> bool {
        self.urls.contains_key(&episode_id)
    }

    /// Clear the entire cache.
    pub fn clear(&mut self) {
        self.urls.clear();
    }

    /// Get the number of cached URLs.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
