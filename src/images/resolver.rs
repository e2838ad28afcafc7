//! Picks and resolves a representative character image per episode.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::api::EpisodeApi;
use crate::models::{Episode, EpisodeId};

use super::ImageCache;

/// Image cache plus the random source used to pick a character.
pub struct ImageResolver {
    cache: ImageCache,
    rng: StdRng,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageResolver {
    /// Create a resolver seeded from the OS.
    pub fn new() -> Self {
        Self {
            cache: ImageCache::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a resolver with a fixed seed (same seed, same picks).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            cache: ImageCache::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create from an optional seed.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::with_seed)
    }

    /// Previously resolved URL for an episode.
    pub fn cached(&self, episode_id: EpisodeId) -> Option<&str> {
        self.cache.get(episode_id)
    }

    /// Record a resolved URL.
    pub fn store(&mut self, episode_id: EpisodeId, url: impl Into<String>) {
        self.cache.insert(episode_id, url);
    }

    /// Pick one character reference uniformly at random.
    pub fn pick_character<'a>(&mut self, episode: &'a Episode) -> Option<&'a str> {
        episode
            .character_urls
            .choose(&mut self.rng)
            .map(String::as_str)
    }

    /// The underlying cache.
    pub const fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Resolve the thumbnail URL for `episode`.
    ///
    /// Cached episodes never hit the network. Fetch and decode failures are
    /// logged and yield `None`.
    pub async fn resolve<A: EpisodeApi>(&mut self, api: &A, episode: &Episode) -> Option<String> {
        if let Some(url) = self.cached(episode.id) {
            return Some(url.to_string());
        }

        let Some(character_url) = self.pick_character(episode) else {
            tracing::debug!("Episode {} has no characters", episode.id);
            return None;
        };

        let image_url = fetch_image_url(api, character_url).await?;
        self.store(episode.id, image_url.clone());
        Some(image_url)
    }
}

/// Fetch a character and pull out its image URL, swallowing errors.
pub async fn fetch_image_url<A: EpisodeApi>(api: &A, character_url: &str) -> Option<String> {
    match api.fetch_character(character_url).await {
        Ok(character) => {
            if character.image_url.is_none() {
                tracing::debug!("Character {character_url} has no image");
            }
            character.image_url
        }
        Err(e) => {
            tracing::warn!("Failed to resolve image from {character_url}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{MockApi, episode};

    const RICK: &str = "https://x/character/1";
    const MORTY: &str = "https://x/character/2";

    #[tokio::test]
    async fn test_resolve_caches_after_first_fetch() {
        let api = MockApi::default().character(RICK, Some("https://x/avatar/1.jpeg"));
        let pilot = episode(1, "S01E01", "Pilot", &[RICK]);
        let mut resolver = ImageResolver::with_seed(7);

        let first = resolver.resolve(&api, &pilot).await;
        let second = resolver.resolve(&api, &pilot).await;

        assert_eq!(first.as_deref(), Some("https://x/avatar/1.jpeg"));
        assert_eq!(first, second);
        assert_eq!(api.character_calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_character_list_makes_no_call() {
        let api = MockApi::default();
        let empty = episode(2, "S01E02", "Lawnmower Dog", &[]);
        let mut resolver = ImageResolver::with_seed(7);

        assert!(resolver.resolve(&api, &empty).await.is_none());
        assert_eq!(api.character_calls(), 0);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        // MORTY is unknown to the mock, so the fetch fails
        let api = MockApi::default();
        let ep = episode(3, "S01E03", "Anatomy Park", &[MORTY]);
        let mut resolver = ImageResolver::with_seed(7);

        assert!(resolver.resolve(&api, &ep).await.is_none());
        assert!(resolver.resolve(&api, &ep).await.is_none());
        assert_eq!(api.character_calls(), 2);
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_character_without_image() {
        let api = MockApi::default().character(RICK, None);
        let ep = episode(4, "S01E04", "M. Night Shaym-Aliens!", &[RICK]);
        let mut resolver = ImageResolver::with_seed(1);

        let resolved = tokio_test::block_on(resolver.resolve(&api, &ep));
        assert!(resolved.is_none());
        assert!(!resolver.cache().contains(4));
    }

    #[test]
    fn test_same_seed_same_picks() {
        let urls: Vec<String> = (0..20).map(|i| format!("https://x/character/{i}")).collect();
        let refs: Vec<&str> = urls.iter().map(String::as_str).collect();
        let ep = episode(5, "S01E05", "Meeseeks and Destroy", &refs);

        let mut a = ImageResolver::with_seed(42);
        let mut b = ImageResolver::with_seed(42);
        for _ in 0..10 {
            let pick = a.pick_character(&ep);
            assert!(pick.is_some());
            assert_eq!(pick, b.pick_character(&ep));
        }
    }
}
