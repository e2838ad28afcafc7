//! Favourite episodes
//!
//! A flat set of episode IDs persisted under a single key. There is no
//! synchronization between processes: the last writer wins.

use std::collections::BTreeSet;

use anyhow::{Context, Result};

use crate::api::EpisodeApi;
use crate::db::KeyValueStore;
use crate::models::{Episode, EpisodeId};

/// Storage key holding the JSON array of favourite IDs
pub const FAVOURITES_KEY: &str = "FavouriteEpisodes";

/// Persisted set of favourite episode IDs
pub struct FavouritesRegistry<S: KeyValueStore> {
    store: S,
    ids: BTreeSet<EpisodeId>,
}

impl<S: KeyValueStore> FavouritesRegistry<S> {
    /// Load the favourites set from `store`.
    ///
    /// A missing entry is an empty set. So is a malformed one, which is logged
    /// and overwritten by the next toggle.
    pub fn load(store: S) -> Result<Self> {
        let ids = match store.get(FAVOURITES_KEY)? {
            Some(raw) => serde_json::from_str::<Vec<EpisodeId>>(&raw)
                .map(|ids| ids.into_iter().collect())
                .unwrap_or_else(|e| {
                    tracing::warn!("Ignoring malformed {FAVOURITES_KEY} entry: {e}");
                    BTreeSet::new()
                }),
            None => BTreeSet::new(),
        };

        tracing::debug!("Loaded {} favourite episodes", ids.len());
        Ok(Self { store, ids })
    }

    /// Flip membership of `episode_id` and persist.
    ///
    /// Returns whether the episode is a favourite afterwards.
    pub fn toggle(&mut self, episode_id: EpisodeId) -> Result<bool> {
        let now_favourite = if self.ids.remove(&episode_id) {
            false
        } else {
            self.ids.insert(episode_id);
            true
        };

        if let Err(e) = self.persist() {
            // Keep memory consistent with what's on disk
            if now_favourite {
                self.ids.remove(&episode_id);
            } else {
                self.ids.insert(episode_id);
            }
            return Err(e);
        }

        Ok(now_favourite)
    }

    /// Whether `episode_id` is a favourite
    pub fn contains(&self, episode_id: EpisodeId) -> bool {
        self.ids.contains(&episode_id)
    }

    /// Favourite IDs in ascending order
    pub fn ids(&self) -> impl Iterator<Item = EpisodeId> + '_ {
        self.ids.iter().copied()
    }

    /// Number of favourites
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether there are no favourites
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Favourite episodes out of `full_set`, in `full_set` order
    pub fn current_favourites(&self, full_set: &[Episode]) -> Vec<Episode> {
        full_set
            .iter()
            .filter(|e| self.ids.contains(&e.id))
            .cloned()
            .collect()
    }

    /// Re-fetch the episode list and return the favourites in it.
    ///
    /// A failed fetch is logged and yields an empty list.
    pub async fn fetch_favourites<A: EpisodeApi>(&self, api: &A) -> Vec<Episode> {
        match api.fetch_episode_list().await {
            Ok(episodes) => self.current_favourites(&episodes),
            Err(e) => {
                tracing::warn!("Error fetching favourites: {e}");
                Vec::new()
            }
        }
    }

    fn persist(&self) -> Result<()> {
        let ids: Vec<EpisodeId> = self.ids.iter().copied().collect();
        let raw = serde_json::to_string(&ids).context("Failed to serialize favourites")?;
        self.store.set(FAVOURITES_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{MockApi, episode};
    use crate::db::{Database, MemoryStore};
    use tempfile::tempdir;

    fn full_set() -> Vec<Episode> {
        vec![
            episode(1, "S01E01", "Pilot", &[]),
            episode(2, "S01E02", "Lawnmower Dog", &[]),
            episode(3, "S01E03", "Anatomy Park", &[]),
        ]
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let mut favourites = FavouritesRegistry::load(MemoryStore::new()).unwrap();
        favourites.toggle(2).unwrap();
        let before: Vec<_> = favourites.ids().collect();

        assert!(favourites.toggle(5).unwrap());
        assert!(!favourites.toggle(5).unwrap());

        let after: Vec<_> = favourites.ids().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_current_favourites_preserves_order() {
        let mut favourites = FavouritesRegistry::load(MemoryStore::new()).unwrap();
        favourites.toggle(3).unwrap();
        favourites.toggle(1).unwrap();
        favourites.toggle(42).unwrap();

        let ids: Vec<_> = favourites
            .current_favourites(&full_set())
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn test_persisted_format() {
        let store = MemoryStore::new();
        store.set(FAVOURITES_KEY, "[3, 1]").unwrap();

        let mut favourites = FavouritesRegistry::load(store).unwrap();
        assert!(favourites.contains(1));
        assert_eq!(favourites.len(), 2);

        favourites.toggle(2).unwrap();
        assert_eq!(
            favourites.store.get(FAVOURITES_KEY).unwrap().as_deref(),
            Some("[1,2,3]")
        );
    }

    #[test]
    fn test_malformed_entry_is_empty() {
        let store = MemoryStore::new();
        store.set(FAVOURITES_KEY, "{\"not\": \"a list\"}").unwrap();
        let favourites = FavouritesRegistry::load(store).unwrap();
        assert!(favourites.is_empty());
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.sqlite");

        {
            let mut favourites = FavouritesRegistry::load(Database::open_path(&path).unwrap()).unwrap();
            favourites.toggle(7).unwrap();
        }

        let favourites = FavouritesRegistry::load(Database::open_path(&path).unwrap()).unwrap();
        assert!(favourites.contains(7));
    }

    #[tokio::test]
    async fn test_fetch_favourites_refetches_every_time() {
        let api = MockApi::with_episodes(full_set());
        let mut favourites = FavouritesRegistry::load(MemoryStore::new()).unwrap();
        favourites.toggle(1).unwrap();
        favourites.toggle(3).unwrap();

        let first: Vec<_> = favourites.fetch_favourites(&api).await.iter().map(|e| e.id).collect();
        let second: Vec<_> = favourites.fetch_favourites(&api).await.iter().map(|e| e.id).collect();

        assert_eq!(first, [1, 3]);
        assert_eq!(first, second);
        assert_eq!(api.episode_calls(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty() {
        let api = MockApi::with_episodes(full_set());
        api.go_offline();
        let mut favourites = FavouritesRegistry::load(MemoryStore::new()).unwrap();
        favourites.toggle(1).unwrap();

        assert!(favourites.fetch_favourites(&api).await.is_empty());
    }
}
