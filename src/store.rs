//! Episode store: the fetched episode set and its displayed projection
//!
//! The displayed list is only ever produced by projecting the full set through
//! the current filter mode and search text. Nothing else writes to it.

use crate::models::{Episode, EpisodeId, EpisodeOrder, FilterMode};

/// Full episode set plus the filtered/sorted subset being shown
#[derive(Debug, Clone, Default)]
pub struct EpisodeStore {
    /// Last successfully fetched episodes, in API order
    full: Vec<Episode>,
    /// Current projection of `full`
    displayed: Vec<Episode>,
    /// Active filter mode
    mode: FilterMode,
    /// Active search text (as typed)
    search: String,
    /// How episode codes compare
    order: EpisodeOrder,
}

impl EpisodeStore {
    /// Create an empty store
    pub fn new(mode: FilterMode, order: EpisodeOrder) -> Self {
        Self {
            mode,
            order,
            ..Self::default()
        }
    }

    /// Replace the full set and recompute the displayed subset
    pub fn load(&mut self, episodes: Vec<Episode>) {
        self.full = episodes;
        self.recompute();
    }

    /// Set filter mode and search text, then recompute
    pub fn apply_filter(&mut self, mode: FilterMode, search_text: &str) {
        self.mode = mode;
        self.search = search_text.to_string();
        self.recompute();
    }

    /// Currently displayed episodes
    pub fn current_displayed(&self) -> &[Episode] {
        &self.displayed
    }

    /// Full episode set, in fetch order
    pub fn full_set(&self) -> &[Episode] {
        &self.full
    }

    /// Active filter mode
    pub const fn filter_mode(&self) -> FilterMode {
        self.mode
    }

    /// Active search text
    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// Look up an episode in the full set
    pub fn get(&self, id: EpisodeId) -> Option<&Episode> {
        self.full.iter().find(|e| e.id == id)
    }

    /// Whether nothing has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }

    fn recompute(&mut self) {
        let mut displayed: Vec<Episode> = if self.search.is_empty() {
            self.full.clone()
        } else {
            let needle = self.search.to_lowercase();
            self.full
                .iter()
                .filter(|e| self.mode.matches(e, &needle))
                .cloned()
                .collect()
        };

        // sort_by is stable, so equal keys keep fetch order
        let (mode, order) = (self.mode, self.order);
        displayed.sort_by(|a, b| mode.compare(order, a, b));

        self.displayed = displayed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::episode;

    fn codes(store: &EpisodeStore) -> Vec<&str> {
        store
            .current_displayed()
            .iter()
            .map(|e| e.episode_code.as_str())
            .collect()
    }

    fn sample() -> Vec<Episode> {
        vec![
            episode(3, "S02E01", "A Rickle in Time", &["https://x/character/1"]),
            episode(1, "S01E01", "Pilot", &["https://x/character/1", "https://x/character/2"]),
            episode(2, "S01E02", "Lawnmower Dog", &["https://x/character/38"]),
        ]
    }

    #[test]
    fn test_substring_match_on_episode_code() {
        let mut store = EpisodeStore::default();
        store.load(sample());
        store.apply_filter(FilterMode::ByEpisodeNumber, "01");

        // "S01E02" contains "01" as well
        assert_eq!(codes(&store), ["S01E01", "S01E02", "S02E01"]);

        store.apply_filter(FilterMode::ByEpisodeNumber, "e01");
        assert_eq!(codes(&store), ["S01E01", "S02E01"]);
    }

    #[test]
    fn test_displayed_and_complement() {
        let mut store = EpisodeStore::default();
        store.load(sample());
        store.apply_filter(FilterMode::ByEpisodeNumber, "s02");

        let shown: Vec<_> = store.current_displayed().iter().map(|e| e.id).collect();
        for e in store.full_set() {
            let hit = e.episode_code.to_lowercase().contains("s02");
            assert_eq!(hit, shown.contains(&e.id));
        }
    }

    #[test]
    fn test_empty_search_is_full_set_sorted() {
        let mut store = EpisodeStore::default();
        store.load(sample());
        store.apply_filter(FilterMode::ByEpisodeNumber, "");
        assert_eq!(codes(&store), ["S01E01", "S01E02", "S02E01"]);

        store.apply_filter(FilterMode::ByCharacterName, "");
        let names: Vec<_> = store.current_displayed().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A Rickle in Time", "Lawnmower Dog", "Pilot"]);
    }

    #[test]
    fn test_character_filter_matches_references() {
        let mut store = EpisodeStore::default();
        store.load(sample());
        store.apply_filter(FilterMode::ByCharacterName, "CHARACTER/1");

        let ids: Vec<_> = store.current_displayed().iter().map(|e| e.id).collect();
        assert_eq!(ids, [3, 1]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let mut store = EpisodeStore::default();
        store.load(sample());
        store.apply_filter(FilterMode::ByCharacterName, "character");
        let first = store.current_displayed().to_vec();
        store.apply_filter(FilterMode::ByCharacterName, "character");
        assert_eq!(first, store.current_displayed());
    }

    #[test]
    fn test_load_reapplies_current_filter() {
        let mut store = EpisodeStore::default();
        store.apply_filter(FilterMode::ByEpisodeNumber, "s02");
        store.load(sample());
        assert_eq!(codes(&store), ["S02E01"]);
        assert_eq!(store.search_text(), "s02");
    }

    #[test]
    fn test_lexicographic_vs_natural_order() {
        let episodes = vec![
            episode(10, "S01E10", "Close Rick-counters", &[]),
            episode(2, "S01E2", "Lawnmower Dog", &[]),
        ];

        let mut store = EpisodeStore::new(FilterMode::ByEpisodeNumber, EpisodeOrder::Lexicographic);
        store.load(episodes.clone());
        assert_eq!(codes(&store), ["S01E10", "S01E2"]);

        let mut store = EpisodeStore::new(FilterMode::ByEpisodeNumber, EpisodeOrder::Natural);
        store.load(episodes);
        assert_eq!(codes(&store), ["S01E2", "S01E10"]);
    }

    #[test]
    fn test_natural_order_with_malformed_codes() {
        let mut episodes = Vec::new();
        let mut id = 0;
        for season in (1..=3).rev() {
            for number in (1..=12).rev() {
                id += 1;
                episodes.push(episode(id, &format!("S0{season}E{number}"), "", &[]));
                id += 1;
                episodes.push(episode(id, &format!("S0{season}E{number}x"), "", &[]));
            }
        }

        let mut store = EpisodeStore::new(FilterMode::ByEpisodeNumber, EpisodeOrder::Natural);
        store.load(episodes);

        let shown = store.current_displayed();
        assert_eq!(shown.len(), 72);
        assert_eq!(shown[0].episode_code, "S01E1");
        assert_eq!(shown[11].episode_code, "S01E12");
        assert_eq!(shown[35].episode_code, "S03E12");
        assert!(shown[36..].iter().all(|e| e.season_and_number().is_none()));
        assert!(
            shown[36..]
                .windows(2)
                .all(|w| w[0].episode_code <= w[1].episode_code)
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let episodes = vec![
            episode(7, "S01E01", "Same", &[]),
            episode(8, "S01E01", "Same", &[]),
        ];
        let mut store = EpisodeStore::default();
        store.load(episodes);
        let ids: Vec<_> = store.current_displayed().iter().map(|e| e.id).collect();
        assert_eq!(ids, [7, 8]);
    }

    #[test]
    fn test_get_and_empty() {
        let mut store = EpisodeStore::default();
        assert!(store.is_empty());
        store.load(sample());
        assert_eq!(store.get(2).map(|e| e.name.as_str()), Some("Lawnmower Dog"));
        assert!(store.get(99).is_none());
    }
}
