//! Episode listing controller
//!
//! [`EpisodeListing`] owns the episode store and the image resolver. Network
//! calls run on Tokio tasks spawned by the worker in `async_ops`; their results
//! come back over a channel and are applied by whoever owns the listing, via
//! [`EpisodeListing::pump`] or [`EpisodeListing::next_event`]. Observers
//! receive [`ListingEvent`]s through [`EpisodeListing::subscribe`].

mod async_ops;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::EpisodeApi;
use crate::images::ImageResolver;
use crate::models::{Episode, EpisodeId, EpisodeOrder, FilterMode};
use crate::store::EpisodeStore;

use async_ops::{AsyncCommand, AsyncHandle, AsyncResult, spawn_worker};

/// Load state of the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// Last fetch succeeded
    Loaded,
    /// Last fetch failed; the previous episodes are still shown
    LoadFailed,
}

/// Change notifications for observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingEvent {
    /// Load state changed
    StateChanged(LoadState),
    /// The displayed episode sequence changed
    Rendered(Vec<Episode>),
    /// Thumbnail resolution finished for an episode
    ImageReady {
        /// Episode the thumbnail belongs to
        episode_id: EpisodeId,
        /// Resolved URL, or `None` if nothing could be resolved
        image_url: Option<String>,
    },
}

/// Episode listing state plus its async worker
pub struct EpisodeListing {
    store: EpisodeStore,
    resolver: ImageResolver,
    state: LoadState,
    /// Generation of the most recent refresh
    generation: u64,
    handle: AsyncHandle,
    subscribers: Vec<mpsc::UnboundedSender<ListingEvent>>,
}

impl EpisodeListing {
    /// Create a listing and spawn its worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new<A: EpisodeApi + 'static>(
        api: Arc<A>,
        resolver: ImageResolver,
        mode: FilterMode,
        order: EpisodeOrder,
    ) -> Self {
        Self {
            store: EpisodeStore::new(mode, order),
            resolver,
            state: LoadState::Idle,
            generation: 0,
            handle: spawn_worker(api),
            subscribers: Vec::new(),
        }
    }

    /// Register an observer
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ListingEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Current load state
    pub const fn state(&self) -> LoadState {
        self.state
    }

    /// Episode store
    pub const fn store(&self) -> &EpisodeStore {
        &self.store
    }

    /// Currently displayed episodes
    pub fn displayed(&self) -> &[Episode] {
        self.store.current_displayed()
    }

    /// Resolved thumbnail for an episode, if any
    pub fn image(&self, episode_id: EpisodeId) -> Option<&str> {
        self.resolver.cached(episode_id)
    }

    /// Start (or restart) fetching the episode list.
    ///
    /// Results of earlier refreshes that arrive after this call are ignored.
    pub fn refresh(&mut self) {
        self.generation += 1;
        let generation = self.generation;

        if self
            .handle
            .cmd_tx
            .send(AsyncCommand::FetchEpisodes { generation })
            .is_err()
        {
            tracing::warn!("Listing worker is gone; refresh dropped");
            self.set_state(LoadState::LoadFailed);
            return;
        }

        tracing::debug!("Refresh #{generation} started");
        self.set_state(LoadState::Loading);
    }

    /// Change filter mode and search text; the displayed list updates immediately
    pub fn apply_filter(&mut self, mode: FilterMode, search_text: &str) {
        self.store.apply_filter(mode, search_text);
        self.emit_rendered();
    }

    /// Ask for the thumbnail of `episode`.
    ///
    /// Returns the URL right away when cached. Otherwise a character fetch is
    /// started and the answer arrives later as [`ListingEvent::ImageReady`].
    /// Overlapping requests for the same episode are not merged.
    pub fn request_image(&mut self, episode: &Episode) -> Option<String> {
        if let Some(url) = self.resolver.cached(episode.id) {
            let url = url.to_string();
            self.emit(ListingEvent::ImageReady {
                episode_id: episode.id,
                image_url: Some(url.clone()),
            });
            return Some(url);
        }

        let Some(character_url) = self.resolver.pick_character(episode) else {
            self.emit(ListingEvent::ImageReady {
                episode_id: episode.id,
                image_url: None,
            });
            return None;
        };

        let cmd = AsyncCommand::ResolveImage {
            episode_id: episode.id,
            character_url: character_url.to_string(),
        };
        if self.handle.cmd_tx.send(cmd).is_err() {
            tracing::warn!("Listing worker is gone; image for episode {} dropped", episode.id);
        }

        None
    }

    /// Apply every result that has already arrived, without waiting.
    ///
    /// Returns how many results were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(result) = self.handle.result_rx.try_recv() {
            self.apply_result(result);
            applied += 1;
        }
        applied
    }

    /// Wait for the next worker result and apply it.
    ///
    /// Returns `false` once the worker has shut down.
    pub async fn next_event(&mut self) -> bool {
        match self.handle.result_rx.recv().await {
            Some(result) => {
                self.apply_result(result);
                true
            }
            None => false,
        }
    }

    /// Stop the worker. Requests already in flight still complete.
    pub fn shutdown(&self) {
        let _ = self.handle.cmd_tx.send(AsyncCommand::Shutdown);
    }

    fn apply_result(&mut self, result: AsyncResult) {
        match result {
            AsyncResult::EpisodesFetched {
                generation,
                episodes,
            } => {
                if generation != self.generation {
                    tracing::debug!("Dropping episodes from superseded refresh #{generation}");
                    return;
                }
                tracing::info!("Loaded {} episodes", episodes.len());
                self.store.load(episodes);
                self.set_state(LoadState::Loaded);
                self.emit_rendered();
            }
            AsyncResult::FetchFailed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    tracing::debug!("Ignoring failure of superseded refresh #{generation}");
                    return;
                }
                tracing::warn!("Error fetching episodes: {message}");
                self.set_state(LoadState::LoadFailed);
            }
            AsyncResult::ImageResolved {
                episode_id,
                image_url,
            } => {
                if let Some(url) = &image_url {
                    self.resolver.store(episode_id, url.clone());
                }
                self.emit(ListingEvent::ImageReady {
                    episode_id,
                    image_url,
                });
            }
        }
    }

    fn set_state(&mut self, state: LoadState) {
        self.state = state;
        self.emit(ListingEvent::StateChanged(state));
    }

    fn emit_rendered(&mut self) {
        let displayed = self.store.current_displayed().to_vec();
        self.emit(ListingEvent::Rendered(displayed));
    }

    fn emit(&mut self, event: ListingEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
