//! Async operations for the episode listing
//!
//! Uses channels to communicate between the owner of the listing state and
//! the network tasks.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::EpisodeApi;
use crate::images::fetch_image_url;
use crate::models::{Episode, EpisodeId};

/// Commands sent from the listing to the async worker
#[derive(Debug, Clone)]
pub enum AsyncCommand {
    /// Fetch the episode list; `generation` identifies the request
    FetchEpisodes { generation: u64 },
    /// Fetch a character and report its image URL
    ResolveImage {
        episode_id: EpisodeId,
        character_url: String,
    },
    /// Shutdown the worker
    Shutdown,
}

/// Results sent back from the async worker to the listing
#[derive(Debug)]
pub enum AsyncResult {
    /// Episode list arrived
    EpisodesFetched {
        generation: u64,
        episodes: Vec<Episode>,
    },
    /// Episode list request failed
    FetchFailed { generation: u64, message: String },
    /// Character image lookup finished (`None` on any failure)
    ImageResolved {
        episode_id: EpisodeId,
        image_url: Option<String>,
    },
}

/// Channel handles for communicating with the async worker
pub struct AsyncHandle {
    /// Send commands to the worker
    pub cmd_tx: mpsc::UnboundedSender<AsyncCommand>,
    /// Receive results from the worker
    pub result_rx: mpsc::UnboundedReceiver<AsyncResult>,
}

/// Spawn the async worker and return handles.
///
/// Each command runs on its own task, so requests overlap and may complete
/// out of order.
pub fn spawn_worker<A: EpisodeApi + 'static>(api: Arc<A>) -> AsyncHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<AsyncCommand>();
    let (result_tx, result_rx) = mpsc::unbounded_channel::<AsyncResult>();

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            let api = Arc::clone(&api);
            let result_tx = result_tx.clone();

            match cmd {
                AsyncCommand::Shutdown => {
                    tracing::debug!("Listing worker shutting down");
                    break;
                }
                AsyncCommand::FetchEpisodes { generation } => {
                    tokio::spawn(async move {
                        handle_fetch(&result_tx, api.as_ref(), generation).await;
                    });
                }
                AsyncCommand::ResolveImage {
                    episode_id,
                    character_url,
                } => {
                    tokio::spawn(async move {
                        let image_url = fetch_image_url(api.as_ref(), &character_url).await;
                        let _ = result_tx.send(AsyncResult::ImageResolved {
                            episode_id,
                            image_url,
                        });
                    });
                }
            }
        }
    });

    AsyncHandle { cmd_tx, result_rx }
}

async fn handle_fetch<A: EpisodeApi>(
    result_tx: &mpsc::UnboundedSender<AsyncResult>,
    api: &A,
    generation: u64,
) {
    let result = match api.fetch_episode_list().await {
        Ok(episodes) => AsyncResult::EpisodesFetched {
            generation,
            episodes,
        },
        Err(e) => AsyncResult::FetchFailed {
            generation,
            message: e.to_string(),
        },
    };

    let _ = result_tx.send(result);
}
