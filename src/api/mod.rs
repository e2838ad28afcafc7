//! API client for the Rick and Morty REST API

pub mod rick_and_morty;

use std::future::Future;

use thiserror::Error;

use crate::models::{Character, Episode};

pub use rick_and_morty::{DEFAULT_API_URL, RickAndMortyClient};

/// Failure of a single API request
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (DNS, connect, timeout, body read)
    #[error("request to {url} failed: {source}")]
    Network {
        /// Requested URL
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// Response status
        status: reqwest::StatusCode,
    },

    /// Response body wasn't the JSON shape we expected
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Requested URL
        url: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Whether the payload arrived but couldn't be decoded.
    ///
    /// Everything else (transport errors, bad status codes) is a network error.
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// Read-only operations against the episode API.
///
/// The futures are `Send` so calls can run on spawned Tokio tasks.
pub trait EpisodeApi: Send + Sync {
    /// Fetch the episode list
    fn fetch_episode_list(&self) -> impl Future<Output = Result<Vec<Episode>, ApiError>> + Send;

    /// Fetch a character by its resource URL
    fn fetch_character(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Character, ApiError>> + Send;
}
