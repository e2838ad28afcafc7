//! Rick and Morty REST API client

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::models::{Character, Episode};

use super::{ApiError, EpisodeApi};

/// Public API root
pub const DEFAULT_API_URL: &str = "https://rickandmortyapi.com/api";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Rick and Morty API client
#[derive(Clone)]
pub struct RickAndMortyClient {
    client: Client,
    base_url: String,
}

impl Default for RickAndMortyClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_TIMEOUT)
    }
}

impl RickAndMortyClient {
    /// Create a new client for the API rooted at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("plumbus/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// API root this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET `url` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::debug!("GET {url}");

        let network = |source: reqwest::Error| ApiError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(network)?;

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl EpisodeApi for RickAndMortyClient {
    async fn fetch_episode_list(&self) -> Result<Vec<Episode>, ApiError> {
        let url = self.api_url("/episode");
        let page: EpisodesResponse = self.get_json(&url).await?;
        tracing::debug!("Fetched {} episodes", page.results.len());
        Ok(page.results)
    }

    async fn fetch_character(&self, url: &str) -> Result<Character, ApiError> {
        self.get_json(url).await
    }
}

// ==================== API Types ====================

#[derive(Debug, Deserialize)]
struct EpisodesResponse {
    results: Vec<Episode>,
}
