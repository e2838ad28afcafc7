//! # Plumbus
//!
//! A terminal client for the public Rick and Morty API.
//!
//! ## Overview
//!
//! Plumbus lists episodes, searches and sorts them by episode code or by the
//! characters that appear in them, picks a character avatar as a thumbnail
//! for each episode, and keeps a local set of favourite episodes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     EpisodeListing                          │
//! │  Load state, change notifications, async worker             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │  EpisodeStore   │ │  ImageResolver  │ │       API       │
//! │                 │ │                 │ │                 │
//! │ • Full set      │ │ • Random pick   │ │ • Episode list  │
//! │ • Filter/search │ │ • Session cache │ │ • Characters    │
//! │ • Sort          │ │                 │ │                 │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │   Favourites    │ │    Database     │ │     Config      │
//! │                 │ │                 │ │                 │
//! │ • Toggle        │ │ • Key-value     │ │ • Load/Save     │
//! │ • Reconcile     │ │ • SQLite        │ │ • Sort order    │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — Rick and Morty API client
//! - [`app`] — Episode listing controller and async worker
//! - [`config`] — Configuration management
//! - [`db`] — Key-value persistence (`SQLite` or in-memory)
//! - [`favourites`] — Favourite episode registry
//! - [`images`] — Thumbnail resolution and caching
//! - [`models`] — Data models (Episode, Character, `FilterMode`)
//! - [`output`] — Plain-text rendering for the CLI
//! - [`store`] — Episode store (full set and displayed projection)
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use plumbus::api::RickAndMortyClient;
//! use plumbus::app::{EpisodeListing, LoadState};
//! use plumbus::images::ImageResolver;
//! use plumbus::{EpisodeOrder, FilterMode};
//!
//! # async fn run() {
//! let mut listing = EpisodeListing::new(
//!     Arc::new(RickAndMortyClient::default()),
//!     ImageResolver::new(),
//!     FilterMode::ByEpisodeNumber,
//!     EpisodeOrder::Lexicographic,
//! );
//! listing.refresh();
//! while listing.state() == LoadState::Loading && listing.next_event().await {}
//! listing.apply_filter(FilterMode::ByEpisodeNumber, "s02");
//! for episode in listing.displayed() {
//!     println!("{} {}", episode.episode_code, episode.name);
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::ptr_arg)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod favourites;
pub mod images;
pub mod models;
pub mod output;
pub mod paths;
pub mod store;

// Re-export main types for convenience
pub use app::{EpisodeListing, ListingEvent, LoadState};
pub use config::Config;
pub use db::{Database, KeyValueStore, MemoryStore};
pub use favourites::FavouritesRegistry;
pub use models::{Character, Episode, EpisodeId, EpisodeOrder, FilterMode};
pub use store::EpisodeStore;

/// ASCII logo for the application
pub const LOGO: &str = r"
        _                 _
  _ __ | |_   _ _ __ ___ | |__  _   _ ___
 | '_ \| | | | | '_ ` _ \| '_ \| | | / __|
 | |_) | | |_| | | | | | | |_) | |_| \__ \
 | .__/|_|\__,_|_| |_| |_|_.__/ \__,_|___/
 |_|
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
