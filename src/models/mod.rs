//! Data models for Plumbus

mod character;
mod episode;
mod filter;

pub use character::{Character, CharacterDetail, Location, UNKNOWN};
pub use episode::{Episode, EpisodeId};
pub use filter::{EpisodeOrder, FilterMode};
