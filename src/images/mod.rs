//! Thumbnail resolution for episode list cells.
//!
//! Each episode is represented by the avatar of one of its characters, picked
//! at random the first time the episode is shown and cached for the rest of
//! the session.

mod cache;
mod resolver;

pub use cache::ImageCache;
pub use resolver::{ImageResolver, fetch_image_url};
