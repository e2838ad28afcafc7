//! On-disk locations
//!
//! Plumbus keeps two files under ~/.config/plumbus/:
//! - config.toml: settings read at startup, never written by the CLI
//! - plumbus.sqlite: the key-value table holding favourite episode IDs
//!
//! Nothing else is stored; thumbnails are only cached in memory.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "plumbus";

/// Directory holding config and favourites, created on first use
pub fn plumbus_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".config").join(APP_DIR);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

/// Settings file
pub fn config_path() -> Result<PathBuf> {
    Ok(plumbus_dir()?.join("config.toml"))
}

/// Favourites database
pub fn database_path() -> Result<PathBuf> {
    Ok(plumbus_dir()?.join("plumbus.sqlite"))
}
