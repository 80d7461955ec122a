//! Storage collaborators: the daily puzzle gateway and the local stats
//! gateway. The game core only sees the traits defined here.

pub mod puzzles;
pub mod stats;

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Platform-specific data directory for local state, created on first use.
pub fn data_dir() -> Result<PathBuf> {
    let mut path = dirs::data_dir()
        .ok_or_else(|| Error::Storage("unable to determine data directory for your platform".into()))?;

    path.push("xclues");
    std::fs::create_dir_all(&path)?;
    Ok(path)
}
