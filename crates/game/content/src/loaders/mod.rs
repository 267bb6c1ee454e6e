//! Content loaders for reading game data from files.
//!
//! Each loader parses one file format and hands the records to
//! [`crate::records`] for validation. Errors carry the offending path.

pub mod abilities;
pub mod config;
pub mod factory;
pub mod map;
pub mod monster;

pub use abilities::AbilityLoader;
pub use config::ConfigLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use map::MapLoader;
pub use monster::MonsterLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
