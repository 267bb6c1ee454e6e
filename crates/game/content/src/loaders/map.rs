//! Overworld map loader.

use std::path::Path;

use anyhow::Context;

use crate::loaders::{LoadResult, read_file};
use crate::records::{MapRecord, OverworldMap};

/// Loader for overworld maps from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load and validate a map.
    ///
    /// RON format: a single `MapRecord`
    /// (`name`, `width`, `height`, `blocked`, `player_start`, `spawns`).
    pub fn load(path: &Path) -> LoadResult<OverworldMap> {
        let content = read_file(path)?;
        let record: MapRecord = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON {}: {}", path.display(), e))?;

        let map = record
            .validate()
            .with_context(|| format!("Invalid map at {}", path.display()))?;

        tracing::debug!(
            map = %map.name,
            width = map.grid.width(),
            height = map.grid.height(),
            blocked = map.grid.blocked().len(),
            spawns = map.spawns.len(),
            "map loaded"
        );
        Ok(map)
    }
}
