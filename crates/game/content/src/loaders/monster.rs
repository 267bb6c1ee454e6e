//! Monster template loader.

use std::path::Path;

use anyhow::Context;

use crate::loaders::{LoadResult, read_file};
use crate::records::{MonsterRecord, MonsterTemplate};

/// Loader for monster templates from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load and validate one monster template.
    pub fn load(path: &Path) -> LoadResult<MonsterTemplate> {
        let content = read_file(path)?;
        let record: MonsterRecord = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse monster RON {}: {}", path.display(), e)
        })?;

        let template = record
            .validate()
            .with_context(|| format!("Invalid monster at {}", path.display()))?;

        tracing::debug!(monster = %template.id, hp = template.stats.hp, "monster loaded");
        Ok(template)
    }
}
