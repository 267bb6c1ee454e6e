//! Ability list loader.

use std::path::Path;

use anyhow::Context;
use game_core::AbilityCatalogue;

use crate::loaders::{LoadResult, read_file};
use crate::records::{AbilityRecord, build_catalogue};

/// Loader for ability catalogues from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load every ability in the file into a fresh catalogue.
    ///
    /// RON format: `Vec<AbilityRecord>`, registered in file order.
    pub fn load(path: &Path) -> LoadResult<AbilityCatalogue> {
        let content = read_file(path)?;
        let records: Vec<AbilityRecord> = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse abilities RON {}: {}", path.display(), e)
        })?;

        let catalogue = build_catalogue(&records)
            .with_context(|| format!("Invalid abilities at {}", path.display()))?;

        tracing::debug!(abilities = catalogue.len(), "ability catalogue loaded");
        Ok(catalogue)
    }
}
