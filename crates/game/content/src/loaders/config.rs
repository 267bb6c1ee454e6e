//! Combat tuning loader.

use std::path::Path;

use anyhow::Context;
use game_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};
use crate::records::validate_config;

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their [`CombatConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        let config: CombatConfig = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e)
        })?;

        validate_config(&config)
            .with_context(|| format!("Invalid config at {}", path.display()))?;

        tracing::debug!(
            width = config.arena_width,
            height = config.arena_height,
            player_start = %config.player_start,
            monster_start = %config.monster_start,
            "combat config loaded"
        );
        Ok(config)
    }
}
