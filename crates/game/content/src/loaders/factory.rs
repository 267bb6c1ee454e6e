//! Content factory for building game values from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use game_core::{AbilityCatalogue, CombatConfig};

use crate::loaders::{AbilityLoader, ConfigLoader, LoadResult, MapLoader, MonsterLoader};
use crate::records::{MonsterTemplate, OverworldMap};

/// Everything a session needs, loaded and cross-checked.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    pub config: CombatConfig,
    pub catalogue: AbilityCatalogue,
    pub map: OverworldMap,
    pub monster: MonsterTemplate,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml        (optional)
/// ├── abilities.ron      (optional)
/// ├── monsters/
/// │   └── slime.ron
/// └── maps/
///     └── zone_001.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat tuning from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the ability catalogue from `abilities.ron`, or the built-in
    /// weapon kits when absent.
    pub fn load_abilities(&self) -> LoadResult<AbilityCatalogue> {
        let path = self.data_dir.join("abilities.ron");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no ability file, using built-in kits");
            return Ok(AbilityCatalogue::builtin());
        }
        AbilityLoader::load(&path)
    }

    /// Load a monster template from `monsters/{name}.ron`.
    pub fn load_monster(&self, name: &str) -> LoadResult<MonsterTemplate> {
        let path = self.data_dir.join("monsters").join(format!("{}.ron", name));
        MonsterLoader::load(&path)
    }

    /// Load a map from `maps/{name}.ron`.
    pub fn load_map(&self, name: &str) -> LoadResult<OverworldMap> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", name));
        MapLoader::load(&path)
    }

    /// Load config, abilities, one map and one monster, then check that the
    /// monster only references known abilities.
    pub fn load_bundle(&self, map_name: &str, monster_name: &str) -> LoadResult<ContentBundle> {
        let config = self.load_config()?;
        let catalogue = self.load_abilities()?;
        let map = self.load_map(map_name)?;
        let monster = self.load_monster(monster_name)?;
        monster
            .check_abilities(&catalogue)
            .with_context(|| format!("Monster '{}' does not match the catalogue", monster_name))?;

        tracing::info!(
            map = %map.name,
            monster = %monster.id,
            abilities = catalogue.len(),
            "content loaded"
        );
        Ok(ContentBundle {
            config,
            catalogue,
            map,
            monster,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
