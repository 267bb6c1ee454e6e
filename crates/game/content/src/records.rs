//! Raw content records and their validation into game-core values.
//!
//! Records mirror the on-disk shape. `validate` is the only way from a
//! record to a core value, so a malformed file never reaches the engine.

use std::collections::HashSet;

use game_core::{
    Ability, AbilityCatalogue, CombatArena, CombatConfig, Effect, Grid, Monster, Position, Stats,
    Tags,
};

use crate::error::ContentError;

/// Base stat block as written in monster files.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsRecord {
    pub hp: i32,
    pub ap: i32,
    pub mp: i32,
    pub atk: i32,
    pub res: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: i32,
}

impl StatsRecord {
    fn validate(&self, monster: &str) -> Result<Stats, ContentError> {
        let invalid = |field: &'static str, value: i32| ContentError::InvalidStat {
            monster: monster.to_string(),
            field,
            value,
        };

        if self.hp <= 0 {
            return Err(invalid("hp", self.hp));
        }
        for (field, value) in [
            ("ap", self.ap),
            ("mp", self.mp),
            ("atk", self.atk),
            ("res", self.res),
            ("armor", self.armor),
        ] {
            if value < 0 {
                return Err(invalid(field, value));
            }
        }

        Ok(Stats::new(self.hp, self.ap, self.mp, self.atk, self.res).with_armor(self.armor))
    }
}

/// One effect entry. Which optional fields are required depends on `kind`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectRecord {
    pub kind: String,
    pub amount: Option<i32>,
    pub distance: Option<u32>,
    pub duration: Option<u32>,
}

impl EffectRecord {
    fn validate(&self, ability: &str) -> Result<Effect, ContentError> {
        let missing = |field: &'static str| ContentError::MissingEffectField {
            ability: ability.to_string(),
            kind: self.kind.clone(),
            field,
        };

        match self.kind.as_str() {
            "damage" => Ok(Effect::damage(self.amount.ok_or_else(|| missing("amount"))?)),
            "charge" => Ok(Effect::charge(self.amount.ok_or_else(|| missing("amount"))?)),
            "push" => Ok(Effect::push(
                self.distance.ok_or_else(|| missing("distance"))?,
            )),
            "buff_ap" => Ok(Effect::buff_ap(
                self.amount.ok_or_else(|| missing("amount"))?,
                self.duration.ok_or_else(|| missing("duration"))?,
            )),
            other => Err(ContentError::UnknownEffect {
                ability: ability.to_string(),
                kind: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityRecord {
    pub id: String,
    pub name: String,
    pub weapon_type: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    pub cost_ap: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub range_min: u32,
    pub range_max: u32,
    pub effects: Vec<EffectRecord>,
}

impl AbilityRecord {
    pub fn validate(&self) -> Result<Ability, ContentError> {
        if self.cost_ap < 0 {
            return Err(ContentError::NegativeCost {
                ability: self.id.clone(),
                cost: self.cost_ap,
            });
        }
        if self.range_min > self.range_max {
            return Err(ContentError::InvertedRange {
                ability: self.id.clone(),
                min: self.range_min,
                max: self.range_max,
            });
        }

        let mut ability = Ability::new(&self.id, &self.name, &self.weapon_type)
            .with_tags(&self.tags)
            .with_cost(self.cost_ap)
            .with_range(self.range_min, self.range_max);
        for effect in &self.effects {
            ability = ability.with_effect(effect.validate(&self.id)?);
        }
        Ok(ability)
    }
}

/// Validates every record and registers them in file order.
///
/// Ids must be unique within one file.
pub fn build_catalogue(records: &[AbilityRecord]) -> Result<AbilityCatalogue, ContentError> {
    let mut seen = HashSet::new();
    let mut catalogue = AbilityCatalogue::new();
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(ContentError::DuplicateAbility {
                ability: record.id.clone(),
            });
        }
        catalogue.register(record.validate()?);
    }
    Ok(catalogue)
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterRecord {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    pub stats: StatsRecord,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<String>,
}

impl MonsterRecord {
    pub fn validate(&self) -> Result<MonsterTemplate, ContentError> {
        Ok(MonsterTemplate {
            id: self.id.clone(),
            name: self.name.clone(),
            tags: self.tags.iter().cloned().collect(),
            stats: self.stats.validate(&self.id)?,
            abilities: self.abilities.clone(),
        })
    }
}

/// Validated monster blueprint; spawn copies of it onto the overworld.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterTemplate {
    pub id: String,
    pub name: String,
    pub tags: Tags,
    pub stats: Stats,
    pub abilities: Vec<String>,
}

impl MonsterTemplate {
    pub fn spawn(&self, position: Position) -> Monster {
        Monster::new(&self.id, &self.name, self.stats.clone(), position)
            .with_tags(self.tags.iter())
    }

    /// Fails on the first ability id missing from `catalogue`.
    pub fn check_abilities(&self, catalogue: &AbilityCatalogue) -> Result<(), ContentError> {
        match self.abilities.iter().find(|id| catalogue.get(id).is_none()) {
            Some(id) => Err(ContentError::UnknownMonsterAbility {
                monster: self.id.clone(),
                ability: id.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapRecord {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocked: Vec<(i32, i32)>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub player_start: Option<(i32, i32)>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spawns: Vec<(i32, i32)>,
}

impl MapRecord {
    pub fn validate(&self) -> Result<OverworldMap, ContentError> {
        if self.width == 0 || self.height == 0 {
            return Err(ContentError::InvalidDimension {
                map: self.name.clone(),
                width: self.width,
                height: self.height,
            });
        }

        let mut grid = Grid::open(self.width, self.height);
        for &(x, y) in &self.blocked {
            let cell = Position::new(x, y);
            if !grid.in_bounds(cell) {
                return Err(ContentError::BlockedOutOfBounds {
                    map: self.name.clone(),
                    x,
                    y,
                });
            }
            grid.add_blocked([cell]);
        }

        let player_start = self
            .player_start
            .map_or(OverworldMap::DEFAULT_PLAYER_START, Position::from);
        self.ensure_walkable(&grid, player_start, "the player")?;

        if self.spawns.is_empty() {
            return Err(ContentError::EmptyMonsterList {
                map: self.name.clone(),
            });
        }
        let spawns = self.spawns.iter().copied().map(Position::from).collect::<Vec<_>>();
        for &spawn in &spawns {
            self.ensure_walkable(&grid, spawn, "a monster")?;
        }

        Ok(OverworldMap {
            name: self.name.clone(),
            grid,
            player_start,
            spawns,
        })
    }

    fn ensure_walkable(
        &self,
        grid: &Grid,
        position: Position,
        what: &'static str,
    ) -> Result<(), ContentError> {
        if grid.walkable(position) {
            Ok(())
        } else {
            Err(ContentError::UnwalkablePlacement {
                map: self.name.clone(),
                what,
                x: position.x,
                y: position.y,
            })
        }
    }
}

/// Validated overworld: terrain, player entry tile and monster spawn tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverworldMap {
    pub name: String,
    pub grid: Grid,
    pub player_start: Position,
    pub spawns: Vec<Position>,
}

impl OverworldMap {
    pub const DEFAULT_PLAYER_START: Position = Position::new(2, 2);
}

/// Checks combat tuning against the arena it describes.
///
/// Both start tiles must be distinct floor tiles inside the wall ring.
pub fn validate_config(config: &CombatConfig) -> Result<(), ContentError> {
    if config.arena_width < 3 || config.arena_height < 3 {
        return Err(ContentError::InvalidArena {
            width: config.arena_width,
            height: config.arena_height,
        });
    }

    let grid = CombatArena::from_config(config).create_combat_grid();
    for (what, start) in [
        ("the player", config.player_start),
        ("the monster", config.monster_start),
    ] {
        if !grid.walkable(start) {
            return Err(ContentError::UnwalkableArenaStart {
                what,
                x: start.x,
                y: start.y,
            });
        }
    }
    if config.player_start == config.monster_start {
        return Err(ContentError::OverlappingArenaStarts {
            x: config.player_start.x,
            y: config.player_start.y,
        });
    }

    let invalid =
        |field: &'static str, value: i64| ContentError::InvalidConfigValue { field, value };
    if config.monster_attack_cost <= 0 {
        return Err(invalid("monster_attack_cost", config.monster_attack_cost.into()));
    }
    if config.collision_damage < 0 {
        return Err(invalid("collision_damage", config.collision_damage.into()));
    }
    if config.ability_bar_size == 0 {
        return Err(invalid("ability_bar_size", 0));
    }
    Ok(())
}
