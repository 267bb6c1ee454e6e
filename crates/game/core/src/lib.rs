//! Deterministic combat rules for the dungeon tactics game.
//!
//! `game-core` owns the bounded arena grid, the stat model, the ability and
//! effect catalogue, and the turn-based combat state machine. Every operation
//! is a synchronous call that mutates combat state and appends readable
//! entries to an injected [`LogSink`]; front ends only read state back out.
//! All combat mutation flows through [`combat::CombatEngine`].
pub mod ability;
pub mod combat;
pub mod config;
pub mod entity;
pub mod error;
pub mod grid;
pub mod render;
pub mod stats;

pub use ability::{Ability, AbilityCatalogue, Effect, ability_bar, weapon_kits};
pub use combat::{
    CastOutcome, CastReport, CombatArena, CombatEngine, CombatError, CombatState, DefeatReport,
    IntentLog, LogSink, MonsterAction, MonsterContext, MonsterPolicy, Phase, ResourcePool,
    TiredOrStrike, TurnOutcome, check_combat_trigger, has_line_of_sight, preview_cast,
    resolve_ability_effects, resolve_damage,
};
pub use config::CombatConfig;
pub use entity::{Entity, Monster, Player, Tags};
pub use error::{ErrorSeverity, GameError};
pub use grid::{Grid, Position};
pub use render::{Glyphs, render_grid, render_lines};
pub use stats::{EquipmentBonus, Stats};
