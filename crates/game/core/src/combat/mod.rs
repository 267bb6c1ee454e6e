//! Combat resolution: arena, line of sight, effect resolver, state machine.
//!
//! Dependency order inside this module mirrors the rules: the arena builds a
//! grid, line of sight reads it, the resolver applies ability effects, and
//! the engine sequences phases on top of all of them.

mod ai;
mod arena;
mod engine;
mod errors;
mod log;
mod los;
mod resolver;
mod state;
mod validation;

pub use ai::{MonsterAction, MonsterContext, MonsterPolicy, TiredOrStrike};
pub use arena::CombatArena;
pub use engine::{CastOutcome, CastReport, CombatEngine, TurnOutcome, check_combat_trigger};
pub use errors::CombatError;
pub use log::{IntentLog, LogSink};
pub use los::{bresenham_line, has_line_of_sight};
pub use resolver::{mitigate, resolve_ability_effects, resolve_damage};
pub use state::{ApBuff, CombatState, DefeatReport, Phase, ResourcePool};
pub use validation::preview_cast;
