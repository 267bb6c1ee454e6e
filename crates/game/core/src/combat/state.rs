//! Mutable root of a single encounter.

use crate::config::CombatConfig;
use crate::entity::{Monster, Player, Tags};
use crate::grid::{Grid, Position};
use crate::render::{Glyphs, render_grid};
use crate::stats::Stats;

use super::arena::CombatArena;

/// Whose actions are currently legal.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    PlayerTurn,
    MonsterTurn,
}

/// Per-turn action and movement points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResourcePool {
    pub ap: i32,
    pub mp: i32,
}

impl ResourcePool {
    pub fn from_stats(stats: &Stats) -> Self {
        Self {
            ap: stats.ap,
            mp: stats.mp,
        }
    }
}

/// A monster in the encounter together with its own resource pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Opponent {
    pub(crate) monster: Monster,
    pub(crate) pool: ResourcePool,
}

/// AP granted by a buff effect. The duration is recorded, never expired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApBuff {
    pub source: String,
    pub amount: i32,
    pub duration: u32,
    pub granted_on_turn: u32,
}

/// Emitted when a monster's HP reaches zero.
///
/// Carries the monster's base stats so the overworld can compute rewards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefeatReport {
    pub id: String,
    pub name: String,
    pub tags: Tags,
    pub stats: Stats,
    pub turn: u32,
}

impl DefeatReport {
    pub(crate) fn of(monster: &Monster, turn: u32) -> Self {
        Self {
            id: monster.id.clone(),
            name: monster.name.clone(),
            tags: monster.tags.clone(),
            stats: monster.stats.clone(),
            turn,
        }
    }
}

/// Everything one encounter owns: opponents, pools, phase, arena and grid.
///
/// The player is not owned here; the same [`Player`] used on the overworld
/// is lent to [`super::CombatEngine`] for each call.
#[derive(Clone, Debug)]
pub struct CombatState {
    pub(crate) opponents: Vec<Opponent>,
    pub(crate) current_turn: u32,
    pub(crate) player_ap: i32,
    pub(crate) player_mp: i32,
    pub(crate) phase: Phase,
    pub(crate) is_active: bool,
    pub(crate) can_move: bool,
    pub(crate) can_cast: bool,
    pub(crate) arena: CombatArena,
    pub(crate) grid: Grid,
    pub(crate) config: CombatConfig,
    pub(crate) return_position: Option<Position>,
    pub(crate) ap_buffs: Vec<ApBuff>,
    pub(crate) defeated: Vec<DefeatReport>,
}

impl CombatState {
    /// Creates an encounter against `monsters`. Call
    /// [`super::CombatEngine::start_combat`] before issuing any action.
    pub fn new(config: CombatConfig, monsters: Vec<Monster>) -> Self {
        let arena = CombatArena::from_config(&config);
        let grid = arena.create_combat_grid();
        let opponents = monsters
            .into_iter()
            .map(|monster| Opponent {
                pool: ResourcePool::from_stats(&monster.stats),
                monster,
            })
            .collect();

        Self {
            opponents,
            current_turn: 1,
            player_ap: 0,
            player_mp: 0,
            phase: Phase::PlayerTurn,
            is_active: true,
            can_move: true,
            can_cast: true,
            arena,
            grid,
            config,
            return_position: None,
            ap_buffs: Vec::new(),
            defeated: Vec::new(),
        }
    }

    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    /// Reset with `can_move` at every player turn. No built-in ability
    /// clears it; casts are gated by AP and range.
    pub fn can_cast(&self) -> bool {
        self.can_cast
    }

    pub fn player_ap(&self) -> i32 {
        self.player_ap
    }

    pub fn player_mp(&self) -> i32 {
        self.player_mp
    }

    /// AP of the first monster in the list.
    pub fn monster_ap(&self) -> Option<i32> {
        self.opponents.first().map(|opponent| opponent.pool.ap)
    }

    /// MP of the first monster in the list.
    pub fn monster_mp(&self) -> Option<i32> {
        self.opponents.first().map(|opponent| opponent.pool.mp)
    }

    /// Resource pool of the monster at `index` in list order.
    pub fn monster_pool(&self, index: usize) -> Option<ResourcePool> {
        self.opponents.get(index).map(|opponent| opponent.pool)
    }

    pub fn monsters(&self) -> impl Iterator<Item = &Monster> {
        self.opponents.iter().map(|opponent| &opponent.monster)
    }

    pub fn monster_count(&self) -> usize {
        self.opponents.len()
    }

    pub fn first_monster(&self) -> Option<&Monster> {
        self.monsters().next()
    }

    pub fn monster_at(&self, position: Position) -> Option<&Monster> {
        self.monsters().find(|monster| monster.position == position)
    }

    /// True once every monster has been removed.
    pub fn is_victory(&self) -> bool {
        self.opponents.is_empty()
    }

    pub fn arena(&self) -> &CombatArena {
        &self.arena
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Overworld tile the player stood on when the encounter started.
    pub fn return_position(&self) -> Option<Position> {
        self.return_position
    }

    pub fn ap_buffs(&self) -> &[ApBuff] {
        &self.ap_buffs
    }

    /// Every monster defeated so far, in defeat order.
    pub fn defeated(&self) -> &[DefeatReport] {
        &self.defeated
    }

    /// Character grid of the arena with the player and monsters drawn in.
    pub fn render(&self, player: &Player, glyphs: &Glyphs) -> Vec<Vec<char>> {
        let monsters: Vec<Position> = self.monsters().map(|monster| monster.position).collect();
        render_grid(&self.grid, player.position, &monsters, glyphs)
    }

    pub(crate) fn opponent_at(&self, position: Position) -> Option<usize> {
        self.opponents
            .iter()
            .position(|opponent| opponent.monster.position == position)
    }
}
