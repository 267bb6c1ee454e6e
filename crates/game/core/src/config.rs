use crate::grid::Position;

/// Combat tuning constants and arena layout.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Arena width in tiles, including the wall ring.
    pub arena_width: u32,
    /// Arena height in tiles, including the wall ring.
    pub arena_height: u32,
    pub player_start: Position,
    pub monster_start: Position,
    /// AP a monster spends on one attack; below this it rests.
    pub monster_attack_cost: i32,
    /// Raw damage dealt when a pushed target hits an obstacle.
    pub collision_damage: i32,
    /// Number of weapon abilities reachable from the ability bar.
    pub ability_bar_size: usize,
}

impl CombatConfig {
    pub const DEFAULT_ARENA_WIDTH: u32 = 10;
    pub const DEFAULT_ARENA_HEIGHT: u32 = 6;
    pub const DEFAULT_PLAYER_START: Position = Position::new(1, 3);
    pub const DEFAULT_MONSTER_START: Position = Position::new(8, 3);
    pub const DEFAULT_MONSTER_ATTACK_COST: i32 = 3;
    pub const DEFAULT_COLLISION_DAMAGE: i32 = 10;
    pub const DEFAULT_ABILITY_BAR_SIZE: usize = 3;

    pub fn new() -> Self {
        Self {
            arena_width: Self::DEFAULT_ARENA_WIDTH,
            arena_height: Self::DEFAULT_ARENA_HEIGHT,
            player_start: Self::DEFAULT_PLAYER_START,
            monster_start: Self::DEFAULT_MONSTER_START,
            monster_attack_cost: Self::DEFAULT_MONSTER_ATTACK_COST,
            collision_damage: Self::DEFAULT_COLLISION_DAMAGE,
            ability_bar_size: Self::DEFAULT_ABILITY_BAR_SIZE,
        }
    }

    /// Builder: override both start tiles.
    pub fn with_starts(mut self, player_start: Position, monster_start: Position) -> Self {
        self.player_start = player_start;
        self.monster_start = monster_start;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
