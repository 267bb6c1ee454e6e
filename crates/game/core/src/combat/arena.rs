use crate::config::CombatConfig;
use crate::grid::{Grid, Position};

/// Fixed walled box used for every encounter, independent of the overworld.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatArena {
    pub width: u32,
    pub height: u32,
    pub player_start: Position,
    pub monster_start: Position,
}

impl CombatArena {
    pub fn from_config(config: &CombatConfig) -> Self {
        Self {
            width: config.arena_width,
            height: config.arena_height,
            player_start: config.player_start,
            monster_start: config.monster_start,
        }
    }

    /// Builds the combat grid: the whole border ring is blocked.
    pub fn create_combat_grid(&self) -> Grid {
        let (width, height) = (self.width as i32, self.height as i32);
        let horizontal =
            (0..width).flat_map(|x| [Position::new(x, 0), Position::new(x, height - 1)]);
        let vertical =
            (0..height).flat_map(|y| [Position::new(0, y), Position::new(width - 1, y)]);
        Grid::new(self.width, self.height, horizontal.chain(vertical))
    }

    /// Start tiles for `count` monsters.
    ///
    /// The first monster takes `monster_start`; the rest fan out along the
    /// same column (above, below, two above, ...) skipping walls.
    pub fn monster_slots(&self, grid: &Grid, count: usize) -> Vec<Position> {
        (0..self.height as i32)
            .map(|k| if k % 2 == 1 { -(k + 1) / 2 } else { k / 2 })
            .map(|dy| self.monster_start.offset(0, dy))
            .filter(|&position| grid.walkable(position) && position != self.player_start)
            .take(count)
            .collect()
    }
}

impl Default for CombatArena {
    fn default() -> Self {
        Self::from_config(&CombatConfig::default())
    }
}
