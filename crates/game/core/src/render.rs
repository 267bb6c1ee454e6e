//! Character-grid rendering for terminal front ends.

use crate::grid::{Grid, Position};

/// Glyph set used by [`render_grid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub player: char,
    pub monster: char,
    pub blocked: char,
    pub floor: char,
}

impl Glyphs {
    pub const ASCII: Self = Self {
        player: '@',
        monster: 'M',
        blocked: '#',
        floor: '.',
    };
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::ASCII
    }
}

/// Draws `grid` row by row. The player wins over monsters, monsters over
/// walls.
pub fn render_grid(
    grid: &Grid,
    player: Position,
    monsters: &[Position],
    glyphs: &Glyphs,
) -> Vec<Vec<char>> {
    (0..grid.height() as i32)
        .map(|y| {
            (0..grid.width() as i32)
                .map(|x| {
                    let tile = Position::new(x, y);
                    if tile == player {
                        glyphs.player
                    } else if monsters.contains(&tile) {
                        glyphs.monster
                    } else if grid.is_blocked(tile) {
                        glyphs.blocked
                    } else {
                        glyphs.floor
                    }
                })
                .collect()
        })
        .collect()
}

pub fn render_lines(rows: &[Vec<char>]) -> Vec<String> {
    rows.iter().map(|row| row.iter().collect()).collect()
}
