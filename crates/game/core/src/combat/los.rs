//! Line of sight over grid terrain.

use crate::grid::{Grid, Position};

/// Integer line from `from` to `to`, both endpoints included (8-connected).
pub fn bresenham_line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);
    let mut points = Vec::with_capacity((dx - dy) as usize + 1);

    loop {
        points.push(Position::new(x, y));
        if x == to.x && y == to.y {
            return points;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Sight is blocked iff a blocked tile lies strictly between the endpoints.
///
/// Entities never block sight, only terrain.
pub fn has_line_of_sight(grid: &Grid, from: Position, to: Position) -> bool {
    let line = bresenham_line(from, to);
    let interior = line.len().saturating_sub(1);
    line.iter()
        .take(interior)
        .skip(1)
        .all(|position| !grid.is_blocked(*position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_includes_endpoints() {
        let line = bresenham_line(Position::new(0, 0), Position::new(3, 0));
        assert_eq!(
            line,
            [
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(3, 0),
            ]
        );
        assert_eq!(bresenham_line(Position::new(2, 2), Position::new(2, 2)), [Position::new(2, 2)]);
    }

    #[test]
    fn diagonal_line_is_eight_connected() {
        let line = bresenham_line(Position::new(0, 0), Position::new(3, 3));
        assert_eq!(line.len(), 4);
        assert_eq!(line[1], Position::new(1, 1));
    }

    #[test]
    fn interior_wall_blocks_sight() {
        let grid = Grid::new(10, 6, [Position::new(4, 3)]);
        assert!(!has_line_of_sight(&grid, Position::new(2, 3), Position::new(6, 3)));
        assert!(has_line_of_sight(&grid, Position::new(2, 2), Position::new(6, 2)));
    }

    #[test]
    fn blocked_endpoints_do_not_block() {
        let grid = Grid::new(10, 6, [Position::new(2, 3), Position::new(6, 3)]);
        assert!(has_line_of_sight(&grid, Position::new(2, 3), Position::new(6, 3)));
    }

    #[test]
    fn adjacent_tiles_always_see_each_other() {
        let grid = Grid::new(3, 3, [Position::new(0, 0), Position::new(1, 0)]);
        assert!(has_line_of_sight(&grid, Position::new(0, 0), Position::new(1, 0)));
    }
}
