//! Bounded tile space with a blocked-cell set.
//!
//! The same [`Grid`] type backs the overworld map and the walled combat
//! arena. A tile is walkable iff it lies inside `[0, width) × [0, height)`
//! and is not in the blocked set.

use std::collections::BTreeSet;
use std::fmt;

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Sum of absolute coordinate differences.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True for the four orthogonal neighbours only.
    pub fn is_adjacent(self, other: Self) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Unit step (each axis in `-1..=1`) pointing from `self` toward `other`.
    ///
    /// Returns `(0, 0)` when both positions coincide.
    pub fn step_toward(self, other: Self) -> (i32, i32) {
        ((other.x - self.x).signum(), (other.y - self.y).signum())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangular tile map with impassable cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    blocked: BTreeSet<Position>,
}

impl Grid {
    pub fn new(width: u32, height: u32, blocked: impl IntoIterator<Item = Position>) -> Self {
        Self {
            width,
            height,
            blocked: blocked.into_iter().collect(),
        }
    }

    /// Grid without any blocked tiles.
    pub fn open(width: u32, height: u32) -> Self {
        Self::new(width, height, [])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn blocked(&self) -> &BTreeSet<Position> {
        &self.blocked
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    pub fn is_blocked(&self, position: Position) -> bool {
        self.blocked.contains(&position)
    }

    pub fn walkable(&self, position: Position) -> bool {
        self.in_bounds(position) && !self.is_blocked(position)
    }

    /// Marks additional tiles as blocked. Only used while building a map.
    pub fn add_blocked(&mut self, positions: impl IntoIterator<Item = Position>) {
        self.blocked.extend(positions);
    }

    /// Iterates every in-bounds position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }
}
