//! Coordinate primitives shared by generation, grid extraction and search.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Integer tile coordinate.
///
/// The same type serves as an absolute world cell and, once a grid offset has
/// been subtracted, as a local index into a [`crate::WalkabilityGrid`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// One unit move. Saturates at the edge of the `i32` range, so a step
    /// off the end of the world leaves the coordinate where it was.
    pub fn step(self, direction: Direction) -> Self {
        let delta = direction.delta();
        Self::new(self.x.saturating_add(delta.x), self.y.saturating_add(delta.y))
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self::new(self.x.checked_add(rhs.x)?, self.y.checked_add(rhs.y)?))
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        Some(Self::new(self.x.checked_sub(rhs.x)?, self.y.checked_sub(rhs.y)?))
    }

    /// Orthogonal neighbours in [`DIRECTIONS`] order.
    pub fn neighbors(self) -> [Self; 4] {
        DIRECTIONS.map(|direction| self.step(direction))
    }

    pub fn manhattan(self, other: Self) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }
}

impl Add for Cell {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Cell {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unit moves on the 4-connected grid. `Up` is +y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Canonical visitation order for random walks and breadth-first search.
pub const DIRECTIONS: [Direction; 4] =
    [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

impl Direction {
    pub const fn delta(self) -> Cell {
        match self {
            Self::Up => Cell::new(0, 1),
            Self::Down => Cell::new(0, -1),
            Self::Left => Cell::new(-1, 0),
            Self::Right => Cell::new(1, 0),
        }
    }
}
