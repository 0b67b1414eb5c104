//! Public data models for a generated cave.

use std::collections::BTreeSet;

use rand_chacha::rand_core::Rng;
use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::error::NavError;
use crate::types::Cell;

use super::grid::{WalkabilityGrid, extract_walkability_grid};
use super::spawns::pick_spawn_cells;
use super::walls::derive_walls;

/// Every walkable world cell. Ordered so derived output is reproducible.
pub type FloorSet = BTreeSet<Cell>;

/// Cells painted as wall around the floor. Derived on demand, never stored.
pub type WallSet = BTreeSet<Cell>;

/// Serialize-only: a dungeon is built through [`Dungeon::new`], which keeps the
/// start cell on the floor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dungeon {
    start: Cell,
    wall_padding: i32,
    floor: FloorSet,
}

impl Dungeon {
    /// The start cell is always part of the floor.
    pub fn new(start: Cell, mut floor: FloorSet, wall_padding: i32) -> Self {
        floor.insert(start);
        Self { start, wall_padding, floor }
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn wall_padding(&self) -> i32 {
        self.wall_padding
    }

    pub fn floor(&self) -> &FloorSet {
        &self.floor
    }

    pub fn is_floor(&self, cell: Cell) -> bool {
        self.floor.contains(&cell)
    }

    pub fn walls(&self) -> WallSet {
        derive_walls(&self.floor, self.wall_padding)
    }

    /// Inclusive `(min, max)` corners of the floor's bounding box.
    pub fn bounds(&self) -> (Cell, Cell) {
        let mut min = self.start;
        let mut max = self.start;
        for cell in &self.floor {
            min = Cell::new(min.x.min(cell.x), min.y.min(cell.y));
            max = Cell::new(max.x.max(cell.x), max.y.max(cell.y));
        }
        (min, max)
    }

    pub fn walkability_grid(
        &self,
        width: usize,
        height: usize,
    ) -> Result<WalkabilityGrid, NavError> {
        extract_walkability_grid(&self.floor, width, height)
    }

    /// Grid just large enough to keep every floor cell.
    pub fn full_walkability_grid(&self) -> Result<WalkabilityGrid, NavError> {
        let (min, max) = self.bounds();
        let width = max.x.abs_diff(min.x) as usize + 1;
        let height = max.y.abs_diff(min.y) as usize + 1;
        self.walkability_grid(width, height)
    }

    pub fn pick_spawn_cells<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<Cell> {
        pick_spawn_cells(&self.floor, count, rng)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(16 + self.floor.len() * 8);
        bytes.extend(self.start.x.to_le_bytes());
        bytes.extend(self.start.y.to_le_bytes());
        bytes.extend(self.wall_padding.to_le_bytes());
        bytes.extend((self.floor.len() as u32).to_le_bytes());
        for cell in &self.floor {
            bytes.extend(cell.x.to_le_bytes());
            bytes.extend(cell.y.to_le_bytes());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
