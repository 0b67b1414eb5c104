//! Bounded dense walkability window over the unbounded floor set.

use log::debug;

use crate::error::NavError;
use crate::types::Cell;

use super::model::FloorSet;

/// Row-major `width × height` walkability flags anchored at a world offset.
///
/// A local cell `l` is walkable iff the world cell `l + offset` was floor when
/// the grid was extracted. The grid is a snapshot: regenerating the dungeon
/// does not update it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkabilityGrid {
    width: usize,
    height: usize,
    offset: Cell,
    cells: Vec<bool>,
}

impl WalkabilityGrid {
    /// All-blocked grid.
    pub fn new(width: usize, height: usize, offset: Cell) -> Self {
        Self { width, height, offset, cells: vec![false; width * height] }
    }

    /// Builds a grid from text rows where `.` is walkable and anything else is
    /// blocked. Row `i` holds local `y = i`; rows shorter than the widest one
    /// are padded with blocked cells.
    pub fn from_rows(rows: &[&str], offset: Cell) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, rows.len(), offset);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                grid.set_walkable(Cell::new(x as i32, y as i32), ch == '.');
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn offset(&self) -> Cell {
        self.offset
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|&&walkable| walkable).count()
    }

    /// Local cell for `world`, or `None` when it falls outside the window.
    pub fn to_local(&self, world: Cell) -> Option<Cell> {
        world.checked_sub(self.offset).filter(|&local| self.contains_local(local))
    }

    /// `None` when the translated cell is past the `i32` range.
    pub fn to_world(&self, local: Cell) -> Option<Cell> {
        local.checked_add(self.offset)
    }

    pub fn contains_local(&self, local: Cell) -> bool {
        local.x >= 0
            && local.y >= 0
            && (local.x as usize) < self.width
            && (local.y as usize) < self.height
    }

    /// Out-of-window cells are never walkable.
    pub fn is_walkable(&self, local: Cell) -> bool {
        self.index(local).is_some_and(|index| self.cells[index])
    }

    pub fn is_walkable_world(&self, world: Cell) -> bool {
        self.to_local(world).is_some_and(|local| self.is_walkable(local))
    }

    /// Writes inside the window only.
    pub fn set_walkable(&mut self, local: Cell, walkable: bool) {
        if let Some(index) = self.index(local) {
            self.cells[index] = walkable;
        }
    }

    pub(crate) fn index(&self, local: Cell) -> Option<usize> {
        self.contains_local(local)
            .then(|| (local.y as usize) * self.width + (local.x as usize))
    }

    pub(crate) fn walkable_index(&self, local: Cell) -> Option<usize> {
        self.index(local).filter(|&index| self.cells[index])
    }
}

/// Anchors a `width × height` window at the floor set's minimum x and y and
/// marks every floor cell that falls inside it.
///
/// Floor cells beyond the window are dropped without error; size the window
/// to cover the area the caller cares about.
pub fn extract_walkability_grid(
    floor: &FloorSet,
    width: usize,
    height: usize,
) -> Result<WalkabilityGrid, NavError> {
    let min_x = floor.iter().map(|cell| cell.x).min().ok_or(NavError::EmptyFloorSet)?;
    let min_y = floor.iter().map(|cell| cell.y).min().ok_or(NavError::EmptyFloorSet)?;

    let mut grid = WalkabilityGrid::new(width, height, Cell::new(min_x, min_y));
    let mut dropped = 0_usize;
    for &cell in floor {
        match grid.to_local(cell) {
            Some(local) => grid.set_walkable(local, true),
            None => dropped += 1,
        }
    }

    debug!(
        "extracted {width}x{height} walkability grid at offset {}: {} kept, {dropped} dropped",
        grid.offset,
        floor.len() - dropped
    );
    Ok(grid)
}
