//! Spawn-cell selection for entities placed on the floor.

use rand_chacha::rand_core::Rng;

use crate::types::Cell;

use super::model::FloorSet;

/// Picks `count` floor cells uniformly at random, with replacement. Two
/// entities may share a cell. An empty floor yields no cells.
pub fn pick_spawn_cells<R: Rng>(floor: &FloorSet, count: usize, rng: &mut R) -> Vec<Cell> {
    let candidates: Vec<Cell> = floor.iter().copied().collect();
    if candidates.is_empty() {
        return Vec::new();
    }
    (0..count).map(|_| candidates[rng.next_u64() as usize % candidates.len()]).collect()
}
