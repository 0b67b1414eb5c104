//! Wall border derivation around a floor set.

use crate::types::Cell;

use super::model::{FloorSet, WallSet};

/// Marks a `(2 * padding + 1)` square around every empty orthogonal neighbour
/// of the floor as wall, skipping floor cells. The result is a plain union, so
/// iteration order never changes it. Negative padding behaves like zero.
pub fn derive_walls(floor: &FloorSet, padding: i32) -> WallSet {
    let padding = padding.max(0);
    let mut walls = WallSet::new();

    for &cell in floor {
        for neighbor in cell.neighbors() {
            if floor.contains(&neighbor) {
                continue;
            }
            for dx in -padding..=padding {
                for dy in -padding..=padding {
                    let candidate =
                        Cell::new(neighbor.x.saturating_add(dx), neighbor.y.saturating_add(dy));
                    if !floor.contains(&candidate) {
                        walls.insert(candidate);
                    }
                }
            }
        }
    }

    walls
}
