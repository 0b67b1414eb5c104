//! Multi-walker random walk that grows the floor set.

use rand_chacha::rand_core::Rng;

use crate::types::{Cell, DIRECTIONS, Direction};

use super::model::FloorSet;

/// Runs `walker_count + 1` walkers from `start`, each taking
/// `min(steps_per_walker, max_steps_per_walker)` uniformly random orthogonal
/// steps, and returns every visited cell. The start cell is always included.
///
/// The extra walker is long-standing behaviour: a count of zero still carves
/// one walk. Walkers that reach the edge of the `i32` range stay on it for
/// moves that would leave it.
pub fn run_random_walk<R: Rng>(
    start: Cell,
    walker_count: usize,
    steps_per_walker: usize,
    max_steps_per_walker: usize,
    rng: &mut R,
) -> FloorSet {
    let steps = steps_per_walker.min(max_steps_per_walker);
    let mut floor = FloorSet::new();
    floor.insert(start);

    for _ in 0..=walker_count {
        let mut current = start;
        for _ in 0..steps {
            current = current.step(random_direction(rng));
            floor.insert(current);
        }
    }

    floor
}

pub(super) fn random_direction<R: Rng>(rng: &mut R) -> Direction {
    DIRECTIONS[(rng.next_u32() % 4) as usize]
}
