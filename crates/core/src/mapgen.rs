//! Random-walk cave generation and the views derived from its floor set.

pub mod model;

mod generator;
mod grid;
mod paint;
mod spawns;
mod walk;
mod walls;

pub use generator::MapGenerator;
pub use grid::{WalkabilityGrid, extract_walkability_grid};
pub use model::{Dungeon, FloorSet, WallSet};
pub use paint::{TileSink, paint};
pub use spawns::pick_spawn_cells;
pub use walk::run_random_walk;
pub use walls::derive_walls;

use crate::config::GeneratorConfig;
use crate::seed::SeedChoice;

pub fn generate_dungeon(config: &GeneratorConfig, seed: u64) -> Dungeon {
    MapGenerator::new(config.clone()).generate(&mut SeedChoice::Fixed(seed).rng())
}
