pub mod chase;
pub mod config;
pub mod encounter;
pub mod error;
pub mod mapgen;
pub mod pathfinding;
pub mod seed;
pub mod types;

pub use chase::{ChaseBrain, NavState, RouteKind};
pub use config::{ChaseConfig, ConfigError, DelveConfig, GeneratorConfig};
pub use encounter::{Encounter, Enemy, EnemyId};
pub use error::{Endpoint, NavError};
pub use mapgen::{Dungeon, FloorSet, MapGenerator, TileSink, WalkabilityGrid, WallSet};
pub use pathfinding::{Path, find_path};
pub use seed::SeedChoice;
pub use types::*;
