//! Tunables for generation and enemy navigation, loadable from TOML.
//!
//! Every field has a default, so a config file only needs to name the values
//! it changes:
//!
//! ```toml
//! [generator]
//! walk_length = 400
//! start = { x = 0, y = 0 }
//!
//! [chase]
//! detection_radius = 8.0
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Cell;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DelveConfig {
    pub generator: GeneratorConfig,
    pub chase: ChaseConfig,
}

impl DelveConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }
}

/// Random-walk settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub start: Cell,
    /// Requested steps per walker.
    pub walk_length: usize,
    /// Additional walkers on top of the first one.
    pub walker_count: usize,
    /// Hard cap applied to `walk_length`.
    pub max_steps_per_walker: usize,
    /// Wall thickness painted around the floor.
    pub wall_padding: i32,
    pub enemy_count: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start: Cell::ZERO,
            walk_length: 200,
            walker_count: 1,
            max_steps_per_walker: 200,
            wall_padding: 1,
            enemy_count: 3,
        }
    }
}

impl GeneratorConfig {
    pub fn effective_steps(&self) -> usize {
        self.walk_length.min(self.max_steps_per_walker)
    }
}

/// Detection and movement settings for chasing enemies. Distances are in
/// tiles, times in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChaseConfig {
    pub speed: f32,
    pub detection_radius: f32,
    /// How long a chase continues after the target leaves detection range.
    pub lose_sight_time: f32,
    /// Walkability window extracted for pathfinding.
    pub map_width: usize,
    pub map_height: usize,
    /// Distance at which a waypoint counts as reached.
    pub waypoint_tolerance: f32,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            detection_radius: 6.0,
            lose_sight_time: 3.0,
            map_width: 100,
            map_height: 100,
            waypoint_tolerance: 0.1,
        }
    }
}
