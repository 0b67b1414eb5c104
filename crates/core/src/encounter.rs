//! Fixed-step simulation of enemies chasing a single target over a dungeon.
//! Movement is plain kinematics: each enemy moves by whatever its brain steers.

use glam::Vec2;
use log::debug;
use rand_chacha::rand_core::Rng;
use slotmap::{SlotMap, new_key_type};

use crate::chase::{ChaseBrain, NavState, tile_center};
use crate::config::ChaseConfig;
use crate::error::NavError;
use crate::mapgen::{Dungeon, WalkabilityGrid};

new_key_type! {
    pub struct EnemyId;
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: EnemyId,
    pub position: Vec2,
    pub brain: ChaseBrain,
}

pub struct Encounter {
    grid: WalkabilityGrid,
    target: Vec2,
    enemies: SlotMap<EnemyId, Enemy>,
    steps: u64,
}

impl Encounter {
    /// Extracts the chase window from `dungeon` once; the grid stays fixed
    /// for the encounter's lifetime. The target starts on the dungeon start.
    pub fn new(dungeon: &Dungeon, chase: &ChaseConfig) -> Result<Self, NavError> {
        let grid = dungeon.walkability_grid(chase.map_width, chase.map_height)?;
        Ok(Self::with_grid(grid, tile_center(dungeon.start())))
    }

    pub fn with_grid(grid: WalkabilityGrid, target: Vec2) -> Self {
        Self { grid, target, enemies: SlotMap::with_key(), steps: 0 }
    }

    pub fn grid(&self) -> &WalkabilityGrid {
        &self.grid
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn spawn_at(&mut self, position: Vec2, chase: ChaseConfig) -> EnemyId {
        self.enemies.insert_with_key(|id| Enemy { id, position, brain: ChaseBrain::new(chase) })
    }

    /// Places `count` enemies on the centres of random floor tiles.
    pub fn spawn_enemies<R: Rng>(
        &mut self,
        dungeon: &Dungeon,
        count: usize,
        chase: &ChaseConfig,
        rng: &mut R,
    ) -> Vec<EnemyId> {
        let ids: Vec<EnemyId> = dungeon
            .pick_spawn_cells(count, rng)
            .into_iter()
            .map(|cell| self.spawn_at(tile_center(cell), chase.clone()))
            .collect();
        debug!("spawned {} enemies", ids.len());
        ids
    }

    pub fn despawn(&mut self, id: EnemyId) -> Option<Enemy> {
        self.enemies.remove(id)
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(id)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.values()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn chasing_count(&self) -> usize {
        self.enemies.values().filter(|enemy| enemy.brain.state() == NavState::Chase).count()
    }

    /// One fixed step: every brain observes the target, then moves.
    pub fn step(&mut self, dt: f32) {
        let grid = &self.grid;
        for enemy in self.enemies.values_mut() {
            enemy.brain.update(dt, enemy.position, self.target, Some(grid));
            enemy.position += enemy.brain.steer(enemy.position, dt);
        }
        self.steps += 1;
    }
}
