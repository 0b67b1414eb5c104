//! Patrol/chase navigation for a single enemy.
//!
//! The brain is advanced once per fixed step. While the target is within the
//! detection radius it re-queries the pathfinder every step and follows the
//! resulting route; when no route exists it heads straight for the target.
//! After losing the target it keeps the last route for `lose_sight_time`
//! seconds and then falls back to patrol.

use glam::Vec2;
use log::trace;

use crate::config::ChaseConfig;
use crate::error::NavError;
use crate::mapgen::WalkabilityGrid;
use crate::pathfinding::find_path;
use crate::types::Cell;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NavState {
    Idle,
    #[default]
    Patrol,
    Chase,
}

/// Where the current route came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteKind {
    /// Tile centres of a pathfinder result.
    Path,
    /// Single waypoint on the target, used when the pathfinder had nothing.
    Direct(Option<NavError>),
}

/// Tile containing a world position. Tile `c` spans `[c, c + 1)` on each axis.
pub fn world_cell(position: Vec2) -> Cell {
    let floored = position.floor();
    Cell::new(floored.x as i32, floored.y as i32)
}

pub fn tile_center(cell: Cell) -> Vec2 {
    Vec2::new(cell.x as f32 + 0.5, cell.y as f32 + 0.5)
}

#[derive(Clone, Debug)]
pub struct ChaseBrain {
    config: ChaseConfig,
    state: NavState,
    lose_sight_timer: f32,
    route: Vec<Vec2>,
    route_index: usize,
    route_kind: Option<RouteKind>,
}

impl ChaseBrain {
    pub fn new(config: ChaseConfig) -> Self {
        Self::with_state(config, NavState::Patrol)
    }

    pub fn with_state(config: ChaseConfig, state: NavState) -> Self {
        Self {
            config,
            state,
            lose_sight_timer: 0.0,
            route: Vec::new(),
            route_index: 0,
            route_kind: None,
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn config(&self) -> &ChaseConfig {
        &self.config
    }

    /// Seconds of chase left after the target was last seen.
    pub fn lose_sight_timer(&self) -> f32 {
        self.lose_sight_timer
    }

    pub fn route(&self) -> &[Vec2] {
        &self.route
    }

    pub fn route_kind(&self) -> Option<RouteKind> {
        self.route_kind
    }

    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.route.get(self.route_index).copied()
    }

    /// Advances detection and timers by one fixed step of `dt` seconds.
    pub fn update(
        &mut self,
        dt: f32,
        position: Vec2,
        target: Vec2,
        grid: Option<&WalkabilityGrid>,
    ) -> NavState {
        if position.distance(target) <= self.config.detection_radius {
            if self.state != NavState::Chase {
                trace!("{:?} -> Chase at {position}", self.state);
            }
            self.state = NavState::Chase;
            self.lose_sight_timer = self.config.lose_sight_time;
            self.replan(position, target, grid);
        } else if self.state == NavState::Chase {
            self.lose_sight_timer -= dt;
            if self.lose_sight_timer <= 0.0 {
                trace!("Chase -> Patrol at {position}, target lost");
                self.state = NavState::Patrol;
                self.lose_sight_timer = 0.0;
                self.clear_route();
            }
        }
        self.state
    }

    /// Displacement for this step toward the current waypoint, at most
    /// `speed * dt` long and never past the waypoint. Reaching a waypoint
    /// selects the next one; the last waypoint is held.
    pub fn steer(&mut self, position: Vec2, dt: f32) -> Vec2 {
        let Some(waypoint) = self.current_waypoint() else {
            return Vec2::ZERO;
        };
        let offset = waypoint - position;
        if offset.length() < self.config.waypoint_tolerance {
            if self.route_index + 1 < self.route.len() {
                self.route_index += 1;
            }
            return Vec2::ZERO;
        }
        (offset.normalize_or_zero() * self.config.speed * dt).clamp_length_max(offset.length())
    }

    fn replan(&mut self, position: Vec2, target: Vec2, grid: Option<&WalkabilityGrid>) {
        match find_path(grid, world_cell(position), world_cell(target)) {
            Ok(path) if !path.is_empty() => {
                self.route = path.into_iter().map(tile_center).collect();
                self.route_kind = Some(RouteKind::Path);
            }
            outcome => {
                let reason = outcome.err();
                trace!("direct approach to {target}: {reason:?}");
                self.route = vec![target];
                self.route_kind = Some(RouteKind::Direct(reason));
            }
        }
        self.route_index = 0;
    }

    fn clear_route(&mut self) {
        self.route.clear();
        self.route_index = 0;
        self.route_kind = None;
    }
}
