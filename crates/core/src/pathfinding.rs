//! Unweighted shortest-path search over a walkability grid.
//! Search runs on local grid cells; callers speak world cells on both ends.
//! It does not own chase policy or fallback movement.

use std::collections::{BTreeSet, VecDeque};

use log::trace;

use crate::error::{Endpoint, NavError};
use crate::mapgen::WalkabilityGrid;
use crate::types::Cell;

/// World cells from the start (exclusive) to the target (inclusive).
pub type Path = Vec<Cell>;

/// Breadth-first search from `start_world` to `target_world`.
///
/// Neighbours are expanded in up, down, left, right order and the first
/// discovery of a cell wins, so the result is a fewest-steps path with ties
/// broken by frontier order. Asking for the start cell itself yields an empty
/// path.
pub fn find_path(
    grid: Option<&WalkabilityGrid>,
    start_world: Cell,
    target_world: Cell,
) -> Result<Path, NavError> {
    let grid = grid.ok_or(NavError::NoMapAvailable)?;
    let start = grid
        .to_local(start_world)
        .ok_or(NavError::OutOfBounds { endpoint: Endpoint::Start, cell: start_world })?;
    let target = grid
        .to_local(target_world)
        .ok_or(NavError::OutOfBounds { endpoint: Endpoint::Target, cell: target_world })?;

    for (endpoint, local, world) in
        [(Endpoint::Start, start, start_world), (Endpoint::Target, target, target_world)]
    {
        if !grid.is_walkable(local) {
            return Err(NavError::Unwalkable { endpoint, cell: world });
        }
    }

    let came_from = breadth_first(grid, start, Some(target));
    let path = reconstruct_path(grid, &came_from, start, target)
        .ok_or(NavError::NoPathFound { start: start_world, target: target_world })?;

    trace!("path {start_world} -> {target_world}: {} steps", path.len());
    Ok(path)
}

/// Every world cell reachable from `start_world`, including itself. Empty when
/// the start is outside the grid or blocked.
pub fn reachable_cells(grid: &WalkabilityGrid, start_world: Cell) -> BTreeSet<Cell> {
    let Some(start) = grid.to_local(start_world).filter(|&local| grid.is_walkable(local)) else {
        return BTreeSet::new();
    };
    let came_from = breadth_first(grid, start, None);
    (0..grid.height())
        .flat_map(|y| (0..grid.width()).map(move |x| Cell::new(x as i32, y as i32)))
        .filter(|&local| grid.index(local).is_some_and(|index| came_from[index].is_some()))
        .filter_map(|local| grid.to_world(local))
        .collect()
}

impl WalkabilityGrid {
    pub fn find_path(&self, start_world: Cell, target_world: Cell) -> Result<Path, NavError> {
        find_path(Some(self), start_world, target_world)
    }
}

/// Came-from links indexed like the grid. A visited cell maps to its
/// predecessor; the start maps to itself. Expansion stops once `stop_at` is
/// dequeued.
fn breadth_first(
    grid: &WalkabilityGrid,
    start: Cell,
    stop_at: Option<Cell>,
) -> Vec<Option<Cell>> {
    let mut came_from = vec![None; grid.cell_count()];
    let mut queue = VecDeque::new();

    if let Some(index) = grid.walkable_index(start) {
        came_from[index] = Some(start);
        queue.push_back(start);
    }

    while let Some(current) = queue.pop_front() {
        if Some(current) == stop_at {
            break;
        }
        for neighbor in current.neighbors() {
            let Some(index) = grid.walkable_index(neighbor) else {
                continue;
            };
            if came_from[index].is_some() {
                continue;
            }
            came_from[index] = Some(current);
            queue.push_back(neighbor);
        }
    }

    came_from
}

fn reconstruct_path(
    grid: &WalkabilityGrid,
    came_from: &[Option<Cell>],
    start: Cell,
    target: Cell,
) -> Option<Path> {
    let mut path = Vec::new();
    let mut step = target;
    while step != start {
        path.push(grid.to_world(step)?);
        step = came_from[grid.index(step)?]?;
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn open_grid(width: usize, height: usize) -> WalkabilityGrid {
        let row = ".".repeat(width);
        let rows: Vec<&str> = (0..height).map(|_| row.as_str()).collect();
        WalkabilityGrid::from_rows(&rows, Cell::ZERO)
    }

    fn assert_valid_route(grid: &WalkabilityGrid, start: Cell, path: &[Cell]) {
        let mut previous = start;
        for &cell in path {
            assert_eq!(previous.manhattan(cell), 1, "{previous} -> {cell} is not a single step");
            assert!(grid.is_walkable_world(cell), "{cell} is not walkable");
            previous = cell;
        }
    }

    /// Layer-by-layer BFS distance, independent of the came-from bookkeeping.
    fn reference_distance(grid: &WalkabilityGrid, start: Cell, target: Cell) -> Option<usize> {
        let mut seen = BTreeSet::from([start]);
        let mut layer = vec![start];
        let mut distance = 0;
        while !layer.is_empty() {
            if layer.contains(&target) {
                return Some(distance);
            }
            let mut next = Vec::new();
            for cell in layer {
                for neighbor in cell.neighbors() {
                    if grid.is_walkable_world(neighbor) && seen.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            layer = next;
            distance += 1;
        }
        None
    }

    #[test]
    fn routes_around_a_blocked_center() {
        let grid = WalkabilityGrid::from_rows(&["...", ".#.", "..."], Cell::ZERO);
        let path = grid.find_path(Cell::new(0, 0), Cell::new(2, 2)).expect("path exists");

        assert_eq!(path.len(), 4);
        assert_eq!(path, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 2), Cell::new(2, 2)]);
    }

    #[test]
    fn two_by_two_tie_breaks_upward_first() {
        let grid = open_grid(2, 2);
        let path = grid.find_path(Cell::new(0, 0), Cell::new(1, 1)).expect("path exists");
        assert_eq!(path, vec![Cell::new(0, 1), Cell::new(1, 1)]);
    }

    #[test]
    fn same_start_and_target_is_an_empty_path() {
        let grid = open_grid(3, 3);
        assert_eq!(grid.find_path(Cell::new(1, 1), Cell::new(1, 1)), Ok(vec![]));
    }

    #[test]
    fn open_rectangle_path_has_manhattan_length() {
        for (width, height) in [(1, 1), (1, 7), (5, 1), (4, 9), (12, 12)] {
            let grid = open_grid(width, height);
            let target = Cell::new(width as i32 - 1, height as i32 - 1);
            let path = grid.find_path(Cell::ZERO, target).expect("open grid is connected");

            assert_eq!(path.len(), (width - 1) + (height - 1));
            assert_valid_route(&grid, Cell::ZERO, &path);
        }
    }

    #[test]
    fn missing_grid_reports_no_map() {
        assert_eq!(find_path(None, Cell::ZERO, Cell::new(1, 0)), Err(NavError::NoMapAvailable));
    }

    #[test]
    fn endpoints_outside_the_window_are_rejected() {
        let grid = open_grid(3, 3);
        assert_eq!(
            grid.find_path(Cell::new(-1, 0), Cell::new(1, 1)),
            Err(NavError::OutOfBounds { endpoint: Endpoint::Start, cell: Cell::new(-1, 0) })
        );
        assert_eq!(
            grid.find_path(Cell::new(0, 0), Cell::new(1, 3)),
            Err(NavError::OutOfBounds { endpoint: Endpoint::Target, cell: Cell::new(1, 3) })
        );
    }

    #[test]
    fn endpoints_at_the_edge_of_the_world_are_out_of_bounds() {
        let grid = WalkabilityGrid::from_rows(&["..."], Cell::new(-10, 0));
        assert_eq!(
            grid.find_path(Cell::new(-10, 0), Cell::new(i32::MAX, 0)),
            Err(NavError::OutOfBounds { endpoint: Endpoint::Target, cell: Cell::new(i32::MAX, 0) })
        );
        assert_eq!(
            grid.find_path(Cell::new(i32::MIN, i32::MAX), Cell::new(-8, 0)),
            Err(NavError::OutOfBounds {
                endpoint: Endpoint::Start,
                cell: Cell::new(i32::MIN, i32::MAX),
            })
        );
        assert!(reachable_cells(&grid, Cell::new(i32::MAX, 0)).is_empty());
    }

    #[test]
    fn bounds_are_checked_before_walkability() {
        let grid = WalkabilityGrid::from_rows(&["#.."], Cell::ZERO);
        assert_eq!(
            grid.find_path(Cell::new(0, 0), Cell::new(9, 0)),
            Err(NavError::OutOfBounds { endpoint: Endpoint::Target, cell: Cell::new(9, 0) })
        );
    }

    #[test]
    fn blocked_endpoints_are_rejected() {
        let grid = WalkabilityGrid::from_rows(&["#..", "..#"], Cell::ZERO);
        assert_eq!(
            grid.find_path(Cell::new(0, 0), Cell::new(1, 0)),
            Err(NavError::Unwalkable { endpoint: Endpoint::Start, cell: Cell::new(0, 0) })
        );
        assert_eq!(
            grid.find_path(Cell::new(1, 0), Cell::new(2, 1)),
            Err(NavError::Unwalkable { endpoint: Endpoint::Target, cell: Cell::new(2, 1) })
        );
    }

    #[test]
    fn disconnected_regions_have_no_path() {
        let grid = WalkabilityGrid::from_rows(&["..#..", "..#..", "..#.."], Cell::ZERO);
        assert_eq!(
            grid.find_path(Cell::new(0, 1), Cell::new(4, 1)),
            Err(NavError::NoPathFound { start: Cell::new(0, 1), target: Cell::new(4, 1) })
        );
    }

    #[test]
    fn world_coordinates_are_translated_through_the_offset() {
        let offset = Cell::new(-20, 35);
        let grid = WalkabilityGrid::from_rows(&["....", "##.#", "...."], offset);
        let start = Cell::new(-20, 35);
        let target = Cell::new(-20, 37);

        let path = grid.find_path(start, target).expect("path through the gap");
        assert_eq!(path.len(), 6);
        assert_eq!(path.last(), Some(&target));
        assert!(path.contains(&Cell::new(-18, 36)), "route must use the only gap");
        assert_valid_route(&grid, start, &path);
    }

    #[test]
    fn reachable_cells_stop_at_walls() {
        let grid = WalkabilityGrid::from_rows(&["..#.", "..#."], Cell::new(5, 5));
        let reachable = reachable_cells(&grid, Cell::new(5, 5));
        assert_eq!(
            reachable,
            BTreeSet::from([Cell::new(5, 5), Cell::new(6, 5), Cell::new(5, 6), Cell::new(6, 6)])
        );
        assert!(reachable_cells(&grid, Cell::new(7, 5)).is_empty());
    }

    fn grid_strategy() -> impl Strategy<Value = WalkabilityGrid> {
        (1_usize..8, 1_usize..8).prop_flat_map(|(width, height)| {
            proptest::collection::vec(prop::bool::weighted(0.7), width * height).prop_map(
                move |flags| {
                    let mut grid = WalkabilityGrid::new(width, height, Cell::new(-3, 4));
                    for (index, walkable) in flags.into_iter().enumerate() {
                        let local = Cell::new((index % width) as i32, (index / width) as i32);
                        grid.set_walkable(local, walkable);
                    }
                    grid
                },
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]
        #[test]
        fn path_length_matches_reference_distance(
            grid in grid_strategy(),
            start_index in any::<prop::sample::Index>(),
            target_index in any::<prop::sample::Index>(),
        ) {
            let cells = grid.cell_count();
            let width = grid.width();
            let local = |index: usize| Cell::new((index % width) as i32, (index / width) as i32);
            let start = grid.to_world(local(start_index.index(cells))).expect("small offset");
            let target = grid.to_world(local(target_index.index(cells))).expect("small offset");
            prop_assume!(grid.is_walkable_world(start) && grid.is_walkable_world(target));

            match (grid.find_path(start, target), reference_distance(&grid, start, target)) {
                (Ok(path), Some(distance)) => {
                    prop_assert_eq!(path.len(), distance);
                    assert_valid_route(&grid, start, &path);
                }
                (Err(NavError::NoPathFound { .. }), None) => {}
                (outcome, distance) => {
                    prop_assert!(
                        false,
                        "search returned {outcome:?} but reference distance is {distance:?}"
                    );
                }
            }
        }
    }
}
