//! Property tests for route search against a breadth-first reference.
//!
//! Run with: PROPTEST_CASES=10000 cargo test --release pathfinding_props

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;

use proptest::prelude::*;

use tile_conquest::campaign::{find_path, path_steps, City, Grid, Walkability};
use tile_conquest::core::{Coord, Owner, WalkabilityRules};

/// Grid with AI cities (impassable by default) on every `true` cell
fn blocked_grid(size: i32, blocked: &[bool]) -> Grid {
    let mut grid = Grid::new(size);
    for y in 0..size {
        for x in 0..size {
            if blocked[(y * size + x) as usize] {
                grid.set_tile(Coord::new(x, y), City::new("Wall", Owner::Ai).into())
                    .unwrap();
            }
        }
    }
    grid
}

/// Shortest step count over empty tiles, or None if cut off
fn bfs_steps(grid: &Grid, start: Coord, goal: Coord) -> Option<usize> {
    let size = grid.size();
    let mut dist = vec![usize::MAX; (size * size) as usize];
    let index = |c: Coord| (c.y * size + c.x) as usize;
    let mut queue = VecDeque::new();

    dist[index(start)] = 0;
    queue.push_back(start);
    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(dist[index(current)]);
        }
        for next in current.neighbors() {
            let Some(tile) = grid.get(next) else {
                continue;
            };
            if tile.city().is_some() || dist[index(next)] != usize::MAX {
                continue;
            }
            dist[index(next)] = dist[index(current)] + 1;
            queue.push_back(next);
        }
    }
    None
}

fn grid_strategy() -> impl Strategy<Value = (i32, Vec<bool>, Coord, Coord)> {
    (3i32..=12).prop_flat_map(|size| {
        let cells = (size * size) as usize;
        (
            Just(size),
            prop::collection::vec(prop::bool::weighted(0.3), cells),
            (0..size, 0..size).prop_map(|(x, y)| Coord::new(x, y)),
            (0..size, 0..size).prop_map(|(x, y)| Coord::new(x, y)),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A* finds a route exactly when BFS does, and of the same length
    #[test]
    fn prop_path_length_matches_bfs((size, mut blocked, start, goal) in grid_strategy()) {
        blocked[(start.y * size + start.x) as usize] = false;
        blocked[(goal.y * size + goal.x) as usize] = false;
        let grid = blocked_grid(size, &blocked);
        let walk = Walkability::new(WalkabilityRules::default());

        let path = find_path(&grid, start, goal, &walk);
        let expected = bfs_steps(&grid, start, goal);

        prop_assert_eq!(path.as_ref().map(|p| path_steps(p)), expected);
    }

    /// Every route runs start to goal over adjacent passable tiles
    #[test]
    fn prop_path_is_connected((size, mut blocked, start, goal) in grid_strategy()) {
        blocked[(start.y * size + start.x) as usize] = false;
        blocked[(goal.y * size + goal.x) as usize] = false;
        let grid = blocked_grid(size, &blocked);
        let walk = Walkability::new(WalkabilityRules::default());

        if let Some(path) = find_path(&grid, start, goal, &walk) {
            prop_assert_eq!(path.first(), Some(&start));
            prop_assert_eq!(path.last(), Some(&goal));
            for pair in path.windows(2) {
                prop_assert_eq!(pair[0].manhattan(&pair[1]), 1);
            }
            for step in &path[1..] {
                prop_assert!(grid.city_at(*step).is_none());
            }
        }
    }

    /// Route to self is the single start tile, whatever stands there
    #[test]
    fn prop_self_route((size, blocked, start, _goal) in grid_strategy()) {
        let grid = blocked_grid(size, &blocked);
        let walk = Walkability::new(WalkabilityRules::default());

        prop_assert_eq!(find_path(&grid, start, start, &walk), Some(vec![start]));
    }

    /// A goal ringed by impassable cities is never reached from outside
    #[test]
    fn prop_enclosed_goal_unreachable(gx in 1i32..9, gy in 1i32..9, sx in 0i32..10, sy in 0i32..10) {
        let goal = Coord::new(gx, gy);
        let start = Coord::new(sx, sy);
        prop_assume!(start != goal && start.manhattan(&goal) > 1);

        let mut grid = Grid::new(10);
        for wall in goal.neighbors() {
            grid.set_tile(wall, City::new("Wall", Owner::Ai).into()).unwrap();
        }
        prop_assume!(grid.city_at(start).is_none());
        let walk = Walkability::new(WalkabilityRules::default());

        prop_assert!(find_path(&grid, start, goal, &walk).is_none());
    }
}
