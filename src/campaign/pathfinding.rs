//! A* pathfinding over the campaign grid
//!
//! Uniform step cost with a Manhattan heuristic, so the first route popped
//! at the goal is a shortest one by tile count. Routes are computed once at
//! dispatch and never replanned.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashMap;

use crate::campaign::map::{Grid, Tile, TileKind};
use crate::core::config::WalkabilityRules;
use crate::core::types::Coord;

/// Transit and destination predicates for route search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Walkability {
    pub rules: WalkabilityRules,
}

impl Walkability {
    pub fn new(rules: WalkabilityRules) -> Self {
        Self { rules }
    }

    /// Can a route pass through this tile
    pub fn is_transit(&self, tile: &Tile) -> bool {
        match tile.kind() {
            TileKind::Neutral | TileKind::PlayerCity | TileKind::PlayerCapital => true,
            TileKind::AiCity => self.rules.ai_city_transit,
            TileKind::NeutralCity => self.rules.neutral_city_transit,
        }
    }

    /// Can a route end on this tile
    pub fn is_destination(&self, tile: &Tile) -> bool {
        self.is_transit(tile) || (self.rules.city_destination && tile.kind().is_city())
    }
}

/// Node in the A* open set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PathNode {
    coord: Coord,
    f_cost: u32,
    h_cost: u32,
    /// Insertion order, breaks remaining ties first-in-first-out
    seq: u64,
}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a shortest 4-connected route from `start` to `goal`
///
/// The returned path includes both endpoints. Returns `None` if either end
/// is off the grid, the goal is not an acceptable destination, or every
/// route is blocked. The start tile itself is never tested.
pub fn find_path(
    grid: &Grid,
    start: Coord,
    goal: Coord,
    walkability: &Walkability,
) -> Option<Vec<Coord>> {
    if !grid.in_bounds(start) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let goal_tile = grid.get(goal)?;
    if !walkability.is_destination(goal_tile) {
        return None;
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: AHashMap<Coord, Coord> = AHashMap::new();
    let mut g_scores: AHashMap<Coord, u32> = AHashMap::new();
    let mut seq = 0u64;

    g_scores.insert(start, 0);
    open_set.push(PathNode {
        coord: start,
        f_cost: start.manhattan(&goal),
        h_cost: start.manhattan(&goal),
        seq,
    });

    while let Some(current) = open_set.pop() {
        if current.coord == goal {
            return Some(reconstruct_path(&came_from, current.coord));
        }

        let current_g = g_scores.get(&current.coord).copied().unwrap_or(u32::MAX);

        // Stale entry superseded by a cheaper push
        if current.f_cost > current_g.saturating_add(current.h_cost) {
            continue;
        }

        for neighbor in current.coord.neighbors() {
            let Some(tile) = grid.get(neighbor) else {
                continue;
            };

            let passable = if neighbor == goal {
                walkability.is_destination(tile)
            } else {
                walkability.is_transit(tile)
            };
            if !passable {
                continue;
            }

            let tentative_g = current_g + 1;
            let neighbor_g = g_scores.get(&neighbor).copied().unwrap_or(u32::MAX);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.coord);
                g_scores.insert(neighbor, tentative_g);

                let h_cost = neighbor.manhattan(&goal);
                seq += 1;
                open_set.push(PathNode {
                    coord: neighbor,
                    f_cost: tentative_g + h_cost,
                    h_cost,
                    seq,
                });
            }
        }
    }

    None // No path found
}

/// Reconstruct path from came_from map
fn reconstruct_path(came_from: &AHashMap<Coord, Coord>, mut current: Coord) -> Vec<Coord> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Number of steps a route takes (tiles entered after the start)
pub fn path_steps(path: &[Coord]) -> usize {
    path.len().saturating_sub(1)
}
