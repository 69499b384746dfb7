//! A* pathfinding on the cost grid.
//!
//! Only plain-floor tiles (cost exactly `1`) are admitted to the frontier, so
//! enemies keep to "safe corridors" even though higher costs are walkable
//! elsewhere. The heuristic is Manhattan distance over an 8-connected grid.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::env::{CostMap, TileCoord, cost};
use crate::error::{ErrorSeverity, GameError};

/// Expansion order: orthogonal first, then diagonal. No corner-cutting check.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Why a route could not be produced.
///
/// Both variants are recoverable: callers stay put and retry on a later
/// re-route window. Lack of a path also signals "target is in another room".
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("no path from {start} to {goal}")]
    NoPathFound { start: TileCoord, goal: TileCoord },

    #[error("tile {tile} is outside the grid")]
    OutOfBounds { tile: TileCoord },
}

impl GameError for PathError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoPathFound { .. } => "PATH_NOT_FOUND",
            Self::OutOfBounds { .. } => "PATH_OUT_OF_BOUNDS",
        }
    }
}

/// Frontier entry. Ordered as a min-heap on `priority`; among equal
/// priorities the earliest inserted entry pops first.
#[derive(Debug, PartialEq, Eq)]
struct Frontier {
    priority: u32,
    seq: u64,
    tile: TileCoord,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Computes a tile route from `start` to `goal`, both inclusive.
///
/// `g(n) = g(current) + cost(n)`; a neighbor is (re)queued when unseen or
/// reached more cheaply. Search stops when `goal` is popped or the frontier
/// is exhausted.
///
/// # Errors
///
/// - [`PathError::OutOfBounds`] if either endpoint is off the grid
/// - [`PathError::NoPathFound`] if `goal` was never reached
pub fn find_route<M>(start: TileCoord, goal: TileCoord, map: &M) -> Result<Vec<TileCoord>, PathError>
where
    M: CostMap + ?Sized,
{
    for tile in [start, goal] {
        if !map.contains(tile) {
            return Err(PathError::OutOfBounds { tile });
        }
    }

    let mut frontier = BinaryHeap::new();
    let mut came_from: HashMap<TileCoord, TileCoord> = HashMap::new();
    let mut cost_so_far: HashMap<TileCoord, u32> = HashMap::new();
    let mut seq = 0u64;

    frontier.push(Frontier {
        priority: 0,
        seq,
        tile: start,
    });
    cost_so_far.insert(start, 0);

    while let Some(Frontier { tile: current, .. }) = frontier.pop() {
        if current == goal {
            break;
        }

        let current_cost = cost_so_far.get(&current).copied().unwrap_or_default();
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let next = current.offset(dx, dy);
            if !map.contains(next) {
                continue;
            }
            let step = map.cost_at(next);
            if step != cost::PLAIN_FLOOR {
                continue;
            }

            let new_cost = current_cost + step;
            let improved = cost_so_far.get(&next).is_none_or(|&known| new_cost < known);
            if improved {
                cost_so_far.insert(next, new_cost);
                came_from.insert(next, current);
                seq += 1;
                frontier.push(Frontier {
                    priority: new_cost + next.manhattan(goal),
                    seq,
                    tile: next,
                });
            }
        }
    }

    reconstruct(&came_from, start, goal)
}

fn reconstruct(
    came_from: &HashMap<TileCoord, TileCoord>,
    start: TileCoord,
    goal: TileCoord,
) -> Result<Vec<TileCoord>, PathError> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = *came_from
            .get(&current)
            .ok_or(PathError::NoPathFound { start, goal })?;
        path.push(current);
    }
    path.reverse();
    Ok(path)
}
