//! World-space routes derived from tile paths.

use std::collections::VecDeque;

use glam::Vec2;

use super::astar::{PathError, find_route};
use crate::env::{CostMap, TileCoord};

/// Ordered world-space waypoints, front first.
///
/// Waypoints are top-left anchors for an actor of the footprint the route was
/// built for, so following them keeps the actor centered on each tile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    waypoints: VecDeque<Vec2>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a tile path into a route for an actor of size `footprint`.
    ///
    /// Every tile center is shifted by half the footprint, then the first
    /// waypoint (the tile the actor is standing on) is dropped.
    pub fn from_tiles<M>(tiles: &[TileCoord], map: &M, footprint: Vec2) -> Self
    where
        M: CostMap + ?Sized,
    {
        let half = footprint * 0.5;
        let mut waypoints: VecDeque<Vec2> = tiles
            .iter()
            .map(|&tile| map.tile_to_world(tile) - half)
            .collect();
        waypoints.pop_front();
        Self { waypoints }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// The waypoint currently being approached.
    pub fn head(&self) -> Option<Vec2> {
        self.waypoints.front().copied()
    }

    pub fn pop_front(&mut self) -> Option<Vec2> {
        self.waypoints.pop_front()
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.waypoints.iter()
    }
}

impl FromIterator<Vec2> for Route {
    fn from_iter<I: IntoIterator<Item = Vec2>>(iter: I) -> Self {
        Self {
            waypoints: iter.into_iter().collect(),
        }
    }
}

/// Plans a route from the tile under `from` (an actor's midpoint) to `goal`.
///
/// # Errors
///
/// Propagates [`PathError`] from the search; callers treat it as "stay put".
pub fn plan_route<M>(map: &M, from: Vec2, goal: TileCoord, footprint: Vec2) -> Result<Route, PathError>
where
    M: CostMap + ?Sized,
{
    let start = map.world_to_tile(from);
    let tiles = find_route(start, goal, map)?;
    Ok(Route::from_tiles(&tiles, map, footprint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{CostGrid, MapDimensions};

    fn open_grid() -> CostGrid {
        CostGrid::filled(MapDimensions::new(8, 8), 16.0, 1).unwrap()
    }

    #[test]
    fn drops_current_tile_and_centers_on_footprint() {
        let grid = open_grid();
        let tiles = [TileCoord::new(1, 1), TileCoord::new(2, 1), TileCoord::new(3, 1)];
        let route = Route::from_tiles(&tiles, &grid, Vec2::new(16.0, 16.0));

        assert_eq!(route.len(), 2);
        assert_eq!(route.head(), Some(Vec2::new(32.0, 16.0)));
        assert_eq!(route.iter().last(), Some(&Vec2::new(48.0, 16.0)));
    }

    #[test]
    fn plan_from_midpoint() {
        let grid = open_grid();
        let route = plan_route(&grid, Vec2::new(24.0, 24.0), TileCoord::new(4, 1), Vec2::splat(16.0)).unwrap();
        assert_eq!(route.len(), 3);
        assert_eq!(route.iter().last(), Some(&Vec2::new(64.0, 16.0)));
    }

    #[test]
    fn plan_to_own_tile_is_empty() {
        let grid = open_grid();
        let route = plan_route(&grid, Vec2::new(24.0, 24.0), TileCoord::new(1, 1), Vec2::splat(16.0)).unwrap();
        assert!(route.is_empty());
    }
}
