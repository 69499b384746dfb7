//! Cost grid and tile/world conversion.
//!
//! The grid is read-only from the AI's perspective. It only changes when the
//! encounter manager swaps in a freshly loaded map, never during a
//! pathfinding call or a frame.

use glam::Vec2;

use crate::error::{ErrorSeverity, GameError};

/// Tile cost thresholds shared by pathing, teleport targeting and collision.
pub mod cost {
    /// Outside any room; never a valid destination.
    pub const OUTSIDE: u32 = 0;
    /// The only cost the pathfinder will expand into.
    pub const PLAIN_FLOOR: u32 = 1;
    /// Soft-blocked for move and teleport targeting.
    pub const SOFT_BLOCK: u32 = 6;
    /// Hard-blocked: kills projectiles and stops the player.
    pub const HARD_BLOCK: u32 = 10;

    /// Whether a move or teleport may target a tile of this cost.
    #[inline]
    pub const fn is_valid_destination(cost: u32) -> bool {
        cost != OUTSIDE && cost < SOFT_BLOCK
    }

    /// Whether this cost stops projectiles and player movement.
    #[inline]
    pub const fn is_hard_blocked(cost: u32) -> bool {
        cost >= HARD_BLOCK
    }
}

/// Integer tile coordinate. Valid tiles lie in `[0, width) x [0, height)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// `|dx| + |dy|`.
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl core::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, tile: TileCoord) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width as i32 && tile.y < self.height as i32
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Read-only view over the level's traversal costs.
///
/// Every query is bounds-safe: off-grid tiles report [`cost::OUTSIDE`].
pub trait CostMap: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// Edge length of one square tile in world units.
    fn tile_size(&self) -> f32;

    /// Cost of `tile`, or [`cost::OUTSIDE`] when off the grid.
    fn cost_at(&self, tile: TileCoord) -> u32;

    fn contains(&self, tile: TileCoord) -> bool {
        self.dimensions().contains(tile)
    }

    /// Tile under a world-space point. Uses floor division so points left of
    /// or above the origin land on negative (off-grid) tiles.
    fn world_to_tile(&self, point: Vec2) -> TileCoord {
        let size = self.tile_size();
        TileCoord::new(
            (point.x / size).floor() as i32,
            (point.y / size).floor() as i32,
        )
    }

    /// World-space center of `tile`.
    fn tile_to_world(&self, tile: TileCoord) -> Vec2 {
        let size = self.tile_size();
        Vec2::new(
            (tile.x as f32 + 0.5) * size,
            (tile.y as f32 + 0.5) * size,
        )
    }

    fn cost_at_point(&self, point: Vec2) -> u32 {
        self.cost_at(self.world_to_tile(point))
    }
}

/// Errors raised while building or editing a [`CostGrid`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error("cost grid must have at least one tile")]
    EmptyGrid,

    #[error("cost grid expects {expected} tiles, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("row {row} has {actual} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),

    #[error("tile {tile} is outside the grid")]
    OutOfBounds { tile: TileCoord },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyGrid => "MAP_EMPTY_GRID",
            Self::DimensionMismatch { .. } => "MAP_DIMENSION_MISMATCH",
            Self::RaggedRow { .. } => "MAP_RAGGED_ROW",
            Self::InvalidTileSize(_) => "MAP_INVALID_TILE_SIZE",
            Self::OutOfBounds { .. } => "MAP_OUT_OF_BOUNDS",
        }
    }
}

/// Dense row-major cost grid.
#[derive(Clone, Debug, PartialEq)]
pub struct CostGrid {
    dimensions: MapDimensions,
    tile_size: f32,
    costs: Vec<u32>,
}

impl CostGrid {
    /// Builds a grid from row-major costs.
    pub fn new(dimensions: MapDimensions, tile_size: f32, costs: Vec<u32>) -> Result<Self, MapError> {
        if dimensions.area() == 0 {
            return Err(MapError::EmptyGrid);
        }
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(MapError::InvalidTileSize(tile_size));
        }
        if costs.len() != dimensions.area() {
            return Err(MapError::DimensionMismatch {
                expected: dimensions.area(),
                actual: costs.len(),
            });
        }
        Ok(Self {
            dimensions,
            tile_size,
            costs,
        })
    }

    /// Grid where every tile has the same cost.
    pub fn filled(dimensions: MapDimensions, tile_size: f32, cost: u32) -> Result<Self, MapError> {
        Self::new(dimensions, tile_size, vec![cost; dimensions.area()])
    }

    /// Builds a grid from rows of equal length (`rows[y][x]`).
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R], tile_size: f32) -> Result<Self, MapError> {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut costs = Vec::with_capacity(width * rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MapError::RaggedRow {
                    row: index,
                    expected: width,
                    actual: row.len(),
                });
            }
            costs.extend_from_slice(row);
        }
        Self::new(
            MapDimensions::new(width as u32, rows.len() as u32),
            tile_size,
            costs,
        )
    }

    pub fn set_cost(&mut self, tile: TileCoord, cost: u32) -> Result<(), MapError> {
        let index = self.index(tile).ok_or(MapError::OutOfBounds { tile })?;
        self.costs[index] = cost;
        Ok(())
    }

    /// Sets every in-bounds tile of the inclusive rectangle `from..=to`.
    pub fn fill_rect(&mut self, from: TileCoord, to: TileCoord, cost: u32) {
        for y in from.y.min(to.y)..=from.y.max(to.y) {
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                if let Some(index) = self.index(TileCoord::new(x, y)) {
                    self.costs[index] = cost;
                }
            }
        }
    }

    fn index(&self, tile: TileCoord) -> Option<usize> {
        self.dimensions
            .contains(tile)
            .then(|| tile.y as usize * self.dimensions.width as usize + tile.x as usize)
    }
}

impl CostMap for CostGrid {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn cost_at(&self, tile: TileCoord) -> u32 {
        self.index(tile).map_or(cost::OUTSIDE, |index| self.costs[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> CostGrid {
        let rows: [[u32; 3]; 3] = [[10, 10, 10], [10, 1, 3], [10, 10, 10]];
        CostGrid::from_rows(&rows, 16.0).unwrap()
    }

    #[test]
    fn off_grid_cost_is_outside() {
        let grid = grid();
        assert_eq!(grid.cost_at(TileCoord::new(1, 1)), 1);
        assert_eq!(grid.cost_at(TileCoord::new(2, 1)), 3);
        assert_eq!(grid.cost_at(TileCoord::new(-1, 0)), cost::OUTSIDE);
        assert_eq!(grid.cost_at(TileCoord::new(3, 0)), cost::OUTSIDE);
    }

    #[test]
    fn world_tile_round_trip_lands_on_center() {
        let grid = grid();
        assert_eq!(grid.world_to_tile(Vec2::new(17.0, 31.9)), TileCoord::new(1, 1));
        assert_eq!(grid.tile_to_world(TileCoord::new(1, 1)), Vec2::new(24.0, 24.0));
        assert_eq!(grid.world_to_tile(Vec2::new(-0.5, 4.0)), TileCoord::new(-1, 0));
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows: [&[u32]; 2] = [&[1, 1], &[1]];
        assert!(matches!(
            CostGrid::from_rows(&rows, 16.0),
            Err(MapError::RaggedRow { row: 1, .. })
        ));
    }

    #[test]
    fn rejects_bad_tile_size() {
        let dims = MapDimensions::new(2, 2);
        assert!(matches!(
            CostGrid::filled(dims, 0.0, 1),
            Err(MapError::InvalidTileSize(_))
        ));
    }

    #[test]
    fn set_cost_is_bounds_checked() {
        let mut grid = grid();
        grid.set_cost(TileCoord::new(0, 0), 1).unwrap();
        assert_eq!(grid.cost_at(TileCoord::new(0, 0)), 1);
        assert_eq!(
            grid.set_cost(TileCoord::new(5, 5), 1),
            Err(MapError::OutOfBounds {
                tile: TileCoord::new(5, 5)
            })
        );
    }

    #[test]
    fn destination_classification() {
        assert!(!cost::is_valid_destination(0));
        assert!(cost::is_valid_destination(1));
        assert!(cost::is_valid_destination(5));
        assert!(!cost::is_valid_destination(6));
        assert!(cost::is_hard_blocked(10));
    }
}
