//! A loaded level: the cost grid plus its room layout and spawn tables.

use glam::Vec2;

use super::map::{CostGrid, CostMap, TileCoord};
use super::spawn::{RoomGate, RoomId, SpawnRecord};

/// Inclusive tile rectangle occupied by one room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomBounds {
    pub room: RoomId,
    pub min: TileCoord,
    pub max: TileCoord,
}

impl RoomBounds {
    pub fn new(room: RoomId, a: TileCoord, b: TileCoord) -> Self {
        Self {
            room,
            min: TileCoord::new(a.x.min(b.x), a.y.min(b.y)),
            max: TileCoord::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn contains(&self, tile: TileCoord) -> bool {
        (self.min.x..=self.max.x).contains(&tile.x) && (self.min.y..=self.max.y).contains(&tile.y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub grid: CostGrid,
    pub rooms: Vec<RoomBounds>,
    pub spawns: Vec<SpawnRecord>,
    pub gates: Vec<RoomGate>,
    /// Player top-left corner at the start of the run and after respawns.
    pub player_start: Vec2,
}

impl Level {
    /// Room containing the tile under `point`. First match wins when rooms overlap.
    pub fn room_at(&self, point: Vec2) -> Option<RoomId> {
        let tile = self.grid.world_to_tile(point);
        self.rooms
            .iter()
            .find(|bounds| bounds.contains(tile))
            .map(|bounds| bounds.room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Archetype;
    use crate::env::MapDimensions;

    #[test]
    fn room_lookup_uses_tile_under_point() {
        let level = Level {
            grid: CostGrid::filled(MapDimensions::new(20, 10), 16.0, 1).unwrap(),
            rooms: vec![
                RoomBounds::new(RoomId(1), TileCoord::new(0, 0), TileCoord::new(9, 9)),
                RoomBounds::new(RoomId(2), TileCoord::new(19, 9), TileCoord::new(10, 0)),
            ],
            spawns: vec![SpawnRecord::new(RoomId(2), Archetype::Melee, 200.0, 32.0)],
            gates: Vec::new(),
            player_start: Vec2::new(16.0, 16.0),
        };
        assert_eq!(level.room_at(Vec2::new(8.0, 8.0)), Some(RoomId(1)));
        assert_eq!(level.room_at(Vec2::new(160.0, 8.0)), Some(RoomId(2)));
        assert_eq!(level.room_at(Vec2::new(400.0, 8.0)), None);
    }
}
