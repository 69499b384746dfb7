//! Level loader.
//!
//! A level file is RON with the cost grid drawn as text rows, one character
//! per tile:
//!
//! | Char | Cost |
//! |------|------|
//! | ` `  | 0 (outside any room) |
//! | `.`  | 1 (plain floor) |
//! | `#`  | 10 (wall) |
//! | `0`-`9` | that digit |
//!
//! ```ron
//! (
//!     tile_size: 16.0,
//!     rows: [
//!         "#####",
//!         "#...#",
//!         "#####",
//!     ],
//!     rooms: [(room: 1, min: (x: 1, y: 1), max: (x: 3, y: 1))],
//!     spawns: [(room: 1, archetype: melee, tile: (x: 3, y: 1))],
//!     gates: [],
//!     player_start: (x: 1, y: 1),
//! )
//! ```

use std::path::Path;

use game_core::{
    Archetype, CostGrid, CostMap, Level, RoomBounds, RoomGate, RoomId, SpawnRecord, TileCoord,
};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelRon {
    #[serde(default = "default_tile_size")]
    tile_size: f32,
    rows: Vec<String>,
    #[serde(default)]
    rooms: Vec<RoomRon>,
    #[serde(default)]
    spawns: Vec<SpawnRon>,
    #[serde(default)]
    gates: Vec<RoomGate>,
    player_start: TileCoord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoomRon {
    room: RoomId,
    min: TileCoord,
    max: TileCoord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SpawnRon {
    room: RoomId,
    archetype: Archetype,
    /// Tile the enemy's top-left corner starts on.
    tile: TileCoord,
}

fn default_tile_size() -> f32 {
    16.0
}

/// Loader for levels from RON files.
pub struct LevelLoader;

impl LevelLoader {
    pub fn load(path: &Path) -> LoadResult<Level> {
        let content = read_file(path)?;
        let level = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid level {}: {}", path.display(), e))?;
        debug!(
            path = %path.display(),
            rooms = level.rooms.len(),
            spawns = level.spawns.len(),
            "loaded level"
        );
        Ok(level)
    }

    pub fn parse(content: &str) -> LoadResult<Level> {
        let data: LevelRon =
            ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse level RON: {}", e))?;

        let rows = data
            .rows
            .iter()
            .enumerate()
            .map(|(y, row)| parse_row(y, row))
            .collect::<LoadResult<Vec<_>>>()?;
        let grid = CostGrid::from_rows(&rows, data.tile_size)?;

        let rooms = data
            .rooms
            .iter()
            .map(|room| {
                for corner in [room.min, room.max] {
                    if !grid.contains(corner) {
                        anyhow::bail!("{} corner {} is outside the grid", room.room, corner);
                    }
                }
                Ok(RoomBounds::new(room.room, room.min, room.max))
            })
            .collect::<LoadResult<Vec<_>>>()?;

        let spawns = data
            .spawns
            .iter()
            .map(|spawn| {
                if !grid.contains(spawn.tile) {
                    anyhow::bail!("{} spawn at {} is outside the grid", spawn.archetype, spawn.tile);
                }
                if !rooms.iter().any(|bounds| bounds.room == spawn.room) {
                    anyhow::bail!("spawn references undeclared {}", spawn.room);
                }
                Ok(SpawnRecord::new(
                    spawn.room,
                    spawn.archetype,
                    spawn.tile.x as f32 * data.tile_size,
                    spawn.tile.y as f32 * data.tile_size,
                ))
            })
            .collect::<LoadResult<Vec<_>>>()?;

        if !grid.contains(data.player_start) {
            anyhow::bail!("player start {} is outside the grid", data.player_start);
        }
        let player_start = Vec2::new(data.player_start.x as f32, data.player_start.y as f32) * data.tile_size;

        Ok(Level {
            grid,
            rooms,
            spawns,
            gates: data.gates,
            player_start,
        })
    }
}

fn parse_row(y: usize, row: &str) -> LoadResult<Vec<u32>> {
    row.chars()
        .enumerate()
        .map(|(x, ch)| match ch {
            ' ' => Ok(0),
            '.' => Ok(1),
            '#' => Ok(10),
            digit if digit.is_ascii_digit() => Ok(digit as u32 - '0' as u32),
            other => Err(anyhow::anyhow!("unknown tile {:?} at ({}, {})", other, x, y)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SMALL: &str = r#######"
        (
            rows: [
                "######",
                "#..6.#",
                "######",
            ],
            rooms: [(room: 1, min: (x: 1, y: 1), max: (x: 4, y: 1))],
            spawns: [(room: 1, archetype: mage, tile: (x: 4, y: 1))],
            gates: [(room: 1, required_items: 2)],
            player_start: (x: 1, y: 1),
        )
    "#######;

    #[test]
    fn parses_rows_rooms_and_spawns() {
        let level = LevelLoader::parse(SMALL).unwrap();
        assert_eq!(level.grid.dimensions().width, 6);
        assert_eq!(level.grid.cost_at(TileCoord::new(0, 0)), 10);
        assert_eq!(level.grid.cost_at(TileCoord::new(3, 1)), 6);
        assert_eq!(level.spawns[0].archetype, Archetype::Mage);
        assert_eq!(level.spawns[0].position.x, 64.0);
        assert_eq!(level.gates[0].required_items, 2);
        assert_eq!(level.player_start.x, 16.0);
    }

    #[test]
    fn rejects_unknown_tiles_and_ragged_rows() {
        let bad_tile = SMALL.replace("#..6.#", "#..x.#");
        assert!(LevelLoader::parse(&bad_tile).is_err());

        let ragged = SMALL.replace("#..6.#", "#..6#");
        let err = LevelLoader::parse(&ragged).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn rejects_spawns_in_undeclared_rooms() {
        let orphan = SMALL.replace("spawns: [(room: 1", "spawns: [(room: 7");
        assert!(LevelLoader::parse(&orphan).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();
        let level = LevelLoader::load(file.path()).unwrap();
        assert_eq!(level.rooms.len(), 1);

        let missing = LevelLoader::load(Path::new("/definitely/not/here.ron"));
        assert!(missing.is_err());
    }
}
