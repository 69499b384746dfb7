//! Read-only world data consumed by the AI core.
//!
//! The cost grid, the RNG and the spawn tables are owned by the encounter
//! manager and handed to actors explicitly on every tick; nothing here is
//! ambient global state.
mod level;
mod map;
mod rng;
mod spawn;

pub use level::{Level, RoomBounds};
pub use map::{CostGrid, CostMap, MapDimensions, MapError, TileCoord, cost};
pub use rng::GameRng;
pub use spawn::{RoomGate, RoomId, SpawnRecord};
