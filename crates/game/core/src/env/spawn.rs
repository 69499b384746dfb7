//! Room-scoped spawn records.

use glam::Vec2;

use crate::actor::Archetype;

/// Identifier of a room in the level layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RoomId(pub u32);

impl core::fmt::Display for RoomId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// A pending enemy placement that activates when the player enters `room`.
///
/// `position` is the actor's top-left corner in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnRecord {
    pub room: RoomId,
    pub archetype: Archetype,
    pub position: Vec2,
}

impl SpawnRecord {
    pub fn new(room: RoomId, archetype: Archetype, x: f32, y: f32) -> Self {
        Self {
            room,
            archetype,
            position: Vec2::new(x, y),
        }
    }
}

/// A room that stays locked until the player holds enough collectibles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomGate {
    pub room: RoomId,
    pub required_items: u32,
}

impl RoomGate {
    pub fn is_open(&self, collected: u32) -> bool {
        collected >= self.required_items
    }
}
