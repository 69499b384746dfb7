//! Notifications emitted by the encounter manager.
//!
//! Events are buffered and drained by the caller once per frame (enemy
//! counter, music cues, logs). The encounter never waits on a consumer.

use game_core::{Archetype, RoomId};

use crate::enemy::EnemyHandle;

#[derive(Clone, Debug, PartialEq)]
pub enum EncounterEvent {
    /// A pending spawn record became an active enemy.
    Spawned {
        handle: EnemyHandle,
        archetype: Archetype,
        room: RoomId,
    },

    /// An enemy reached zero health and was retired. Its record is consumed.
    Died {
        handle: EnemyHandle,
        archetype: Archetype,
    },

    /// Every active enemy was sent back to the pending pool (player death).
    Retracted { count: usize },

    /// The player entered a room and its pending records were activated.
    RoomEntered { room: RoomId, spawned: usize },

    /// The player entered a gated room without enough collected items.
    RoomLocked {
        room: RoomId,
        required_items: u32,
        collected: u32,
    },
}
