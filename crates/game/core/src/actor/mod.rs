//! Enemy actors: archetype descriptors, the controller state machine, and the
//! small trait set (`Movable`, `Attacker`, `Teleporter`) the AI drives them
//! through.
mod archetype;
mod controller;
mod traits;

pub use archetype::{Archetype, ArchetypeProfile, ArchetypeTable, Capabilities, Interval};
pub use controller::{EnemyController, EnemyTimers, MovementState};
pub use traits::{Attacker, Movable, TeleportError, Teleporter, random_offset_tile};
