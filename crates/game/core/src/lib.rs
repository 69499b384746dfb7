//! Deterministic enemy AI and navigation core.
//!
//! `game-core` owns the rules that do not depend on a tree runtime: the cost
//! grid and A* pathfinder, the enemy controller state machine, combat
//! resolution, the player collaborator and the tunable configuration. The
//! `runtime` crate wires these into behavior trees and an encounter loop.
pub mod actor;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod geometry;
pub mod pathfinding;
pub mod player;

pub use actor::{
    Archetype, ArchetypeProfile, ArchetypeTable, Attacker, Capabilities, EnemyController,
    EnemyTimers, Interval, Movable, MovementState, TeleportError, Teleporter,
};
pub use combat::{Combatant, DamageType, Facing, Projectile, ProjectileKind, ProjectileSet};
pub use config::{ConfigError, GameConfig};
pub use env::{
    CostGrid, CostMap, GameRng, Level, MapDimensions, MapError, RoomBounds, RoomGate, RoomId,
    SpawnRecord, TileCoord,
};
pub use error::{ErrorSeverity, GameError};
pub use geometry::Rect;
pub use pathfinding::{PathError, Route, find_route, plan_route};
pub use player::{Aim, PlayerProfile, PlayerState, PlayerView};
