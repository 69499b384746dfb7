//! Enemy AI and encounter orchestration on top of `game-core`.
//!
//! Modules are organized by responsibility:
//! - [`ai`] holds the behavior-tree leaves and one preset tree per archetype
//! - [`enemy`] pairs a controller with its tree
//! - [`encounter`] owns the active enemies and the room spawn lifecycle
//! - [`session`] drives a frame: player, decisions, combat, then fixed steps
//! - [`clock`] turns frame time into fixed steps
pub mod ai;
pub mod clock;
pub mod encounter;
pub mod enemy;
pub mod error;
pub mod session;

pub use ai::{AiContext, BehaviorTree, tree_for};
pub use clock::FrameClock;
pub use encounter::{EncounterEvent, EncounterManager};
pub use enemy::{Enemy, EnemyHandle};
pub use error::{Result, RuntimeError};
pub use session::{FrameInput, FrameReport, Session, SessionState};
