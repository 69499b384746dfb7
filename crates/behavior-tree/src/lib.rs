//! Lightweight behavior tree runtime for frame-ticked real-time games.
//!
//! The whole tree is re-evaluated from the root on every decision tick. There
//! is no resumable "current node": [`Status::Running`] is a transient per-tick
//! result that halts the enclosing composite for this frame only. Leaves are
//! expected to guard against redundant work themselves (a movement leaf checks
//! whether a route is already active before planning a new one).
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success, Failure, or Running
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Decorator nodes: [`Inverter`]
//!
//! Composites and decorators are generic over their child node type, so a
//! tree can be built from boxed trait objects (heterogeneous children) or from
//! a single concrete leaf type without any allocation.

pub mod behavior;
pub mod composite;
pub mod decorator;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use composite::{Selector, Sequence};
pub use decorator::Inverter;
pub use status::Status;
