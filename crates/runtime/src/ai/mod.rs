//! Behavior-tree AI for enemies.
//!
//! Every archetype gets a fixed tree from [`presets`], built once when the
//! enemy spawns. Each decision frame the tree is ticked from the root against
//! a fresh [`AiContext`]; nothing about the previous tick is remembered by the
//! tree itself.

pub mod context;
pub mod nodes;
pub mod presets;

pub use context::AiContext;
pub use presets::{BehaviorTree, tree_for};
