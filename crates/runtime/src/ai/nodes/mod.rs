//! Game-specific behavior tree nodes.
//!
//! - `conditions`: range checks that gate attack branches
//! - `actions`: path resets, movement, teleports and attacks that drive the
//!   enemy controller

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;
