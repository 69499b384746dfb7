//! Room-based encounter lifecycle.
//!
//! The [`EncounterManager`] owns the cost grid, the pending spawn pool and
//! the active enemies. It is the only component that adds or removes
//! enemies, and it never does so while iterating over them.
mod events;
mod manager;

pub use events::EncounterEvent;
pub use manager::EncounterManager;
