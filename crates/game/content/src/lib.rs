//! Data-driven content loaders.
//!
//! This crate turns data files into `game-core` values:
//! - Game configuration and archetype tuning (TOML)
//! - Levels: cost grid, room layout, spawn tables and gates (RON)
//!
//! Everything is validated while loading so that nothing malformed reaches a
//! running encounter.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LevelLoader, LoadResult};
