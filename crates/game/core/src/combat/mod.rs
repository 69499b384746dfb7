//! Combat resolution shared by the player and enemies.
//!
//! - [`damage`]: damage-type tags and the payload → damage-type mapping
//! - [`hit`]: the directional melee hitbox
//! - [`projectile`]: projectile flight, obstacle kills and single-shot hits
pub mod damage;
pub mod hit;
pub mod projectile;

pub use damage::{DamageType, ProjectileKind};
pub use hit::{Facing, melee_hitbox};
pub use projectile::{Projectile, ProjectileSet};

use glam::Vec2;

use crate::geometry::Rect;

/// Anything that can be hit and damaged.
pub trait Combatant {
    /// World-space bounding box used for overlap tests.
    fn bounds(&self) -> Rect;

    fn health(&self) -> i32;

    fn receive_damage(&mut self, amount: i32, damage_type: DamageType);

    fn midpoint(&self) -> Vec2 {
        self.bounds().center()
    }

    fn is_dead(&self) -> bool {
        self.health() <= 0
    }
}
