//! Projectile flight and resolution.

use glam::Vec2;

use super::damage::{DamageType, ProjectileKind};
use crate::env::{CostMap, cost};
use crate::geometry::Rect;

/// A projectile in flight.
///
/// `position` is the projectile's center. The direction is fixed at fire time;
/// projectiles are never re-aimed.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub damage: i32,
    pub position: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub size: Vec2,
}

impl Projectile {
    /// Fires from `origin` toward `target`.
    pub fn aimed(kind: ProjectileKind, damage: i32, origin: Vec2, target: Vec2, speed: f32, size: Vec2) -> Self {
        Self::along(kind, damage, origin, target - origin, speed, size)
    }

    /// Fires from `origin` along `heading` (normalized here).
    pub fn along(kind: ProjectileKind, damage: i32, origin: Vec2, heading: Vec2, speed: f32, size: Vec2) -> Self {
        Self {
            kind,
            damage,
            position: origin,
            direction: heading.normalize_or_zero(),
            speed,
            size,
        }
    }

    pub fn damage_type(&self) -> DamageType {
        self.kind.damage_type()
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }

    pub fn advance(&mut self, dt: f32) {
        self.position += self.direction * self.speed * dt;
    }

    /// Whether the tile under the projectile's center destroys it.
    pub fn is_blocked<M: CostMap + ?Sized>(&self, map: &M) -> bool {
        let tile = map.world_to_tile(self.position);
        !map.contains(tile) || cost::is_hard_blocked(map.cost_at(tile))
    }
}

/// Projectiles owned by one shooter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectileSet {
    projectiles: Vec<Projectile>,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    /// Advances every projectile by `dt` and resolves it.
    ///
    /// A projectile whose center lands on a hard-blocked or off-grid tile is
    /// removed without hitting anything. Otherwise `on_hit` is offered the
    /// projectile; returning `true` means damage was applied and the
    /// projectile is consumed. Returns the number of hits.
    pub fn step<M, F>(&mut self, dt: f32, map: &M, mut on_hit: F) -> usize
    where
        M: CostMap + ?Sized,
        F: FnMut(&Projectile) -> bool,
    {
        let mut hits = 0;
        self.projectiles.retain_mut(|projectile| {
            projectile.advance(dt);
            if projectile.is_blocked(map) {
                return false;
            }
            if on_hit(projectile) {
                hits += 1;
                return false;
            }
            true
        });
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{CostGrid, MapDimensions, TileCoord};

    fn corridor() -> CostGrid {
        // Open row with a wall at x = 6.
        let mut grid = CostGrid::filled(MapDimensions::new(10, 3), 16.0, 1).unwrap();
        grid.set_cost(TileCoord::new(6, 1), 10).unwrap();
        grid
    }

    fn shot(from: Vec2, to: Vec2) -> Projectile {
        Projectile::aimed(ProjectileKind::Potion, 6, from, to, 150.0, Vec2::splat(8.0))
    }

    #[test]
    fn removed_on_entering_wall_without_hit() {
        let grid = corridor();
        let mut set = ProjectileSet::new();
        set.push(shot(Vec2::new(88.0, 24.0), Vec2::new(200.0, 24.0)));

        // 88 + 150 * 0.1 = 103 → tile 6.
        let hits = set.step(0.1, &grid, |_| panic!("blocked projectiles never hit"));
        assert_eq!(hits, 0);
        assert!(set.is_empty());
    }

    #[test]
    fn hit_applies_once_and_consumes() {
        let grid = corridor();
        let target = Rect::new(Vec2::new(40.0, 16.0), Vec2::splat(16.0));
        let mut set = ProjectileSet::new();
        set.push(shot(Vec2::new(24.0, 24.0), target.center()));

        let mut applied = 0;
        for _ in 0..10 {
            set.step(0.02, &grid, |p| {
                let hit = p.bounds().intersects(&target);
                if hit {
                    applied += p.damage;
                }
                hit
            });
        }
        assert_eq!(applied, 6);
        assert!(set.is_empty());
    }

    #[test]
    fn flies_straight_until_resolved() {
        let grid = corridor();
        let mut set = ProjectileSet::new();
        set.push(shot(Vec2::new(24.0, 24.0), Vec2::new(24.0, 0.0)));
        set.step(0.02, &grid, |_| false);
        let p = set.iter().next().unwrap();
        assert_eq!(p.damage_type(), DamageType::Poison);
        assert!((p.position - Vec2::new(24.0, 21.0)).length() < 1e-4);
    }
}
