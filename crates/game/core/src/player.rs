//! In-memory player state.
//!
//! The AI only sees the player through [`PlayerView`]; [`PlayerState`] is the
//! concrete implementation the session drives from resolved input.

use glam::Vec2;

use crate::actor::{Attacker, Movable};
use crate::combat::{Combatant, DamageType, Facing, Projectile, ProjectileKind, ProjectileSet};
use crate::config::GameConfig;
use crate::env::{CostMap, cost};
use crate::geometry::Rect;

/// What enemies are allowed to know about the player.
pub trait PlayerView: Combatant {
    /// Whether aiming comes from a gamepad stick instead of a cursor.
    fn is_controller_connected(&self) -> bool;
}

/// Player tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerProfile {
    pub health: i32,
    pub speed: f32,
    pub footprint: Vec2,
    pub melee_damage: i32,
    pub arrow_damage: i32,
    pub arrow_cooldown_secs: f32,
    pub melee_cooldown_secs: f32,
    pub lives: u32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            health: 100,
            speed: 85.0,
            footprint: Vec2::splat(16.0),
            melee_damage: 40,
            arrow_damage: 25,
            arrow_cooldown_secs: 0.3,
            melee_cooldown_secs: 0.4,
            lives: 3,
        }
    }
}

/// Where an arrow is aimed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Aim {
    /// World-space cursor point.
    Cursor(Vec2),
    /// Right-stick deflection.
    Stick(Vec2),
}

#[derive(Clone, Debug)]
pub struct PlayerState {
    profile: PlayerProfile,
    position: Vec2,
    facing: Facing,
    health: i32,
    lives: u32,
    controller_connected: bool,
    melee_timer: f32,
    arrow_timer: f32,
    damage_timer: f32,
    damage_feedback: Option<DamageType>,
    arrows: ProjectileSet,
}

impl PlayerState {
    /// Places the player with its top-left corner at `position`, weapons ready.
    pub fn new(profile: PlayerProfile, position: Vec2) -> Self {
        Self {
            health: profile.health,
            lives: profile.lives,
            melee_timer: profile.melee_cooldown_secs,
            arrow_timer: profile.arrow_cooldown_secs,
            profile,
            position,
            facing: Facing::default(),
            controller_connected: false,
            damage_timer: 0.0,
            damage_feedback: None,
            arrows: ProjectileSet::new(),
        }
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn midpoint(&self) -> Vec2 {
        self.position + self.profile.footprint * 0.5
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn arrows(&self) -> &ProjectileSet {
        &self.arrows
    }

    pub fn damage_feedback(&self) -> Option<DamageType> {
        self.damage_feedback
    }

    pub fn set_controller_connected(&mut self, connected: bool) {
        self.controller_connected = connected;
    }

    pub fn advance_timers(&mut self, dt: f32, config: &GameConfig) {
        self.melee_timer += dt;
        self.arrow_timer += dt;
        if self.damage_feedback.is_some() {
            self.damage_timer += dt;
            if self.damage_timer > config.damage_feedback_secs {
                self.damage_feedback = None;
                self.damage_timer = 0.0;
            }
        }
    }

    /// Moves by the sign of each component of `input`.
    ///
    /// Each axis is checked on its own: a step toward a hard-blocked tile
    /// adjacent to the player's midpoint is refused while the other axis
    /// still moves.
    pub fn apply_movement<M>(&mut self, input: Vec2, dt: f32, map: &M)
    where
        M: CostMap + ?Sized,
    {
        let here = map.world_to_tile(self.midpoint());
        let step = self.profile.speed * dt;

        let dx = axis_sign(input.x);
        if dx != 0 && !cost::is_hard_blocked(map.cost_at(here.offset(dx, 0))) {
            self.position.x += dx as f32 * step;
        }
        let dy = axis_sign(input.y);
        if dy != 0 && !cost::is_hard_blocked(map.cost_at(here.offset(0, dy))) {
            self.position.y += dy as f32 * step;
        }

        if let Some(facing) = Facing::from_dx(dx as f32) {
            self.facing = facing;
        }
    }

    /// Starts a sword swing if the cooldown allows and returns its hitbox.
    pub fn swing(&mut self, config: &GameConfig) -> Option<Rect> {
        if self.health <= 0 || self.melee_timer < self.profile.melee_cooldown_secs {
            return None;
        }
        self.melee_timer = 0.0;
        Some(self.melee_hitbox(config.melee_reach))
    }

    /// Applies a swing to one target. Dead targets are ignored.
    pub fn strike<T>(&self, hitbox: Rect, target: &mut T) -> bool
    where
        T: Combatant + ?Sized,
    {
        if target.is_dead() || !hitbox.intersects(&target.bounds()) {
            return false;
        }
        target.receive_damage(self.profile.melee_damage, DamageType::Normal);
        true
    }

    /// Looses an arrow if the bow is ready.
    ///
    /// Returns `false` during the cooldown or when the aim has no direction.
    pub fn fire_arrow(&mut self, aim: Aim, config: &GameConfig) -> bool {
        if self.health <= 0 || self.arrow_timer < self.profile.arrow_cooldown_secs {
            return false;
        }
        let origin = self.midpoint();
        let heading = match aim {
            Aim::Cursor(point) => point - origin,
            Aim::Stick(deflection) => deflection,
        };
        if heading.length_squared() <= f32::EPSILON {
            return false;
        }

        if let Some(facing) = Facing::from_dx(heading.x) {
            self.facing = facing;
        }
        self.arrow_timer = 0.0;
        self.arrows.push(Projectile::along(
            ProjectileKind::Arrow,
            self.profile.arrow_damage,
            origin,
            heading,
            config.projectile_speed,
            Vec2::splat(config.projectile_size),
        ));
        true
    }

    /// Advances arrows and resolves them against `targets`. Each arrow hits at
    /// most one living target. Returns the number of hits.
    pub fn update_arrows<M, T>(&mut self, dt: f32, map: &M, targets: &mut [T]) -> usize
    where
        M: CostMap + ?Sized,
        T: Combatant,
    {
        self.arrows.step(dt, map, |arrow| {
            let bounds = arrow.bounds();
            match targets
                .iter_mut()
                .find(|target| !target.is_dead() && bounds.intersects(&target.bounds()))
            {
                Some(target) => {
                    target.receive_damage(arrow.damage, arrow.damage_type());
                    true
                }
                None => false,
            }
        })
    }

    /// Brings the player back at `point` with full health, spending a life.
    ///
    /// Returns `false` (and changes nothing) when no lives are left.
    pub fn respawn(&mut self, point: Vec2) -> bool {
        if self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        self.health = self.profile.health;
        self.position = point;
        self.damage_feedback = None;
        self.damage_timer = 0.0;
        self.arrows.clear();
        true
    }
}

fn axis_sign(value: f32) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

impl Movable for PlayerState {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn footprint(&self) -> Vec2 {
        self.profile.footprint
    }

    fn facing(&self) -> Facing {
        self.facing
    }
}

impl Attacker for PlayerState {
    fn melee_damage(&self) -> i32 {
        self.profile.melee_damage
    }
}

impl Combatant for PlayerState {
    fn bounds(&self) -> Rect {
        Rect::new(self.position, self.profile.footprint)
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn midpoint(&self) -> Vec2 {
        PlayerState::midpoint(self)
    }

    fn receive_damage(&mut self, amount: i32, damage_type: DamageType) {
        self.health -= amount;
        self.damage_feedback = Some(damage_type);
        self.damage_timer = 0.0;
    }
}

impl PlayerView for PlayerState {
    fn is_controller_connected(&self) -> bool {
        self.controller_connected
    }
}
