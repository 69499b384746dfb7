//! Per-enemy runtime state and its movement/combat state machine.
//!
//! The controller is driven from two clocks:
//!
//! - **Decision tick** (variable rate): [`EnemyController::advance_timers`],
//!   then the behavior tree calls [`try_melee`](EnemyController::try_melee),
//!   [`try_fire`](EnemyController::try_fire),
//!   [`install_route`](EnemyController::install_route) and
//!   [`Teleporter::teleport`], then
//!   [`update_projectiles`](EnemyController::update_projectiles).
//! - **Fixed step**: [`EnemyController::fixed_tick`] consumes the head of the
//!   cached route. Nothing else moves the actor along a route, so a route
//!   installed during a decision tick is first consumed on the next fixed step.

use glam::Vec2;
use tracing::debug;

use super::archetype::{Archetype, ArchetypeProfile, Capabilities};
use super::traits::{Attacker, Movable, TeleportError, Teleporter, check_destination, random_offset_tile};
use crate::combat::{Combatant, DamageType, Facing, Projectile, ProjectileKind, ProjectileSet};
use crate::config::GameConfig;
use crate::env::{CostMap, GameRng, TileCoord, cost};
use crate::geometry::Rect;
use crate::pathfinding::{Route, plan_route};

/// Timer value that satisfies any threshold; used to force the next attempt.
const FORCE_READY: f32 = f32::INFINITY;

/// Where the actor is in its route lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementState {
    /// No route.
    Idle,
    /// More than one waypoint left; moving toward the head.
    Following,
    /// One waypoint left; it is dropped on the next fixed step without moving.
    Arrived,
}

/// Elapsed-time counters, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EnemyTimers {
    /// Since the last successful melee strike.
    pub attack: f32,
    /// Since the last re-path, path reset or teleport.
    pub re_route: f32,
    /// Since the last hit taken.
    pub damage: f32,
    /// Since the last shot.
    pub projectile: f32,
    /// Since rapid fire started.
    pub rapid_fire: f32,
}

#[derive(Clone, Debug)]
pub struct EnemyController {
    archetype: Archetype,
    profile: ArchetypeProfile,
    position: Vec2,
    direction: Vec2,
    facing: Facing,
    route: Route,
    health: i32,
    timers: EnemyTimers,
    damage_feedback: Option<DamageType>,
    rapid_fire: bool,
    moving: bool,
    projectiles: ProjectileSet,
}

impl EnemyController {
    /// Creates a controller with its top-left corner at `position`.
    ///
    /// The projectile timer starts at a random 0–0.5 s so that enemies
    /// spawned together do not fire in lockstep.
    pub fn new(archetype: Archetype, profile: ArchetypeProfile, position: Vec2, rng: &mut GameRng) -> Self {
        let timers = EnemyTimers {
            projectile: rng.uniform(0.0, 0.5),
            ..EnemyTimers::default()
        };
        Self {
            archetype,
            health: profile.health,
            profile,
            position,
            direction: Vec2::ZERO,
            facing: Facing::default(),
            route: Route::new(),
            timers,
            damage_feedback: None,
            rapid_fire: false,
            moving: false,
            projectiles: ProjectileSet::new(),
        }
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn profile(&self) -> &ArchetypeProfile {
        &self.profile
    }

    /// Top-left corner in world units.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn midpoint(&self) -> Vec2 {
        self.position + self.profile.footprint * 0.5
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.profile.footprint)
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    /// Health at or below zero. Removal is the encounter manager's job.
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn timers(&self) -> &EnemyTimers {
        &self.timers
    }

    /// Active hit-feedback tag, cleared once the feedback window elapses.
    pub fn damage_feedback(&self) -> Option<DamageType> {
        self.damage_feedback
    }

    pub fn is_rapid_fire(&self) -> bool {
        self.rapid_fire
    }

    /// Whether the last fixed step moved the actor along its route.
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn projectiles(&self) -> &ProjectileSet {
        &self.projectiles
    }

    pub fn movement_state(&self) -> MovementState {
        match self.route.len() {
            0 => MovementState::Idle,
            1 => MovementState::Arrived,
            _ => MovementState::Following,
        }
    }

    // ========================================================================
    // Decision tick
    // ========================================================================

    /// Advances every timer by the frame's elapsed time.
    pub fn advance_timers(&mut self, dt: f32, config: &GameConfig) {
        self.timers.attack += dt;
        self.timers.re_route += dt;
        self.timers.damage += dt;
        if self.profile.has(Capabilities::RANGED) {
            self.timers.projectile += dt;
        }

        if self.damage_feedback.is_some() && self.timers.damage > config.damage_feedback_secs {
            self.damage_feedback = None;
            self.timers.damage = 0.0;
        }

        if self.rapid_fire {
            self.timers.rapid_fire += dt;
            if self.timers.rapid_fire > config.rapid_fire_secs {
                self.rapid_fire = false;
                self.timers.rapid_fire = 0.0;
            }
        }
    }

    pub fn reset_reroute_timer(&mut self) {
        self.timers.re_route = 0.0;
    }

    /// Replaces the route wholesale and turns toward its first waypoint.
    pub fn install_route(&mut self, route: Route) {
        self.route = route;
        self.aim_at_head();
    }

    pub fn clear_route(&mut self) {
        self.route.clear();
    }

    /// Plans and installs a route to `goal`.
    ///
    /// On failure the current route is left untouched.
    pub fn route_to<M>(&mut self, map: &M, goal: TileCoord) -> Result<(), crate::pathfinding::PathError>
    where
        M: CostMap + ?Sized,
    {
        let route = plan_route(map, self.midpoint(), goal, self.profile.footprint)?;
        self.install_route(route);
        Ok(())
    }

    /// Melee strike against `target`.
    ///
    /// Lands only when the attack cooldown has elapsed, the target is within
    /// attack range, and the directional hitbox overlaps the target's body.
    /// A landed strike drops the route and restarts the cooldown.
    pub fn try_melee<T>(&mut self, target: &mut T, config: &GameConfig) -> bool
    where
        T: Combatant + ?Sized,
    {
        if !self.profile.has(Capabilities::MELEE) || self.timers.attack <= config.attack_cooldown_secs {
            return false;
        }
        if self.midpoint().distance(target.midpoint()) >= self.profile.attack_range {
            return false;
        }
        if !self.melee_hitbox(config.melee_reach).intersects(&target.bounds()) {
            return false;
        }

        self.route.clear();
        target.receive_damage(self.profile.melee_damage, DamageType::Normal);
        self.timers.attack = 0.0;
        true
    }

    /// Fires at `target` if the projectile timer beats a freshly rolled
    /// threshold. Rapid fire bypasses the threshold.
    pub fn try_fire(&mut self, target: Vec2, rng: &mut GameRng, config: &GameConfig) -> bool {
        if !self.profile.has(Capabilities::RANGED) {
            return false;
        }
        if self.rapid_fire {
            self.timers.projectile = FORCE_READY;
        }
        let threshold = self.profile.fire_interval.sample(rng);
        if self.timers.projectile <= threshold {
            return false;
        }
        let Some(kind) = self.next_payload(rng) else {
            return false;
        };

        self.timers.projectile = 0.0;
        self.projectiles.push(Projectile::aimed(
            kind,
            self.profile.ranged_damage,
            self.midpoint(),
            target,
            config.projectile_speed,
            Vec2::splat(config.projectile_size),
        ));
        true
    }

    fn next_payload(&self, rng: &mut GameRng) -> Option<ProjectileKind> {
        if self.profile.has(Capabilities::RANDOM_PAYLOAD) {
            rng.choose(&ProjectileKind::ENEMY_PAYLOADS).copied()
        } else {
            self.profile.projectile
        }
    }

    /// Advances this enemy's projectiles and resolves hits against `target`.
    /// Returns the number of hits.
    pub fn update_projectiles<M, T>(&mut self, dt: f32, map: &M, target: &mut T) -> usize
    where
        M: CostMap + ?Sized,
        T: Combatant + ?Sized,
    {
        self.projectiles.step(dt, map, |projectile| {
            if projectile.bounds().intersects(&target.bounds()) {
                target.receive_damage(projectile.damage, projectile.damage_type());
                true
            } else {
                false
            }
        })
    }

    /// Reaction to a hit that needs world access: an evading archetype
    /// teleports away, drops its route and starts rapid fire.
    pub fn react_to_hit<M>(&mut self, map: &M, anchor: Vec2, rng: &mut GameRng, config: &GameConfig)
    where
        M: CostMap + ?Sized,
    {
        if !self.profile.has(Capabilities::EVADE_ON_HIT) {
            return;
        }
        if let Err(err) = self.teleport_with_retry(map, anchor, rng, config.teleport_retry_limit) {
            debug!(archetype = %self.archetype, error = %err, "evade teleport failed, staying put");
        }
        self.route.clear();
        self.rapid_fire = true;
        self.timers.rapid_fire = 0.0;
        self.timers.projectile = FORCE_READY;
    }

    // ========================================================================
    // Fixed step
    // ========================================================================

    /// Consumes the route by one fixed step.
    ///
    /// With more than one waypoint left the actor snaps onto the head once
    /// closer than `speed * fixed_timestep`, otherwise it moves along its
    /// direction. The final waypoint is dropped without moving so the actor
    /// never stacks onto its target's tile.
    pub fn fixed_tick(&mut self, dt: f32, config: &GameConfig) {
        match self.route.len() {
            0 => self.moving = false,
            1 => {
                self.route.pop_front();
            }
            _ => {
                if let Some(head) = self.route.head() {
                    if self.position.distance(head) < self.profile.speed * config.fixed_timestep {
                        self.position = head;
                        self.route.pop_front();
                        self.aim_at_head();
                    } else {
                        self.position += self.direction * self.profile.speed * dt;
                    }
                }
                self.moving = true;
            }
        }
    }

    /// Whether the actor's midpoint sits outside walkable room space.
    pub fn is_outside_room<M>(&self, map: &M) -> bool
    where
        M: CostMap + ?Sized,
    {
        let here = map.cost_at_point(self.midpoint());
        here == cost::OUTSIDE || here >= cost::HARD_BLOCK
    }

    fn aim_at_head(&mut self) {
        let Some(head) = self.route.head() else {
            return;
        };
        if head == self.position {
            return;
        }
        self.direction = (head - self.position).normalize_or_zero();
        self.turn(self.direction.x);
    }

    fn turn(&mut self, dx: f32) {
        if let Some(facing) = Facing::from_dx(dx) {
            self.facing = facing;
        }
    }
}

impl Movable for EnemyController {
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

impl Attacker for EnemyController {
    fn melee_damage(&self) -> i32 {
        self.profile.melee_damage
    }
}

impl Teleporter for EnemyController {
    fn teleport<M>(&mut self, map: &M, anchor: Vec2, rng: &mut GameRng) -> Result<TileCoord, TeleportError>
    where
        M: CostMap + ?Sized,
    {
        let target = random_offset_tile(map.world_to_tile(anchor), self.profile.max_offset_tiles, rng);
        check_destination(map, target)?;
        // Reachability only; the route itself is discarded.
        plan_route(map, self.midpoint(), target, self.profile.footprint)?;

        self.position = map.tile_to_world(target) - self.profile.footprint * 0.5;
        self.turn(anchor.x - self.midpoint().x);
        self.timers.re_route = 0.0;
        Ok(target)
    }
}

impl Combatant for EnemyController {
    fn bounds(&self) -> Rect {
        EnemyController::bounds(self)
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn midpoint(&self) -> Vec2 {
        EnemyController::midpoint(self)
    }

    /// Applies damage and starts hit feedback. A blinking archetype also
    /// opens its next teleport window immediately.
    fn receive_damage(&mut self, amount: i32, damage_type: DamageType) {
        self.health -= amount;
        self.damage_feedback = Some(damage_type);
        self.timers.damage = 0.0;
        if self.profile.has(Capabilities::BLINK_ON_HIT) {
            self.timers.re_route = FORCE_READY;
        }
    }
}
