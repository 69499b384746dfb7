//! An active enemy: its controller, the spawn record it came from, and its
//! behavior tree.

use behavior_tree::{Behavior, Status};
use game_core::{
    Archetype, ArchetypeProfile, Capabilities, Combatant, CostMap, DamageType, EnemyController,
    GameConfig, GameRng, PlayerView, Rect, SpawnRecord, Teleporter,
};
use glam::Vec2;
use tracing::{debug, trace};

use crate::ai::{AiContext, BehaviorTree, tree_for};

/// Stable identifier of a spawned enemy, unique within one encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyHandle(pub u64);

impl core::fmt::Display for EnemyHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

pub struct Enemy {
    handle: EnemyHandle,
    spawn: SpawnRecord,
    controller: EnemyController,
    tree: BehaviorTree,
    hit_pending: bool,
}

impl Enemy {
    /// Builds the controller at the record's position and the archetype's tree.
    pub fn spawn(handle: EnemyHandle, spawn: SpawnRecord, profile: ArchetypeProfile, rng: &mut GameRng) -> Self {
        let controller = EnemyController::new(spawn.archetype, profile, spawn.position, rng);
        Self {
            handle,
            spawn,
            controller,
            tree: tree_for(spawn.archetype),
            hit_pending: false,
        }
    }

    pub fn handle(&self) -> EnemyHandle {
        self.handle
    }

    /// The record this enemy was spawned from; returned to the pending pool on
    /// retraction.
    pub fn spawn_record(&self) -> SpawnRecord {
        self.spawn
    }

    pub fn archetype(&self) -> Archetype {
        self.spawn.archetype
    }

    pub fn controller(&self) -> &EnemyController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut EnemyController {
        &mut self.controller
    }

    pub fn position(&self) -> Vec2 {
        self.controller.position()
    }

    /// Decision tick: advance timers, then evaluate the tree from the root.
    pub fn tick(
        &mut self,
        dt: f32,
        map: &dyn CostMap,
        player: &mut dyn PlayerView,
        config: &GameConfig,
        rng: &mut GameRng,
    ) -> Status {
        self.controller.advance_timers(dt, config);
        let mut ctx = AiContext::new(&mut self.controller, player, map, config, rng);
        let status = self.tree.tick(&mut ctx);
        trace!(handle = %self.handle, archetype = %self.spawn.archetype, ?status, "decision tick");
        status
    }

    /// Advances this enemy's projectiles against the player. Returns hits.
    pub fn update_projectiles(&mut self, dt: f32, map: &dyn CostMap, player: &mut dyn PlayerView) -> usize {
        self.controller.update_projectiles(dt, map, player)
    }

    /// Fixed step: route integration, then the room-bound check.
    ///
    /// A room-bound enemy whose midpoint ends up outside walkable space is
    /// teleported back next to `anchor`; when every attempt fails it stays
    /// where it is until the next step.
    pub fn fixed_tick(
        &mut self,
        dt: f32,
        map: &dyn CostMap,
        anchor: Vec2,
        config: &GameConfig,
        rng: &mut GameRng,
    ) {
        self.controller.fixed_tick(dt, config);

        if !self.controller.profile().has(Capabilities::ROOM_BOUND) || !self.controller.is_outside_room(map) {
            return;
        }
        match self
            .controller
            .teleport_with_retry(map, anchor, rng, config.teleport_retry_limit)
        {
            Ok(tile) => {
                self.controller.clear_route();
                debug!(handle = %self.handle, %tile, "left the room, teleported back");
            }
            Err(err) => debug!(handle = %self.handle, error = %err, "left the room, no way back"),
        }
    }

    /// Runs the hit reaction if damage landed since the last call.
    pub fn react_to_hit(&mut self, map: &dyn CostMap, anchor: Vec2, config: &GameConfig, rng: &mut GameRng) {
        if std::mem::take(&mut self.hit_pending) {
            self.controller.react_to_hit(map, anchor, rng, config);
        }
    }
}

impl Combatant for Enemy {
    fn bounds(&self) -> Rect {
        self.controller.bounds()
    }

    fn health(&self) -> i32 {
        self.controller.health()
    }

    fn midpoint(&self) -> Vec2 {
        self.controller.midpoint()
    }

    fn receive_damage(&mut self, amount: i32, damage_type: DamageType) {
        self.controller.receive_damage(amount, damage_type);
        self.hit_pending = true;
    }
}

impl core::fmt::Debug for Enemy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Enemy")
            .field("handle", &self.handle)
            .field("spawn", &self.spawn)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}
