//! Action nodes for AI behavior trees.
//!
//! The whole tree is re-ticked from the root every decision frame, so every
//! action guards itself against redundant work (an active route, a cooldown
//! that has not elapsed) instead of relying on remembered node state.

use behavior_tree::{Behavior, Status};
use game_core::env::cost;
use game_core::{Capabilities, GameError, Teleporter, TileCoord, actor::random_offset_tile};
use tracing::debug;

use crate::ai::AiContext;

/// Drops the current route once the re-route timer passes the configured
/// threshold, forcing the next move leaf to re-path.
///
/// Returns `Running` when it reset, `Success` otherwise.
pub struct PathReset;

impl Behavior<AiContext<'_>> for PathReset {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        if ctx.enemy.timers().re_route > ctx.config.path_reset_secs {
            ctx.enemy.clear_route();
            ctx.enemy.reset_reroute_timer();
            return Status::Running;
        }
        Status::Success
    }
}

/// How [`MoveToTarget`] chooses where to go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Straight for the player's tile.
    Melee,
    /// Straight for the player's tile.
    Mage,
    /// A random tile offset from the player by the archetype's offset range,
    /// re-rolled once the re-route timer beats the archetype's re-route
    /// interval.
    RangerOffset,
}

/// Paths toward a target when the enemy has no route.
///
/// Returns `Running` when a new route was installed and `Success` when there
/// was nothing to do: a route is already active, the target is too close or
/// not walkable, the re-route window is closed, or no route exists.
pub struct MoveToTarget {
    kind: MoveKind,
}

impl MoveToTarget {
    pub fn new(kind: MoveKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    fn pick_target(&self, ctx: &mut AiContext) -> Option<TileCoord> {
        let player_tile = ctx.player_tile();
        match self.kind {
            MoveKind::Melee | MoveKind::Mage => {
                (ctx.map.cost_at(player_tile) < cost::SOFT_BLOCK).then_some(player_tile)
            }
            MoveKind::RangerOffset => {
                let threshold = ctx.enemy.profile().reroute_interval.sample(ctx.rng);
                if ctx.enemy.timers().re_route <= threshold {
                    return None;
                }
                let max_offset = ctx.enemy.profile().max_offset_tiles;
                let tile = random_offset_tile(player_tile, max_offset, ctx.rng);
                cost::is_valid_destination(ctx.map.cost_at(tile)).then_some(tile)
            }
        }
    }
}

impl Behavior<AiContext<'_>> for MoveToTarget {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        if !ctx.enemy.route().is_empty() {
            return Status::Success;
        }
        let Some(target) = self.pick_target(ctx) else {
            return Status::Success;
        };

        let target_point = ctx.map.tile_to_world(target);
        if ctx.enemy.midpoint().distance(target_point) <= ctx.config.move_trigger_distance() {
            return Status::Success;
        }

        match ctx.enemy.route_to(ctx.map, target) {
            Ok(()) => {
                if self.kind == MoveKind::RangerOffset {
                    ctx.enemy.reset_reroute_timer();
                }
                Status::Running
            }
            Err(err) => {
                debug!(
                    archetype = %ctx.enemy.archetype(),
                    severity = %err.severity(),
                    error = %err,
                    "no route to target"
                );
                Status::Success
            }
        }
    }
}

/// Relocates next to the player once the idle timer beats a threshold drawn
/// from the archetype's teleport interval.
///
/// Returns `Running` on a successful teleport, `Success` otherwise. A
/// rejected destination leaves the timer running so another attempt follows
/// on a later frame.
pub struct Teleport;

impl Behavior<AiContext<'_>> for Teleport {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        if !ctx.enemy.profile().has(Capabilities::TELEPORT) {
            return Status::Success;
        }
        let threshold = ctx.enemy.profile().teleport_interval.sample(ctx.rng);
        if ctx.enemy.timers().re_route <= threshold {
            return Status::Success;
        }
        let anchor = ctx.player_midpoint();
        match ctx.enemy.teleport(ctx.map, anchor, ctx.rng) {
            Ok(tile) => {
                debug!(archetype = %ctx.enemy.archetype(), %tile, "teleported");
                Status::Running
            }
            Err(err) => {
                debug!(
                    archetype = %ctx.enemy.archetype(),
                    code = err.error_code(),
                    error = %err,
                    "teleport rejected"
                );
                Status::Success
            }
        }
    }
}

/// Melee strike. The cooldown lives in the controller, so this always
/// returns `Running`.
pub struct AttackMelee;

impl Behavior<AiContext<'_>> for AttackMelee {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        ctx.enemy.try_melee(&mut *ctx.player, ctx.config);
        Status::Running
    }
}

/// Teleporter attack: throws a potion whenever the fire window allows.
/// Always returns `Running`.
pub struct AttackTeleporter;

impl Behavior<AiContext<'_>> for AttackTeleporter {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let target = ctx.player_midpoint();
        ctx.enemy.try_fire(target, ctx.rng, ctx.config);
        Status::Running
    }
}

/// Ranged attack: `Running` if a projectile was fired, `Success` otherwise.
pub struct AttackRanged;

impl Behavior<AiContext<'_>> for AttackRanged {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let target = ctx.player_midpoint();
        if ctx.enemy.try_fire(target, ctx.rng, ctx.config) {
            Status::Running
        } else {
            Status::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{
        Archetype, CostGrid, EnemyController, GameConfig, GameRng, MapDimensions, PlayerProfile,
        PlayerState,
    };
    use glam::Vec2;

    fn arena() -> CostGrid {
        let mut grid = CostGrid::filled(MapDimensions::new(40, 40), 16.0, 10).unwrap();
        grid.fill_rect(TileCoord::new(1, 1), TileCoord::new(38, 38), 1);
        grid
    }

    fn overdue(archetype: Archetype, config: &GameConfig, rng: &mut GameRng) -> EnemyController {
        let profile = config.archetypes.get(archetype).clone();
        let mut enemy = EnemyController::new(archetype, profile, Vec2::splat(48.0), rng);
        enemy.advance_timers(9.0, config);
        enemy
    }

    #[test]
    fn teleport_needs_the_capability() {
        let grid = arena();
        let config = GameConfig::default();
        let mut rng = GameRng::new(3);
        let mut player = PlayerState::new(PlayerProfile::default(), Vec2::splat(320.0));
        let mut ranger = overdue(Archetype::Ranger, &config, &mut rng);
        let start = ranger.position();

        let mut ctx = AiContext::new(&mut ranger, &mut player, &grid, &config, &mut rng);
        assert_eq!(Teleport.tick(&mut ctx), Status::Success);
        assert_eq!(ranger.position(), start);
    }

    #[test]
    fn overdue_teleporter_relocates_near_the_player() {
        let grid = arena();
        let config = GameConfig::default();
        let mut rng = GameRng::new(3);
        let mut player = PlayerState::new(PlayerProfile::default(), Vec2::splat(320.0));
        let mut teleporter = overdue(Archetype::Teleporter, &config, &mut rng);
        let start = teleporter.position();

        let mut ctx = AiContext::new(&mut teleporter, &mut player, &grid, &config, &mut rng);
        assert_eq!(Teleport.tick(&mut ctx), Status::Running);
        assert_ne!(teleporter.position(), start);
        assert_eq!(teleporter.timers().re_route, 0.0);
    }
}
