//! Blackboard handed to behavior tree nodes.

use game_core::{CostMap, EnemyController, GameConfig, GameRng, PlayerView, TileCoord};
use glam::Vec2;

/// Everything a leaf may read or drive during one decision tick.
///
/// The enemy is borrowed mutably for the duration of the tick; the cost grid
/// and configuration are read-only. The player is mutable only so that
/// attacks can land on it.
///
/// # Lifetime
///
/// The `'a` lifetime ties the context to the encounter manager's borrows for
/// a single tick. Trees are built once per enemy and are higher-ranked over
/// `'a`, so the same tree serves every tick.
pub struct AiContext<'a> {
    pub enemy: &'a mut EnemyController,
    pub player: &'a mut dyn PlayerView,
    pub map: &'a dyn CostMap,
    pub config: &'a GameConfig,
    pub rng: &'a mut GameRng,
}

impl<'a> AiContext<'a> {
    pub fn new(
        enemy: &'a mut EnemyController,
        player: &'a mut dyn PlayerView,
        map: &'a dyn CostMap,
        config: &'a GameConfig,
        rng: &'a mut GameRng,
    ) -> Self {
        Self {
            enemy,
            player,
            map,
            config,
            rng,
        }
    }

    pub fn player_midpoint(&self) -> Vec2 {
        self.player.midpoint()
    }

    /// Tile under the player's midpoint.
    pub fn player_tile(&self) -> TileCoord {
        self.map.world_to_tile(self.player.midpoint())
    }

    /// Midpoint-to-midpoint distance between the enemy and the player.
    pub fn distance_to_player(&self) -> f32 {
        self.enemy.midpoint().distance(self.player.midpoint())
    }

    /// Whether the player is strictly inside the enemy's attack range.
    pub fn player_in_attack_range(&self) -> bool {
        self.distance_to_player() < self.enemy.profile().attack_range
    }
}
