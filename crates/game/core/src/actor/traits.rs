//! Capability traits implemented by actors.

use glam::Vec2;
use tracing::debug;

use crate::combat::{Facing, melee_hitbox};
use crate::env::{CostMap, GameRng, TileCoord, cost};
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::Rect;
use crate::pathfinding::PathError;

/// Something with a body in world space.
pub trait Movable {
    /// Top-left corner.
    fn position(&self) -> Vec2;

    fn footprint(&self) -> Vec2;

    fn facing(&self) -> Facing;

    fn midpoint(&self) -> Vec2 {
        self.position() + self.footprint() * 0.5
    }

    fn body(&self) -> Rect {
        Rect::new(self.position(), self.footprint())
    }
}

/// Something that strikes in melee.
pub trait Attacker: Movable {
    fn melee_damage(&self) -> i32;

    /// Hitbox of a strike made right now.
    fn melee_hitbox(&self, reach: f32) -> Rect {
        melee_hitbox(self.body(), self.facing(), reach)
    }
}

/// Why a teleport attempt was rejected. Always recoverable.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TeleportError {
    #[error("tile {tile} has cost {cost} and cannot be a teleport target")]
    InvalidTile { tile: TileCoord, cost: u32 },

    #[error("teleport target is unreachable: {0}")]
    Unreachable(#[from] PathError),

    #[error("no valid teleport target after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

impl GameError for TeleportError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTile { .. } => "TELEPORT_INVALID_TILE",
            Self::Unreachable(_) => "TELEPORT_UNREACHABLE",
            Self::Exhausted { .. } => "TELEPORT_EXHAUSTED",
        }
    }
}

/// Something that relocates instantly next to a target.
pub trait Teleporter: Movable {
    /// One attempt to relocate to a random offset tile around `anchor`.
    ///
    /// Returns the destination tile, or why the drawn tile was rejected. The
    /// actor is untouched on error.
    fn teleport<M>(&mut self, map: &M, anchor: Vec2, rng: &mut GameRng) -> Result<TileCoord, TeleportError>
    where
        M: CostMap + ?Sized;

    /// Repeats [`teleport`](Self::teleport) until one succeeds or `limit`
    /// attempts were made; on exhaustion the actor stays where it is.
    fn teleport_with_retry<M>(
        &mut self,
        map: &M,
        anchor: Vec2,
        rng: &mut GameRng,
        limit: u32,
    ) -> Result<TileCoord, TeleportError>
    where
        M: CostMap + ?Sized,
    {
        for _ in 0..limit {
            match self.teleport(map, anchor, rng) {
                Ok(tile) => return Ok(tile),
                Err(err) => debug!(error = %err, "teleport attempt rejected"),
            }
        }
        Err(TeleportError::Exhausted { attempts: limit })
    }
}

/// Draws a tile offset from `center` by `2..=max_offset` tiles on each axis,
/// with an independent random sign per axis.
pub fn random_offset_tile(center: TileCoord, max_offset: i32, rng: &mut GameRng) -> TileCoord {
    let mut dx = rng.range_inclusive(2, max_offset);
    let mut dy = rng.range_inclusive(2, max_offset);
    if rng.coin_flip() {
        dx = -dx;
    }
    if rng.coin_flip() {
        dy = -dy;
    }
    center.offset(dx, dy)
}

/// Validates a teleport or offset-pursuit destination tile.
pub(crate) fn check_destination<M>(map: &M, tile: TileCoord) -> Result<(), TeleportError>
where
    M: CostMap + ?Sized,
{
    let cost = map.cost_at(tile);
    if cost::is_valid_destination(cost) {
        Ok(())
    } else {
        Err(TeleportError::InvalidTile { tile, cost })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_stay_in_band() {
        let mut rng = GameRng::new(11);
        let center = TileCoord::new(50, 50);
        let mut saw_negative = false;
        for _ in 0..200 {
            let tile = random_offset_tile(center, 8, &mut rng);
            let (dx, dy) = (tile.x - center.x, tile.y - center.y);
            assert!((2..=8).contains(&dx.abs()));
            assert!((2..=8).contains(&dy.abs()));
            saw_negative |= dx < 0;
        }
        assert!(saw_negative);
    }
}
