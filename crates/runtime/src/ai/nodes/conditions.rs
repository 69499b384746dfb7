//! Condition nodes for AI behavior trees.
//!
//! Conditions only read the context. The two range checks deliberately
//! differ in what they return when the player is out of range.

use behavior_tree::{Behavior, Status};

use crate::ai::AiContext;

/// Gates a ranged attack on the player being within attack range.
///
/// Returns `Success` in range and `Running` otherwise, which halts the
/// enclosing sequence for this frame so the enemy keeps closing in.
///
/// # Example
///
/// ```rust,ignore
/// // Mage: chase, then cast once in range
/// Sequence::new(vec![
///     Box::new(MoveToTarget::new(MoveKind::Mage)),
///     Box::new(PlayerInRange),
///     Box::new(AttackRanged),
/// ])
/// ```
pub struct PlayerInRange;

impl Behavior<AiContext<'_>> for PlayerInRange {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        if ctx.player_in_attack_range() {
            Status::Success
        } else {
            Status::Running
        }
    }
}

/// Boss-only range check.
///
/// Returns `Failure` out of range so the boss's selector falls through from
/// its melee branch to its ranged branch.
pub struct PlayerInRangeBoss;

impl Behavior<AiContext<'_>> for PlayerInRangeBoss {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        if ctx.player_in_attack_range() {
            Status::Success
        } else {
            Status::Failure
        }
    }
}
