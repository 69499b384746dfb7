//! Complete trees for each enemy archetype.
//!
//! ```text
//! melee()       Sequence(PathReset, MoveToTarget(melee), AttackMelee)
//! mage()        Sequence(PathReset, MoveToTarget(mage), PlayerInRange, AttackRanged)
//! teleporter()  Sequence(Teleport, AttackTeleporter)
//! ranger()      Sequence(MoveToTarget(ranger offset), PlayerInRange, AttackRanged)
//! boss()        Selector(
//!                   Sequence(PlayerInRangeBoss, PathReset, MoveToTarget(melee), AttackMelee),
//!                   Sequence(MoveToTarget(ranger offset), AttackRanged),
//!               )
//! ```

use behavior_tree::{Behavior, Selector, Sequence};
use game_core::Archetype;

use super::context::AiContext;
use super::nodes::{
    AttackMelee, AttackRanged, AttackTeleporter, MoveKind, MoveToTarget, PathReset, PlayerInRange,
    PlayerInRangeBoss, Teleport,
};

/// A tree usable for any tick, whatever the context's borrow lifetime.
pub type BehaviorTree = Box<dyn for<'a> Behavior<AiContext<'a>>>;

/// Builds the tree for `archetype`. The match is exhaustive, so a new
/// archetype cannot be added without a tree.
pub fn tree_for(archetype: Archetype) -> BehaviorTree {
    match archetype {
        Archetype::Melee => melee(),
        Archetype::Mage => mage(),
        Archetype::Teleporter => teleporter(),
        Archetype::Ranger => ranger(),
        Archetype::Boss => boss(),
    }
}

pub fn melee() -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(PathReset) as BehaviorTree,
        Box::new(MoveToTarget::new(MoveKind::Melee)),
        Box::new(AttackMelee),
    ]))
}

/// Closes in, then casts once the player is in range.
pub fn mage() -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(PathReset) as BehaviorTree,
        Box::new(MoveToTarget::new(MoveKind::Mage)),
        Box::new(PlayerInRange),
        Box::new(AttackRanged),
    ]))
}

/// Never walks; blinks next to the player and throws potions.
pub fn teleporter() -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(Teleport) as BehaviorTree,
        Box::new(AttackTeleporter),
    ]))
}

/// Keeps to a randomized offset around the player and shoots from range.
pub fn ranger() -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(MoveToTarget::new(MoveKind::RangerOffset)) as BehaviorTree,
        Box::new(PlayerInRange),
        Box::new(AttackRanged),
    ]))
}

/// Melee branch while the player is in range, ranged pursuit otherwise.
///
/// Hit reactions (evade teleport, rapid fire) and the room-bound check are
/// driven by the enemy itself, not by the tree.
pub fn boss() -> BehaviorTree {
    let melee_branch = Sequence::new(vec![
        Box::new(PlayerInRangeBoss) as BehaviorTree,
        Box::new(PathReset),
        Box::new(MoveToTarget::new(MoveKind::Melee)),
        Box::new(AttackMelee),
    ]);
    let ranged_branch = Sequence::new(vec![
        Box::new(MoveToTarget::new(MoveKind::RangerOffset)) as BehaviorTree,
        Box::new(AttackRanged),
    ]);
    Box::new(Selector::new(vec![melee_branch, ranged_branch]))
}
