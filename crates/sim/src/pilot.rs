//! Scripted stand-in for a human player.

use game_core::{Aim, Combatant};
use runtime::{FrameInput, Session};

/// Stands still, swings at anything close and shoots at the nearest enemy.
pub fn scripted_input(session: &Session) -> FrameInput {
    let player = session.player();
    let origin = player.midpoint();
    let nearest = session
        .encounter()
        .active()
        .iter()
        .map(|enemy| enemy.midpoint())
        .min_by(|a, b| origin.distance_squared(*a).total_cmp(&origin.distance_squared(*b)));

    let Some(target) = nearest else {
        return FrameInput::default();
    };
    let reach = session.encounter().config().melee_reach + player.profile().footprint.x;
    FrameInput {
        swing: origin.distance(target) <= reach,
        fire: Some(Aim::Cursor(target)),
        ..FrameInput::default()
    }
}
