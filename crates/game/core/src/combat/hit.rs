//! Melee hit detection.

use glam::Vec2;

use crate::geometry::Rect;

/// Horizontal facing of an actor sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal delta; `None` when the delta is zero.
    pub fn from_dx(dx: f32) -> Option<Self> {
        if dx < 0.0 {
            Some(Facing::Left)
        } else if dx > 0.0 {
            Some(Facing::Right)
        } else {
            None
        }
    }
}

/// Directional melee hitbox for an attacker occupying `body`.
///
/// Spans from the body's vertical midline to `reach` beyond the leading edge
/// on the facing side, and extends `reach` above and below the body.
pub fn melee_hitbox(body: Rect, facing: Facing, reach: f32) -> Rect {
    let mid_x = body.center().x;
    let max = body.max();
    let (left, right) = match facing {
        Facing::Right => (mid_x, max.x + reach),
        Facing::Left => (body.min.x - reach, mid_x),
    };
    Rect::from_corners(
        Vec2::new(left, body.min.y - reach),
        Vec2::new(right, max.y + reach),
    )
}
