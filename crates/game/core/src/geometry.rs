//! Axis-aligned rectangles in world space.

use glam::Vec2;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }.normalized()
    }

    /// Rectangle spanning two corners given in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            size: (a - b).abs(),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size * 0.5, size)
    }

    /// Flips negative extents so `min` is always the top-left corner.
    fn normalized(self) -> Self {
        Self::from_corners(self.min, self.min + self.size)
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(16.0));
        let b = Rect::new(Vec2::new(16.0, 0.0), Vec2::splat(16.0));
        assert!(!a.intersects(&b));
        let c = Rect::new(Vec2::new(15.0, 15.0), Vec2::splat(16.0));
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn negative_size_is_normalized() {
        let r = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(-4.0, 6.0));
        assert_eq!(r.min, Vec2::new(6.0, 10.0));
        assert_eq!(r.size, Vec2::new(4.0, 6.0));
    }
}
