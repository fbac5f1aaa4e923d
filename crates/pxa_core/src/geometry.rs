//! Axis-aligned rectangles in screen space.
//!
//! Screen space has its origin at the top-left corner with y growing downward,
//! so `top < bottom` for every non-degenerate rectangle. Overlap tests are
//! strict: rectangles that only share an edge do not intersect.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            left: center.x - size.x * 0.5,
            top: center.y - size.y * 0.5,
            width: size.x,
            height: size.y,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }

    /// Half-open containment: the left/top edges are inside, the right/bottom
    /// edges are not.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_center_places_edges_symmetrically() {
        let rect = Rect::from_center(Vec2::new(100.0, 300.0), Vec2::new(32.0, 32.0));
        assert_eq!(rect.left, 84.0);
        assert_eq!(rect.right(), 116.0);
        assert_eq!(rect.top, 284.0);
        assert_eq!(rect.bottom(), 316.0);
        assert_eq!(rect.center(), Vec2::new(100.0, 300.0));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right_neighbour = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right_neighbour));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn overlapping_rects_intersect_both_ways() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.5, 9.5, 4.0, 4.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(300.0, 175.0, 200.0, 50.0);
        assert!(rect.contains(Vec2::new(300.0, 175.0)));
        assert!(rect.contains(Vec2::new(400.0, 200.0)));
        assert!(!rect.contains(Vec2::new(500.0, 200.0)));
        assert!(!rect.contains(Vec2::new(400.0, 225.0)));
    }
}
