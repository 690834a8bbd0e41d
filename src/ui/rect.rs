//! Rectangle type for UI layout

use macroquad::math::Vec2;

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create from screen dimensions
    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Rect centered on the origin, used for the arena bounds
    pub const fn centered(half_w: f32, half_h: f32) -> Self {
        Self::new(-half_w, -half_h, half_w * 2.0, half_h * 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Check if a point is inside
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Clamp a point into the rect
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.x, self.right()),
            p.y.clamp(self.y, self.bottom()),
        )
    }

    /// Shrink by padding on all sides
    pub fn pad(&self, padding: f32) -> Self {
        Self::new(
            self.x + padding,
            self.y + padding,
            (self.w - padding * 2.0).max(0.0),
            (self.h - padding * 2.0).max(0.0),
        )
    }

    /// Get a horizontal slice (for toolbars, status bars)
    pub fn slice_top(&self, height: f32) -> Self {
        Self::new(self.x, self.y, self.w, height.min(self.h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(Vec2::new(50.0, 40.0)));
        assert!(!r.contains(Vec2::new(5.0, 40.0)));
        assert!(!r.contains(Vec2::new(50.0, 100.0)));
    }

    #[test]
    fn test_clamp_point() {
        let r = Rect::centered(8.0, 5.0);
        assert_eq!(r.clamp_point(Vec2::new(20.0, 0.0)), Vec2::new(8.0, 0.0));
        assert_eq!(r.clamp_point(Vec2::new(0.0, -9.0)), Vec2::new(0.0, -5.0));
        let inside = Vec2::new(1.0, 1.0);
        assert_eq!(r.clamp_point(inside), inside);
    }

    #[test]
    fn test_slice_top() {
        let r = Rect::new(0.0, 0.0, 100.0, 60.0);
        assert_eq!(r.slice_top(20.0), Rect::new(0.0, 0.0, 100.0, 20.0));
        assert_eq!(r.slice_top(80.0), r);
    }

    #[test]
    fn test_pad() {
        let r = Rect::new(10.0, 10.0, 100.0, 50.0).pad(5.0);
        assert_eq!(r, Rect::new(15.0, 15.0, 90.0, 40.0));
    }
}
