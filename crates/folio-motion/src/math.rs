//! Geometry shared by the shader reference, the tile layout and the
//! cursor follower. All values are CSS pixels unless a caller says otherwise.

use serde::{Deserialize, Serialize};

/// Point or offset in the plane
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same value on both axes
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Polar angle in radians, measured from +x towards +y
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Move `factor` of the remaining way towards `target`
    ///
    /// One step of exponential smoothing; `factor = 1` lands on the target.
    pub fn approach(self, target: Vec2, factor: f32) -> Vec2 {
        self + (target - self) * factor
    }
}

impl core::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl core::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, k: f32) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

/// Width and height of a viewport, canvas or tile
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Midpoint of a box of this size anchored at the origin
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }

    /// True when nothing can be drawn into it
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Tile rectangle; the right and bottom edges are outside it
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (self.x..self.right()).contains(&point.x) && (self.y..self.bottom()).contains(&point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_polar() {
        let v = Vec2::new(3.0, 4.0);
        assert!((v.length() - 5.0).abs() < 0.001);
        assert!((Vec2::new(0.0, 2.0).angle() - core::f32::consts::FRAC_PI_2).abs() < 0.001);
        assert!((Vec2::new(-1.0, 0.0).angle() - core::f32::consts::PI).abs() < 0.001);
    }

    #[test]
    fn test_vec2_approach() {
        let halfway = Vec2::ZERO.approach(Vec2::new(10.0, -10.0), 0.5);
        assert!((halfway.x - 5.0).abs() < 0.001);
        assert!((halfway.y + 5.0).abs() < 0.001);

        let landed = Vec2::splat(3.0).approach(Vec2::new(7.0, 9.0), 1.0);
        assert_eq!(landed, Vec2::new(7.0, 9.0));
    }

    #[test]
    fn test_size_center_and_empty() {
        let size = Size::new(800.0, 600.0);
        assert_eq!(size.center(), Vec2::new(400.0, 300.0));
        assert!((size.min_side() - 600.0).abs() < 0.001);

        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(Size::new(f32::NAN, 10.0).is_empty());
        assert!(!size.is_empty());
    }

    #[test]
    fn test_rect_edges_exclusive() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(109.9, 59.9)));
        assert!(!rect.contains(Vec2::new(110.0, 30.0)));
        assert!(!rect.contains(Vec2::new(50.0, 60.0)));
        assert!(!rect.contains(Vec2::new(5.0, 30.0)));
    }
}
