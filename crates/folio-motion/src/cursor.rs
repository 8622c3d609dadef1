//! Pointer follower
//!
//! A dot trailing the pointer, closing a fixed fraction of the gap every
//! frame.

use serde::Serialize;

use crate::config::CursorConfig;
use crate::math::Vec2;

/// Rendered cursor positions, in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CursorState {
    /// Where the pointer is
    pub pointer: Vec2,
    /// Top-left of the follower dot
    pub follower: Vec2,
}

pub struct CursorFollower {
    config: CursorConfig,
    pointer: Vec2,
    position: Vec2,
}

impl CursorFollower {
    pub fn new(config: CursorConfig) -> Self {
        Self {
            config,
            pointer: Vec2::ZERO,
            position: Vec2::ZERO,
        }
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.pointer = Vec2::new(x, y);
        }
    }

    /// Move the follower one frame closer to the pointer
    pub fn step(&mut self) -> CursorState {
        self.position = self.position.approach(self.pointer, self.config.follow_lerp);
        self.state()
    }

    pub fn state(&self) -> CursorState {
        let offset = self.config.follower_offset;
        CursorState {
            pointer: self.pointer,
            follower: self.position - Vec2::splat(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follower_trails_pointer() {
        let mut cursor = CursorFollower::new(CursorConfig::default());
        cursor.set_pointer(100.0, 50.0);

        let state = cursor.step();
        assert!((state.follower.x - (10.0 - 12.0)).abs() < 0.001);
        assert!((state.follower.y - (5.0 - 12.0)).abs() < 0.001);
        assert!((state.pointer.x - 100.0).abs() < 0.001);

        for _ in 0..200 {
            cursor.step();
        }
        let state = cursor.state();
        assert!((state.follower.x - 88.0).abs() < 0.01);
        assert!((state.follower.y - 38.0).abs() < 0.01);
    }

    #[test]
    fn test_ignores_non_finite_pointer() {
        let mut cursor = CursorFollower::new(CursorConfig::default());
        cursor.set_pointer(10.0, 10.0);
        cursor.set_pointer(f32::NAN, 3.0);
        assert!((cursor.state().pointer.x - 10.0).abs() < 0.001);
    }
}
