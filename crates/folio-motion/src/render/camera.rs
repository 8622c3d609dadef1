//! Orthographic camera

use serde::Serialize;

use crate::math::Size;

/// Orthographic projection centred on the viewport
///
/// Bounds are in CSS pixels: `left = -width / 2`, `top = height / 2`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct OrthoCamera {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoCamera {
    pub fn for_viewport(viewport: Size) -> Self {
        let half_w = viewport.width * 0.5;
        let half_h = viewport.height * 0.5;
        Self {
            left: -half_w,
            right: half_w,
            top: half_h,
            bottom: -half_h,
            near: -1.0,
            far: 1.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}
