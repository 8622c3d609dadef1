//! Shared uniform store
//!
//! The one piece of state read by the tunnel shader every frame. Fields are
//! private: the render loop owns `time` and `resolution`, the scroll path
//! owns `scroll_offset`, and each goes through its own setter.

use folio_hal::ViewportInfo;
use serde::Serialize;

use crate::math::Size;

/// Device pixel ratio clamped to `[1, max_ratio]`
///
/// Hosts occasionally report 0 or NaN for detached windows; those count as 1.
pub fn capped_pixel_ratio(device_pixel_ratio: f32, max_ratio: f32) -> f32 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(max_ratio)
    } else {
        1.0
    }
}

/// Viewport size in device pixels with the ratio capped
pub fn device_resolution(viewport: ViewportInfo, max_ratio: f32) -> Size {
    let ratio = capped_pixel_ratio(viewport.device_pixel_ratio, max_ratio);
    Size::new(
        (viewport.width * ratio).round().max(0.0),
        (viewport.height * ratio).round().max(0.0),
    )
}

/// Uniform values consumed by the shader
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct UniformSet {
    /// Shader time in seconds; never decreases
    time: f64,
    /// Viewport in device pixels
    resolution: Size,
    /// Scroll-derived phase offset
    scroll_offset: f64,
}

impl UniformSet {
    /// Create a uniform set seeded with the current resolution
    pub fn new(resolution: Size) -> Self {
        Self {
            time: 0.0,
            resolution,
            scroll_offset: 0.0,
        }
    }

    /// Create a uniform set seeded from a host viewport
    pub fn from_viewport(viewport: ViewportInfo, max_pixel_ratio: f32) -> Self {
        Self::new(device_resolution(viewport, max_pixel_ratio))
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn resolution(&self) -> Size {
        self.resolution
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Set the shader time. Values below the current time are ignored.
    pub fn set_time(&mut self, time: f64) {
        if time.is_finite() && time > self.time {
            self.time = time;
        }
    }

    /// Advance the shader time by `seconds`. Negative steps are ignored.
    pub fn advance_time(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.time += seconds;
        }
    }

    pub fn set_resolution(&mut self, resolution: Size) {
        self.resolution = resolution;
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        if offset.is_finite() {
            self.scroll_offset = offset;
        }
    }
}
