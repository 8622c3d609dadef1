//! Host input handling

use folio_hal::{DeltaMode, FrameHal, HostEvent, ViewportInfo};

use crate::error::{MotionError, Result};
use crate::grid::GridEvent;
use crate::math::{Size, Vec2};
use crate::render::FrameRenderer;
use crate::uniforms::device_resolution;

use super::PageEngine;

impl<H: FrameHal, R: FrameRenderer> PageEngine<H, R> {
    /// Route one host event to its handler
    pub fn dispatch(&mut self, event: HostEvent) -> Result<Vec<GridEvent>> {
        if !self.mounted {
            return Err(MotionError::NotMounted);
        }

        let events = match event {
            HostEvent::Frame { now_ms } => self.on_frame(now_ms),
            HostEvent::Resize {
                width,
                height,
                device_pixel_ratio,
            } => {
                self.on_resize(width, height, device_pixel_ratio);
                Vec::new()
            }
            HostEvent::Wheel { dx, dy, mode } => self.on_wheel(dx, dy, mode).into_iter().collect(),
            HostEvent::Touch { dy } => self.on_touch(dy).into_iter().collect(),
            HostEvent::PointerMove { x, y } => self.on_pointer_move(x, y).into_iter().collect(),
            HostEvent::ContentResize { height } => {
                self.on_content_resize(height);
                Vec::new()
            }
        };
        Ok(events)
    }

    // === Scroll input ===

    /// Wheel delta: moves the scroll target and feeds the flip accumulator
    pub fn on_wheel(&mut self, dx: f64, dy: f64, mode: DeltaMode) -> Option<GridEvent> {
        if !self.mounted {
            return None;
        }
        let scale = mode.to_pixels(self.viewport.height as f64);
        let (dx, dy) = (dx * scale, dy * scale);
        self.scroll.on_wheel(dy);
        self.feed_grid(dx, dy)
    }

    /// Touch drag delta
    pub fn on_touch(&mut self, dy: f64) -> Option<GridEvent> {
        if !self.mounted {
            return None;
        }
        self.scroll.on_touch(dy);
        self.feed_grid(0.0, dy)
    }

    fn feed_grid(&mut self, dx: f64, dy: f64) -> Option<GridEvent> {
        let now = self.hal.now_ms();
        let event = self.grid.on_scroll(dx, dy, now);
        if let Some(GridEvent::FlipStarted { flipped, direction }) = &event {
            self.hal.debug_write(&format!(
                "[folio-grid] flip started (flipped={}, direction={:?})",
                flipped, direction
            ));
        }
        event
    }

    /// Jump or ease to a document position
    pub fn scroll_to(&mut self, position: f64, immediate: bool) {
        self.scroll.scroll_to(position, immediate);
    }

    // === Pointer ===

    /// Pointer position in CSS pixels: moves the cursor and tilts hovered tiles
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> Option<GridEvent> {
        if !self.mounted {
            return None;
        }
        self.cursor.set_pointer(x, y);
        let now = self.hal.now_ms();
        self.grid.pointer_at(Vec2::new(x, y), now)
    }

    // === Geometry ===

    /// Viewport change from the host
    pub fn on_resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        let viewport = ViewportInfo {
            width,
            height,
            device_pixel_ratio,
        };
        self.apply_viewport(viewport);
        let resolution = self.uniforms.resolution();
        self.hal.debug_write(&format!(
            "[folio-engine] resize {}x{} -> {}x{}",
            width, height, resolution.width, resolution.height
        ));
    }

    /// Document height change, e.g. after images load
    pub fn on_content_resize(&mut self, height: f64) {
        if !height.is_finite() || height < 0.0 {
            return;
        }
        self.content_height = height;
        self.scroll
            .set_extent(height, self.viewport.height as f64);
        self.hal.debug_write(&format!(
            "[folio-scroll] extent {} (limit {})",
            height,
            self.scroll.limit()
        ));
    }

    /// Push a viewport into every component that depends on it
    pub(crate) fn apply_viewport(&mut self, viewport: ViewportInfo) {
        let css = Size::new(viewport.width.max(0.0), viewport.height.max(0.0));
        let resolution = device_resolution(viewport, self.config.render.max_pixel_ratio);
        let height = css.height as f64;

        self.viewport = viewport;
        self.uniforms.set_resolution(resolution);
        self.render.resize(css, resolution);
        self.scroll.set_extent(self.content_height.max(height), height);
        self.grid.set_viewport(css);
        self.timeline.set_viewport_height(height);
    }
}
