//! Per-frame update

use folio_hal::FrameHal;

use crate::grid::GridEvent;
use crate::render::FrameRenderer;

use super::PageEngine;

impl<H: FrameHal, R: FrameRenderer> PageEngine<H, R> {
    /// Run one frame
    ///
    /// Order within the frame: scroll damping (uniform offset, progress hook,
    /// host scroll, timelines), tile animations, cursor, then the render
    /// loop which advances `time` once and draws with it.
    pub fn on_frame(&mut self, now_ms: f64) -> Vec<GridEvent> {
        if !self.mounted {
            return Vec::new();
        }

        if let Some(state) = self.scroll.step() {
            self.uniforms
                .set_scroll_offset(state.animated_position / self.config.scroll.offset_divisor);
            let progress = format!("{}%", state.progress * 100.0);
            self.hal
                .set_style_property(&self.config.scroll.progress_property, &progress);
            self.hal.apply_scroll(state.animated_position);
        }
        self.timeline
            .update(self.scroll.animated_position(), now_ms);

        let events = self.grid.tick(now_ms);
        for event in &events {
            if let GridEvent::FlipCompleted { flipped } = event {
                self.hal.debug_write(&format!(
                    "[folio-grid] flip completed (flipped={})",
                    flipped
                ));
            }
        }

        self.cursor.step();

        self.render.frame(&self.hal, now_ms, &mut self.uniforms);

        events
    }
}
