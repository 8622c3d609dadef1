//! Mount, renderer attachment and teardown

use folio_hal::{FrameHal, ListenerKind};

use crate::error::{MotionError, RenderError, Result};
use crate::render::FrameRenderer;
use crate::scroll::SmoothScroll;

use super::PageEngine;

impl<H: FrameHal, R: FrameRenderer> PageEngine<H, R> {
    /// Attach listeners and start the render loop
    ///
    /// On failure everything acquired so far is released again and the
    /// engine stays unmounted.
    pub fn mount(&mut self) -> Result<()> {
        if self.mounted {
            return Err(MotionError::AlreadyMounted);
        }

        // A previous unmount tore the adapter down for good
        if !self.scroll.is_active() {
            let position = self.scroll.animated_position();
            self.scroll = SmoothScroll::new(self.config.scroll.clone());
            self.scroll
                .set_extent(self.content_height, self.viewport.height as f64);
            self.scroll.scroll_to(position, true);
        }

        let viewport = self.hal.viewport();
        self.apply_viewport(viewport);

        for kind in ListenerKind::ALL {
            match self.hal.listen(kind) {
                Ok(id) => self.listeners.push(id),
                Err(e) => {
                    self.hal.debug_write(&format!(
                        "[folio-engine] failed to listen for {}: {}",
                        kind.event_name(),
                        e
                    ));
                    self.release_listeners();
                    return Err(e.into());
                }
            }
        }

        if let Err(e) = self.render.start(&self.hal) {
            self.hal
                .debug_write(&format!("[folio-engine] failed to start render loop: {}", e));
            self.release_listeners();
            return Err(e.into());
        }

        self.mounted = true;
        self.hal.debug_write(&format!(
            "[folio-engine] mounted {}x{} (resolution {}x{})",
            viewport.width,
            viewport.height,
            self.uniforms.resolution().width,
            self.uniforms.resolution().height
        ));
        Ok(())
    }

    /// Install the tunnel renderer, or fall back to the static background
    ///
    /// Returns true when the renderer was installed.
    pub fn attach_renderer(&mut self, renderer: core::result::Result<R, RenderError>) -> bool {
        let resolution = self.uniforms.resolution();
        self.render.attach(&self.hal, renderer, resolution)
    }

    /// Tear the view down. Safe to call any number of times.
    ///
    /// Listeners go first so no input reaches a half-released view, then
    /// the scroll adapter, then the frame request and GPU resources.
    pub fn unmount(&mut self) {
        let was_mounted = self.mounted;
        self.mounted = false;

        self.release_listeners();
        self.scroll.teardown();
        self.render.stop(&self.hal);

        if was_mounted {
            self.hal.debug_write("[folio-engine] unmounted");
        }
    }

    fn release_listeners(&mut self) {
        for id in self.listeners.drain(..) {
            self.hal.unlisten(id);
        }
    }
}

impl<H: FrameHal, R: FrameRenderer> Drop for PageEngine<H, R> {
    fn drop(&mut self) {
        self.unmount();
    }
}
