//! Frame scheduling and drawing

use folio_hal::{FrameHal, FrameHandle};

use crate::config::{FrameDriver, RenderConfig};
use crate::error::RenderError;
use crate::math::Size;
use crate::uniforms::UniformSet;

use super::OrthoCamera;

/// GPU side of the loop: one full-viewport quad drawn with the uniforms
pub trait FrameRenderer {
    /// Upload the uniforms and draw one frame
    fn draw(&mut self, uniforms: &UniformSet) -> Result<(), RenderError>;

    /// Resize the backing surface, in device pixels
    fn resize(&mut self, width: u32, height: u32);

    /// Release GPU resources; later draws fail with `Released`
    fn release(&mut self);
}

/// What happened during one frame
#[derive(Clone, Debug, PartialEq)]
pub enum FrameOutcome {
    /// The loop is stopped; nothing ran
    Skipped,
    /// Time advanced and one frame was drawn
    Drawn,
    /// Time advanced with no renderer attached
    NoRenderer,
    /// Time advanced but the draw failed
    Failed(RenderError),
}

/// Render loop state
pub struct RenderLoop<R: FrameRenderer> {
    renderer: Option<R>,
    driver: FrameDriver,
    time_scale: f64,
    camera: OrthoCamera,
    running: bool,
    /// Outstanding frame request
    frame: Option<FrameHandle>,
    last_frame_ms: Option<f64>,
    degraded: bool,
    frames_drawn: u64,
    failed_frames: u64,
}

impl<R: FrameRenderer> RenderLoop<R> {
    pub fn new(config: &RenderConfig, viewport: Size) -> Self {
        Self {
            renderer: None,
            driver: config.driver,
            time_scale: config.time_scale,
            camera: OrthoCamera::for_viewport(viewport),
            running: false,
            frame: None,
            last_frame_ms: None,
            degraded: false,
            frames_drawn: 0,
            failed_frames: 0,
        }
    }

    // === Renderer ===

    /// Install the renderer, or fall back to degraded mode
    ///
    /// Returns true when a renderer was installed.
    pub fn attach<H: FrameHal>(
        &mut self,
        hal: &H,
        renderer: Result<R, RenderError>,
        resolution: Size,
    ) -> bool {
        match renderer {
            Ok(mut renderer) => {
                if let Some(mut old) = self.renderer.take() {
                    old.release();
                }
                renderer.resize(resolution.width as u32, resolution.height as u32);
                self.renderer = Some(renderer);
                self.degraded = false;
                hal.debug_write("[folio-render] renderer attached");
                true
            }
            Err(e) => {
                self.degraded = true;
                hal.debug_write(&format!(
                    "[folio-render] renderer unavailable, static fallback: {}",
                    e
                ));
                false
            }
        }
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    /// Whether the renderer could not be created
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    // === Lifecycle ===

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn driver(&self) -> FrameDriver {
        self.driver
    }

    /// Start the loop; a self-scheduled loop queues its first frame
    pub fn start<H: FrameHal>(&mut self, hal: &H) -> Result<(), folio_hal::HalError> {
        if self.running {
            return Ok(());
        }
        if self.driver == FrameDriver::SelfScheduled {
            self.frame = Some(hal.request_frame()?);
        }
        self.running = true;
        self.last_frame_ms = Some(hal.now_ms());
        Ok(())
    }

    /// Run one frame: advance time, draw, reschedule
    ///
    /// A failed draw or reschedule is logged and counted; it never stops
    /// the loop.
    pub fn frame<H: FrameHal>(
        &mut self,
        hal: &H,
        now_ms: f64,
        uniforms: &mut UniformSet,
    ) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Skipped;
        }
        // A frame may arrive while our own request is still queued; drop it
        // so only one chain of requests is ever alive
        if let Some(pending) = self.frame.take() {
            hal.cancel_frame(pending);
        }

        let elapsed_ms = self
            .last_frame_ms
            .map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_frame_ms = Some(now_ms);
        uniforms.advance_time(elapsed_ms * self.time_scale);

        let outcome = match self.renderer.as_mut() {
            None => FrameOutcome::NoRenderer,
            Some(renderer) => match renderer.draw(uniforms) {
                Ok(()) => {
                    self.frames_drawn += 1;
                    FrameOutcome::Drawn
                }
                Err(e) => {
                    self.failed_frames += 1;
                    hal.debug_write(&format!("[folio-render] frame skipped: {}", e));
                    FrameOutcome::Failed(e)
                }
            },
        };

        if self.driver == FrameDriver::SelfScheduled {
            match hal.request_frame() {
                Ok(handle) => self.frame = Some(handle),
                Err(e) => hal.debug_write(&format!("[folio-render] reschedule failed: {}", e)),
            }
        }

        outcome
    }

    /// Follow a viewport change: CSS size for the camera, device size for the surface
    pub fn resize(&mut self, viewport: Size, resolution: Size) {
        self.camera = OrthoCamera::for_viewport(viewport);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(resolution.width as u32, resolution.height as u32);
        }
    }

    /// Stop scheduling and release the renderer. Safe to call repeatedly.
    pub fn stop<H: FrameHal>(&mut self, hal: &H) {
        self.running = false;
        if let Some(handle) = self.frame.take() {
            hal.cancel_frame(handle);
        }
        if let Some(mut renderer) = self.renderer.take() {
            renderer.release();
            hal.debug_write("[folio-render] renderer released");
        }
    }

    // === Queries ===

    pub fn camera(&self) -> OrthoCamera {
        self.camera
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn failed_frames(&self) -> u64 {
        self.failed_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_hal_mock::MockHal;

    #[derive(Default)]
    struct CountingRenderer {
        draws: usize,
        size: (u32, u32),
        fail_next: bool,
        released: bool,
    }

    impl FrameRenderer for CountingRenderer {
        fn draw(&mut self, _uniforms: &UniformSet) -> Result<(), RenderError> {
            if self.released {
                return Err(RenderError::Released);
            }
            if std::mem::take(&mut self.fail_next) {
                return Err(RenderError::Timeout);
            }
            self.draws += 1;
            Ok(())
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }

        fn release(&mut self) {
            self.released = true;
        }
    }

    fn setup() -> (MockHal, RenderLoop<CountingRenderer>, UniformSet) {
        let hal = MockHal::new();
        let size = Size::new(800.0, 600.0);
        let render = RenderLoop::new(&RenderConfig::default(), size);
        (hal, render, UniformSet::new(size))
    }

    #[test]
    fn test_time_advances_by_elapsed() {
        let (hal, mut render, mut uniforms) = setup();
        render.start(&hal).unwrap();

        hal.advance_time(16.0);
        render.frame(&hal, hal.now_ms(), &mut uniforms);
        hal.advance_time(34.0);
        render.frame(&hal, hal.now_ms(), &mut uniforms);

        assert!((uniforms.time() - 0.05).abs() < 0.0001);
    }

    #[test]
    fn test_self_scheduling() {
        let (hal, mut render, mut uniforms) = setup();
        render.start(&hal).unwrap();
        assert_eq!(hal.pending_frame_count(), 1);

        let handle = hal.take_frame().unwrap();
        assert_eq!(render.pending_frame(), Some(handle));
        render.frame(&hal, 16.0, &mut uniforms);
        assert_eq!(hal.pending_frame_count(), 1);
        assert_eq!(hal.frame_request_count(), 2);
    }

    #[test]
    fn test_unsolicited_frames_keep_one_request() {
        let (hal, mut render, mut uniforms) = setup();
        render.start(&hal).unwrap();

        render.frame(&hal, 16.0, &mut uniforms);
        render.frame(&hal, 32.0, &mut uniforms);
        assert_eq!(hal.pending_frame_count(), 1);

        render.stop(&hal);
        assert_eq!(hal.pending_frame_count(), 0);
    }

    #[test]
    fn test_external_driver_never_requests() {
        let hal = MockHal::new();
        let config = RenderConfig {
            driver: FrameDriver::External,
            ..RenderConfig::default()
        };
        let size = Size::new(800.0, 600.0);
        let mut render: RenderLoop<CountingRenderer> = RenderLoop::new(&config, size);
        let mut uniforms = UniformSet::new(size);

        render.start(&hal).unwrap();
        render.frame(&hal, 16.0, &mut uniforms);
        render.frame(&hal, 32.0, &mut uniforms);
        assert_eq!(hal.frame_request_count(), 0);
        assert!(uniforms.time() > 0.0);
    }

    #[test]
    fn test_attach_resizes_and_draws() {
        let (hal, mut render, mut uniforms) = setup();
        assert!(render.attach(&hal, Ok(CountingRenderer::default()), Size::new(1600.0, 1200.0)));
        assert_eq!(render.renderer().unwrap().size, (1600, 1200));

        render.start(&hal).unwrap();
        assert_eq!(render.frame(&hal, 16.0, &mut uniforms), FrameOutcome::Drawn);
        assert_eq!(render.frames_drawn(), 1);
    }

    #[test]
    fn test_failed_attach_degrades() {
        let (hal, mut render, mut uniforms) = setup();
        assert!(!render.attach(&hal, Err(RenderError::AdapterUnavailable), Size::ZERO));
        assert!(render.is_degraded());
        assert!(hal.has_log_containing("static fallback"));

        render.start(&hal).unwrap();
        assert_eq!(render.frame(&hal, 16.0, &mut uniforms), FrameOutcome::NoRenderer);
        assert_eq!(hal.pending_frame_count(), 1);
    }

    #[test]
    fn test_failed_draw_keeps_scheduling() {
        let (hal, mut render, mut uniforms) = setup();
        let renderer = CountingRenderer {
            fail_next: true,
            ..CountingRenderer::default()
        };
        render.attach(&hal, Ok(renderer), Size::new(800.0, 600.0));
        render.start(&hal).unwrap();
        hal.take_frame();

        assert_eq!(
            render.frame(&hal, 16.0, &mut uniforms),
            FrameOutcome::Failed(RenderError::Timeout)
        );
        assert_eq!(render.failed_frames(), 1);
        assert_eq!(hal.pending_frame_count(), 1);

        hal.take_frame();
        assert_eq!(render.frame(&hal, 32.0, &mut uniforms), FrameOutcome::Drawn);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (hal, mut render, mut uniforms) = setup();
        render.attach(&hal, Ok(CountingRenderer::default()), Size::new(800.0, 600.0));
        render.start(&hal).unwrap();

        render.stop(&hal);
        render.stop(&hal);
        assert_eq!(hal.pending_frame_count(), 0);
        assert_eq!(hal.cancelled_frames().len(), 1);
        assert!(!render.has_renderer());

        let requests = hal.frame_request_count();
        assert_eq!(render.frame(&hal, 100.0, &mut uniforms), FrameOutcome::Skipped);
        assert_eq!(hal.frame_request_count(), requests);
    }

    #[test]
    fn test_resize_updates_camera() {
        let (_hal, mut render, _uniforms) = setup();
        render.resize(Size::new(1000.0, 500.0), Size::new(2000.0, 1000.0));
        assert!((render.camera().right - 500.0).abs() < 0.001);
    }
}
