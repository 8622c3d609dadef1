//! Serializable view of one frame

use folio_hal::FrameHal;
use serde::Serialize;

use crate::cursor::CursorState;
use crate::grid::{GridPhase, TileTransform};
use crate::render::FrameRenderer;
use crate::scroll::ScrollState;
use crate::timeline::{PinState, TimelineValue};
use crate::uniforms::UniformSet;

use super::PageEngine;

/// Everything a host needs to paint the DOM side of one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub uniforms: UniformSet,
    pub scroll: ScrollState,
    pub grid_phase: GridPhase,
    pub flipped: bool,
    /// Row-major tile rotations
    pub tiles: Vec<TileTransform>,
    pub timeline: Vec<TimelineValue>,
    pub pins: Vec<PinState>,
    pub cursor: CursorState,
    /// The tunnel could not be created; show the static background
    pub degraded: bool,
    pub frames_drawn: u64,
    pub failed_frames: u64,
}

impl<H: FrameHal, R: FrameRenderer> PageEngine<H, R> {
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            uniforms: self.uniforms,
            scroll: self.scroll.state(),
            grid_phase: self.grid.phase(),
            flipped: self.grid.flipped(),
            tiles: self.grid.transforms(),
            timeline: self.timeline.values(),
            pins: self.timeline.pins(),
            cursor: self.cursor.state(),
            degraded: self.render.is_degraded(),
            frames_drawn: self.render.frames_drawn(),
            failed_frames: self.render.failed_frames(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotionConfig;
    use crate::error::RenderError;
    use folio_hal_mock::MockHal;

    struct NullRenderer;

    impl FrameRenderer for NullRenderer {
        fn draw(&mut self, _uniforms: &UniformSet) -> Result<(), RenderError> {
            Ok(())
        }
        fn resize(&mut self, _width: u32, _height: u32) {}
        fn release(&mut self) {}
    }

    #[test]
    fn test_snapshot_json() {
        let hal = MockHal::new();
        let mut engine: PageEngine<MockHal, NullRenderer> =
            PageEngine::new(hal.clone(), MotionConfig::default()).unwrap();
        engine.mount().unwrap();
        engine.on_frame(16.0);

        let json = serde_json::to_value(engine.snapshot()).unwrap();
        assert_eq!(json["tiles"].as_array().unwrap().len(), 36);
        assert_eq!(json["grid_phase"], "idle");
        assert_eq!(json["flipped"], false);
        assert_eq!(json["degraded"], false);
        assert!(json["uniforms"]["resolution"]["width"].as_f64().unwrap() > 0.0);
    }
}
