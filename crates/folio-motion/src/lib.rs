//! Scroll-synchronized animation core for the Folio portfolio page
//!
//! This crate provides everything behind the page's motion:
//! - Damped smooth scrolling with a progress hook
//! - The tunnel shader and its render loop
//! - The flipping tile grid with staggered waves and hover tilts
//! - Scroll-triggered timelines (scrub, pin, play/reverse toggles)
//! - A pointer follower
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Core geometry types (`Vec2`, `Size`, `Rect`)
//! - [`transition`]: Easing curves and tweens
//! - [`uniforms`]: The uniform set read by the shader every frame
//! - [`scroll`]: Smooth-scroll adapter
//! - [`render`]: Render loop, camera and the `FrameRenderer` seam
//! - [`grid`]: Tile grid state machine
//! - [`timeline`]: Scroll timeline sequencer and section presets
//! - [`engine`]: `PageEngine` tying them to a [`folio_hal::FrameHal`]
//!
//! ## Example
//!
//! ```rust
//! use folio_hal::HostEvent;
//! use folio_hal_mock::MockHal;
//! use folio_motion::{FrameRenderer, MotionConfig, PageEngine, RenderError, UniformSet};
//!
//! struct Headless;
//!
//! impl FrameRenderer for Headless {
//!     fn draw(&mut self, _uniforms: &UniformSet) -> Result<(), RenderError> {
//!         Ok(())
//!     }
//!     fn resize(&mut self, _width: u32, _height: u32) {}
//!     fn release(&mut self) {}
//! }
//!
//! let hal = MockHal::new();
//! let mut engine: PageEngine<MockHal, Headless> =
//!     PageEngine::new(hal.clone(), MotionConfig::default()).unwrap();
//! engine.attach_renderer(Ok(Headless));
//! engine.mount().unwrap();
//!
//! // The host fires the frame the engine asked for
//! assert!(hal.take_frame().is_some());
//! engine.dispatch(HostEvent::Frame { now_ms: 16.0 }).unwrap();
//! assert!(engine.uniforms().time() > 0.0);
//!
//! engine.unmount();
//! assert_eq!(hal.listener_count(), 0);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state lives here and runs headless under test
//! 2. **Time Abstraction**: Every animation takes `now_ms` from the host clock
//! 3. **One Time Source**: Shader time advances only in the render loop
//! 4. **Explicit Teardown**: Listeners, frames and GPU resources are released in a fixed order

pub mod config;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod grid;
pub mod math;
pub mod render;
pub mod scroll;
pub mod shader;
pub mod timeline;
pub mod transition;
pub mod uniforms;

// wgpu tunnel renderer (only available with "wasm" feature)
#[cfg(feature = "wasm")]
pub mod background;

// Re-export core types for convenience
pub use config::{CursorConfig, FrameDriver, GridConfig, MotionConfig, RenderConfig, ScrollConfig};
pub use cursor::{CursorFollower, CursorState};
pub use engine::{FrameSnapshot, PageEngine};
pub use error::{MotionError, RenderError, Result};
pub use grid::{GridEvent, GridPhase, TileGrid, TileTransform};
pub use math::{Rect, Size, Vec2};
pub use render::{FrameOutcome, FrameRenderer, OrthoCamera, RenderLoop};
pub use scroll::{ScrollDirection, ScrollState, SmoothScroll};
pub use timeline::{ScrollTimeline, TimelineBinding, TriggerGeometry};
pub use uniforms::UniformSet;
