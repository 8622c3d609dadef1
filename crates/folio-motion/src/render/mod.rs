//! Tunnel render loop
//!
//! The loop owns the frame renderer and the orthographic camera. Each frame
//! it advances shader time by the elapsed wall time, draws once and, when
//! self-scheduled, queues the next frame. The GPU work sits behind
//! [`FrameRenderer`] so the loop runs headless in tests.

mod camera;
mod frame_loop;

pub use camera::OrthoCamera;
pub use frame_loop::{FrameOutcome, FrameRenderer, RenderLoop};
