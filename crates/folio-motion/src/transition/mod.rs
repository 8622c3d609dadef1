//! Time-based transitions
//!
//! Eased scalar tweens used by the tile grid, the timeline sequencer and the
//! reveal toggles. All durations are in milliseconds and every tween is a
//! pure function of `now_ms`, so the same clock drives every animation.

mod easing;
mod tween;

pub use easing::{ease_in_out, ease_out_cubic, Ease};
pub use tween::Tween;
