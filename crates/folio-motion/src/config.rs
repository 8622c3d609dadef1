//! Engine configuration
//!
//! Every tunable constant of the page lives here. The JSON form is partial:
//! any missing field falls back to its default, so `{}` is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};

/// Top-level engine configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub scroll: ScrollConfig,
    pub render: RenderConfig,
    pub grid: GridConfig,
    pub cursor: CursorConfig,
}

/// Smooth-scroll damping
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Fraction of the remaining distance covered per frame
    pub lerp: f64,
    /// Scale applied to wheel deltas
    pub wheel_multiplier: f64,
    /// Scale applied to touch deltas
    pub touch_multiplier: f64,
    /// Distance below which the adapter stops emitting events
    pub settle_epsilon: f64,
    /// `scrollOffset = animated_position / offset_divisor`
    pub offset_divisor: f64,
    /// CSS custom property receiving the progress percentage
    pub progress_property: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            lerp: 0.075,
            wheel_multiplier: 0.8,
            touch_multiplier: 1.5,
            settle_epsilon: 0.01,
            offset_divisor: 1000.0,
            progress_property: "--scroll-progress".to_string(),
        }
    }
}

/// Who schedules render frames
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameDriver {
    /// The render loop requests its own next frame after every draw
    #[default]
    SelfScheduled,
    /// The embedder delivers frames; the loop never reschedules itself
    External,
}

/// Tunnel render loop
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Seconds of shader time per millisecond of wall time
    pub time_scale: f64,
    /// Upper bound on the device pixel ratio
    pub max_pixel_ratio: f32,
    pub driver: FrameDriver,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            time_scale: 0.001,
            max_pixel_ratio: 2.0,
            driver: FrameDriver::SelfScheduled,
        }
    }
}

/// Flipping tile board
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Accumulated scroll delta that triggers a flip
    pub scroll_threshold: f64,
    /// Gap between scroll events that starts a new gesture
    pub gesture_gap_ms: f64,
    /// Minimum time between two flips
    pub flip_debounce_ms: f64,
    /// Rotation time of a single cell
    pub flip_duration_ms: f64,
    /// Delay of the last cell in the wave
    pub stagger_total_ms: f64,
    /// Per-cell hover cooldown
    pub hover_cooldown_ms: f64,
    /// Tilt angle per column, in degrees
    pub tilt_angles: Vec<f32>,
    /// Gap between tiles in CSS pixels
    pub gap: f32,
    /// Padding around the board in CSS pixels
    pub padding: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 6,
            scroll_threshold: 300.0,
            gesture_gap_ms: 200.0,
            flip_debounce_ms: 1000.0,
            flip_duration_ms: 600.0,
            stagger_total_ms: 300.0,
            hover_cooldown_ms: 300.0,
            tilt_angles: vec![-40.0, -20.0, -10.0, 10.0, 20.0, 40.0],
            gap: 4.0,
            padding: 4.0,
        }
    }
}

/// Pointer follower
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Fraction of the remaining distance covered per frame
    pub follow_lerp: f32,
    /// Offset of the follower from the pointer, in CSS pixels
    pub follower_offset: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            follow_lerp: 0.1,
            follower_offset: 12.0,
        }
    }
}

impl MotionConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MotionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| -> Result<()> { Err(MotionError::InvalidConfig(msg.to_string())) };

        if !(self.scroll.lerp > 0.0 && self.scroll.lerp <= 1.0) {
            return invalid("scroll.lerp must be in (0, 1]");
        }
        if self.scroll.offset_divisor <= 0.0 {
            return invalid("scroll.offset_divisor must be positive");
        }
        if self.scroll.settle_epsilon < 0.0 {
            return invalid("scroll.settle_epsilon must not be negative");
        }
        if self.render.max_pixel_ratio < 1.0 {
            return invalid("render.max_pixel_ratio must be at least 1");
        }
        if self.render.time_scale < 0.0 {
            return invalid("render.time_scale must not be negative");
        }
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return invalid("grid must have at least one row and one column");
        }
        if self.grid.scroll_threshold <= 0.0 {
            return invalid("grid.scroll_threshold must be positive");
        }
        if self.grid.flip_duration_ms < 0.0 || self.grid.stagger_total_ms < 0.0 {
            return invalid("grid durations must not be negative");
        }
        if self.grid.tilt_angles.is_empty() {
            return invalid("grid.tilt_angles must not be empty");
        }
        if !(self.cursor.follow_lerp > 0.0 && self.cursor.follow_lerp <= 1.0) {
            return invalid("cursor.follow_lerp must be in (0, 1]");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MotionConfig::default();
        assert!((config.scroll.lerp - 0.075).abs() < 0.001);
        assert!((config.scroll.wheel_multiplier - 0.8).abs() < 0.001);
        assert!((config.scroll.touch_multiplier - 1.5).abs() < 0.001);
        assert_eq!(config.grid.rows, 6);
        assert_eq!(config.grid.cols, 6);
        assert!((config.grid.scroll_threshold - 300.0).abs() < 0.001);
        assert_eq!(config.render.driver, FrameDriver::SelfScheduled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config =
            MotionConfig::from_json(r#"{"grid": {"rows": 4}, "render": {"driver": "external"}}"#)
                .unwrap();
        assert_eq!(config.grid.rows, 4);
        assert_eq!(config.grid.cols, 6);
        assert_eq!(config.render.driver, FrameDriver::External);
        assert!((config.scroll.lerp - 0.075).abs() < 0.001);
    }

    #[test]
    fn test_empty_json() {
        assert_eq!(MotionConfig::from_json("{}").unwrap(), MotionConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            MotionConfig::from_json("{grid"),
            Err(MotionError::Config(_))
        ));
    }

    #[test]
    fn test_validation() {
        let cases = [
            r#"{"scroll": {"lerp": 0.0}}"#,
            r#"{"scroll": {"lerp": 1.5}}"#,
            r#"{"grid": {"cols": 0}}"#,
            r#"{"grid": {"scroll_threshold": -1.0}}"#,
            r#"{"render": {"max_pixel_ratio": 0.5}}"#,
            r#"{"grid": {"tilt_angles": []}}"#,
        ];
        for json in cases {
            assert!(
                matches!(MotionConfig::from_json(json), Err(MotionError::InvalidConfig(_))),
                "{}",
                json
            );
        }
    }
}
