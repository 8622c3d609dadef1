//! Scroll state and direction

use serde::Serialize;

/// Dominant direction of a scroll movement
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl ScrollDirection {
    /// Direction of the larger axis of a delta, `None` for a zero delta
    ///
    /// Positive `dy` scrolls content down the page.
    pub fn from_delta(dx: f64, dy: f64) -> Option<Self> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        if dx.abs() > dy.abs() {
            Some(if dx > 0.0 {
                ScrollDirection::Right
            } else {
                ScrollDirection::Left
            })
        } else if dy > 0.0 {
            Some(ScrollDirection::Down)
        } else {
            Some(ScrollDirection::Up)
        }
    }
}

/// Output of one damping step
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ScrollState {
    /// Damped position trailing the target
    pub animated_position: f64,
    /// Position the damping converges to
    pub target: f64,
    /// `animated_position` over the scrollable extent, in `[0, 1]`
    pub progress: f64,
    /// Movement during the last step
    pub velocity: f64,
    /// Direction of the last non-zero movement
    pub direction: ScrollDirection,
}
