//! Easing functions for animations

use serde::{Deserialize, Serialize};

/// Ease-in-out cubic function
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Ease-out cubic function
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[inline]
fn power_in(t: f32, exp: i32) -> f32 {
    t.powi(exp)
}

#[inline]
fn power_out(t: f32, exp: i32) -> f32 {
    1.0 - (1.0 - t).powi(exp)
}

#[inline]
fn power_in_out(t: f32, exp: i32) -> f32 {
    if t < 0.5 {
        (2.0 * t).powi(exp) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
    }
}

/// Named easing curve
///
/// `powerN` curves follow the usual animation-library naming: `power1` is
/// quadratic, `power2` cubic, `power3` quartic and `power4` quintic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ease {
    #[default]
    #[serde(rename = "none")]
    Linear,
    #[serde(rename = "power1.out")]
    Power1Out,
    #[serde(rename = "power2.in")]
    Power2In,
    #[serde(rename = "power2.out")]
    Power2Out,
    #[serde(rename = "power2.inOut")]
    Power2InOut,
    #[serde(rename = "power3.in")]
    Power3In,
    #[serde(rename = "power3.out")]
    Power3Out,
    #[serde(rename = "power3.inOut")]
    Power3InOut,
    #[serde(rename = "power4.out")]
    Power4Out,
}

impl Ease {
    /// Apply the curve to a linear progress value in `[0, 1]`
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => power_out(t, 2),
            Ease::Power2In => power_in(t, 3),
            Ease::Power2Out => ease_out_cubic(t),
            Ease::Power2InOut => ease_in_out(t),
            Ease::Power3In => power_in(t, 4),
            Ease::Power3Out => power_out(t, 4),
            Ease::Power3InOut => power_in_out(t, 4),
            Ease::Power4Out => power_out(t, 5),
        }
    }
}
