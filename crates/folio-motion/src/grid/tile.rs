//! Per-tile transforms and animations

use serde::Serialize;

use crate::transition::{Ease, Tween};

/// Length of the tilt overshoot phase
pub const TILT_PHASE_MS: f64 = 400.0;
/// Offset at which the tilt settle phase takes over
pub const TILT_SETTLE_START_MS: f64 = 200.0;
/// Total length of a tilt
pub const TILT_TOTAL_MS: f64 = TILT_SETTLE_START_MS + TILT_PHASE_MS;

/// 3D rotation of one tile, in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TileTransform {
    pub rotate_x: f32,
    pub rotate_y: f32,
}

impl TileTransform {
    pub const fn new(rotate_x: f32, rotate_y: f32) -> Self {
        Self { rotate_x, rotate_y }
    }
}

/// Animation currently driving a tile
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TileAnimation {
    #[default]
    Idle,
    /// Part of a board-wide flip
    Flip { rotate_x: Tween, rotate_y: Tween },
    /// Hover tilt: overshoot past a quarter turn, then settle a full turn
    /// later on the same face
    Tilt {
        base: f32,
        overshoot_x: Tween,
        overshoot_y: Tween,
        settle_x: Tween,
        settle_y: Tween,
    },
}

impl TileAnimation {
    /// Flip from the tile's current transform to `target_x`, flat on Y
    pub fn flip(from: TileTransform, target_x: f32, start_ms: f64, duration_ms: f64) -> Self {
        TileAnimation::Flip {
            rotate_x: Tween::new(start_ms, duration_ms, from.rotate_x, target_x, Ease::Power2InOut),
            rotate_y: Tween::new(start_ms, duration_ms, from.rotate_y, 0.0, Ease::Power2InOut),
        }
    }

    /// Tilt around the face at `base` degrees
    pub fn tilt(base: f32, tilt: f32, start_ms: f64) -> Self {
        let overshoot_x = Tween::new(start_ms, TILT_PHASE_MS, base, base + 270.0, Ease::Power2Out);
        let overshoot_y = Tween::new(start_ms, TILT_PHASE_MS, 0.0, tilt, Ease::Power2Out);

        // The settle phase picks up wherever the overshoot is when it starts
        let handoff_ms = start_ms + TILT_SETTLE_START_MS;
        let settle_x = Tween::new(
            handoff_ms,
            TILT_PHASE_MS,
            overshoot_x.value(handoff_ms),
            base + 360.0,
            Ease::Power2Out,
        );
        let settle_y = Tween::new(
            handoff_ms,
            TILT_PHASE_MS,
            overshoot_y.value(handoff_ms),
            0.0,
            Ease::Power2Out,
        );

        TileAnimation::Tilt {
            base,
            overshoot_x,
            overshoot_y,
            settle_x,
            settle_y,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, TileAnimation::Idle)
    }

    pub fn is_flip(&self) -> bool {
        matches!(self, TileAnimation::Flip { .. })
    }

    pub fn is_tilt(&self) -> bool {
        matches!(self, TileAnimation::Tilt { .. })
    }

    /// Transform at a point in time, `None` when idle
    pub fn sample(&self, now_ms: f64) -> Option<TileTransform> {
        match self {
            TileAnimation::Idle => None,
            TileAnimation::Flip { rotate_x, rotate_y } => Some(TileTransform::new(
                rotate_x.value(now_ms),
                rotate_y.value(now_ms),
            )),
            TileAnimation::Tilt {
                overshoot_x,
                overshoot_y,
                settle_x,
                settle_y,
                ..
            } => {
                if now_ms < settle_x.start_ms {
                    Some(TileTransform::new(
                        overshoot_x.value(now_ms),
                        overshoot_y.value(now_ms),
                    ))
                } else {
                    Some(TileTransform::new(
                        settle_x.value(now_ms),
                        settle_y.value(now_ms),
                    ))
                }
            }
        }
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        match self {
            TileAnimation::Idle => true,
            TileAnimation::Flip { rotate_x, rotate_y } => {
                rotate_x.is_complete(now_ms) && rotate_y.is_complete(now_ms)
            }
            TileAnimation::Tilt { settle_x, .. } => settle_x.is_complete(now_ms),
        }
    }

    /// Resting transform once the animation has finished
    ///
    /// A tilt ends a full turn past its base, which is the same face.
    pub fn final_transform(&self) -> Option<TileTransform> {
        match self {
            TileAnimation::Idle => None,
            TileAnimation::Flip { rotate_x, rotate_y } => {
                Some(TileTransform::new(rotate_x.to, rotate_y.to))
            }
            TileAnimation::Tilt { base, .. } => Some(TileTransform::new(*base, 0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_sampling() {
        let anim = TileAnimation::flip(TileTransform::default(), 180.0, 100.0, 600.0);
        assert!(anim.is_flip());

        let start = anim.sample(100.0).unwrap();
        assert!((start.rotate_x - 0.0).abs() < 0.001);

        let mid = anim.sample(400.0).unwrap();
        assert!((mid.rotate_x - 90.0).abs() < 0.001);

        assert!(!anim.is_complete(699.0));
        assert!(anim.is_complete(700.0));
        assert_eq!(anim.final_transform(), Some(TileTransform::new(180.0, 0.0)));
    }

    #[test]
    fn test_flip_from_tilted_pose() {
        let anim = TileAnimation::flip(TileTransform::new(300.0, 20.0), 180.0, 0.0, 600.0);
        let end = anim.sample(600.0).unwrap();
        assert!((end.rotate_x - 180.0).abs() < 0.001);
        assert!((end.rotate_y - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_tilt_phases() {
        let anim = TileAnimation::tilt(180.0, -40.0, 1000.0);
        assert!(anim.is_tilt());

        // Phase one snaps to the base face
        let start = anim.sample(1000.0).unwrap();
        assert!((start.rotate_x - 180.0).abs() < 0.001);
        assert!((start.rotate_y - 0.0).abs() < 0.001);

        // Overshoot is heading past base + 180 with the tilt applied
        let overshoot = anim.sample(1150.0).unwrap();
        assert!(overshoot.rotate_x > 180.0);
        assert!(overshoot.rotate_y < 0.0);

        // Settle ends a full turn later, flat
        let end = anim.sample(1600.0).unwrap();
        assert!((end.rotate_x - 540.0).abs() < 0.001);
        assert!((end.rotate_y - 0.0).abs() < 0.001);

        assert!(!anim.is_complete(1599.0));
        assert!(anim.is_complete(1600.0));
        assert_eq!(anim.final_transform(), Some(TileTransform::new(180.0, 0.0)));
    }

    #[test]
    fn test_tilt_settle_is_continuous() {
        let anim = TileAnimation::tilt(0.0, 20.0, 0.0);
        let before = anim.sample(TILT_SETTLE_START_MS - 0.001).unwrap();
        let after = anim.sample(TILT_SETTLE_START_MS).unwrap();
        assert!((before.rotate_x - after.rotate_x).abs() < 0.1);
        assert!((before.rotate_y - after.rotate_y).abs() < 0.1);
    }

    #[test]
    fn test_idle() {
        let anim = TileAnimation::Idle;
        assert!(anim.is_idle());
        assert!(anim.sample(0.0).is_none());
        assert!(anim.is_complete(0.0));
    }
}
