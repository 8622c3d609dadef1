//! Single eased scalar tween

use super::Ease;

/// Eased interpolation of one scalar between two values
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Start time (ms timestamp)
    pub start_ms: f64,
    /// Duration in milliseconds
    pub duration_ms: f64,
    /// Value at progress 0
    pub from: f32,
    /// Value at progress 1
    pub to: f32,
    /// Easing curve
    pub ease: Ease,
}

impl Tween {
    /// Create a tween
    pub fn new(start_ms: f64, duration_ms: f64, from: f32, to: f32, ease: Ease) -> Self {
        Self {
            start_ms,
            duration_ms,
            from,
            to,
            ease,
        }
    }

    /// Time at which the tween reaches its end value
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    /// Get the progress (0.0 to 1.0)
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return if now_ms >= self.start_ms { 1.0 } else { 0.0 };
        }
        let elapsed = now_ms - self.start_ms;
        ((elapsed / self.duration_ms) as f32).clamp(0.0, 1.0)
    }

    /// Check if the tween is complete
    pub fn is_complete(&self, now_ms: f64) -> bool {
        now_ms >= self.end_ms()
    }

    /// Get the eased value at a point in time
    pub fn value(&self, now_ms: f64) -> f32 {
        let t = self.ease.apply(self.progress(now_ms));
        self.from + (self.to - self.from) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_endpoints() {
        let tween = Tween::new(100.0, 400.0, 0.0, 180.0, Ease::Power2InOut);

        assert!((tween.value(0.0) - 0.0).abs() < 0.001);
        assert!((tween.value(100.0) - 0.0).abs() < 0.001);
        assert!((tween.value(300.0) - 90.0).abs() < 0.001);
        assert!((tween.value(500.0) - 180.0).abs() < 0.001);
        assert!((tween.value(9000.0) - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_tween_completion() {
        let tween = Tween::new(0.0, 600.0, 180.0, 0.0, Ease::Linear);
        assert!(!tween.is_complete(599.0));
        assert!(tween.is_complete(600.0));
        assert!((tween.value(150.0) - 135.0).abs() < 0.001);
    }

    #[test]
    fn test_tween_zero_duration() {
        let tween = Tween::new(50.0, 0.0, 0.0, 1.0, Ease::Linear);
        assert!((tween.value(49.0) - 0.0).abs() < 0.001);
        assert!((tween.value(50.0) - 1.0).abs() < 0.001);
        assert!(tween.is_complete(50.0));
    }
}
