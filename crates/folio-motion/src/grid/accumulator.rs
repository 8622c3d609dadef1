//! Leaky scroll accumulator

/// Sums scroll magnitude within one gesture
///
/// A gap longer than `gap_ms` between two events starts a new gesture and
/// drops whatever was accumulated.
#[derive(Clone, Debug)]
pub struct ScrollAccumulator {
    total: f64,
    last_event_ms: Option<f64>,
    gap_ms: f64,
}

impl ScrollAccumulator {
    pub fn new(gap_ms: f64) -> Self {
        Self {
            total: 0.0,
            last_event_ms: None,
            gap_ms,
        }
    }

    /// Add one event's magnitude and return the running total
    pub fn push(&mut self, magnitude: f64, now_ms: f64) -> f64 {
        if let Some(last) = self.last_event_ms {
            if now_ms - last > self.gap_ms {
                self.total = 0.0;
            }
        }
        if magnitude.is_finite() {
            self.total += magnitude.abs();
        }
        self.last_event_ms = Some(now_ms);
        self.total
    }

    pub fn reset(&mut self) {
        self.total = 0.0;
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_within_gesture() {
        let mut acc = ScrollAccumulator::new(200.0);
        acc.push(100.0, 0.0);
        acc.push(-100.0, 100.0);
        assert!((acc.push(150.0, 250.0) - 350.0).abs() < 0.001);
    }

    #[test]
    fn test_gap_starts_new_gesture() {
        let mut acc = ScrollAccumulator::new(200.0);
        acc.push(250.0, 0.0);
        assert!((acc.push(10.0, 201.0) - 10.0).abs() < 0.001);
        // Exactly the gap still counts as the same gesture
        assert!((acc.push(10.0, 401.0) - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_reset() {
        let mut acc = ScrollAccumulator::new(200.0);
        acc.push(250.0, 0.0);
        acc.reset();
        assert!((acc.total() - 0.0).abs() < 0.001);
        assert!((acc.push(5.0, 10.0) - 5.0).abs() < 0.001);
    }
}
