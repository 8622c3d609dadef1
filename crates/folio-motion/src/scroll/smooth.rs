//! Damped scroll adapter

use crate::config::ScrollConfig;

use super::{ScrollDirection, ScrollState};

/// Callback invoked with every emitted scroll state
pub type ScrollCallback = Box<dyn FnMut(&ScrollState)>;

/// Handle returned by [`SmoothScroll::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Exponentially damped scroll position
///
/// Created at mount, torn down at unmount. After [`SmoothScroll::teardown`]
/// the adapter drops every subscriber, ignores input and never emits again.
pub struct SmoothScroll {
    config: ScrollConfig,
    /// Raw position requested by input
    target: f64,
    /// Damped position
    animated: f64,
    /// Largest reachable position
    limit: f64,
    velocity: f64,
    direction: ScrollDirection,
    /// Emit one event on the next step even if settled
    dirty: bool,
    active: bool,
    subscribers: Vec<(SubscriptionId, ScrollCallback)>,
    next_subscription: u64,
}

impl SmoothScroll {
    /// Create an adapter with an empty extent
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            target: 0.0,
            animated: 0.0,
            limit: 0.0,
            velocity: 0.0,
            direction: ScrollDirection::Down,
            dirty: false,
            active: true,
            subscribers: Vec::new(),
            next_subscription: 1,
        }
    }

    // === Extent ===

    /// Recompute the scrollable extent from content and viewport heights
    ///
    /// Positions beyond the new limit are pulled back, and the next step
    /// emits a state so progress consumers see the new normalization.
    pub fn set_extent(&mut self, content_height: f64, viewport_height: f64) {
        let limit = (content_height - viewport_height).max(0.0);
        if !limit.is_finite() {
            return;
        }
        self.limit = limit;
        self.target = self.target.clamp(0.0, limit);
        self.animated = self.animated.clamp(0.0, limit);
        self.dirty = true;
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    // === Input ===

    /// Apply a wheel delta in pixels
    pub fn on_wheel(&mut self, delta: f64) {
        self.push(delta * self.config.wheel_multiplier);
    }

    /// Apply a touch drag delta in pixels
    pub fn on_touch(&mut self, delta: f64) {
        self.push(delta * self.config.touch_multiplier);
    }

    fn push(&mut self, delta: f64) {
        if !self.active || !delta.is_finite() {
            return;
        }
        self.target = (self.target + delta).clamp(0.0, self.limit);
    }

    /// Move to a position, either eased or at once
    pub fn scroll_to(&mut self, position: f64, immediate: bool) {
        if !self.active || !position.is_finite() {
            return;
        }
        self.target = position.clamp(0.0, self.limit);
        if immediate {
            let previous = self.animated;
            self.animated = self.target;
            self.record_movement(self.animated - previous);
            self.dirty = true;
        }
    }

    // === Frame step ===

    /// Advance the damping by one frame
    ///
    /// Returns the new state and notifies subscribers when the position
    /// moved or was marked dirty; returns `None` once settled.
    pub fn step(&mut self) -> Option<ScrollState> {
        if !self.active {
            return None;
        }

        let remaining = self.target - self.animated;
        if remaining.abs() > self.config.settle_epsilon {
            let before = self.animated;
            self.animated += remaining * self.config.lerp;
            self.record_movement(self.animated - before);
        } else if self.dirty {
            self.velocity = 0.0;
        } else {
            self.velocity = 0.0;
            return None;
        }
        self.dirty = false;

        let state = self.state();
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&state);
        }
        Some(state)
    }

    fn record_movement(&mut self, delta: f64) {
        self.velocity = delta;
        if delta > 0.0 {
            self.direction = ScrollDirection::Down;
        } else if delta < 0.0 {
            self.direction = ScrollDirection::Up;
        }
    }

    // === Queries ===

    /// Current state without stepping
    pub fn state(&self) -> ScrollState {
        ScrollState {
            animated_position: self.animated,
            target: self.target,
            progress: self.progress(),
            velocity: self.velocity,
            direction: self.direction,
        }
    }

    pub fn animated_position(&self) -> f64 {
        self.animated
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Animated position over the extent, `0` when nothing can scroll
    pub fn progress(&self) -> f64 {
        if self.limit > 0.0 {
            (self.animated / self.limit).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Whether the animated position still trails the target
    pub fn is_scrolling(&self) -> bool {
        (self.target - self.animated).abs() > self.config.settle_epsilon
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    // === Subscribers ===

    /// Register a callback for every emitted state
    pub fn subscribe(&mut self, callback: ScrollCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, callback));
        id
    }

    /// Remove a callback. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // === Lifecycle ===

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stop emitting and drop all subscribers
    ///
    /// Returns false when the adapter was already torn down.
    pub fn teardown(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.subscribers.clear();
        self.velocity = 0.0;
        self.dirty = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn adapter(limit: f64) -> SmoothScroll {
        let mut scroll = SmoothScroll::new(ScrollConfig::default());
        scroll.set_extent(limit + 1000.0, 1000.0);
        scroll
    }

    #[test]
    fn test_damping_step() {
        let mut scroll = adapter(5000.0);
        scroll.on_wheel(1000.0);
        assert!((scroll.target() - 800.0).abs() < 0.001);

        let state = scroll.step().unwrap();
        assert!((state.animated_position - 60.0).abs() < 0.001);
        assert!((state.velocity - 60.0).abs() < 0.001);
        assert_eq!(state.direction, ScrollDirection::Down);
    }

    #[test]
    fn test_touch_multiplier() {
        let mut scroll = adapter(5000.0);
        scroll.on_touch(100.0);
        assert!((scroll.target() - 150.0).abs() < 0.001);
    }

    #[test]
    fn test_target_clamped_to_extent() {
        let mut scroll = adapter(500.0);
        scroll.on_wheel(10_000.0);
        assert!((scroll.target() - 500.0).abs() < 0.001);
        scroll.on_wheel(-50_000.0);
        assert!((scroll.target() - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_settles_and_goes_quiet() {
        let mut scroll = adapter(5000.0);
        scroll.scroll_to(100.0, false);

        let mut steps = 0;
        while scroll.step().is_some() {
            steps += 1;
            assert!(steps < 1000);
        }
        assert!((scroll.animated_position() - 100.0).abs() <= 0.01);
        assert!(!scroll.is_scrolling());
        assert!(scroll.step().is_none());
    }

    #[test]
    fn test_scroll_to_immediate() {
        let mut scroll = adapter(1000.0);
        scroll.scroll_to(250.0, true);
        assert!((scroll.animated_position() - 250.0).abs() < 0.001);

        let state = scroll.step().unwrap();
        assert!((state.progress - 0.25).abs() < 0.001);
        assert!(scroll.step().is_none());
    }

    #[test]
    fn test_extent_change_renormalizes() {
        let mut scroll = adapter(1000.0);
        scroll.scroll_to(500.0, true);
        scroll.step();
        assert!((scroll.progress() - 0.5).abs() < 0.001);

        scroll.set_extent(3000.0, 1000.0);
        let state = scroll.step().unwrap();
        assert!((state.progress - 0.25).abs() < 0.001);

        scroll.set_extent(1200.0, 1000.0);
        assert!((scroll.animated_position() - 200.0).abs() < 0.001);
        assert!((scroll.progress() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_no_extent_means_zero_progress() {
        let mut scroll = SmoothScroll::new(ScrollConfig::default());
        scroll.on_wheel(100.0);
        assert!((scroll.progress() - 0.0).abs() < 0.001);
        assert!(scroll.step().is_none());
    }

    #[test]
    fn test_subscribers() {
        let mut scroll = adapter(5000.0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let id = scroll.subscribe(Box::new(move |state: &ScrollState| {
            sink.borrow_mut().push(state.animated_position)
        }));

        scroll.on_wheel(100.0);
        scroll.step();
        scroll.step();
        assert_eq!(seen.borrow().len(), 2);

        assert!(scroll.unsubscribe(id));
        assert!(!scroll.unsubscribe(id));
        scroll.step();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut scroll = adapter(5000.0);
        scroll.subscribe(Box::new(|_: &ScrollState| {}));
        scroll.on_wheel(100.0);

        assert!(scroll.teardown());
        assert!(!scroll.teardown());
        assert_eq!(scroll.subscriber_count(), 0);
        assert!(scroll.step().is_none());

        scroll.on_wheel(100.0);
        assert!((scroll.target() - 80.0).abs() < 0.001);
    }
}
