//! Mock HAL implementation for testing the Folio motion engine
//!
//! This provides a mock implementation of the `FrameHal` trait that can be
//! used to drive the engine headlessly: time only moves when the test says
//! so, frames only fire when the test pops them, and every frame request,
//! cancellation and listener change is recorded for later assertions.

#![no_std]
extern crate alloc;

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use folio_hal::{FrameHal, FrameHandle, HalError, ListenerId, ListenerKind, ViewportInfo};

/// One recorded HAL operation, in call order
#[derive(Clone, Debug, PartialEq)]
pub enum HalOp {
    RequestFrame(FrameHandle),
    CancelFrame(FrameHandle),
    Listen(ListenerKind, ListenerId),
    Unlisten(ListenerId),
    ApplyScroll(f64),
}

/// Mock HAL for unit testing
///
/// Provides a manual clock, a queue of pending frames, a live listener set
/// and captured style/scroll/debug output. Clones share the same state, so a
/// test can hand one clone to the engine and inspect another.
#[derive(Clone)]
pub struct MockHal {
    state: Rc<MockState>,
}

/// Shared state behind every clone of a [`MockHal`]
struct MockState {
    /// Simulated time in milliseconds
    time_ms: Cell<f64>,
    /// Viewport reported to the engine
    viewport: Cell<ViewportInfo>,
    /// Next handle/id to assign
    next_id: Cell<u64>,
    /// Frames requested but neither fired nor cancelled
    pending_frames: RefCell<BTreeSet<FrameHandle>>,
    /// Total number of frame requests ever made
    frame_requests: Cell<usize>,
    /// Handles passed to cancel_frame (including repeats)
    cancelled_frames: RefCell<Vec<FrameHandle>>,
    /// Attached listeners
    listeners: RefCell<BTreeMap<ListenerId, ListenerKind>>,
    /// Listener kinds whose registration should fail
    failing_listeners: RefCell<BTreeSet<ListenerKind>>,
    /// CSS custom properties written by the engine
    style: RefCell<BTreeMap<String, String>>,
    /// Captured debug messages
    debug_log: RefCell<Vec<String>>,
    /// Ordered journal of frame/listener/scroll operations
    journal: RefCell<Vec<HalOp>>,
}

impl MockHal {
    /// Create a new mock HAL with a 1920x1080 viewport at ratio 1.0
    pub fn new() -> Self {
        Self::with_viewport(ViewportInfo::default())
    }

    /// Create a mock HAL with a specific viewport
    pub fn with_viewport(viewport: ViewportInfo) -> Self {
        let state = MockState {
            time_ms: Cell::new(0.0),
            viewport: Cell::new(viewport),
            next_id: Cell::new(1),
            pending_frames: RefCell::new(BTreeSet::new()),
            frame_requests: Cell::new(0),
            cancelled_frames: RefCell::new(Vec::new()),
            listeners: RefCell::new(BTreeMap::new()),
            failing_listeners: RefCell::new(BTreeSet::new()),
            style: RefCell::new(BTreeMap::new()),
            debug_log: RefCell::new(Vec::new()),
            journal: RefCell::new(Vec::new()),
        };
        Self {
            state: Rc::new(state),
        }
    }

    fn next_id(&self) -> u64 {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        id
    }

    // === Time ===

    /// Advance the simulated time by the given duration
    pub fn advance_time(&self, ms: f64) {
        self.state.time_ms.set(self.state.time_ms.get() + ms);
    }

    /// Set the simulated time to a specific value
    pub fn set_time(&self, ms: f64) {
        self.state.time_ms.set(ms);
    }

    // === Frames ===

    /// Pop the oldest pending frame, as the host would when it fires
    pub fn take_frame(&self) -> Option<FrameHandle> {
        let mut pending = self.state.pending_frames.borrow_mut();
        let first = pending.iter().next().copied()?;
        pending.remove(&first);
        Some(first)
    }

    /// Number of frames currently queued
    pub fn pending_frame_count(&self) -> usize {
        self.state.pending_frames.borrow().len()
    }

    /// Total number of frame requests ever made
    pub fn frame_request_count(&self) -> usize {
        self.state.frame_requests.get()
    }

    /// Handles that were cancelled, in call order
    pub fn cancelled_frames(&self) -> Vec<FrameHandle> {
        self.state.cancelled_frames.borrow().clone()
    }

    // === Listeners ===

    /// Make future `listen` calls for this kind fail
    pub fn fail_listener(&self, kind: ListenerKind) {
        self.state.failing_listeners.borrow_mut().insert(kind);
    }

    /// Number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    /// Kinds of the attached listeners
    pub fn active_listeners(&self) -> Vec<ListenerKind> {
        self.state.listeners.borrow().values().copied().collect()
    }

    /// Check whether a listener of this kind is attached
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.state.listeners.borrow().values().any(|k| *k == kind)
    }

    // === Viewport & page ===

    /// Change the viewport reported to the engine
    pub fn set_viewport(&self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.state.viewport.set(ViewportInfo {
            width,
            height,
            device_pixel_ratio,
        });
    }

    /// Read back a CSS custom property
    pub fn style_property(&self, name: &str) -> Option<String> {
        self.state.style.borrow().get(name).cloned()
    }

    /// Last position passed to `apply_scroll`
    pub fn last_scroll(&self) -> Option<f64> {
        self.state.journal.borrow().iter().rev().find_map(|op| match op {
            HalOp::ApplyScroll(position) => Some(*position),
            _ => None,
        })
    }

    // === Journal & debug ===

    /// Ordered journal of operations
    pub fn journal(&self) -> Vec<HalOp> {
        self.state.journal.borrow().clone()
    }

    /// Clear the journal
    pub fn clear_journal(&self) {
        self.state.journal.borrow_mut().clear();
    }

    /// Get all captured debug messages
    pub fn get_debug_log(&self) -> Vec<String> {
        self.state.debug_log.borrow().clone()
    }

    /// Check if a specific message was logged
    pub fn has_log_containing(&self, substr: &str) -> bool {
        self.state.debug_log
            .borrow()
            .iter()
            .any(|msg| msg.contains(substr))
    }
}

impl Default for MockHal {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHal for MockHal {
    fn now_ms(&self) -> f64 {
        self.state.time_ms.get()
    }

    fn request_frame(&self) -> Result<FrameHandle, HalError> {
        let handle = FrameHandle::new(self.next_id());
        self.state.pending_frames.borrow_mut().insert(handle);
        self.state.frame_requests.set(self.state.frame_requests.get() + 1);
        self.state.journal.borrow_mut().push(HalOp::RequestFrame(handle));
        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.state.pending_frames.borrow_mut().remove(&handle);
        self.state.cancelled_frames.borrow_mut().push(handle);
        self.state.journal.borrow_mut().push(HalOp::CancelFrame(handle));
    }

    fn listen(&self, kind: ListenerKind) -> Result<ListenerId, HalError> {
        if self.state.failing_listeners.borrow().contains(&kind) {
            return Err(HalError::ListenerFailed);
        }
        let id = ListenerId::new(self.next_id());
        self.state.listeners.borrow_mut().insert(id, kind);
        self.state.journal.borrow_mut().push(HalOp::Listen(kind, id));
        Ok(id)
    }

    fn unlisten(&self, id: ListenerId) {
        if self.state.listeners.borrow_mut().remove(&id).is_some() {
            self.state.journal.borrow_mut().push(HalOp::Unlisten(id));
        }
    }

    fn viewport(&self) -> ViewportInfo {
        self.state.viewport.get()
    }

    fn set_style_property(&self, name: &str, value: &str) {
        self.state.style
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn apply_scroll(&self, position: f64) {
        self.state.journal.borrow_mut().push(HalOp::ApplyScroll(position));
    }

    fn debug_write(&self, msg: &str) {
        self.state.debug_log.borrow_mut().push(String::from(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_hal_time() {
        let hal = MockHal::new();
        assert_eq!(hal.now_ms(), 0.0);

        hal.advance_time(16.0);
        assert!((hal.now_ms() - 16.0).abs() < 0.001);

        hal.set_time(1000.0);
        assert!((hal.now_ms() - 1000.0).abs() < 0.001);
    }

    #[test]
    fn test_mock_hal_frames() {
        let hal = MockHal::new();

        let first = hal.request_frame().unwrap();
        let second = hal.request_frame().unwrap();
        assert_eq!(hal.pending_frame_count(), 2);
        assert_eq!(hal.frame_request_count(), 2);

        assert_eq!(hal.take_frame(), Some(first));
        hal.cancel_frame(second);
        assert_eq!(hal.pending_frame_count(), 0);
        assert_eq!(hal.take_frame(), None);

        // Cancelling again is harmless
        hal.cancel_frame(second);
        assert_eq!(hal.cancelled_frames(), alloc::vec![second, second]);
    }

    #[test]
    fn test_mock_hal_listeners() {
        let hal = MockHal::new();

        let resize = hal.listen(ListenerKind::Resize).unwrap();
        let wheel = hal.listen(ListenerKind::Wheel).unwrap();
        assert_eq!(hal.listener_count(), 2);
        assert!(hal.is_listening(ListenerKind::Wheel));

        hal.unlisten(wheel);
        hal.unlisten(wheel);
        assert_eq!(hal.listener_count(), 1);
        assert!(!hal.is_listening(ListenerKind::Wheel));

        hal.unlisten(resize);
        assert_eq!(hal.listener_count(), 0);
    }

    #[test]
    fn test_mock_hal_failing_listener() {
        let hal = MockHal::new();
        hal.fail_listener(ListenerKind::Touch);

        assert_eq!(hal.listen(ListenerKind::Touch), Err(HalError::ListenerFailed));
        assert!(hal.listen(ListenerKind::Resize).is_ok());
    }

    #[test]
    fn test_mock_hal_style_and_scroll() {
        let hal = MockHal::new();

        hal.set_style_property("--scroll-progress", "50%");
        assert_eq!(hal.style_property("--scroll-progress").as_deref(), Some("50%"));
        assert_eq!(hal.style_property("--missing"), None);

        assert_eq!(hal.last_scroll(), None);
        hal.apply_scroll(10.0);
        hal.apply_scroll(20.0);
        assert_eq!(hal.last_scroll(), Some(20.0));
    }

    #[test]
    fn test_mock_hal_clones_share_state() {
        let hal = MockHal::new();
        let observer = hal.clone();

        hal.listen(ListenerKind::Resize).unwrap();
        hal.advance_time(5.0);
        assert_eq!(observer.listener_count(), 1);
        assert!((observer.now_ms() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_mock_hal_debug_log() {
        let hal = MockHal::new();

        hal.debug_write("Hello");
        hal.debug_write("World");

        let log = hal.get_debug_log();
        assert_eq!(log.len(), 2);
        assert!(hal.has_log_containing("Hello"));
        assert!(!hal.has_log_containing("Foo"));
    }
}
