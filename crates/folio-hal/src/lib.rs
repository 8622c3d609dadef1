//! Host Abstraction Layer for the Folio motion engine
//!
//! This crate defines the HAL trait that lets the animation core run
//! unchanged in a browser, in a native shell, or headless under test, by
//! abstracting the host's frame scheduler and input plumbing.
//!
//! # Platform Implementations
//!
//! - **WASM**: `requestAnimationFrame` for frames, DOM `addEventListener` for input,
//!   `performance.now()` for time, `console.log()` for debug output
//! - **Mock**: manual clock and recorded frame requests for deterministic tests

#![no_std]

/// Host Abstraction Layer trait
///
/// Implementations provide platform-specific functionality for:
/// - Frame scheduling (one callback per display refresh)
/// - Input listener registration and removal
/// - Time measurement
/// - Viewport metrics
/// - Style hooks and scroll application
/// - Debug output
///
/// All methods take `&self`: hosts are single-threaded and cooperative, so
/// implementations use interior mutability for their bookkeeping.
pub trait FrameHal: 'static {
    // === Time ===

    /// Get current time in milliseconds (monotonic)
    ///
    /// On WASM: Uses `performance.now()`
    fn now_ms(&self) -> f64;

    // === Frame Scheduling ===

    /// Queue exactly one next-frame callback
    ///
    /// The host later delivers [`HostEvent::Frame`] to whoever owns the
    /// engine. Each request yields at most one frame.
    ///
    /// # Returns
    /// * `Ok(FrameHandle)` - Handle usable with [`FrameHal::cancel_frame`]
    /// * `Err(HalError::FrameRequestFailed)` - The host refused the request
    fn request_frame(&self) -> Result<FrameHandle, HalError>;

    /// Cancel a previously requested frame
    ///
    /// Cancelling a handle that already fired or was already cancelled is a no-op.
    fn cancel_frame(&self, handle: FrameHandle);

    // === Input Listeners ===

    /// Attach a host listener for the given kind of input
    ///
    /// # Returns
    /// * `Ok(ListenerId)` - Id for later removal
    /// * `Err(HalError::ListenerFailed)` - The listener could not be attached
    fn listen(&self, kind: ListenerKind) -> Result<ListenerId, HalError>;

    /// Detach a listener. Removing an unknown id is a no-op.
    fn unlisten(&self, id: ListenerId);

    // === Viewport & Page ===

    /// Current viewport size in CSS pixels plus the raw device pixel ratio
    fn viewport(&self) -> ViewportInfo;

    /// Write a CSS custom property on the document root
    fn set_style_property(&self, name: &str, value: &str);

    /// Move the host scroll container to the given position
    fn apply_scroll(&self, position: f64);

    // === Debug ===

    /// Write a debug message to the platform's console/log
    ///
    /// On WASM: Uses `console.log()`
    fn debug_write(&self, msg: &str);
}

/// HAL errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HalError {
    /// No window/document is available (e.g. running inside a worker)
    NoWindow,
    /// Attaching an input listener failed
    ListenerFailed,
    /// The frame scheduler rejected a request
    FrameRequestFailed,
    /// Operation not supported on this platform
    NotSupported,
    /// Invalid argument
    InvalidArgument,
}

impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            HalError::NoWindow => "no window available",
            HalError::ListenerFailed => "failed to attach listener",
            HalError::FrameRequestFailed => "frame request failed",
            HalError::NotSupported => "operation not supported",
            HalError::InvalidArgument => "invalid argument",
        };
        f.write_str(msg)
    }
}

/// Handle to a queued frame callback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Handle to an attached input listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl ListenerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Kinds of host input the engine listens to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    /// Window resize
    Resize,
    /// Mouse wheel / trackpad
    Wheel,
    /// Touch drag
    Touch,
    /// Pointer movement
    PointerMove,
}

impl ListenerKind {
    /// All listener kinds, in registration order
    pub const ALL: [ListenerKind; 4] = [
        ListenerKind::Resize,
        ListenerKind::Wheel,
        ListenerKind::Touch,
        ListenerKind::PointerMove,
    ];

    /// DOM event name for this listener
    pub fn event_name(&self) -> &'static str {
        match self {
            ListenerKind::Resize => "resize",
            ListenerKind::Wheel => "wheel",
            ListenerKind::Touch => "touchmove",
            ListenerKind::PointerMove => "pointermove",
        }
    }
}

/// Viewport metrics reported by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportInfo {
    /// Width in CSS pixels
    pub width: f32,
    /// Height in CSS pixels
    pub height: f32,
    /// Raw device pixel ratio (uncapped)
    pub device_pixel_ratio: f32,
}

impl Default for ViewportInfo {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            device_pixel_ratio: 1.0,
        }
    }
}

/// Unit of a wheel delta
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeltaMode {
    /// Delta in pixels
    #[default]
    Pixel,
    /// Delta in lines
    Line,
    /// Delta in pages
    Page,
}

impl DeltaMode {
    /// Pixels per line used when normalizing line deltas
    pub const LINE_HEIGHT: f64 = 16.0;

    /// Convert from the DOM `WheelEvent.deltaMode` value
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => DeltaMode::Line,
            2 => DeltaMode::Page,
            _ => DeltaMode::Pixel,
        }
    }

    /// Scale factor converting a delta in this mode to pixels
    pub fn to_pixels(&self, viewport_height: f64) -> f64 {
        match self {
            DeltaMode::Pixel => 1.0,
            DeltaMode::Line => Self::LINE_HEIGHT,
            DeltaMode::Page => viewport_height,
        }
    }
}

/// Events the host delivers to the engine
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// A requested frame fired
    Frame { now_ms: f64 },
    /// Viewport resized (CSS pixels, raw ratio)
    Resize {
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
    },
    /// Wheel input
    Wheel { dx: f64, dy: f64, mode: DeltaMode },
    /// Touch drag delta (positive = content moves up)
    Touch { dy: f64 },
    /// Pointer position in CSS pixels
    PointerMove { x: f32, y: f32 },
    /// Scrollable content height changed
    ContentResize { height: f64 },
}

impl HostEvent {
    /// Short name used in debug output
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::Frame { .. } => "frame",
            HostEvent::Resize { .. } => "resize",
            HostEvent::Wheel { .. } => "wheel",
            HostEvent::Touch { .. } => "touch",
            HostEvent::PointerMove { .. } => "pointer-move",
            HostEvent::ContentResize { .. } => "content-resize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_mode_from_dom() {
        assert_eq!(DeltaMode::from_dom(0), DeltaMode::Pixel);
        assert_eq!(DeltaMode::from_dom(1), DeltaMode::Line);
        assert_eq!(DeltaMode::from_dom(2), DeltaMode::Page);
        assert_eq!(DeltaMode::from_dom(7), DeltaMode::Pixel);
    }

    #[test]
    fn test_delta_mode_to_pixels() {
        assert!((DeltaMode::Pixel.to_pixels(900.0) - 1.0).abs() < 0.001);
        assert!((DeltaMode::Line.to_pixels(900.0) - 16.0).abs() < 0.001);
        assert!((DeltaMode::Page.to_pixels(900.0) - 900.0).abs() < 0.001);
    }

    #[test]
    fn test_listener_kind_event_names() {
        let names: [&str; 4] = ListenerKind::ALL.map(|k| k.event_name());
        assert_eq!(names, ["resize", "wheel", "touchmove", "pointermove"]);
    }
}
