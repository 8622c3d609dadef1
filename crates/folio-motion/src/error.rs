//! Error types for the motion engine

use folio_hal::HalError;

/// Errors raised by a frame renderer.
///
/// None of these are fatal to the page: construction failures put the
/// engine into degraded mode and draw failures skip a single frame.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// The canvas could not be turned into a GPU surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreation(String),

    /// No adapter is compatible with the surface.
    #[error("failed to find suitable GPU adapter")]
    AdapterUnavailable,

    /// The adapter refused to create a device.
    #[error("failed to create device: {0}")]
    DeviceRequest(String),

    /// The surface was lost or outdated and has been reconfigured.
    #[error("surface reconfigured, skip frame")]
    SurfaceLost,

    /// The GPU ran out of memory.
    #[error("out of GPU memory")]
    OutOfMemory,

    /// Acquiring the next surface texture timed out.
    #[error("GPU timeout, skip frame")]
    Timeout,

    /// The renderer was used after `release`.
    #[error("renderer already released")]
    Released,
}

/// Errors raised by the motion engine.
#[derive(Debug, thiserror::Error)]
pub enum MotionError {
    /// Configuration JSON could not be parsed.
    #[error("invalid config JSON: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration parsed but holds unusable values.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The host refused an operation.
    #[error("host error: {0}")]
    Hal(HalError),

    /// The renderer failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// A timeline names a trigger element with no known geometry.
    #[error("unknown timeline trigger: {0}")]
    UnknownTrigger(String),

    /// The operation needs a mounted engine.
    #[error("engine is not mounted")]
    NotMounted,

    /// `mount` was called twice.
    #[error("engine is already mounted")]
    AlreadyMounted,
}

impl From<HalError> for MotionError {
    fn from(e: HalError) -> Self {
        MotionError::Hal(e)
    }
}

/// Result alias for engine operations
pub type Result<T> = core::result::Result<T, MotionError>;
