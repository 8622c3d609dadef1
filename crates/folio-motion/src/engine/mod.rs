//! Page engine coordinating all components
//!
//! This module is split into focused submodules:
//! - `lifecycle`: Mount, renderer attachment and teardown
//! - `input`: Wheel, touch, pointer and resize handling
//! - `frame`: The per-frame update order
//! - `snapshot`: Serializable view of one frame

mod frame;
mod input;
mod lifecycle;
mod snapshot;

use folio_hal::{FrameHal, ListenerId, ViewportInfo};

use crate::config::MotionConfig;
use crate::cursor::CursorFollower;
use crate::error::Result;
use crate::grid::TileGrid;
use crate::math::Size;
use crate::render::{FrameRenderer, RenderLoop};
use crate::scroll::SmoothScroll;
use crate::timeline::{presets, ScrollTimeline, TimelineBinding, TriggerGeometry};
use crate::uniforms::UniformSet;

pub use snapshot::FrameSnapshot;

/// Page engine for one mounted view
///
/// Owns the HAL and every component that reads or writes the uniforms:
/// - Smooth-scroll adapter (writes `scroll_offset`, drives timelines)
/// - Render loop (writes `time`, draws the tunnel)
/// - Tile grid (fed by raw scroll deltas and pointer position)
/// - Scroll timeline sequencer
/// - Cursor follower
///
/// Dropping the engine unmounts it.
pub struct PageEngine<H: FrameHal, R: FrameRenderer> {
    pub(crate) hal: H,
    pub(crate) config: MotionConfig,
    pub(crate) uniforms: UniformSet,
    pub(crate) scroll: SmoothScroll,
    pub(crate) render: RenderLoop<R>,
    pub(crate) grid: TileGrid,
    pub(crate) timeline: ScrollTimeline,
    pub(crate) cursor: CursorFollower,
    /// Last viewport received from the host
    pub(crate) viewport: ViewportInfo,
    /// Height of the scrollable document, in CSS pixels
    pub(crate) content_height: f64,
    pub(crate) listeners: Vec<ListenerId>,
    pub(crate) mounted: bool,
}

impl<H: FrameHal, R: FrameRenderer> PageEngine<H, R> {
    /// Create an unmounted engine sized to the host's current viewport
    pub fn new(hal: H, config: MotionConfig) -> Result<Self> {
        config.validate()?;

        let viewport = hal.viewport();
        let css = Size::new(viewport.width, viewport.height);
        let height = viewport.height as f64;

        let mut scroll = SmoothScroll::new(config.scroll.clone());
        scroll.set_extent(height, height);

        Ok(Self {
            uniforms: UniformSet::from_viewport(viewport, config.render.max_pixel_ratio),
            render: RenderLoop::new(&config.render, css),
            grid: TileGrid::new(config.grid.clone(), css),
            timeline: ScrollTimeline::new(height),
            cursor: CursorFollower::new(config.cursor.clone()),
            scroll,
            viewport,
            content_height: height,
            listeners: Vec::new(),
            mounted: false,
            hal,
            config,
        })
    }

    // === Timelines ===

    /// Record where a trigger element sits in the document
    pub fn set_trigger_geometry(&mut self, name: &str, geometry: TriggerGeometry) {
        self.timeline.set_trigger_geometry(name, geometry);
    }

    /// Register a scroll timeline; its trigger must be known
    pub fn add_timeline(&mut self, binding: TimelineBinding) -> Result<()> {
        self.timeline.add(binding)
    }

    /// Register the hero, grid, text reveal and parallax timelines
    ///
    /// Either all of them are registered or none are.
    pub fn add_section_timelines(&mut self) -> Result<()> {
        self.timeline.add_all(presets::section_timelines()?)
    }

    // === Accessors ===

    pub fn hal(&self) -> &H {
        &self.hal
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    pub fn scroll(&self) -> &SmoothScroll {
        &self.scroll
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn timeline(&self) -> &ScrollTimeline {
        &self.timeline
    }

    pub fn cursor(&self) -> &CursorFollower {
        &self.cursor
    }

    pub fn render_loop(&self) -> &RenderLoop<R> {
        &self.render
    }

    pub fn viewport(&self) -> ViewportInfo {
        self.viewport
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the tunnel fell back to the static background
    pub fn is_degraded(&self) -> bool {
        self.render.is_degraded()
    }
}
