//! Tile board state machine

use serde::Serialize;

use crate::config::GridConfig;
use crate::math::{Size, Vec2};
use crate::scroll::ScrollDirection;

use super::{stagger_delay_ms, GridLayout, ScrollAccumulator, TileAnimation, TileTransform};

/// Board-wide animation phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GridPhase {
    #[default]
    Idle,
    /// A flip is running; new flips and hover tilts are dropped
    Animating,
}

/// Things that happened during a board update
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridEvent {
    FlipStarted {
        flipped: bool,
        direction: ScrollDirection,
    },
    /// One tile reached its flip target
    CellSettled(usize),
    /// The last tile settled; the board is idle again
    FlipCompleted { flipped: bool },
    TiltStarted(usize),
    TiltCompleted(usize),
}

#[derive(Clone, Debug, Default)]
struct Tile {
    transform: TileTransform,
    animation: TileAnimation,
    last_hover_ms: Option<f64>,
}

/// The flipping tile board
pub struct TileGrid {
    config: GridConfig,
    tiles: Vec<Tile>,
    flipped: bool,
    phase: GridPhase,
    direction: ScrollDirection,
    accumulator: ScrollAccumulator,
    last_flip_ms: Option<f64>,
    /// Tiles of the running flip that have not settled yet
    pending: usize,
    viewport: Size,
    layout: Option<GridLayout>,
    hovered: Option<usize>,
}

impl TileGrid {
    /// Create an idle, unflipped board for a viewport in CSS pixels
    pub fn new(config: GridConfig, viewport: Size) -> Self {
        let tiles = vec![Tile::default(); config.rows * config.cols];
        let accumulator = ScrollAccumulator::new(config.gesture_gap_ms);
        Self {
            config,
            tiles,
            flipped: false,
            phase: GridPhase::Idle,
            direction: ScrollDirection::Down,
            accumulator,
            last_flip_ms: None,
            pending: 0,
            viewport,
            layout: None,
            hovered: None,
        }
    }

    // === State ===

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == GridPhase::Animating
    }

    /// Last dominant scroll direction
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn accumulated(&self) -> f64 {
        self.accumulator.total()
    }

    pub fn transform(&self, index: usize) -> Option<TileTransform> {
        self.tiles.get(index).map(|tile| tile.transform)
    }

    pub fn transforms(&self) -> Vec<TileTransform> {
        self.tiles.iter().map(|tile| tile.transform).collect()
    }

    pub fn animation(&self, index: usize) -> Option<&TileAnimation> {
        self.tiles.get(index).map(|tile| &tile.animation)
    }

    /// Tilt angle for a tile, picked by its column
    pub fn tilt_angle(&self, index: usize) -> f32 {
        let angles = &self.config.tilt_angles;
        if angles.is_empty() {
            return 0.0;
        }
        let cols = self.config.cols.max(1);
        let col = index % cols;
        let slot = (col * angles.len() / cols).min(angles.len() - 1);
        angles[slot]
    }

    // === Flip ===

    /// Feed one scroll event
    ///
    /// Crossing the threshold empties the accumulator whether or not the
    /// flip is allowed to start.
    pub fn on_scroll(&mut self, dx: f64, dy: f64, now_ms: f64) -> Option<GridEvent> {
        if let Some(direction) = ScrollDirection::from_delta(dx, dy) {
            self.direction = direction;
        }

        let magnitude = dx.abs().max(dy.abs());
        let total = self.accumulator.push(magnitude, now_ms);
        if total <= self.config.scroll_threshold {
            return None;
        }

        self.accumulator.reset();
        self.trigger_flip(now_ms)
    }

    /// Start a flip unless one is running or the last one was too recent
    pub fn trigger_flip(&mut self, now_ms: f64) -> Option<GridEvent> {
        if self.is_animating() || self.tiles.is_empty() {
            return None;
        }
        if let Some(last) = self.last_flip_ms {
            if now_ms - last < self.config.flip_debounce_ms {
                return None;
            }
        }

        self.phase = GridPhase::Animating;
        self.flipped = !self.flipped;
        self.last_flip_ms = Some(now_ms);
        self.pending = self.tiles.len();

        let target = if self.flipped { 180.0 } else { 0.0 };
        let rows = self.config.rows;
        let cols = self.config.cols;
        for (index, tile) in self.tiles.iter_mut().enumerate() {
            let delay = stagger_delay_ms(
                index / cols,
                index % cols,
                rows,
                cols,
                self.direction,
                self.config.stagger_total_ms,
            );
            // In-flight tilts are taken over from wherever they are
            let from = tile.animation.sample(now_ms).unwrap_or(tile.transform);
            tile.transform = from;
            tile.animation = TileAnimation::flip(
                from,
                target,
                now_ms + delay,
                self.config.flip_duration_ms,
            );
        }

        Some(GridEvent::FlipStarted {
            flipped: self.flipped,
            direction: self.direction,
        })
    }

    // === Hover ===

    /// Tilt one tile, subject to its cooldown; ignored while flipping
    pub fn hover(&mut self, index: usize, now_ms: f64) -> Option<GridEvent> {
        if self.is_animating() {
            return None;
        }
        let cooldown = self.config.hover_cooldown_ms;
        let base = if self.flipped { 180.0 } else { 0.0 };
        let tilt = self.tilt_angle(index);

        let tile = self.tiles.get_mut(index)?;
        if let Some(last) = tile.last_hover_ms {
            if now_ms - last <= cooldown {
                return None;
            }
        }
        tile.last_hover_ms = Some(now_ms);
        tile.animation = TileAnimation::tilt(base, tilt, now_ms);
        tile.transform = TileTransform::new(base, 0.0);

        Some(GridEvent::TiltStarted(index))
    }

    /// Track the pointer and tilt the tile it enters
    pub fn pointer_at(&mut self, point: Vec2, now_ms: f64) -> Option<GridEvent> {
        let cell = self.cell_at(point);
        if cell == self.hovered {
            return None;
        }
        self.hovered = cell;
        cell.and_then(|index| self.hover(index, now_ms))
    }

    // === Frame ===

    /// Advance every tile to `now_ms`
    pub fn tick(&mut self, now_ms: f64) -> Vec<GridEvent> {
        let mut events = Vec::new();

        for (index, tile) in self.tiles.iter_mut().enumerate() {
            if tile.animation.is_idle() {
                continue;
            }
            if !tile.animation.is_complete(now_ms) {
                if let Some(transform) = tile.animation.sample(now_ms) {
                    tile.transform = transform;
                }
                continue;
            }

            if let Some(transform) = tile.animation.final_transform() {
                tile.transform = transform;
            }
            let was_flip = tile.animation.is_flip();
            tile.animation = TileAnimation::Idle;

            if was_flip {
                events.push(GridEvent::CellSettled(index));
                self.pending = self.pending.saturating_sub(1);
            } else {
                events.push(GridEvent::TiltCompleted(index));
            }
        }

        if self.phase == GridPhase::Animating && self.pending == 0 {
            self.phase = GridPhase::Idle;
            events.push(GridEvent::FlipCompleted {
                flipped: self.flipped,
            });
        }

        events
    }

    // === Layout ===

    /// Record a new viewport; the cached layout is dropped
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.layout = None;
    }

    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    /// Tile rectangles, computed on first use after a resize
    pub fn layout(&mut self) -> &GridLayout {
        let config = &self.config;
        let viewport = self.viewport;
        self.layout.get_or_insert_with(|| {
            GridLayout::compute(viewport, config.rows, config.cols, config.gap, config.padding)
        })
    }

    pub fn cell_at(&mut self, point: Vec2) -> Option<usize> {
        self.layout().cell_at(point)
    }
}
