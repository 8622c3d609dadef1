//! Flipping tile board
//!
//! A fixed `rows x cols` board whose tiles flip as a unit once enough scroll
//! has accumulated, sweeping diagonally from the corner the scroll came
//! from. Pointer hover plays a short tilt on one tile while the board is
//! idle.

mod accumulator;
mod board;
mod layout;
mod order;
mod tile;

pub use accumulator::ScrollAccumulator;
pub use board::{GridEvent, GridPhase, TileGrid};
pub use layout::GridLayout;
pub use order::{max_order, order, stagger_delay_ms};
pub use tile::{TileAnimation, TileTransform, TILT_PHASE_MS, TILT_SETTLE_START_MS, TILT_TOTAL_MS};
