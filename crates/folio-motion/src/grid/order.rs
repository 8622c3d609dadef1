//! Diagonal wave ordering for flips

use crate::scroll::ScrollDirection;

/// Position of a cell in the flip wave
///
/// The wave starts at the corner the scroll came from: top-left for a
/// downward scroll, bottom-left for upward, top-right for leftward and
/// bottom-right for rightward.
pub fn order(row: usize, col: usize, rows: usize, cols: usize, direction: ScrollDirection) -> usize {
    let flip_row = rows.saturating_sub(1).saturating_sub(row);
    let flip_col = cols.saturating_sub(1).saturating_sub(col);
    match direction {
        ScrollDirection::Down => row + col,
        ScrollDirection::Up => flip_row + col,
        ScrollDirection::Left => row + flip_col,
        ScrollDirection::Right => flip_row + flip_col,
    }
}

/// Largest value `order` can return on this board
pub fn max_order(rows: usize, cols: usize) -> usize {
    rows.saturating_sub(1) + cols.saturating_sub(1)
}

/// Start delay of a cell, spreading the wave over `total_ms`
pub fn stagger_delay_ms(
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
    direction: ScrollDirection,
    total_ms: f64,
) -> f64 {
    let max = max_order(rows, cols);
    if max == 0 {
        return 0.0;
    }
    order(row, col, rows, cols, direction) as f64 / max as f64 * total_ms
}
