//! Tile rectangles and hit testing

use crate::math::{Rect, Size, Vec2};

/// Tile rectangles for one viewport size, in CSS pixels
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    viewport: Size,
    rows: usize,
    cols: usize,
    tiles: Vec<Rect>,
}

impl GridLayout {
    /// Lay out a board filling the viewport with outer padding and tile gaps
    pub fn compute(viewport: Size, rows: usize, cols: usize, gap: f32, padding: f32) -> Self {
        let inner_w = viewport.width - 2.0 * padding - gap * cols.saturating_sub(1) as f32;
        let inner_h = viewport.height - 2.0 * padding - gap * rows.saturating_sub(1) as f32;
        let tile_w = (inner_w / cols.max(1) as f32).max(0.0);
        let tile_h = (inner_h / rows.max(1) as f32).max(0.0);

        let mut tiles = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                tiles.push(Rect::new(
                    padding + col as f32 * (tile_w + gap),
                    padding + row as f32 * (tile_h + gap),
                    tile_w,
                    tile_h,
                ));
            }
        }

        Self {
            viewport,
            rows,
            cols,
            tiles,
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn tiles(&self) -> &[Rect] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<Rect> {
        self.tiles.get(index).copied()
    }

    /// Index of the tile under a point; `None` over padding or gaps
    pub fn cell_at(&self, point: Vec2) -> Option<usize> {
        let first = self.tiles.first()?;
        let stride_x = if self.cols > 1 {
            self.tiles[1].x - first.x
        } else {
            first.width
        };
        let stride_y = if self.rows > 1 {
            self.tiles[self.cols].y - first.y
        } else {
            first.height
        };
        if stride_x <= 0.0 || stride_y <= 0.0 {
            return None;
        }

        let col = ((point.x - first.x) / stride_x).floor();
        let row = ((point.y - first.y) / stride_y).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }

        let index = row as usize * self.cols + col as usize;
        self.tiles
            .get(index)
            .filter(|rect| rect.contains(point))
            .map(|_| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GridLayout {
        // 6 tiles of 100 plus 5 gaps of 4 plus 2 paddings of 4 = 628
        GridLayout::compute(Size::new(628.0, 628.0), 6, 6, 4.0, 4.0)
    }

    #[test]
    fn test_tile_geometry() {
        let layout = layout();
        assert_eq!(layout.tiles().len(), 36);

        let first = layout.tile(0).unwrap();
        assert!((first.x - 4.0).abs() < 0.001);
        assert!((first.width - 100.0).abs() < 0.001);

        let last = layout.tile(35).unwrap();
        assert!((last.x - 524.0).abs() < 0.001);
        assert!((last.y - 524.0).abs() < 0.001);
    }

    #[test]
    fn test_cell_at() {
        let layout = layout();
        assert_eq!(layout.cell_at(Vec2::new(10.0, 10.0)), Some(0));
        assert_eq!(layout.cell_at(Vec2::new(110.0, 10.0)), Some(1));
        assert_eq!(layout.cell_at(Vec2::new(10.0, 110.0)), Some(6));
        assert_eq!(layout.cell_at(Vec2::new(620.0, 620.0)), Some(35));
    }

    #[test]
    fn test_cell_at_misses() {
        let layout = layout();
        // Padding
        assert_eq!(layout.cell_at(Vec2::new(2.0, 50.0)), None);
        // Gap between column 0 and 1
        assert_eq!(layout.cell_at(Vec2::new(105.0, 50.0)), None);
        // Outside
        assert_eq!(layout.cell_at(Vec2::new(700.0, 50.0)), None);
        assert_eq!(layout.cell_at(Vec2::new(-5.0, 50.0)), None);
    }
}
