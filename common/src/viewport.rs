//! Viewport mapping canvas coordinates onto a character grid

use glam::Vec2;

use crate::Bounds;

/// Orthographic mapping from a canvas rectangle to `cols x rows` cells.
///
/// Canvas y grows downward, matching the cell row index, so no flip is applied.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub bounds: Bounds,
    pub cols: usize,
    pub rows: usize,
}

impl Viewport {
    pub fn new(bounds: Bounds, cols: usize, rows: usize) -> Self {
        Self { bounds, cols, rows }
    }

    /// Canvas units covered by one cell, per axis
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.bounds.width / self.cols.max(1) as f32,
            self.bounds.height / self.rows.max(1) as f32,
        )
    }

    /// Cell holding `point`, or `None` when it falls outside the canvas
    pub fn to_cell(&self, point: Vec2) -> Option<(usize, usize)> {
        if self.cols == 0 || self.rows == 0 || !point.is_finite() || !self.bounds.contains(point) {
            return None;
        }

        let cell = self.cell_size();
        let col = ((point.x / cell.x) as usize).min(self.cols - 1);
        let row = ((point.y / cell.y) as usize).min(self.rows - 1);
        Some((col, row))
    }

    /// Center of a cell in canvas coordinates
    pub fn cell_center(&self, col: usize, row: usize) -> Vec2 {
        let cell = self.cell_size();
        Vec2::new((col as f32 + 0.5) * cell.x, (row as f32 + 0.5) * cell.y)
    }
}
