//! Character raster for terminal rendering

use glam::Vec2;

use crate::Viewport;

/// A `cols x rows` grid of glyphs drawn through a [`Viewport`]
pub struct AsciiCanvas {
    viewport: Viewport,
    cells: Vec<char>,
}

impl AsciiCanvas {
    pub fn new(viewport: Viewport) -> Self {
        let cells = vec![' '; viewport.cols * viewport.rows];
        Self { viewport, cells }
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    /// Plot a single point; off-canvas points are dropped
    pub fn plot(&mut self, point: Vec2, glyph: char) {
        if let Some((col, row)) = self.viewport.to_cell(point) {
            self.cells[row * self.viewport.cols + col] = glyph;
        }
    }

    /// Plot a polyline, filling in cells between consecutive vertices
    pub fn polyline(&mut self, points: &[Vec2], glyph: char) {
        let cell = self.viewport.cell_size().min_element().max(f32::EPSILON);

        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let samples = ((b - a).length() / cell).ceil().clamp(1.0, 4096.0) as usize;
            for i in 0..=samples {
                self.plot(a.lerp(b, i as f32 / samples as f32), glyph);
            }
        }

        if let [only] = points {
            self.plot(*only, glyph);
        }
    }

    /// Plot a circle outline of `radius` canvas units around `center`
    pub fn circle(&mut self, center: Vec2, radius: f32, glyph: char) {
        if !(radius.is_finite() && radius > 0.0) {
            return;
        }

        let cell = self.viewport.cell_size().min_element().max(f32::EPSILON);
        let segments = ((std::f32::consts::TAU * radius / cell).ceil() as usize).clamp(8, 4096);
        for i in 0..segments {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            self.plot(center + Vec2::new(angle.cos(), angle.sin()) * radius, glyph);
        }
    }

    /// Fill every cell whose center lies within `radius` of `center`
    pub fn disk(&mut self, center: Vec2, radius: f32, glyph: char) {
        for row in 0..self.viewport.rows {
            for col in 0..self.viewport.cols {
                if self.viewport.cell_center(col, row).distance(center) <= radius {
                    self.cells[row * self.viewport.cols + col] = glyph;
                }
            }
        }
    }

    pub fn glyph_at(&self, col: usize, row: usize) -> Option<char> {
        if col < self.viewport.cols && row < self.viewport.rows {
            Some(self.cells[row * self.viewport.cols + col])
        } else {
            None
        }
    }

    /// Render rows joined by newlines
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.viewport.cols + 1) * self.viewport.rows);
        for row in self.cells.chunks(self.viewport.cols.max(1)) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}
