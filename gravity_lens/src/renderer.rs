//! Terminal renderer for lensing frames

use common::{AsciiCanvas, Viewport};

use crate::frame::Frame;
use crate::ray::Termination;

/// Glyphs for each layer, drawn back to front
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub grid: char,
    pub star: char,
    pub bright_star: char,
    pub einstein: char,
    pub photon_sphere: char,
    pub ray: char,
    pub absorbed_ray: char,
    pub horizon: char,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid: '.',
            star: '+',
            bright_star: '*',
            einstein: 'o',
            photon_sphere: ':',
            ray: '~',
            absorbed_ray: '-',
            horizon: '@',
        }
    }
}

/// Draws frames into a reusable character canvas
pub struct TerminalRenderer {
    canvas: AsciiCanvas,
    palette: Palette,
}

impl TerminalRenderer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            canvas: AsciiCanvas::new(viewport),
            palette: Palette::default(),
        }
    }

    /// Rasterize `frame` and return the text
    pub fn render(&mut self, frame: &Frame) -> String {
        let p = self.palette;
        self.canvas.clear();

        for line in &frame.grid {
            self.canvas.polyline(&line.points, p.grid);
        }

        for star in &frame.stars {
            let glyph = if star.size >= 2.0 { p.bright_star } else { p.star };
            self.canvas.plot(star.position, glyph);
        }

        for point in &frame.einstein_image {
            self.canvas.plot(*point, p.einstein);
        }

        if let Some(radius) = frame.photon_sphere_radius {
            self.canvas.circle(frame.lens.position, radius, p.photon_sphere);
        }

        for ray in &frame.rays {
            if ray.is_empty() {
                continue;
            }
            // Rays that never left the canvas read as captured
            let glyph = match ray.termination {
                Termination::Escaped => p.ray,
                Termination::Exhausted => p.absorbed_ray,
            };
            self.canvas.polyline(&ray.path, glyph);
        }

        self.canvas.disk(frame.lens.position, frame.horizon_radius, p.horizon);

        self.canvas.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LensConfig;
    use crate::frame::{compute_frame, FrameInput};
    use common::Bounds;

    #[test]
    fn test_render_draws_lens_and_rays() {
        let frame = compute_frame(&LensConfig::default(), &FrameInput::default(), &[]).unwrap();
        let mut renderer = TerminalRenderer::new(Viewport::new(Bounds::default(), 80, 30));
        let text = renderer.render(&frame);

        assert_eq!(text.lines().count(), 30);
        assert!(text.contains('@'));
        assert!(text.contains('~') || text.contains('-'));
        // Lens center cell is covered by the horizon disk
        let center_row = text.lines().nth(15).unwrap();
        assert_eq!(center_row.chars().nth(40), Some('@'));
    }
}
