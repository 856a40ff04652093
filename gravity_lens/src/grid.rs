//! Spacetime grid visualization
//!
//! Straight grid lines are sampled along their length and each sample is
//! displaced once by the deflection field. Each line stays one polyline so
//! the renderer can draw a warped mesh.

use common::Bounds;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::field::{DeflectionModel, LensState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridOrientation {
    /// Constant x, sampled along y
    Vertical,
    /// Constant y, sampled along x
    Horizontal,
}

/// One warped grid line
#[derive(Debug, Clone)]
pub struct GridLine {
    pub orientation: GridOrientation,
    /// x for vertical lines, y for horizontal ones
    pub offset: f32,
    pub rest_points: Vec<Vec2>,
    pub points: Vec<Vec2>,
}

/// Line spacing and sampling density
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub spacing: f32,
    pub sample_step: f32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            spacing: 40.0,
            sample_step: 5.0,
        }
    }
}

/// Build the warped grid: every vertical line first (left to right), then
/// every horizontal line (top to bottom).
///
/// Lines sit at `0, spacing, 2*spacing, ..` up to and including the far
/// edge when it is a multiple of `spacing`. A non-positive `spacing` or
/// `sample_step` yields no lines.
pub fn distort_grid<F: DeflectionModel>(
    bounds: &Bounds,
    spacing: f32,
    sample_step: f32,
    field: &F,
    lens: &LensState,
) -> Vec<GridLine> {
    if !(spacing > 0.0 && sample_step > 0.0) || !bounds.is_valid() {
        return Vec::new();
    }

    let mut lines = Vec::new();

    for x in ticks(bounds.width, spacing) {
        let rest: Vec<Vec2> = ticks(bounds.height, sample_step)
            .map(|y| Vec2::new(x, y))
            .collect();
        lines.push(warp_line(GridOrientation::Vertical, x, rest, field, lens));
    }

    for y in ticks(bounds.height, spacing) {
        let rest: Vec<Vec2> = ticks(bounds.width, sample_step)
            .map(|x| Vec2::new(x, y))
            .collect();
        lines.push(warp_line(GridOrientation::Horizontal, y, rest, field, lens));
    }

    lines
}

fn warp_line<F: DeflectionModel>(
    orientation: GridOrientation,
    offset: f32,
    rest_points: Vec<Vec2>,
    field: &F,
    lens: &LensState,
) -> GridLine {
    let points = rest_points
        .iter()
        .map(|&p| p + field.deflect(p, lens))
        .collect();

    GridLine {
        orientation,
        offset,
        rest_points,
        points,
    }
}

/// `0, step, 2*step, ..` up to `extent` inclusive
fn ticks(extent: f32, step: f32) -> impl Iterator<Item = f32> {
    // Tolerate rounding so 800 / 40 still includes the far edge
    let count = (extent / step + 1e-4).floor() as usize;
    (0..=count).map(move |i| i as f32 * step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::InverseSquareField;

    #[test]
    fn test_line_counts_match_canvas() {
        let lens = LensState::new(Vec2::new(400.0, 300.0), 80.0, 1.5);
        let lines = distort_grid(&Bounds::new(800.0, 600.0), 40.0, 5.0, &InverseSquareField::default(), &lens);

        let vertical: Vec<_> = lines.iter().filter(|l| l.orientation == GridOrientation::Vertical).collect();
        let horizontal: Vec<_> = lines.iter().filter(|l| l.orientation == GridOrientation::Horizontal).collect();

        assert_eq!(vertical.len(), 21);
        assert_eq!(horizontal.len(), 16);
        assert!(vertical.iter().all(|l| l.points.len() == 121));
        assert!(horizontal.iter().all(|l| l.points.len() == 161));
    }

    #[test]
    fn test_samples_are_displaced_not_integrated() {
        let field = InverseSquareField::default();
        let lens = LensState::new(Vec2::new(400.0, 300.0), 80.0, 1.5);
        let lines = distort_grid(&Bounds::new(800.0, 600.0), 40.0, 5.0, &field, &lens);

        for line in &lines {
            for (rest, warped) in line.rest_points.iter().zip(&line.points) {
                assert_eq!(*warped, *rest + field.deflect(*rest, &lens));
            }
        }
    }

    #[test]
    fn test_lines_keep_their_offset() {
        let lens = LensState::new(Vec2::new(400.0, 300.0), 80.0, 1.5);
        let lines = distort_grid(&Bounds::new(800.0, 600.0), 40.0, 5.0, &InverseSquareField::default(), &lens);
        let line = &lines[3];
        assert_eq!(line.orientation, GridOrientation::Vertical);
        assert_eq!(line.offset, 120.0);
        assert!(line.rest_points.iter().all(|p| p.x == 120.0));
    }

    #[test]
    fn test_non_positive_spacing_is_empty() {
        let lens = LensState::default();
        let field = InverseSquareField::default();
        assert!(distort_grid(&Bounds::default(), 0.0, 5.0, &field, &lens).is_empty());
        assert!(distort_grid(&Bounds::default(), 40.0, -1.0, &field, &lens).is_empty());
    }
}
