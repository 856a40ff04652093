//! Per-frame computation
//!
//! A frame is a pure function of the configuration, one [`FrameInput`] and
//! the pre-generated star field. Nothing is carried between calls.

use common::Bounds;
use glam::Vec2;
use log::debug;

use crate::config::LensConfig;
use crate::field::LensState;
use crate::grid::{distort_grid, GridLine};
use crate::ray::Ray;
use crate::stars::{map_points, PointMapper, Star};

/// Everything the driver supplies for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub lens: LensState,
    pub ray_count: usize,
    pub bounds: Bounds,
    pub show_grid: bool,
    pub show_photon_sphere: bool,
    pub show_stars: bool,
    pub show_einstein_ring: bool,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            lens: LensState::default(),
            ray_count: 12,
            bounds: Bounds::default(),
            show_grid: true,
            show_photon_sphere: true,
            show_stars: false,
            show_einstein_ring: false,
        }
    }
}

impl FrameInput {
    /// Check the driver-supplied values once, before any math runs
    pub fn validate(&self) -> Result<(), FrameError> {
        let lens = &self.lens;
        if !lens.position.is_finite() {
            return Err(FrameError::LensPosition(lens.position));
        }
        if !(lens.mass.is_finite() && lens.mass > 0.0) {
            return Err(FrameError::Mass(lens.mass));
        }
        if !(lens.intensity.is_finite() && lens.intensity > 0.0) {
            return Err(FrameError::Intensity(lens.intensity));
        }
        if !self.bounds.is_valid() {
            return Err(FrameError::Bounds(self.bounds));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("lens position must be finite, got {0:?}")]
    LensPosition(Vec2),

    #[error("lens mass must be positive and finite, got {0}")]
    Mass(f32),

    #[error("warp intensity must be positive and finite, got {0}")]
    Intensity(f32),

    #[error("canvas bounds must be positive, got {0:?}")]
    Bounds(Bounds),
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub lens: LensState,
    pub rays: Vec<Ray>,
    pub grid: Vec<GridLine>,
    pub stars: Vec<Star>,
    /// Image-plane points that see the lensed source disk
    pub einstein_image: Vec<Vec2>,
    pub horizon_radius: f32,
    pub photon_sphere_radius: Option<f32>,
}

impl Frame {
    /// Total vertices across all polylines and point sets
    pub fn vertex_count(&self) -> usize {
        self.rays.iter().map(Ray::len).sum::<usize>()
            + self.grid.iter().map(|line| line.points.len()).sum::<usize>()
            + self.stars.len()
            + self.einstein_image.len()
    }
}

/// Recompute the full visual output for one frame
pub fn compute_frame(config: &LensConfig, input: &FrameInput, stars: &[Star]) -> Result<Frame, FrameError> {
    input.validate()?;

    let lens = input.lens;
    let bounds = input.bounds;
    let field = &config.field;

    let starts = config.rays.edge_starts(&bounds, input.ray_count);
    let rays = config.rays.trace_all(&starts, field, &lens, &bounds);

    let grid = if input.show_grid {
        distort_grid(&bounds, config.grid.spacing, config.grid.sample_step, field, &lens)
    } else {
        Vec::new()
    };

    let stars = if input.show_stars {
        let mapper = PointMapper::new(&config.mapping, field);
        map_points(stars, &mapper, &lens, &bounds)
    } else {
        Vec::new()
    };

    let einstein_image = if input.show_einstein_ring {
        let mut model = config.einstein.model;
        let shift = lens.position - model.lens_center;
        model.lens_center = lens.position;
        if config.einstein.follow_lens {
            model.source_center += shift;
        }
        model.classify_image_plane(&bounds, config.einstein.sample_step)
    } else {
        Vec::new()
    };

    let frame = Frame {
        lens,
        rays,
        grid,
        stars,
        einstein_image,
        horizon_radius: field.horizon_radius(&lens),
        photon_sphere_radius: input
            .show_photon_sphere
            .then(|| lens.mass * config.display.photon_sphere_factor),
    };

    debug!(
        "frame: {} rays, {} grid lines, {} stars, {} ring samples, {} vertices",
        frame.rays.len(),
        frame.grid.len(),
        frame.stars.len(),
        frame.einstein_image.len(),
        frame.vertex_count()
    );

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stars::{generate_source_field, SourceFieldSpec};

    #[test]
    fn test_default_frame() {
        let frame = compute_frame(&LensConfig::default(), &FrameInput::default(), &[]).unwrap();
        assert_eq!(frame.rays.len(), 24);
        assert_eq!(frame.grid.len(), 37);
        assert!(frame.stars.is_empty());
        assert!(frame.einstein_image.is_empty());
        assert!((frame.horizon_radius - 48.0).abs() < 1e-4);
        assert!((frame.photon_sphere_radius.unwrap() - 72.0).abs() < 1e-4);
    }

    #[test]
    fn test_toggles_disable_layers() {
        let input = FrameInput {
            show_grid: false,
            show_photon_sphere: false,
            ..Default::default()
        };
        let frame = compute_frame(&LensConfig::default(), &input, &[]).unwrap();
        assert!(frame.grid.is_empty());
        assert!(frame.photon_sphere_radius.is_none());
    }

    #[test]
    fn test_frames_are_independent() {
        let config = LensConfig::default();
        let input = FrameInput::default();
        let a = compute_frame(&config, &input, &[]).unwrap();
        let b = compute_frame(&config, &input, &[]).unwrap();
        for (ra, rb) in a.rays.iter().zip(&b.rays) {
            assert_eq!(ra.path, rb.path);
        }
    }

    #[test]
    fn test_all_outputs_finite() {
        let config = LensConfig::default();
        let bounds = Bounds::default();
        let spec = SourceFieldSpec {
            count: 200,
            ring_fraction: 0.5,
            seed: Some(3),
            ..Default::default()
        };
        let stars = generate_source_field(&spec, &bounds, bounds.center());
        let input = FrameInput {
            show_stars: true,
            show_einstein_ring: true,
            ..Default::default()
        };
        let frame = compute_frame(&config, &input, &stars).unwrap();

        assert_eq!(frame.stars.len(), 200);
        assert!(!frame.einstein_image.is_empty());
        assert!(frame.rays.iter().flat_map(|r| &r.path).all(|p| p.is_finite()));
        assert!(frame.grid.iter().flat_map(|l| &l.points).all(|p| p.is_finite()));
        assert!(frame.stars.iter().all(|s| bounds.contains(s.position)));
        assert!(frame.rays.iter().all(|r| r.len() > 1));
    }

    #[test]
    fn test_einstein_ring_follows_lens() {
        let config = LensConfig::default();
        let input = FrameInput {
            lens: LensState::new(Vec2::new(250.0, 200.0), 80.0, 1.5),
            show_einstein_ring: true,
            ..Default::default()
        };
        let frame = compute_frame(&config, &input, &[]).unwrap();
        let radius = config.einstein.model.einstein_radius;
        assert!(frame
            .einstein_image
            .iter()
            .all(|p| (p.distance(input.lens.position) - radius).abs() < radius * 0.5));
    }

    #[test]
    fn test_rejects_bad_input() {
        let config = LensConfig::default();
        let bad_mass = FrameInput {
            lens: LensState::new(Vec2::new(400.0, 300.0), -1.0, 1.5),
            ..Default::default()
        };
        assert!(matches!(compute_frame(&config, &bad_mass, &[]), Err(FrameError::Mass(_))));

        let bad_position = FrameInput {
            lens: LensState::new(Vec2::new(f32::NAN, 300.0), 80.0, 1.5),
            ..Default::default()
        };
        assert!(matches!(compute_frame(&config, &bad_position, &[]), Err(FrameError::LensPosition(_))));

        let bad_bounds = FrameInput {
            bounds: Bounds::new(0.0, 600.0),
            ..Default::default()
        };
        assert!(matches!(compute_frame(&config, &bad_bounds, &[]), Err(FrameError::Bounds(_))));
    }
}
