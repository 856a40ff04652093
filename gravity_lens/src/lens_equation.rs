//! Point-mass lens equation
//!
//! Maps an observed image-plane position back to the source plane:
//! `beta = theta - theta_E^2 / |theta|^2 * theta`. Image points whose source
//! position lands inside a circular source form the Einstein ring or arcs.

use common::constants::{C, G};
use common::Bounds;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Floor for the image radius before dividing
pub const IMAGE_RADIUS_EPSILON: f32 = 1e-9;

/// Source-plane offset from the lens for `image_point`: `rel - alpha`,
/// with `rel = image_point - lens_center` and
/// `alpha = einstein_radius^2 / |rel|^2 * rel`.
pub fn relative_source_position(image_point: Vec2, lens_center: Vec2, einstein_radius: f32) -> Vec2 {
    let rel = image_point - lens_center;
    let r = rel.length().max(IMAGE_RADIUS_EPSILON);

    let alpha = rel * (einstein_radius * einstein_radius / (r * r));
    rel - alpha
}

/// Source-plane position of `image_point` in absolute canvas coordinates,
/// i.e. [`relative_source_position`] shifted back by `lens_center`. This is
/// the frame the source disk center is given in.
pub fn source_position(image_point: Vec2, lens_center: Vec2, einstein_radius: f32) -> Vec2 {
    lens_center + relative_source_position(image_point, lens_center, einstein_radius)
}

/// Lens and circular source used to classify image-plane points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EinsteinLensModel {
    pub einstein_radius: f32,
    pub lens_center: Vec2,
    pub source_center: Vec2,
    pub source_radius: f32,
}

impl Default for EinsteinLensModel {
    fn default() -> Self {
        Self {
            einstein_radius: 120.0,
            lens_center: Vec2::new(400.0, 300.0),
            source_center: Vec2::new(400.0, 300.0),
            source_radius: 30.0,
        }
    }
}

impl EinsteinLensModel {
    pub fn source_position(&self, image_point: Vec2) -> Vec2 {
        source_position(image_point, self.lens_center, self.einstein_radius)
    }

    /// Whether `image_point` shows part of the source disk.
    ///
    /// The lens center itself maps to infinity in the source plane and is
    /// never inside.
    pub fn is_inside_source(&self, image_point: Vec2) -> bool {
        if image_point.distance(self.lens_center) < IMAGE_RADIUS_EPSILON {
            return false;
        }
        self.source_position(image_point).distance(self.source_center) < self.source_radius
    }

    /// Image-plane samples on a `step` lattice over `bounds` that see the source.
    ///
    /// Samples are visited row by row, so the output is ordered by y then x.
    pub fn classify_image_plane(&self, bounds: &Bounds, step: f32) -> Vec<Vec2> {
        if !(step > 0.0) || !bounds.is_valid() {
            return Vec::new();
        }

        let cols = (bounds.width / step).floor() as usize;
        let rows = (bounds.height / step).floor() as usize;

        let mut hits = Vec::new();
        for row in 0..=rows {
            for col in 0..=cols {
                let point = Vec2::new(col as f32 * step, row as f32 * step);
                if self.is_inside_source(point) {
                    hits.push(point);
                }
            }
        }
        hits
    }
}

/// Observer, lens and source distances for the angular Einstein radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensGeometry {
    pub lens_distance: f32,
    pub source_distance: f32,
    /// Converts the angular radius to canvas units
    pub pixel_scale: f32,
}

impl Default for LensGeometry {
    fn default() -> Self {
        Self {
            lens_distance: 1.0,
            source_distance: 2.0,
            pixel_scale: 12.0,
        }
    }
}

impl LensGeometry {
    /// `theta_E = sqrt(4GM/c^2 * D_LS / (D_L * D_S))`, in canvas units.
    ///
    /// Returns 0 for a source in front of the lens or a non-positive mass.
    pub fn einstein_radius(&self, mass: f32) -> f32 {
        let d_l = self.lens_distance;
        let d_s = self.source_distance;
        let d_ls = d_s - d_l;

        if !(d_l > 0.0 && d_s > 0.0 && d_ls > 0.0 && mass > 0.0) {
            return 0.0;
        }

        let theta_sq = 4.0 * G * mass / (C * C) * d_ls / (d_l * d_s);
        theta_sq.sqrt() * self.pixel_scale
    }
}
