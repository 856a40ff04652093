//! Background star field and its lensed image
//!
//! Stars are generated once, then re-mapped every frame through one of two
//! displacement strategies: a direct push by the deflection field, or a
//! radial shift derived from the point-mass lens equation.

use std::f32::consts::TAU;

use common::Bounds;
use glam::Vec2;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::field::{DeflectionModel, LensState};
use crate::lens_equation::LensGeometry;

/// A background point with a visual size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub size: f32,
}

/// How to scatter the background stars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFieldSpec {
    pub count: usize,
    /// Share of stars placed in the annulus around the lens, 0..=1
    pub ring_fraction: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Fixed seed for a reproducible field
    pub seed: Option<u64>,
}

impl Default for SourceFieldSpec {
    fn default() -> Self {
        Self {
            count: 300,
            ring_fraction: 0.0,
            inner_radius: 100.0,
            outer_radius: 200.0,
            min_size: 0.5,
            max_size: 2.5,
            seed: None,
        }
    }
}

/// Generate the star field around `center` (usually the initial lens position)
pub fn generate_source_field(spec: &SourceFieldSpec, bounds: &Bounds, center: Vec2) -> Vec<Star> {
    match spec.seed {
        Some(seed) => scatter(spec, bounds, center, &mut StdRng::seed_from_u64(seed)),
        None => scatter(spec, bounds, center, &mut rand::thread_rng()),
    }
}

fn scatter<R: Rng>(spec: &SourceFieldSpec, bounds: &Bounds, center: Vec2, rng: &mut R) -> Vec<Star> {
    let ring_count = ((spec.count as f32 * spec.ring_fraction.clamp(0.0, 1.0)).round() as usize).min(spec.count);
    let (inner, outer) = ordered(spec.inner_radius.max(0.0), spec.outer_radius.max(0.0));
    let (min_size, max_size) = ordered(spec.min_size, spec.max_size);

    let mut stars = Vec::with_capacity(spec.count);

    for _ in 0..ring_count {
        let angle = rng.gen::<f32>() * TAU;
        let radius = rng.gen_range(inner..=outer);
        let position = bounds.clamp(center + Vec2::new(angle.cos(), angle.sin()) * radius);
        let size = rng.gen_range(min_size..=max_size);
        stars.push(Star { position, size });
    }

    for _ in ring_count..spec.count {
        let position = Vec2::new(
            rng.gen_range(0.0..=bounds.width),
            rng.gen_range(0.0..=bounds.height),
        );
        let size = rng.gen_range(min_size..=max_size);
        stars.push(Star { position, size });
    }

    debug!("generated {} stars ({} in ring)", stars.len(), ring_count);
    stars
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Strategy that moves a background point to its apparent position
pub trait PointDisplacement {
    /// Apparent position of `point`; always finite and inside `bounds`
    fn displace(&self, point: Vec2, lens: &LensState, bounds: &Bounds) -> Vec2;
}

/// Pushes a point by the deflection field, amplified
#[derive(Debug, Clone, Copy)]
pub struct DirectDisplacement<F> {
    pub field: F,
    pub amplification: f32,
}

impl<F: DeflectionModel> PointDisplacement for DirectDisplacement<F> {
    fn displace(&self, point: Vec2, lens: &LensState, bounds: &Bounds) -> Vec2 {
        let moved = point + self.field.deflect(point, lens) * self.amplification;
        bounds.clamp(if moved.is_finite() { moved } else { point })
    }
}

/// Radial shift from the point-mass lens equation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EinsteinDisplacement {
    pub geometry: LensGeometry,
    /// Canvas units per unit of angle
    pub normalization: f32,
    pub amplification: f32,
    /// Added to the angle before dividing by it
    pub epsilon: f32,
}

impl Default for EinsteinDisplacement {
    fn default() -> Self {
        Self {
            geometry: LensGeometry::default(),
            normalization: 100.0,
            amplification: 10.0,
            epsilon: 1e-6,
        }
    }
}

impl EinsteinDisplacement {
    /// `|theta - theta_E^2 / theta|` for a point `r` canvas units from the lens
    pub fn beta(&self, r: f32, mass: f32) -> f32 {
        let normalization = self.normalization.max(f32::EPSILON);
        let theta = r / normalization;
        let theta_e = self.geometry.einstein_radius(mass) / normalization;
        (theta - theta_e * theta_e / (theta + self.epsilon)).abs()
    }
}

impl PointDisplacement for EinsteinDisplacement {
    fn displace(&self, point: Vec2, lens: &LensState, bounds: &Bounds) -> Vec2 {
        let rel = point - lens.position;
        let r = rel.length();

        // No radial direction at the lens itself
        if !(r > self.epsilon) {
            return bounds.clamp(point);
        }

        let moved = point + rel / r * self.beta(r, lens.mass) * self.amplification;
        bounds.clamp(if moved.is_finite() { moved } else { point })
    }
}

/// Which displacement strategy maps the star field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum MappingMode {
    Direct {
        #[serde(default = "default_direct_amplification")]
        amplification: f32,
    },
    Einstein(EinsteinDisplacement),
}

fn default_direct_amplification() -> f32 {
    5.0
}

impl Default for MappingMode {
    fn default() -> Self {
        Self::Direct {
            amplification: default_direct_amplification(),
        }
    }
}

/// A [`MappingMode`] bound to a concrete deflection field
#[derive(Debug, Clone, Copy)]
pub enum PointMapper<F> {
    Direct(DirectDisplacement<F>),
    Einstein(EinsteinDisplacement),
}

impl<F: DeflectionModel> PointMapper<F> {
    pub fn new(mode: &MappingMode, field: F) -> Self {
        match *mode {
            MappingMode::Direct { amplification } => Self::Direct(DirectDisplacement { field, amplification }),
            MappingMode::Einstein(einstein) => Self::Einstein(einstein),
        }
    }
}

impl<F: DeflectionModel> PointDisplacement for PointMapper<F> {
    fn displace(&self, point: Vec2, lens: &LensState, bounds: &Bounds) -> Vec2 {
        match self {
            Self::Direct(direct) => direct.displace(point, lens, bounds),
            Self::Einstein(einstein) => einstein.displace(point, lens, bounds),
        }
    }
}

/// Apparent positions of `stars`, in input order, sizes unchanged
pub fn map_points<D: PointDisplacement>(stars: &[Star], displacement: &D, lens: &LensState, bounds: &Bounds) -> Vec<Star> {
    stars
        .iter()
        .map(|star| Star {
            position: displacement.displace(star.position, lens, bounds),
            size: star.size,
        })
        .collect()
}
