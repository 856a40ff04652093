//! Point-mass deflection field
//!
//! Evaluates the instantaneous displacement a lens imparts at a point in the
//! canvas plane. The field is an ad hoc inverse-square pull, clamped to zero
//! inside a horizon radius proportional to the lens mass.

use common::constants::HORIZON_FACTOR;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Lens parameters for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensState {
    pub position: Vec2,
    pub mass: f32,
    pub intensity: f32,
}

impl LensState {
    pub fn new(position: Vec2, mass: f32, intensity: f32) -> Self {
        Self {
            position,
            mass,
            intensity,
        }
    }
}

impl Default for LensState {
    fn default() -> Self {
        Self::new(Vec2::new(400.0, 300.0), 80.0, 1.5)
    }
}

/// Whether deflection pulls toward the lens or pushes away from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolarity {
    #[default]
    Attract,
    Repel,
}

/// Anything that can produce a deflection vector for a point and a lens
pub trait DeflectionModel {
    fn deflect(&self, point: Vec2, lens: &LensState) -> Vec2;
}

/// Inverse-square deflection with a horizon cutoff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InverseSquareField {
    /// Horizon radius = `mass * horizon_factor`
    pub horizon_factor: f32,
    /// Added to the squared distance before dividing
    pub epsilon: f32,
    pub polarity: FieldPolarity,
    /// Scales the returned vector
    pub gain: f32,
}

impl InverseSquareField {
    pub fn horizon_radius(&self, lens: &LensState) -> f32 {
        lens.mass * self.horizon_factor
    }
}

impl Default for InverseSquareField {
    fn default() -> Self {
        Self {
            horizon_factor: HORIZON_FACTOR,
            epsilon: 1e-6,
            polarity: FieldPolarity::Attract,
            gain: 1.0,
        }
    }
}

impl DeflectionModel for InverseSquareField {
    fn deflect(&self, point: Vec2, lens: &LensState) -> Vec2 {
        let delta = lens.position - point;
        let distance_sq = delta.length_squared();

        // Inside the horizon (this includes the lens center itself)
        if distance_sq.sqrt() < self.horizon_radius(lens) {
            return Vec2::ZERO;
        }

        let magnitude = lens.intensity * lens.mass / (distance_sq + self.epsilon);
        let deflection = match self.polarity {
            FieldPolarity::Attract => delta * magnitude,
            FieldPolarity::Repel => -delta * magnitude,
        } * self.gain;

        if deflection.is_finite() {
            deflection
        } else {
            Vec2::ZERO
        }
    }
}

impl<T: DeflectionModel + ?Sized> DeflectionModel for &T {
    fn deflect(&self, point: Vec2, lens: &LensState) -> Vec2 {
        (**self).deflect(point, lens)
    }
}
