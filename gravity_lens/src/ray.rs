//! Ray marching through the deflection field
//!
//! A ray is a polyline built by repeatedly perturbing a fixed-length step
//! direction with the local deflection and advancing along it, until it
//! leaves the canvas or the step budget runs out.

use common::Bounds;
use glam::Vec2;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::field::{DeflectionModel, LensState};

/// Why a ray stopped marching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Stepped outside the canvas
    Escaped,
    /// Used the whole step budget inside the canvas
    Exhausted,
}

/// A traced light path, in integration order
#[derive(Debug, Clone)]
pub struct Ray {
    pub path: Vec<Vec2>,
    pub termination: Termination,
}

impl Ray {
    pub fn end(&self) -> Option<Vec2> {
        self.path.last().copied()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Step length and budget for ray marching
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayTracer {
    pub step_length: f32,
    pub max_steps: usize,
}

impl Default for RayTracer {
    fn default() -> Self {
        Self {
            step_length: 5.0,
            max_steps: 150,
        }
    }
}

impl RayTracer {
    pub fn new(step_length: f32, max_steps: usize) -> Self {
        Self {
            step_length,
            max_steps,
        }
    }

    /// March a single ray from `start` with initial direction `direction`.
    ///
    /// Each step adds the local deflection to the direction as given, then
    /// rescales the sum to `step_length`. The returned path holds the start
    /// point plus at most `max_steps` further points.
    pub fn trace<F: DeflectionModel>(
        &self,
        start: Vec2,
        direction: Vec2,
        field: &F,
        lens: &LensState,
        bounds: &Bounds,
    ) -> Ray {
        let mut path = Vec::with_capacity(self.max_steps + 1);
        path.push(start);

        let mut pos = start;
        let mut dir = direction;
        for step in 0..self.max_steps {
            let bent = dir + field.deflect(pos, lens);

            // A zero or non-finite sum keeps the previous heading
            match rescale(bent, self.step_length) {
                Some(next) => dir = next,
                None => trace!("step {step}: deflection cancelled direction, holding heading"),
            }

            pos += dir;
            path.push(pos);

            if !bounds.contains(pos) {
                trace!("ray from {start:?} escaped after {} steps", step + 1);
                return Ray {
                    path,
                    termination: Termination::Escaped,
                };
            }
        }

        Ray {
            path,
            termination: Termination::Exhausted,
        }
    }

    /// Trace every `(start, direction)` pair in order
    pub fn trace_all<F: DeflectionModel>(
        &self,
        starts: &[(Vec2, Vec2)],
        field: &F,
        lens: &LensState,
        bounds: &Bounds,
    ) -> Vec<Ray> {
        starts
            .iter()
            .map(|&(start, direction)| self.trace(start, direction, field, lens, bounds))
            .collect()
    }

    /// Evenly spaced rays entering from the left and top canvas edges.
    ///
    /// For `i in 1..=count` this yields a ray from `(0, i*h/(count+1))` heading
    /// `+x`, then one from `(i*w/(count+1), 0)` heading `+y`, each with an
    /// initial direction of length `step_length`.
    pub fn edge_starts(&self, bounds: &Bounds, count: usize) -> Vec<(Vec2, Vec2)> {
        let vertical_spacing = bounds.height / (count + 1) as f32;
        let horizontal_spacing = bounds.width / (count + 1) as f32;

        let mut starts = Vec::with_capacity(count * 2);
        for i in 1..=count {
            starts.push((Vec2::new(0.0, i as f32 * vertical_spacing), Vec2::X * self.step_length));
            starts.push((Vec2::new(i as f32 * horizontal_spacing, 0.0), Vec2::Y * self.step_length));
        }
        starts
    }
}

/// Resize `v` to `length`, or `None` when `v` has no usable direction
fn rescale(v: Vec2, length: f32) -> Option<Vec2> {
    v.try_normalize().map(|unit| unit * length)
}
