//! Common utilities for lensing simulations
//!
//! This crate provides the shared canvas rectangle, a world-to-cell viewport
//! and a character raster used by the lensing core and its terminal driver.

pub mod bounds;
pub mod viewport;
pub mod raster;

pub use bounds::*;
pub use viewport::*;
pub use raster::*;

/// Physical constants used in simulations
pub mod constants {
    /// Gravitational constant (normalized)
    pub const G: f32 = 1.0;

    /// Speed of light (normalized)
    pub const C: f32 = 1.0;

    /// Horizon radius as a fraction of lens mass: r_h = 0.6 M
    pub const HORIZON_FACTOR: f32 = 0.6;

    /// Photon sphere radius as a fraction of lens mass: r_ph = 0.9 M
    pub const PHOTON_SPHERE_FACTOR: f32 = 0.9;
}
