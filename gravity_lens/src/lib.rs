//! Point-Mass Gravitational Lensing
//!
//! This crate computes, for one frame at a time, everything needed to draw
//! light bending around a point mass:
//!
//! - **Deflection field**: inverse-square pull with a horizon cutoff
//! - **Ray marching**: fixed-step light paths perturbed by the field
//! - **Spacetime grid**: straight grid lines displaced by the field
//! - **Star field**: background points mapped by a direct push or by the lens equation
//! - **Einstein ring**: image-plane samples whose source lies inside a source disk
//!
//! All entry points are pure; the caller owns timing and input.

pub mod config;
pub mod equations;
pub mod field;
pub mod frame;
pub mod grid;
pub mod lens_equation;
pub mod ray;
pub mod renderer;
pub mod stars;

pub use config::{load_config, ConfigError, LensConfig};
pub use field::{DeflectionModel, FieldPolarity, InverseSquareField, LensState};
pub use frame::{compute_frame, Frame, FrameError, FrameInput};
pub use grid::{distort_grid, GridLine, GridOrientation};
pub use lens_equation::{relative_source_position, source_position, EinsteinLensModel, LensGeometry};
pub use ray::{Ray, RayTracer, Termination};
pub use stars::{generate_source_field, map_points, MappingMode, PointDisplacement, PointMapper, SourceFieldSpec, Star};
