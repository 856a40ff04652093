//! Simulation configuration
//!
//! Every section defaults independently, so a YAML file only needs the keys
//! it wants to change.

use std::path::Path;

use common::constants::PHOTON_SPHERE_FACTOR;
use common::Bounds;
use serde::{Deserialize, Serialize};

use crate::field::InverseSquareField;
use crate::grid::GridSpec;
use crate::lens_equation::EinsteinLensModel;
use crate::ray::RayTracer;
use crate::stars::{MappingMode, SourceFieldSpec};

/// Smallest grid or lattice spacing accepted, in canvas units
pub const MIN_SAMPLE_STEP: f32 = 0.5;

/// Frame pacing limits, in frames per second
pub const MIN_FRAME_RATE: f32 = 0.1;
pub const MAX_FRAME_RATE: f32 = 1000.0;

/// Top-level lensing configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    pub field: InverseSquareField,
    pub rays: RayTracer,
    pub grid: GridSpec,
    pub stars: SourceFieldSpec,
    pub mapping: MappingMode,
    pub einstein: EinsteinRingConfig,
    pub display: DisplayConfig,
}

/// Einstein ring classifier settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EinsteinRingConfig {
    /// Lens center is overridden by the frame's lens position
    pub model: EinsteinLensModel,
    /// Image-plane lattice spacing
    pub sample_step: f32,
    /// Keep the source disk centered on the lens
    pub follow_lens: bool,
}

impl Default for EinsteinRingConfig {
    fn default() -> Self {
        Self {
            model: EinsteinLensModel::default(),
            sample_step: 4.0,
            follow_lens: true,
        }
    }
}

/// Canvas and overlay settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub canvas: Bounds,
    pub photon_sphere_factor: f32,
    pub frame_rate: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            canvas: Bounds::default(),
            photon_sphere_factor: PHOTON_SPHERE_FACTOR,
            frame_rate: 60.0,
        }
    }
}

impl LensConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Load from `path`, or fall back to the default locations, or to defaults
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => {
                for p in ["gravity_lens.yaml", "gravity_lens.yml", "./config/gravity_lens.yaml"] {
                    let path = Path::new(p);
                    if path.exists() {
                        return Self::from_file(path);
                    }
                }
                Ok(Self::default())
            }
        }
    }

    /// Reject settings that would stall or break the integrators
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg.to_string())) };

        if !(self.field.epsilon > 0.0) {
            return invalid("field.epsilon must be positive");
        }
        if !(self.field.horizon_factor >= 0.0) {
            return invalid("field.horizon_factor must not be negative");
        }
        if !(self.rays.step_length > 0.0) {
            return invalid("rays.step_length must be positive");
        }
        if self.rays.max_steps == 0 {
            return invalid("rays.max_steps must be at least 1");
        }
        if !(self.grid.spacing >= MIN_SAMPLE_STEP) || !(self.grid.sample_step >= MIN_SAMPLE_STEP) {
            return invalid("grid.spacing and grid.sample_step must be at least 0.5");
        }
        if !(self.einstein.sample_step >= MIN_SAMPLE_STEP) {
            return invalid("einstein.sample_step must be at least 0.5");
        }
        match self.mapping {
            MappingMode::Direct { amplification } => {
                if !positive_finite(amplification) {
                    return invalid("mapping.amplification must be positive and finite");
                }
            }
            MappingMode::Einstein(einstein) => {
                if !positive_finite(einstein.normalization) || !positive_finite(einstein.amplification) {
                    return invalid("mapping.normalization and mapping.amplification must be positive and finite");
                }
                if !positive_finite(einstein.epsilon) {
                    return invalid("mapping.epsilon must be positive and finite");
                }
            }
        }
        if !self.display.canvas.is_valid() {
            return invalid("display.canvas must have positive width and height");
        }
        if !(MIN_FRAME_RATE..=MAX_FRAME_RATE).contains(&self.display.frame_rate) {
            return invalid("display.frame_rate must be between 0.1 and 1000");
        }
        Ok(())
    }
}

fn positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Load and validate configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LensConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: LensConfig = serde_yaml::from_str(&content)?;
    config.validate()?;

    Ok(config)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
