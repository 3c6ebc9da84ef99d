//! Pipeline configuration loaded from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{Engine, Screen};
use crate::projection::Projection;
use crate::transform::ModelTransform;

/// Error type for config loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON or missing/mistyped fields.
    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Well-formed config that the pipeline cannot run with.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything needed to run the pipeline over a batch of model points.
///
/// ```
/// use projector_core::PipelineConfig;
/// let config = PipelineConfig::from_json(r#"{
///     "projection": {"mode": "perspective", "fovx": 90, "fovy": 60, "near": 0.1, "far": 100},
///     "screen": {"width": 320, "height": 200}
/// }"#).unwrap();
/// assert_eq!(config.screen.width, 320);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub transform: ModelTransform,
    pub projection: Projection,
    pub screen: Screen,
}

impl PipelineConfig {
    /// Parse and validate a JSON config. Absent sections take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "screen must be non-empty, got {}x{}",
                self.screen.width, self.screen.height
            )));
        }
        let (near, far) = self.projection.near_far();
        if near == far {
            return Err(ConfigError::Invalid(format!(
                "near and far planes coincide at {}",
                near
            )));
        }
        match self.projection {
            Projection::Orthographic { width, height, .. } if width == 0.0 || height == 0.0 => {
                Err(ConfigError::Invalid(format!(
                    "orthographic volume must be non-empty, got {}x{}",
                    width, height
                )))
            }
            Projection::Perspective { fovx, fovy, .. }
                if !(fov_in_range(fovx) && fov_in_range(fovy)) =>
            {
                Err(ConfigError::Invalid(format!(
                    "field of view must lie in (0, 180) degrees, got {}x{}",
                    fovx, fovy
                )))
            }
            _ => Ok(()),
        }
    }

    pub fn engine(&self) -> Engine {
        Engine::new(self.projection)
    }
}

fn fov_in_range(degrees: f64) -> bool {
    degrees > 0.0 && degrees < 180.0
}
