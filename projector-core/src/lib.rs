/// Projector Core Library - vector/matrix algebra and the projection pipeline
///
/// This library converts model-space points into screen-space pixel
/// coordinates: model → world → projection → screen, in orthographic or
/// perspective mode. All types are immutable values and every stage is a
/// pure function.

pub mod config;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod points;
pub mod projection;
pub mod stl;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use config::{ConfigError, PipelineConfig};
pub use engine::{Engine, Screen};
pub use error::{Error, Result};
pub use matrix::{Axis, Matrix, MatrixBuilder};
pub use projection::Projection;
pub use transform::ModelTransform;
pub use vector::Vector;
