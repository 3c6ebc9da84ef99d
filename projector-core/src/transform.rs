/// Model-space placement: translation, scale and Euler rotation
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Translation, per-axis scale and per-axis rotation (radians) of a model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelTransform {
    pub translate: [f64; 3],
    pub scale: [f64; 3],
    pub rotate: [f64; 3],
}

impl ModelTransform {
    pub fn new(translate: [f64; 3], scale: [f64; 3], rotate: [f64; 3]) -> Self {
        Self {
            translate,
            scale,
            rotate,
        }
    }

    /// Build from 3-component vectors.
    pub fn from_vectors(translate: &Vector, scale: &Vector, rotate: &Vector) -> Result<Self> {
        Ok(Self {
            translate: xyz("translate", translate)?,
            scale: xyz("scale", scale)?,
            rotate: xyz("rotate", rotate)?,
        })
    }

    pub fn identity() -> Self {
        Self::new([0.0; 3], [1.0; 3], [0.0; 3])
    }

    /// Model matrix `Scale · Rotate · Translate`: points are translated
    /// first, then rotated, then scaled.
    pub fn matrix(&self) -> Result<Matrix> {
        let scale = Matrix::scaling(&to_vector(self.scale))?;
        let rotate = Matrix::rotation(&to_vector(self.rotate))?;
        let translate = Matrix::translation(&to_vector(self.translate))?;
        scale.mul_matrix(&rotate)?.mul_matrix(&translate)
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::identity()
    }
}

fn to_vector([x, y, z]: [f64; 3]) -> Vector {
    Vector::from_nonempty(vec![x, y, z])
}

fn xyz(op: &'static str, v: &Vector) -> Result<[f64; 3]> {
    match v.as_slice() {
        &[x, y, z] => Ok([x, y, z]),
        other => Err(Error::mismatch(op, 3, other.len())),
    }
}
