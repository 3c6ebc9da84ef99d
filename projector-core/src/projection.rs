/// Projection modes and their per-mode pipeline policies
use serde::{Deserialize, Serialize};

use crate::matrix::Matrix;

/// Projection used by the world → projection stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Projection {
    /// Box projection; `width` and `height` are half-extents of the view volume.
    Orthographic {
        width: f64,
        height: f64,
        near: f64,
        far: f64,
    },
    /// Frustum projection; field-of-view angles are in degrees.
    Perspective {
        fovx: f64,
        fovy: f64,
        near: f64,
        far: f64,
    },
}

impl Projection {
    pub fn orthographic(width: f64, height: f64, near: f64, far: f64) -> Self {
        Self::Orthographic {
            width,
            height,
            near,
            far,
        }
    }

    pub fn perspective(fovx: f64, fovy: f64, near: f64, far: f64) -> Self {
        Self::Perspective {
            fovx,
            fovy,
            near,
            far,
        }
    }

    /// Create the projection matrix
    pub fn matrix(&self) -> Matrix {
        match *self {
            Projection::Orthographic {
                width,
                height,
                near,
                far,
            } => Matrix::ortho(width, height, near, far),
            Projection::Perspective {
                fovx,
                fovy,
                near,
                far,
            } => Matrix::perspective(fovx.to_radians(), fovy.to_radians(), near, far),
        }
    }

    /// Whether projected points must be normalized by their `w` component.
    pub fn divides_by_w(&self) -> bool {
        matches!(self, Projection::Perspective { .. })
    }

    /// Whether points outside the unit cube are dropped before screen scaling.
    /// Perspective output is left unclipped for the consumer.
    pub fn culls_view_volume(&self) -> bool {
        matches!(self, Projection::Orthographic { .. })
    }

    pub fn near_far(&self) -> (f64, f64) {
        match *self {
            Projection::Orthographic { near, far, .. }
            | Projection::Perspective { near, far, .. } => (near, far),
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::orthographic(100.0, 100.0, 0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_policies() {
        let ortho = Projection::default();
        assert!(ortho.culls_view_volume());
        assert!(!ortho.divides_by_w());

        let persp = Projection::perspective(90.0, 60.0, 0.1, 100.0);
        assert!(!persp.culls_view_volume());
        assert!(persp.divides_by_w());
        assert_eq!(persp.near_far(), (0.1, 100.0));
    }

    #[test]
    fn test_perspective_matrix_uses_radians() {
        let m = Projection::perspective(90.0, 90.0, 1.0, 10.0).matrix();
        assert!((m[(0, 0)] - 1.0).abs() < 1e-12);
        assert!((m[(1, 1)] - 1.0).abs() < 1e-12);
        assert_eq!(m[(3, 2)], -1.0);
    }

    #[test]
    fn test_tagged_json() {
        let p: Projection =
            serde_json::from_str(r#"{"mode":"perspective","fovx":90,"fovy":60,"near":1,"far":50}"#)
                .unwrap();
        assert_eq!(p, Projection::perspective(90.0, 60.0, 1.0, 50.0));
        let json = serde_json::to_string(&Projection::default()).unwrap();
        assert!(json.contains(r#""mode":"orthographic""#));
    }
}
