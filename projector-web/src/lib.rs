/// Projector Web - WASM bindings for the projection pipeline
///
/// A JS renderer passes model points as a flat `[x0, y0, z0, x1, ...]`
/// array and receives visible pixel positions as `[sx0, sy0, sx1, ...]`.
use wasm_bindgen::prelude::*;

use projector_core::{Engine, ModelTransform, Projection, Screen, Vector};

/// Model transform shared by every projection call.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, Default)]
pub struct WebTransform {
    inner: ModelTransform,
}

#[wasm_bindgen]
impl WebTransform {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebTransform {
        WebTransform::default()
    }

    pub fn set_translate(&mut self, x: f64, y: f64, z: f64) {
        self.inner.translate = [x, y, z];
    }

    pub fn set_scale(&mut self, x: f64, y: f64, z: f64) {
        self.inner.scale = [x, y, z];
    }

    /// Rotation about x, y and z in radians.
    pub fn set_rotate(&mut self, x: f64, y: f64, z: f64) {
        self.inner.rotate = [x, y, z];
    }
}

#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn project_orthographic(
    points: &[f64],
    transform: &WebTransform,
    width: f64,
    height: f64,
    near: f64,
    far: f64,
    screen_width: u32,
    screen_height: u32,
) -> Result<Vec<f64>, JsValue> {
    project(
        Projection::orthographic(width, height, near, far),
        points,
        transform,
        Screen::new(screen_width, screen_height),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// `fovx` and `fovy` are in degrees.
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn project_perspective(
    points: &[f64],
    transform: &WebTransform,
    fovx: f64,
    fovy: f64,
    near: f64,
    far: f64,
    screen_width: u32,
    screen_height: u32,
) -> Result<Vec<f64>, JsValue> {
    project(
        Projection::perspective(fovx, fovy, near, far),
        points,
        transform,
        Screen::new(screen_width, screen_height),
    )
    .map_err(|e| JsValue::from_str(&e))
}

fn project(
    projection: Projection,
    points: &[f64],
    transform: &WebTransform,
    screen: Screen,
) -> Result<Vec<f64>, String> {
    if points.len() % 3 != 0 {
        return Err(format!(
            "point buffer length {} is not a multiple of 3",
            points.len()
        ));
    }
    let model = points
        .chunks_exact(3)
        .map(|xyz| Vector::new(xyz.to_vec()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    let screen_points = Engine::new(projection)
        .execute(&model, &transform.inner, screen)
        .map_err(|e| e.to_string())?;
    Ok(screen_points.iter().flat_map(|p| [p[0], p[1]]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_flat_buffers() {
        let out = project(
            Projection::orthographic(100.0, 100.0, 0.0, 100.0),
            &[0.0, 0.0, 0.0, 500.0, 0.0, 0.0, -100.0, 100.0, -50.0],
            &WebTransform::new(),
            Screen::new(800, 600),
        )
        .unwrap();
        assert_eq!(out, vec![400.0, 300.0, 0.0, 600.0]);
    }

    #[test]
    fn test_rejects_ragged_buffer() {
        let err = project(
            Projection::default(),
            &[0.0, 1.0],
            &WebTransform::new(),
            Screen::default(),
        )
        .unwrap_err();
        assert!(err.contains("multiple of 3"));
    }

    #[test]
    fn test_transform_setters() {
        let mut t = WebTransform::new();
        t.set_translate(10.0, 0.0, 0.0);
        let out = project(
            Projection::orthographic(100.0, 100.0, 0.0, 100.0),
            &[0.0, 0.0, -1.0],
            &t,
            Screen::new(200, 200),
        )
        .unwrap();
        assert!((out[0] - 110.0).abs() < 1e-9);
    }
}
