/// Model → world → projection → screen pipeline
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::projection::Projection;
use crate::transform::ModelTransform;
use crate::vector::Vector;

/// Target screen size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub width: u32,
    pub height: u32,
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn scale(&self) -> Vector {
        Vector::from_nonempty(vec![f64::from(self.width), f64::from(self.height)])
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Stateless point pipeline for a single projection mode.
///
/// Every stage maps a batch of points to a new batch in input order. Only
/// the orthographic screen stage removes points (those outside the view
/// volume).
///
/// ```
/// use projector_core::{vector, Engine, ModelTransform, Projection, Screen};
///
/// let engine = Engine::new(Projection::orthographic(100.0, 100.0, 0.0, 100.0));
/// let out = engine
///     .execute(&[vector![0, 0, 0]], &ModelTransform::default(), Screen::new(800, 600))
///     .unwrap();
/// assert_eq!((out[0][0], out[0][1]), (400.0, 300.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engine {
    projection: Projection,
}

impl Engine {
    pub fn new(projection: Projection) -> Self {
        Self { projection }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Apply `Scale · Rotate · Translate` to every point.
    ///
    /// 3-component points are lifted to homogeneous coordinates first.
    pub fn model_to_world(&self, points: &[Vector], transform: &ModelTransform) -> Result<Vec<Vector>> {
        let model = transform.matrix()?;
        trace!("model matrix: {:?}", model);
        debug!("model_to_world: {} points", points.len());
        points
            .iter()
            .map(|p| model.mul_vector(&p.to_homogeneous()?))
            .collect()
    }

    /// Apply the projection matrix, then divide by `w` where the mode
    /// requires it and `w != 1`.
    pub fn world_to_projection(&self, points: &[Vector]) -> Result<Vec<Vector>> {
        let projection = self.projection.matrix();
        trace!("projection matrix: {:?}", projection);
        debug!("world_to_projection: {} points ({:?})", points.len(), self.projection);
        points
            .iter()
            .map(|p| -> Result<Vector> {
                let projected = projection.mul_vector(p)?;
                if !self.projection.divides_by_w() {
                    return Ok(projected);
                }
                let w = projected.get(3)?;
                if w == 1.0 {
                    Ok(projected)
                } else {
                    Ok(projected.div_scalar(w))
                }
            })
            .collect()
    }

    /// Remap from clip range `[-1, 1]` to `[0, 1]`, cull when the mode
    /// requires it, and scale x and y to pixels.
    pub fn projection_to_screen(&self, points: &[Vector], screen: Screen) -> Result<Vec<Vector>> {
        let scale = screen.scale();
        let cull = self.projection.culls_view_volume();
        let mut screen_points = Vec::with_capacity(points.len());
        for point in points {
            let ndc = point.add_scalar(1.0).div_scalar(2.0);
            if cull && !in_view_volume(&ndc) {
                trace!("culled {}", point);
                continue;
            }
            screen_points.push(ndc.scalar(&scale)?);
        }
        if screen_points.len() < points.len() {
            debug!(
                "culled {} of {} points outside the view volume",
                points.len() - screen_points.len(),
                points.len()
            );
        }
        Ok(screen_points)
    }

    /// Run all three stages.
    pub fn execute(
        &self,
        model_points: &[Vector],
        transform: &ModelTransform,
        screen: Screen,
    ) -> Result<Vec<Vector>> {
        let world = self.model_to_world(model_points, transform)?;
        let projected = self.world_to_projection(&world)?;
        self.projection_to_screen(&projected, screen)
    }
}

/// First three normalized components inside `[0, 1]`. NaN counts as outside.
fn in_view_volume(ndc: &Vector) -> bool {
    ndc.iter().take(3).all(|c| (0.0..=1.0).contains(&c))
}
