/// Rectangular matrices and the named transform constructors
use std::ops::Index;

use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::vector::Vector;

/// Coordinate axis, used to pick the plane of a single-axis rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Axes in the order rotations are composed.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two other axes, ascending.
    fn plane(self) -> (usize, usize) {
        match self {
            Axis::X => (1, 2),
            Axis::Y => (0, 2),
            Axis::Z => (0, 1),
        }
    }
}

/// Immutable matrix of `f64` values.
///
/// Elements are addressed by `(row, col)`; the logical layout is row-major
/// with `rows = len / cols`. All operations, including [`Matrix::set`],
/// return new matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    elements: DMatrix<f64>,
}

impl Matrix {
    /// Create a matrix from row-major `data` with `cols` columns.
    pub fn new(cols: usize, data: Vec<f64>) -> Result<Self> {
        if cols == 0 || data.is_empty() {
            return Err(Error::InvalidShape("matrix data is empty".to_string()));
        }
        if data.len() % cols != 0 {
            return Err(Error::InvalidShape(format!(
                "{} elements do not divide into rows of {}",
                data.len(),
                cols
            )));
        }
        let rows = data.len() / cols;
        Ok(Self {
            elements: DMatrix::from_row_slice(rows, cols, &data),
        })
    }

    /// Create a matrix from literal rows, which must share one arity.
    ///
    /// ```
    /// use projector_core::Matrix;
    /// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m.get(1, 0).unwrap(), 3.0);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.as_ref().len() != cols)
        {
            return Err(Error::InvalidShape(format!(
                "row {} has {} columns, expected {}",
                i,
                row.as_ref().len(),
                cols
            )));
        }
        let data = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::new(cols, data)
    }

    pub fn rows(&self) -> usize {
        self.elements.nrows()
    }

    pub fn cols(&self) -> usize {
        self.elements.ncols()
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_index(row, col)?;
        Ok(self.elements[(row, col)])
    }

    /// Copy of this matrix with the element at `(row, col)` replaced.
    pub fn set(&self, row: usize, col: usize, value: f64) -> Result<Self> {
        self.check_index(row, col)?;
        let mut elements = self.elements.clone();
        elements[(row, col)] = value;
        Ok(Self { elements })
    }

    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        Self {
            elements: self.elements.map(f),
        }
    }

    pub fn transpose(&self) -> Self {
        Self {
            elements: self.elements.transpose(),
        }
    }

    /// Matrix product `self · other`.
    ///
    /// Each element is the row/column dot product summed left to right, so
    /// results are reproducible bit for bit.
    pub fn mul_matrix(&self, other: &Matrix) -> Result<Self> {
        if self.cols() != other.rows() {
            return Err(Error::mismatch("matrix product", self.cols(), other.rows()));
        }
        let inner = self.cols();
        let elements = DMatrix::from_fn(self.rows(), other.cols(), |i, j| {
            (0..inner).fold(0.0, |acc, k| {
                acc + self.elements[(i, k)] * other.elements[(k, j)]
            })
        });
        Ok(Self { elements })
    }

    pub fn mul_scalar(&self, scalar: f64) -> Self {
        self.map(|e| e * scalar)
    }

    /// Matrix-vector product. The matrix must be square and match the
    /// vector's length.
    pub fn mul_vector(&self, v: &Vector) -> Result<Vector> {
        if !self.is_square() {
            return Err(Error::mismatch("matrix-vector product", self.rows(), self.cols()));
        }
        if v.dim() != self.cols() {
            return Err(Error::mismatch("matrix-vector product", self.cols(), v.dim()));
        }
        let components = (0..self.rows())
            .map(|i| {
                v.iter()
                    .enumerate()
                    .fold(0.0, |acc, (k, c)| acc + c * self.elements[(i, k)])
            })
            .collect();
        Ok(Vector::from_nonempty(components))
    }

    /// `n`×`n` identity.
    ///
    /// # Panics
    /// If `n` is zero.
    pub fn identity(n: usize) -> Self {
        MatrixBuilder::identity(n).build()
    }

    /// Homogeneous 4×4 translation by a 3-component vector.
    pub fn translation(v: &Vector) -> Result<Self> {
        check_xyz("translation", v)?;
        Ok(MatrixBuilder::identity(4)
            .set(0, 3, v[0])
            .set(1, 3, v[1])
            .set(2, 3, v[2])
            .build())
    }

    /// Homogeneous 4×4 non-uniform scale by a 3-component vector.
    pub fn scaling(v: &Vector) -> Result<Self> {
        check_xyz("scaling", v)?;
        Ok(MatrixBuilder::identity(4)
            .set(0, 0, v[0])
            .set(1, 1, v[1])
            .set(2, 2, v[2])
            .build())
    }

    /// Rotation by `theta` radians in the plane orthogonal to `axis`.
    ///
    /// For the remaining axes `a < b` the block is
    /// `[[cos, -sin], [sin, cos]]`, so rotation about Y runs opposite to the
    /// usual right-handed convention.
    pub fn rotation_axis(axis: Axis, theta: f64) -> Self {
        let (a, b) = axis.plane();
        let (sin, cos) = theta.sin_cos();
        MatrixBuilder::identity(4)
            .set(a, a, cos)
            .set(a, b, -sin)
            .set(b, a, sin)
            .set(b, b, cos)
            .build()
    }

    /// Composed rotation `R_z(v[2]) · R_y(v[1]) · R_x(v[0])`.
    pub fn rotation(v: &Vector) -> Result<Self> {
        check_xyz("rotation", v)?;
        Axis::ALL
            .iter()
            .zip(v.iter())
            .try_fold(Self::identity(4), |acc, (&axis, theta)| {
                Self::rotation_axis(axis, theta).mul_matrix(&acc)
            })
    }

    /// Orthographic projection of the box `[-width, width] × [-height, height]`
    /// between `near` and `far` onto the unit cube.
    pub fn ortho(width: f64, height: f64, near: f64, far: f64) -> Self {
        let depth = far - near;
        MatrixBuilder::identity(4)
            .set(0, 0, 1.0 / width)
            .set(1, 1, 1.0 / height)
            .set(2, 2, -2.0 / depth)
            .set(2, 3, -(far + near) / depth)
            .build()
    }

    /// Perspective projection; `fovx` and `fovy` are full angles in radians.
    pub fn perspective(fovx: f64, fovy: f64, near: f64, far: f64) -> Self {
        let depth = far - near;
        MatrixBuilder::zeros(4, 4)
            .set(0, 0, cot(fovx / 2.0))
            .set(1, 1, cot(fovy / 2.0))
            .set(2, 2, -(far + near) / depth)
            .set(2, 3, -2.0 * far * near / depth)
            .set(3, 2, -1.0)
            .build()
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfRange {
                index: row * self.cols() + col,
                len: self.rows() * self.cols(),
            });
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.elements[index]
    }
}

fn cot(x: f64) -> f64 {
    1.0 / x.tan()
}

fn check_xyz(op: &'static str, v: &Vector) -> Result<()> {
    if v.dim() != 3 {
        return Err(Error::mismatch(op, 3, v.dim()));
    }
    Ok(())
}

/// Mutable scratch space for assembling a [`Matrix`].
///
/// Setters take and return the builder by value and panic on out-of-range
/// indices; use [`Matrix::set`] when indices come from callers.
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    elements: DMatrix<f64>,
}

impl MatrixBuilder {
    /// # Panics
    /// If `n` is zero.
    pub fn identity(n: usize) -> Self {
        assert!(n > 0, "identity matrix must have at least one row");
        Self {
            elements: DMatrix::identity(n, n),
        }
    }

    /// # Panics
    /// If either dimension is zero.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "matrix dimensions must be non-zero");
        Self {
            elements: DMatrix::zeros(rows, cols),
        }
    }

    pub fn set(mut self, row: usize, col: usize, value: f64) -> Self {
        self.elements[(row, col)] = value;
        self
    }

    pub fn build(self) -> Matrix {
        Matrix {
            elements: self.elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_matrix_near(a: &Matrix, b: &Matrix) {
        assert_eq!((a.rows(), a.cols()), (b.rows(), b.cols()));
        for r in 0..a.rows() {
            for c in 0..a.cols() {
                assert_abs_diff_eq!(a[(r, c)], b[(r, c)], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_shape_validation() {
        assert!(matches!(Matrix::new(3, vec![1.0; 7]), Err(Error::InvalidShape(_))));
        assert!(matches!(Matrix::new(0, vec![1.0]), Err(Error::InvalidShape(_))));
        assert!(matches!(Matrix::new(2, vec![]), Err(Error::InvalidShape(_))));
        assert!(matches!(
            Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]),
            Err(Error::InvalidShape(_))
        ));
        let m = Matrix::new(3, (0..6).map(f64::from).collect()).unwrap();
        assert_eq!((m.rows(), m.cols()), (2, 3));
        assert_eq!(m.get(1, 0), Ok(3.0));
    }

    #[test]
    fn test_get_out_of_range() {
        let m = Matrix::identity(2);
        assert_eq!(m.get(2, 0), Err(Error::IndexOutOfRange { index: 4, len: 4 }));
        assert!(m.get(0, 2).is_err());
    }

    #[test]
    fn test_set_returns_copy() {
        let m = Matrix::identity(3);
        let n = m.set(0, 2, 7.0).unwrap();
        assert_eq!(m.get(0, 2), Ok(0.0));
        assert_eq!(n.get(0, 2), Ok(7.0));
        assert!(m.set(3, 0, 1.0).is_err());
    }

    #[test]
    fn test_map_and_scalar() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let expected = Matrix::from_rows(&[[2.0, 4.0], [6.0, 8.0]]).unwrap();
        assert_eq!(m.map(|e| e * 2.0), expected);
        assert_eq!(m.mul_scalar(2.0), expected);
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let t = m.transpose();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.get(2, 1), Ok(6.0));
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_matrix_product() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let b = Matrix::from_rows(&[[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]).unwrap();
        let expected = Matrix::from_rows(&[[58.0, 64.0], [139.0, 154.0]]).unwrap();
        assert_eq!(a.mul_matrix(&b).unwrap(), expected);
        assert!(matches!(
            a.mul_matrix(&a),
            Err(Error::DimensionMismatch { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn test_identity_product() {
        for n in 1..=6 {
            let i = Matrix::identity(n);
            assert_eq!(i.mul_matrix(&i).unwrap(), i);
        }
    }

    #[test]
    fn test_matrix_vector_product() {
        let v = vector![1, -2, 3, 1];
        assert_eq!(Matrix::identity(4).mul_vector(&v).unwrap(), v);

        let rect = Matrix::new(2, vec![1.0; 6]).unwrap();
        assert!(rect.mul_vector(&vector![1, 1]).is_err());
        assert!(Matrix::identity(4).mul_vector(&vector![1, 2, 3]).is_err());
    }

    #[test]
    fn test_translation_and_scaling() {
        let t = Matrix::translation(&vector![1, 0, 0]).unwrap();
        assert_eq!(t.mul_vector(&Vector::point(0.0, 0.0, 0.0)).unwrap(), vector![1, 0, 0, 1]);

        let s = Matrix::scaling(&vector![2, 3, 4]).unwrap();
        assert_eq!(s.mul_vector(&Vector::point(1.0, 1.0, 1.0)).unwrap(), vector![2, 3, 4, 1]);

        assert!(Matrix::translation(&vector![1, 2]).is_err());
        assert!(Matrix::scaling(&vector![1, 2, 3, 4]).is_err());
    }

    #[test]
    fn test_rotation_about_z() {
        let r = Matrix::rotation_axis(Axis::Z, FRAC_PI_2);
        let p = r.mul_vector(&Vector::point(1.0, 0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(p[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p[1], 1.0, epsilon = 1e-12);
        assert_eq!(p[2], 0.0);
    }

    #[test]
    fn test_rotation_about_y_block() {
        let r = Matrix::rotation_axis(Axis::Y, 0.5);
        assert_eq!(r.get(0, 2), Ok(-(0.5f64).sin()));
        assert_eq!(r.get(2, 0), Ok((0.5f64).sin()));
        assert_eq!(r.get(1, 1), Ok(1.0));
    }

    #[test]
    fn test_composed_rotation_matches_euler() {
        let (rx, ry, rz) = (0.3, -0.7, 1.1);
        let ours = Matrix::rotation(&vector![rx, ry, rz]).unwrap();

        // The Y block is the transpose of nalgebra's, hence the negated pitch.
        let reference = nalgebra::Rotation3::from_euler_angles(rx, -ry, rz).to_homogeneous();
        let reference = Matrix::new(4, reference.transpose().as_slice().to_vec()).unwrap();
        assert_matrix_near(&ours, &reference);
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let r = Matrix::rotation(&vector![0, 0, 0]).unwrap();
        assert_eq!(r, Matrix::identity(4));
    }

    #[test]
    fn test_ortho_layout() {
        let m = Matrix::ortho(100.0, 50.0, 0.0, 100.0);
        let expected = Matrix::from_rows(&[
            [0.01, 0.0, 0.0, 0.0],
            [0.0, 0.02, 0.0, 0.0],
            [0.0, 0.0, -0.02, -1.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
        .unwrap();
        assert_matrix_near(&m, &expected);
    }

    #[test]
    fn test_perspective_layout() {
        let m = Matrix::perspective(FRAC_PI_2, FRAC_PI_2, 1.0, 10.0);
        let expected = Matrix::from_rows(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, -11.0 / 9.0, -20.0 / 9.0],
            [0.0, 0.0, -1.0, 0.0],
        ])
        .unwrap();
        assert_matrix_near(&m, &expected);
    }
}
