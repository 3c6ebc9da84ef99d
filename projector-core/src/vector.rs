/// Fixed-length vectors of `f64` components
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use nalgebra::DVector;

use crate::error::{Error, Result};

/// Builds a [`Vector`] from one or more numeric expressions.
///
/// ```
/// use projector_core::vector;
/// let v = vector![1, 2.5, 3];
/// assert_eq!(v.dim(), 3);
/// ```
#[macro_export]
macro_rules! vector {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        $crate::Vector::from_nonempty(::std::vec![($first) as f64 $(, ($rest) as f64)*])
    };
}

/// A point or direction in n-dimensional space.
///
/// The length is fixed at construction and is part of the value's identity:
/// vectors of different lengths never compare equal. Every operation returns
/// a new vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    components: DVector<f64>,
}

impl Vector {
    /// Create a vector from its components. Fails on an empty sequence.
    pub fn new(components: Vec<f64>) -> Result<Self> {
        if components.is_empty() {
            return Err(Error::InvalidShape(
                "a vector needs at least one component".to_string(),
            ));
        }
        Ok(Self::from_nonempty(components))
    }

    #[doc(hidden)]
    pub fn from_nonempty(components: Vec<f64>) -> Self {
        debug_assert!(!components.is_empty());
        Self {
            components: DVector::from_vec(components),
        }
    }

    /// Homogeneous point `(x, y, z, 1)`.
    pub fn point(x: f64, y: f64, z: f64) -> Self {
        Self::from_nonempty(vec![x, y, z, 1.0])
    }

    /// Number of components.
    pub fn dim(&self) -> usize {
        self.components.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        self.components.as_slice()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.components.iter().copied()
    }

    /// Component at `index`.
    pub fn get(&self, index: usize) -> Result<f64> {
        self.components
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.dim(),
            })
    }

    /// Apply `f` to every component.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        Self {
            components: self.components.map(f),
        }
    }

    pub fn add(&self, other: &Vector) -> Result<Self> {
        self.check_same_dim("vector add", other)?;
        Ok(Self {
            components: &self.components + &other.components,
        })
    }

    pub fn sub(&self, other: &Vector) -> Result<Self> {
        self.check_same_dim("vector sub", other)?;
        Ok(Self {
            components: &self.components - &other.components,
        })
    }

    pub fn add_scalar(&self, scalar: f64) -> Self {
        self.map(|c| c + scalar)
    }

    pub fn div_scalar(&self, scalar: f64) -> Self {
        self.map(|c| c / scalar)
    }

    /// Elementwise product where `other` may be shorter than `self`.
    ///
    /// Positions past the end of `other` are left unchanged, as if `other`
    /// were padded with ones. `other` longer than `self` is an error, so the
    /// operation is not commutative.
    ///
    /// ```
    /// use projector_core::vector;
    /// assert_eq!(vector![1, 2, 3].scalar(&vector![2, 3]).unwrap(), vector![2, 6, 3]);
    /// ```
    pub fn scalar(&self, other: &Vector) -> Result<Self> {
        if other.dim() > self.dim() {
            return Err(Error::mismatch("vector scalar", self.dim(), other.dim()));
        }
        let mut components = self.components.clone();
        for (c, factor) in components.iter_mut().zip(other.iter()) {
            *c *= factor;
        }
        Ok(Self { components })
    }

    /// Lift a 3-component point to homogeneous coordinates with `w = 1`.
    /// 4-component vectors are returned as they are.
    pub fn to_homogeneous(&self) -> Result<Self> {
        match self.dim() {
            3 => Ok(Self::point(self[0], self[1], self[2])),
            4 => Ok(self.clone()),
            n => Err(Error::mismatch("homogeneous lift", 3, n)),
        }
    }

    fn check_same_dim(&self, op: &'static str, other: &Vector) -> Result<()> {
        if self.dim() != other.dim() {
            return Err(Error::mismatch(op, self.dim(), other.dim()));
        }
        Ok(())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.components[index]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

/// Parses comma-separated components such as `"1, -2.5, 3"`.
impl FromStr for Vector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let components = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|e| Error::Parse(format!("{:?}: {}", part.trim(), e)))
            })
            .collect::<Result<Vec<f64>>>()?;
        Self::new(components)
    }
}
