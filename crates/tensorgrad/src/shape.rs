//! Tensor shape type.

use crate::strides::compute_strides;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Ordered sequence of dimension sizes.
///
/// An empty shape denotes a scalar, whose total size is 1. Shapes of rank
/// four or less are stored inline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TensorShape(SmallVec<[usize; 4]>);

impl TensorShape {
    /// Create a shape from dimension sizes.
    pub fn new(dims: &[usize]) -> Self {
        Self(SmallVec::from_slice(dims))
    }

    /// The rank-0 shape.
    pub fn scalar() -> Self {
        Self(SmallVec::new())
    }

    /// Number of dimensions.
    #[inline]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Product of all dimensions (1 for a scalar).
    #[inline]
    pub fn total_size(&self) -> usize {
        self.0.iter().product()
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Row-major strides for this shape.
    pub fn strides(&self) -> Vec<usize> {
        compute_strides(&self.0)
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.0.to_vec()
    }
}

impl Deref for TensorShape {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<&[usize]> for TensorShape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims)
    }
}

impl From<Vec<usize>> for TensorShape {
    fn from(dims: Vec<usize>) -> Self {
        Self(SmallVec::from_vec(dims))
    }
}

impl<const N: usize> From<[usize; N]> for TensorShape {
    fn from(dims: [usize; N]) -> Self {
        Self::new(&dims)
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}
