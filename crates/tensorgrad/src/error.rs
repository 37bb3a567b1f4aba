//! Error types for tensorgrad.

use thiserror::Error;

/// Errors that can occur in tensor and graph operations.
///
/// All failures are local and synchronous: nothing is retried or recovered
/// inside the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TensorError {
    /// Operands of an element-wise operation differ in shape.
    #[error("shape mismatch: {lhs:?} vs {rhs:?}")]
    ShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    /// Inner dimensions of a matrix product disagree.
    #[error("matmul shape mismatch: cannot multiply {lhs:?} by {rhs:?}")]
    MatMulShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    /// Operation requires a specific tensor rank.
    #[error("expected tensor of rank {expected}, got rank {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// Wrong number of indices provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },

    /// Index out of bounds.
    #[error("index {index} is out of range for dimension {dim} of size {dim_size}")]
    IndexOutOfRange {
        index: usize,
        dim: usize,
        dim_size: usize,
    },

    /// Flat data does not fill the requested shape.
    #[error("data length mismatch: shape needs {expected} elements, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    /// Reshape that does not preserve the total number of elements.
    #[error("cannot reshape {from:?} into {to:?}")]
    InvalidReshape { from: Vec<usize>, to: Vec<usize> },

    /// A divisor element (or scalar divisor) is exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A node's value is borrowed elsewhere and cannot be updated in place.
    #[error("value of node #{0} is already borrowed")]
    ValueBorrowed(usize),

    /// Requested something the default compute target cannot do.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}
