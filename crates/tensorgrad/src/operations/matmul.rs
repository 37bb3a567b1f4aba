//! Rank-2 matrix operations.
//!
//! ```text
//! matmul(a, b)        # validate ranks and inner dimension
//!     → allocate [m, n] output
//!     → GenericBackend::matmul
//!
//! transpose(a)        # deep copy, not a strided view
//!     → GenericBackend::transpose
//! ```

use crate::backend::{ComputeBackend, GenericBackend};
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;

fn ensure_matrix<ElT: Scalar>(tensor: &Tensor<ElT>) -> Result<(usize, usize), TensorError> {
    match *tensor.shape() {
        [rows, cols] => Ok((rows, cols)),
        _ => Err(TensorError::RankMismatch {
            expected: 2,
            actual: tensor.ndim(),
        }),
    }
}

/// Matrix product of two rank-2 tensors.
///
/// # Errors
///
/// `RankMismatch` if either operand is not rank 2, `MatMulShapeMismatch` if
/// `a.shape[1] != b.shape[0]`.
///
/// # Example
///
/// ```
/// use tensorgrad::Tensor;
/// use tensorgrad::operations::matmul;
///
/// let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// let b = Tensor::from_vec(vec![5.0, 6.0, 7.0, 8.0], &[2, 2]).unwrap();
/// let c = matmul(&a, &b).unwrap();
/// assert_eq!(c.data(), &[19.0, 22.0, 43.0, 50.0]);
/// ```
pub fn matmul<ElT: Scalar>(a: &Tensor<ElT>, b: &Tensor<ElT>) -> Result<Tensor<ElT>, TensorError> {
    let (m, k) = ensure_matrix(a)?;
    let (k2, n) = ensure_matrix(b)?;
    if k != k2 {
        return Err(TensorError::MatMulShapeMismatch {
            lhs: a.shape().to_vec(),
            rhs: b.shape().to_vec(),
        });
    }

    let mut out = Tensor::zeros(&[m, n]);
    GenericBackend::matmul(a.data(), b.data(), out.data_mut(), m, k, n);
    Ok(out)
}

/// Transpose a rank-2 tensor into newly allocated storage.
///
/// # Errors
///
/// `RankMismatch` if the tensor is not rank 2.
pub fn transpose<ElT: Scalar>(a: &Tensor<ElT>) -> Result<Tensor<ElT>, TensorError> {
    let (rows, cols) = ensure_matrix(a)?;
    let mut out = Tensor::zeros(&[cols, rows]);
    GenericBackend::transpose(a.data(), out.data_mut(), rows, cols);
    Ok(out)
}
