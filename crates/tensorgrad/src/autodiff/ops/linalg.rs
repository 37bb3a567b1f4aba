//! Matrix product and structural operations.

use crate::autodiff::op::Op;
use crate::autodiff::saved_tensor::SavedTensor;
use crate::autodiff::variable::Variable;
use crate::error::TensorError;
use crate::scalar::Scalar;

impl<T: Scalar> Variable<T> {
    /// Matrix product of two rank-2 variables.
    ///
    /// # Errors
    ///
    /// `RankMismatch` for non-matrix operands, `MatMulShapeMismatch` when the
    /// inner dimensions differ.
    ///
    /// # Example
    ///
    /// ```
    /// use tensorgrad::{Tensor, Variable};
    ///
    /// let a = Variable::leaf(Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2])?);
    /// let b = Variable::leaf(Tensor::from_vec(vec![5.0, 6.0, 7.0, 8.0], &[2, 2])?);
    /// let c = a.matmul(&b)?;
    /// assert_eq!(c.value().data(), &[19.0, 22.0, 43.0, 50.0]);
    /// # Ok::<(), tensorgrad::TensorError>(())
    /// ```
    pub fn matmul(&self, other: &Self) -> Result<Self, TensorError> {
        let (lhs, rhs) = (self.tensor(), other.tensor());
        let value = lhs.matmul(&rhs)?;
        let op = Op::MatMul {
            lhs: SavedTensor::new(lhs),
            rhs: SavedTensor::new(rhs),
        };
        Ok(Self::from_op(value, op, &[self, other]))
    }

    /// Rank-2 transpose.
    pub fn transpose(&self) -> Result<Self, TensorError> {
        let value = self.value().transpose()?;
        Ok(Self::from_op(value, Op::Transpose, &[self]))
    }

    /// Same data under a new shape of equal total size.
    pub fn reshape(&self, shape: &[usize]) -> Result<Self, TensorError> {
        let (value, input_shape) = {
            let input = self.value();
            (input.reshape(shape)?, input.tensor_shape().clone())
        };
        Ok(Self::from_op(value, Op::Reshape { input_shape }, &[self]))
    }
}
