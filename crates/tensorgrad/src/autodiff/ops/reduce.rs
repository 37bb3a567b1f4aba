//! Reductions to a rank-0 variable.

use crate::autodiff::op::Op;
use crate::autodiff::variable::Variable;
use crate::scalar::Scalar;

impl<T: Scalar> Variable<T> {
    /// Sum of all elements.
    pub fn sum(&self) -> Self {
        let (value, input_shape) = {
            let input = self.value();
            (input.sum(), input.tensor_shape().clone())
        };
        Self::from_op(value, Op::Sum { input_shape }, &[self])
    }

    /// Mean of all elements.
    pub fn mean(&self) -> Self {
        let (value, input_shape) = {
            let input = self.value();
            (input.mean(), input.tensor_shape().clone())
        };
        Self::from_op(value, Op::Mean { input_shape }, &[self])
    }
}
