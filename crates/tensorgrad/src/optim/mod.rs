//! Optimizers that update parameters from their accumulated gradients.
//!
//! ```text
//! loss.backward()?      # fills param grads
//! optimizer.step()?     # param.value -= update(param.grad)
//! optimizer.zero_grad() # grads back to zeros, buffers kept
//! ```

mod sgd;

pub use sgd::Sgd;

use crate::error::TensorError;
use crate::scalar::Scalar;

/// Parameter update rule.
pub trait Optimizer<T: Scalar> {
    /// Update every tracked parameter in place from its gradient.
    ///
    /// Parameters that do not require grad, or have no gradient yet, are
    /// skipped.
    fn step(&mut self) -> Result<(), TensorError>;

    /// Reset every tracked parameter's gradient to zeros of its shape.
    fn zero_grad(&mut self);

    fn learning_rate(&self) -> T;

    fn set_learning_rate(&mut self, learning_rate: T);
}
