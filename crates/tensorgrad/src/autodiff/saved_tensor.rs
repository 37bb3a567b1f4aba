//! Saved tensor for backward pass.

use crate::scalar::Scalar;
use crate::tensor::Tensor;
use std::ops::Deref;
use std::rc::Rc;

/// Snapshot of a forward value kept for the backward pass.
///
/// Uses `Rc` for cheap cloning within the single-threaded graph. The snapshot
/// is taken when the operation runs, so later in-place updates to the input
/// (an optimizer step, for instance) do not change the recorded derivative.
#[derive(Debug)]
pub struct SavedTensor<T: Scalar> {
    data: Rc<Tensor<T>>,
}

impl<T: Scalar> SavedTensor<T> {
    pub fn new(tensor: Tensor<T>) -> Self {
        Self {
            data: Rc::new(tensor),
        }
    }

    /// Get reference to saved data.
    pub fn get(&self) -> &Tensor<T> {
        &self.data
    }
}

impl<T: Scalar> Clone for SavedTensor<T> {
    fn clone(&self) -> Self {
        Self {
            data: Rc::clone(&self.data),
        }
    }
}

impl<T: Scalar> Deref for SavedTensor<T> {
    type Target = Tensor<T>;

    fn deref(&self) -> &Tensor<T> {
        &self.data
    }
}
