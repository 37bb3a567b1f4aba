//! Full reductions to a rank-0 tensor.

use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// Sum of all elements as a scalar tensor.
///
/// # Example
///
/// ```
/// use tensorgrad::Tensor;
/// use tensorgrad::operations::sum;
///
/// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// let s = sum(&t);
/// assert_eq!(s.ndim(), 0);
/// assert_eq!(s.item().unwrap(), 10.0);
/// ```
pub fn sum<ElT: Scalar>(tensor: &Tensor<ElT>) -> Tensor<ElT> {
    Tensor::scalar(sum_elements(tensor.data()))
}

/// Arithmetic mean of all elements, `sum / total_size`.
///
/// An empty tensor has no defined mean; the result is `0 / 0` in the element
/// type (NaN for floats).
pub fn mean<ElT: Scalar>(tensor: &Tensor<ElT>) -> Tensor<ElT> {
    let n = ElT::from_usize(tensor.len());
    Tensor::scalar(sum_elements(tensor.data()) / n)
}

fn sum_elements<ElT: Scalar>(data: &[ElT]) -> ElT {
    let mut acc = ElT::zero();
    for &x in data {
        acc += x;
    }
    acc
}
