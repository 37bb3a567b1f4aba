//! Element-wise tensor operations.

use crate::backend::{ComputeBackend, GenericBackend};
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// Apply a function to each element, returning a new tensor.
///
/// # Example
///
/// ```
/// use tensorgrad::Tensor;
/// use tensorgrad::operations::apply;
///
/// let t = Tensor::from_vec(vec![1.0, 4.0, 9.0], &[3]).unwrap();
/// let ts = apply(&t, |x: f64| x.sqrt());
/// assert_eq!(ts.data(), &[1.0, 2.0, 3.0]);
/// ```
pub fn apply<ElT: Scalar, F>(tensor: &Tensor<ElT>, f: F) -> Tensor<ElT>
where
    F: Fn(ElT) -> ElT,
{
    let data: Vec<ElT> = tensor.data().iter().map(|&x| f(x)).collect();
    tensor.same_shape_with(data)
}

/// Apply a function to each element in-place.
pub fn apply_inplace<ElT: Scalar, F>(tensor: &mut Tensor<ElT>, f: F)
where
    F: Fn(ElT) -> ElT,
{
    for x in tensor.data_mut() {
        *x = f(*x);
    }
}

/// Apply a binary function combining two tensors element-wise.
///
/// Both tensors must have the same shape; there is no broadcasting.
///
/// # Example
///
/// ```
/// use tensorgrad::Tensor;
/// use tensorgrad::operations::apply_binary;
///
/// let a = Tensor::<f64>::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
/// let b = Tensor::from_vec(vec![4.0, 5.0, 6.0], &[3]).unwrap();
/// let c = apply_binary(&a, &b, |x, y| x.max(y)).unwrap();
/// assert_eq!(c.data(), &[4.0, 5.0, 6.0]);
/// ```
pub fn apply_binary<ElT: Scalar, F>(
    a: &Tensor<ElT>,
    b: &Tensor<ElT>,
    f: F,
) -> Result<Tensor<ElT>, TensorError>
where
    F: Fn(ElT, ElT) -> ElT,
{
    a.ensure_same_shape(b)?;
    let data: Vec<ElT> = a
        .data()
        .iter()
        .zip(b.data().iter())
        .map(|(&x, &y)| f(x, y))
        .collect();
    Ok(a.same_shape_with(data))
}

/// Multiply all elements by a scalar, returning a new tensor.
pub fn scale<ElT: Scalar>(tensor: &Tensor<ElT>, alpha: ElT) -> Tensor<ElT> {
    apply(tensor, |x| x * alpha)
}

/// Scale tensor in-place.
pub fn scale_inplace<ElT: Scalar>(tensor: &mut Tensor<ElT>, alpha: ElT) {
    apply_inplace(tensor, |x| x * alpha);
}

fn ensure_nonzero<ElT: Scalar>(divisor: &[ElT]) -> Result<(), TensorError> {
    if divisor.iter().any(|&x| x == ElT::zero()) {
        return Err(TensorError::DivisionByZero);
    }
    Ok(())
}

fn binary_kernel<ElT: Scalar>(
    a: &Tensor<ElT>,
    b: &Tensor<ElT>,
    kernel: fn(&[ElT], &[ElT], &mut [ElT]),
) -> Result<Tensor<ElT>, TensorError> {
    a.ensure_same_shape(b)?;
    let mut out = a.zeros_like();
    kernel(a.data(), b.data(), out.data_mut());
    Ok(out)
}

/// Element-wise sum of two equally shaped tensors.
pub fn add<ElT: Scalar>(a: &Tensor<ElT>, b: &Tensor<ElT>) -> Result<Tensor<ElT>, TensorError> {
    binary_kernel(a, b, GenericBackend::add)
}

/// Element-wise difference of two equally shaped tensors.
pub fn sub<ElT: Scalar>(a: &Tensor<ElT>, b: &Tensor<ElT>) -> Result<Tensor<ElT>, TensorError> {
    binary_kernel(a, b, GenericBackend::sub)
}

/// Element-wise product of two equally shaped tensors.
pub fn mul<ElT: Scalar>(a: &Tensor<ElT>, b: &Tensor<ElT>) -> Result<Tensor<ElT>, TensorError> {
    binary_kernel(a, b, GenericBackend::mul)
}

/// Element-wise quotient of two equally shaped tensors.
///
/// # Errors
///
/// `ShapeMismatch` if shapes differ, `DivisionByZero` if any element of `b`
/// is exactly zero.
pub fn div<ElT: Scalar>(a: &Tensor<ElT>, b: &Tensor<ElT>) -> Result<Tensor<ElT>, TensorError> {
    a.ensure_same_shape(b)?;
    ensure_nonzero(b.data())?;
    binary_kernel(a, b, GenericBackend::div)
}

fn binary_inplace<ElT: Scalar>(
    a: &mut Tensor<ElT>,
    b: &Tensor<ElT>,
    f: impl Fn(&mut ElT, ElT),
) -> Result<(), TensorError> {
    a.ensure_same_shape(b)?;
    for (x, &y) in a.data_mut().iter_mut().zip(b.data().iter()) {
        f(x, y);
    }
    Ok(())
}

/// `a += b`.
pub fn add_inplace<ElT: Scalar>(a: &mut Tensor<ElT>, b: &Tensor<ElT>) -> Result<(), TensorError> {
    binary_inplace(a, b, |x, y| *x += y)
}

/// `a -= b`.
pub fn sub_inplace<ElT: Scalar>(a: &mut Tensor<ElT>, b: &Tensor<ElT>) -> Result<(), TensorError> {
    binary_inplace(a, b, |x, y| *x -= y)
}

/// `a *= b`.
pub fn mul_inplace<ElT: Scalar>(a: &mut Tensor<ElT>, b: &Tensor<ElT>) -> Result<(), TensorError> {
    binary_inplace(a, b, |x, y| *x = *x * y)
}

/// `a /= b`. Leaves `a` untouched on error.
pub fn div_inplace<ElT: Scalar>(a: &mut Tensor<ElT>, b: &Tensor<ElT>) -> Result<(), TensorError> {
    a.ensure_same_shape(b)?;
    ensure_nonzero(b.data())?;
    binary_inplace(a, b, |x, y| *x = *x / y)
}

/// Divide every element by a scalar.
pub fn div_scalar<ElT: Scalar>(
    tensor: &Tensor<ElT>,
    divisor: ElT,
) -> Result<Tensor<ElT>, TensorError> {
    if divisor == ElT::zero() {
        return Err(TensorError::DivisionByZero);
    }
    Ok(apply(tensor, |x| x / divisor))
}

/// `max(x, 0)` element-wise.
pub fn relu<ElT: Scalar>(tensor: &Tensor<ElT>) -> Tensor<ElT> {
    apply(tensor, |x| if x > ElT::zero() { x } else { ElT::zero() })
}

/// `1 / (1 + exp(-x))` element-wise.
pub fn sigmoid<ElT: Scalar>(tensor: &Tensor<ElT>) -> Tensor<ElT> {
    apply(tensor, |x| ElT::one() / (ElT::one() + (-x).exp()))
}
