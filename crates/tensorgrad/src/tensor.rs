//! N-dimensional dense tensor.
//!
//! A [`Tensor`] owns a flat row-major buffer together with its shape, the
//! strides derived from that shape, and a `requires_grad` flag that the
//! autodiff layer reads when the tensor is wrapped in a
//! [`Variable`](crate::autodiff::Variable).
//!
//! Strides are never set independently: every constructor and every
//! structural change (`reshape_inplace`) recomputes them from the shape.

use crate::backend::{ComputeBackend, Device, GenericBackend};
use crate::error::TensorError;
use crate::nested::NestedData;
use crate::operations;
use crate::scalar::Scalar;
use crate::shape::TensorShape;
use crate::storage::Dense;
use crate::strides::cartesian_to_linear;
use std::fmt;

/// A dense n-dimensional tensor in row-major order.
#[derive(Debug, Clone)]
pub struct Tensor<ElT: Scalar> {
    storage: Dense<ElT>,
    shape: TensorShape,
    strides: Vec<usize>,
    requires_grad: bool,
}

impl<ElT: Scalar> Tensor<ElT> {
    pub(crate) fn from_parts(storage: Dense<ElT>, shape: TensorShape) -> Self {
        let strides = shape.strides();
        Self {
            storage,
            shape,
            strides,
            requires_grad: false,
        }
    }

    /// A tensor of `self`'s shape over new data of the same length.
    pub(crate) fn same_shape_with(&self, data: Vec<ElT>) -> Self {
        debug_assert_eq!(data.len(), self.len());
        Self::from_parts(Dense::from_vec(data), self.shape.clone())
    }

    /// Create a new tensor with the given shape, zero-initialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use tensorgrad::Tensor;
    ///
    /// let t: Tensor<f64> = Tensor::zeros(&[2, 3, 4]);
    /// assert_eq!(t.shape(), &[2, 3, 4]);
    /// assert_eq!(t.len(), 24);
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(shape, ElT::zero())
    }

    /// Create a tensor filled with ones.
    pub fn ones(shape: &[usize]) -> Self {
        Self::full(shape, ElT::one())
    }

    /// Create a tensor with every element set to `value`.
    pub fn full(shape: &[usize], value: ElT) -> Self {
        let shape = TensorShape::new(shape);
        Self::from_parts(Dense::filled(shape.total_size(), value), shape)
    }

    /// Create a rank-0 tensor holding a single value.
    ///
    /// ```
    /// use tensorgrad::Tensor;
    ///
    /// let t = Tensor::scalar(3.5f32);
    /// assert_eq!(t.ndim(), 0);
    /// assert_eq!(t.item().unwrap(), 3.5);
    /// ```
    pub fn scalar(value: ElT) -> Self {
        Self::from_parts(Dense::from_vec(vec![value]), TensorShape::scalar())
    }

    /// Create tensor from row-major data and shape.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::DataLengthMismatch` if data length doesn't match shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use tensorgrad::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(t.get(&[0, 1]), Some(&2.0));
    /// assert_eq!(t.get(&[1, 0]), Some(&4.0)); // row-major: [1,0] is the fourth element
    /// ```
    pub fn from_vec(data: Vec<ElT>, shape: &[usize]) -> Result<Self, TensorError> {
        let shape = TensorShape::new(shape);
        let expected = shape.total_size();
        if data.len() != expected {
            return Err(TensorError::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self::from_parts(Dense::from_vec(data), shape))
    }

    /// Create a tensor from nested literal data.
    ///
    /// The shape is inferred from the nesting; ragged input is rejected.
    ///
    /// ```
    /// use tensorgrad::Tensor;
    ///
    /// let t = Tensor::<f64>::from_nested(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(t.shape(), &[2, 2]);
    /// assert_eq!(t.data(), &[1.0, 2.0, 3.0, 4.0]);
    /// ```
    pub fn from_nested<D: NestedData<ElT>>(data: D) -> Result<Self, TensorError> {
        let dims = data.dims();
        let mut flat = Vec::with_capacity(dims.iter().product());
        data.flatten_into(&dims, &mut flat)?;
        Self::from_vec(flat, &dims)
    }

    /// Zero tensor with the same shape as `self`.
    pub fn zeros_like(&self) -> Self {
        Self::zeros(self.shape())
    }

    /// Tensor of ones with the same shape as `self`.
    pub fn ones_like(&self) -> Self {
        Self::ones(self.shape())
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn tensor_shape(&self) -> &TensorShape {
        &self.shape
    }

    /// Get the rank (number of dimensions).
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.rank()
    }

    /// Get total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn data(&self) -> &[ElT] {
        self.storage.as_slice()
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [ElT] {
        self.storage.as_mut_slice()
    }

    pub fn into_vec(self) -> Vec<ElT> {
        self.storage.into_vec()
    }

    #[inline]
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    pub fn set_requires_grad(&mut self, requires_grad: bool) {
        self.requires_grad = requires_grad;
    }

    /// Builder-style variant of [`Tensor::set_requires_grad`].
    pub fn with_requires_grad(mut self, requires_grad: bool) -> Self {
        self.requires_grad = requires_grad;
        self
    }

    /// The device holding this tensor's data.
    pub fn device(&self) -> Device {
        Device::Cpu
    }

    /// Move to another device.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::UnsupportedOperation` for any non-CPU device.
    pub fn to_device(&self, device: Device) -> Result<Self, TensorError> {
        device.ensure_supported()?;
        let mut out = Self::zeros(self.shape());
        GenericBackend::copy(self.data(), out.data_mut());
        Ok(out.with_requires_grad(self.requires_grad))
    }

    fn linear_index(&self, indices: &[usize]) -> Result<usize, TensorError> {
        if indices.len() != self.ndim() {
            return Err(TensorError::WrongNumberOfIndices {
                expected: self.ndim(),
                actual: indices.len(),
            });
        }
        for (dim, (&idx, &dim_size)) in indices.iter().zip(self.shape.iter()).enumerate() {
            if idx >= dim_size {
                return Err(TensorError::IndexOutOfRange {
                    index: idx,
                    dim,
                    dim_size,
                });
            }
        }
        Ok(cartesian_to_linear(indices, &self.strides))
    }

    /// Get element by cartesian indices.
    ///
    /// Returns `None` if indices are out of bounds or wrong number of indices.
    pub fn get(&self, indices: &[usize]) -> Option<&ElT> {
        let linear = self.linear_index(indices).ok()?;
        self.storage.as_slice().get(linear)
    }

    /// Read the element at `indices`.
    ///
    /// # Errors
    ///
    /// Returns `WrongNumberOfIndices` or `IndexOutOfRange`.
    pub fn at(&self, indices: &[usize]) -> Result<ElT, TensorError> {
        let linear = self.linear_index(indices)?;
        Ok(self.storage[linear])
    }

    /// Set element by cartesian indices.
    ///
    /// # Errors
    ///
    /// Returns `WrongNumberOfIndices` or `IndexOutOfRange`.
    pub fn set(&mut self, indices: &[usize], value: ElT) -> Result<(), TensorError> {
        let linear = self.linear_index(indices)?;
        self.storage[linear] = value;
        Ok(())
    }

    /// Fill all elements with a value.
    pub fn fill(&mut self, value: ElT) {
        for x in self.storage.as_mut_slice() {
            *x = value;
        }
    }

    /// Zero all elements, keeping the buffer.
    pub fn clear(&mut self) {
        self.fill(ElT::zero());
    }

    /// The value of a single-element tensor.
    pub fn item(&self) -> Result<ElT, TensorError> {
        match self.data() {
            [value] => Ok(*value),
            _ => Err(TensorError::RankMismatch {
                expected: 0,
                actual: self.ndim(),
            }),
        }
    }

    /// Return a copy with a new shape of the same total size.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::InvalidReshape` if the total size differs.
    ///
    /// ```
    /// use tensorgrad::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// let r = t.reshape(&[3, 2]).unwrap();
    /// assert_eq!(r.shape(), &[3, 2]);
    /// assert_eq!(r.data(), t.data());
    /// assert!(t.reshape(&[4]).is_err());
    /// ```
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Self, TensorError> {
        let mut out = self.clone();
        out.reshape_inplace(new_shape)?;
        Ok(out)
    }

    /// Change the shape in place. Data is untouched; strides are recomputed.
    pub fn reshape_inplace(&mut self, new_shape: &[usize]) -> Result<(), TensorError> {
        let new_shape = TensorShape::new(new_shape);
        if new_shape.total_size() != self.shape.total_size() {
            return Err(TensorError::InvalidReshape {
                from: self.shape.to_vec(),
                to: new_shape.to_vec(),
            });
        }
        self.strides = new_shape.strides();
        self.shape = new_shape;
        Ok(())
    }

    /// Check that `other` has the same shape as `self`.
    pub fn ensure_same_shape(&self, other: &Self) -> Result<(), TensorError> {
        if self.shape != other.shape {
            return Err(TensorError::ShapeMismatch {
                lhs: self.shape.to_vec(),
                rhs: other.shape.to_vec(),
            });
        }
        Ok(())
    }
}

// Arithmetic, reductions and matrix ops delegate to the operations module.
#[allow(clippy::should_implement_trait)]
impl<ElT: Scalar> Tensor<ElT> {
    /// Element-wise `self + other`. Shapes must match exactly.
    pub fn add(&self, other: &Self) -> Result<Self, TensorError> {
        operations::add(self, other)
    }

    /// Element-wise `self - other`.
    pub fn sub(&self, other: &Self) -> Result<Self, TensorError> {
        operations::sub(self, other)
    }

    /// Element-wise `self * other`.
    pub fn mul(&self, other: &Self) -> Result<Self, TensorError> {
        operations::mul(self, other)
    }

    /// Element-wise `self / other`; fails on any zero divisor.
    pub fn div(&self, other: &Self) -> Result<Self, TensorError> {
        operations::div(self, other)
    }

    pub fn add_inplace(&mut self, other: &Self) -> Result<(), TensorError> {
        operations::add_inplace(self, other)
    }

    pub fn sub_inplace(&mut self, other: &Self) -> Result<(), TensorError> {
        operations::sub_inplace(self, other)
    }

    pub fn mul_inplace(&mut self, other: &Self) -> Result<(), TensorError> {
        operations::mul_inplace(self, other)
    }

    pub fn div_inplace(&mut self, other: &Self) -> Result<(), TensorError> {
        operations::div_inplace(self, other)
    }

    pub fn scale(&self, alpha: ElT) -> Self {
        operations::scale(self, alpha)
    }

    pub fn add_scalar(&self, value: ElT) -> Self {
        operations::apply(self, |x| x + value)
    }

    pub fn div_scalar(&self, divisor: ElT) -> Result<Self, TensorError> {
        operations::div_scalar(self, divisor)
    }

    pub fn map<F: Fn(ElT) -> ElT>(&self, f: F) -> Self {
        operations::apply(self, f)
    }

    pub fn neg(&self) -> Self {
        operations::apply(self, |x| -x)
    }

    pub fn relu(&self) -> Self {
        operations::relu(self)
    }

    pub fn sigmoid(&self) -> Self {
        operations::sigmoid(self)
    }

    pub fn exp(&self) -> Self {
        operations::apply(self, ElT::exp)
    }

    pub fn tanh(&self) -> Self {
        operations::apply(self, ElT::tanh)
    }

    /// Matrix product; both operands must be rank 2.
    pub fn matmul(&self, other: &Self) -> Result<Self, TensorError> {
        operations::matmul(self, other)
    }

    /// Rank-2 transpose into new storage.
    pub fn transpose(&self) -> Result<Self, TensorError> {
        operations::transpose(self)
    }

    /// Sum of all elements as a rank-0 tensor.
    pub fn sum(&self) -> Self {
        operations::sum(self)
    }

    /// Mean of all elements as a rank-0 tensor.
    pub fn mean(&self) -> Self {
        operations::mean(self)
    }
}

/// Equality compares shape and elements; the `requires_grad` flag is ignored.
impl<ElT: Scalar> PartialEq for Tensor<ElT> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.data() == other.data()
    }
}

impl<ElT: Scalar> fmt::Display for Tensor<ElT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_dim<T: Scalar>(
            f: &mut fmt::Formatter<'_>,
            data: &[T],
            shape: &[usize],
        ) -> fmt::Result {
            match shape.split_first() {
                None => write!(f, "{}", data[0]),
                Some((&n, rest)) => {
                    let chunk: usize = rest.iter().product();
                    write!(f, "[")?;
                    for i in 0..n {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write_dim(f, &data[i * chunk..(i + 1) * chunk], rest)?;
                    }
                    write!(f, "]")
                }
            }
        }
        write_dim(f, self.data(), self.shape())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_zeros_generic<T: Scalar>() {
        let t: Tensor<T> = Tensor::zeros(&[2, 3]);
        assert_eq!(t.shape(), &[2, 3]);
        assert_eq!(t.ndim(), 2);
        assert_eq!(t.len(), 6);
        assert_eq!(t.strides(), &[3, 1]);
        assert!(t.data().iter().all(|&x| x == T::zero()));
        assert!(!t.requires_grad());
    }

    #[test]
    fn test_zeros_f64() {
        test_zeros_generic::<f64>();
    }

    #[test]
    fn test_zeros_f32() {
        test_zeros_generic::<f32>();
    }

    #[test]
    fn test_from_vec_row_major() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        assert_eq!(t.at(&[0, 0]).unwrap(), 1.0);
        assert_eq!(t.at(&[0, 2]).unwrap(), 3.0);
        assert_eq!(t.at(&[1, 0]).unwrap(), 4.0);
        assert_eq!(t.at(&[1, 2]).unwrap(), 6.0);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let result = Tensor::<f64>::from_vec(vec![1.0, 2.0, 3.0], &[2, 3]);
        assert_eq!(
            result.unwrap_err(),
            TensorError::DataLengthMismatch {
                expected: 6,
                actual: 3
            }
        );
    }

    #[test]
    fn test_from_nested() {
        let t = Tensor::<f64>::from_nested(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(t.shape(), &[2, 3]);
        assert_eq!(t.at(&[1, 1]).unwrap(), 5.0);
    }

    #[test]
    fn test_from_nested_ragged() {
        let result = Tensor::<f64>::from_nested(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(TensorError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_at_errors() {
        let t: Tensor<f64> = Tensor::zeros(&[2, 3]);
        assert_eq!(
            t.at(&[0]).unwrap_err(),
            TensorError::WrongNumberOfIndices {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            t.at(&[0, 3]).unwrap_err(),
            TensorError::IndexOutOfRange {
                index: 3,
                dim: 1,
                dim_size: 3
            }
        );
        assert_eq!(t.get(&[2, 0]), None);
        assert_eq!(t.get(&[0, 0, 0]), None);
    }

    #[test]
    fn test_set() {
        let mut t: Tensor<f64> = Tensor::zeros(&[2, 3]);
        t.set(&[1, 2], 42.0).unwrap();
        assert_eq!(t.at(&[1, 2]).unwrap(), 42.0);
        assert_eq!(t.data()[5], 42.0);
        assert!(t.set(&[2, 0], 1.0).is_err());
    }

    #[test]
    fn test_fill_and_clear() {
        let mut t: Tensor<f64> = Tensor::zeros(&[2, 2]);
        t.fill(5.0);
        assert_eq!(t.data(), &[5.0; 4]);
        t.clear();
        assert_eq!(t.data(), &[0.0; 4]);
        assert_eq!(t.shape(), &[2, 2]);
    }

    #[test]
    fn test_scalar_tensor() {
        let t = Tensor::scalar(7.0);
        assert_eq!(t.ndim(), 0);
        assert_eq!(t.len(), 1);
        assert_eq!(t.at(&[]).unwrap(), 7.0);
        assert_eq!(t.item().unwrap(), 7.0);
    }

    #[test]
    fn test_item_requires_single_element() {
        let t: Tensor<f64> = Tensor::ones(&[2]);
        assert!(t.item().is_err());
        let single: Tensor<f64> = Tensor::ones(&[1, 1]);
        assert_eq!(single.item().unwrap(), 1.0);
    }

    #[test]
    fn test_reshape_roundtrip() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let back = t.reshape(&[3, 2]).unwrap().reshape(&[2, 3]).unwrap();
        assert_eq!(back, t);
        assert_eq!(back.strides(), &[3, 1]);
    }

    #[test]
    fn test_reshape_inplace_recomputes_strides() {
        let mut t: Tensor<f64> = Tensor::zeros(&[2, 3, 4]);
        t.reshape_inplace(&[4, 6]).unwrap();
        assert_eq!(t.shape(), &[4, 6]);
        assert_eq!(t.strides(), &[6, 1]);
    }

    #[test]
    fn test_reshape_invalid_size() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        assert_eq!(
            t.reshape(&[5]).unwrap_err(),
            TensorError::InvalidReshape {
                from: vec![2, 3],
                to: vec![5]
            }
        );
        assert!(t.reshape(&[2, 2]).is_err());
    }

    #[test]
    fn test_requires_grad_flag() {
        let mut t: Tensor<f64> = Tensor::ones(&[2]);
        assert!(!t.requires_grad());
        t.set_requires_grad(true);
        assert!(t.requires_grad());
        let t = t.with_requires_grad(false);
        assert!(!t.requires_grad());
    }

    #[test]
    fn test_equality_ignores_requires_grad() {
        let a: Tensor<f64> = Tensor::ones(&[2]);
        let b = a.clone().with_requires_grad(true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_device() {
        let t: Tensor<f64> = Tensor::ones(&[2]);
        assert_eq!(t.device(), Device::Cpu);
        let moved = t.clone().with_requires_grad(true).to_device(Device::Cpu).unwrap();
        assert_eq!(moved, t);
        assert!(moved.requires_grad());
        assert!(matches!(
            t.to_device(Device::Cuda(0)),
            Err(TensorError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_method_delegation() {
        let a = Tensor::from_vec(vec![1.0, -2.0], &[2]).unwrap();
        let b = Tensor::from_vec(vec![2.0, 4.0], &[2]).unwrap();
        assert_eq!(a.add(&b).unwrap().data(), &[3.0, 2.0]);
        assert_eq!(a.div(&b).unwrap().data(), &[0.5, -0.5]);
        assert_eq!(a.neg().data(), &[-1.0, 2.0]);
        assert_eq!(a.relu().data(), &[1.0, 0.0]);
        assert_eq!(a.add_scalar(1.0).data(), &[2.0, -1.0]);
        assert_eq!(a.scale(3.0).data(), &[3.0, -6.0]);
        assert_eq!(a.sum().item().unwrap(), -1.0);
        assert_eq!(b.mean().item().unwrap(), 3.0);
        assert_eq!(Tensor::scalar(0.0).exp().item().unwrap(), 1.0);
        assert_eq!(Tensor::scalar(0.0).tanh().item().unwrap(), 0.0);
    }

    #[test]
    fn test_compound_assign() {
        let mut a: Tensor<f64> = Tensor::ones(&[2, 2]);
        let b = Tensor::full(&[2, 2], 2.0);
        a.add_inplace(&b).unwrap();
        a.mul_inplace(&b).unwrap();
        assert_eq!(a.data(), &[6.0; 4]);
        assert!(a.sub_inplace(&Tensor::ones(&[4])).is_err());
    }

    #[test]
    fn test_display() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        assert_eq!(t.to_string(), "[[1, 2], [3, 4]]");
        assert_eq!(Tensor::scalar(2.5).to_string(), "2.5");
    }
}
