//! Nested literal data for tensor construction.

use crate::error::TensorError;
use crate::scalar::Scalar;

/// Data whose nesting describes a tensor shape.
///
/// Implemented for the scalar element types themselves (rank 0), for
/// `Vec<D>` and for `[D; N]`. The shape is taken from the first element at
/// each level; [`NestedData::flatten_into`] rejects anything ragged.
pub trait NestedData<T: Scalar> {
    /// Shape implied by the nesting, read along the first element of each level.
    fn dims(&self) -> Vec<usize>;

    /// Append elements in row-major order, checking them against `dims`.
    fn flatten_into(&self, dims: &[usize], out: &mut Vec<T>) -> Result<(), TensorError>;
}

fn ragged(expected: &[usize], actual: Vec<usize>) -> TensorError {
    TensorError::ShapeMismatch {
        lhs: expected.to_vec(),
        rhs: actual,
    }
}

macro_rules! impl_nested_leaf {
    ($t:ty) => {
        impl NestedData<$t> for $t {
            fn dims(&self) -> Vec<usize> {
                Vec::new()
            }

            fn flatten_into(&self, dims: &[usize], out: &mut Vec<$t>) -> Result<(), TensorError> {
                if !dims.is_empty() {
                    return Err(ragged(dims, Vec::new()));
                }
                out.push(*self);
                Ok(())
            }
        }
    };
}

impl_nested_leaf!(f32);
impl_nested_leaf!(f64);

fn flatten_items<T: Scalar, D: NestedData<T>>(
    items: &[D],
    dims: &[usize],
    out: &mut Vec<T>,
) -> Result<(), TensorError> {
    match dims.split_first() {
        Some((&len, rest)) if len == items.len() => {
            for item in items {
                item.flatten_into(rest, out)?;
            }
            Ok(())
        }
        _ => {
            let mut actual = vec![items.len()];
            if let Some(first) = items.first() {
                actual.extend(first.dims());
            }
            Err(ragged(dims, actual))
        }
    }
}

fn nested_dims<T: Scalar, D: NestedData<T>>(items: &[D]) -> Vec<usize> {
    let mut dims = vec![items.len()];
    if let Some(first) = items.first() {
        dims.extend(first.dims());
    }
    dims
}

impl<T: Scalar, D: NestedData<T>> NestedData<T> for Vec<D> {
    fn dims(&self) -> Vec<usize> {
        nested_dims(self)
    }

    fn flatten_into(&self, dims: &[usize], out: &mut Vec<T>) -> Result<(), TensorError> {
        flatten_items(self, dims, out)
    }
}

impl<T: Scalar, D: NestedData<T>, const N: usize> NestedData<T> for [D; N] {
    fn dims(&self) -> Vec<usize> {
        nested_dims(self)
    }

    fn flatten_into(&self, dims: &[usize], out: &mut Vec<T>) -> Result<(), TensorError> {
        flatten_items(self, dims, out)
    }
}
