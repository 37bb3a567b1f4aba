//! Tensor operations.
//!
//! Free functions over [`Tensor`](crate::Tensor); the tensor methods of the
//! same names delegate here. Numeric loops go through the
//! [`ComputeBackend`](crate::backend::ComputeBackend) kernels where one
//! exists.
//!
//! ```text
//! elementwise   apply, apply_binary, add/sub/mul/div, *_inplace, relu, sigmoid
//! matmul        matmul, transpose (rank 2)
//! reduce        sum, mean (to rank 0)
//! ```

mod elementwise;
mod matmul;
mod reduce;

pub use elementwise::{
    add, add_inplace, apply, apply_binary, apply_inplace, div, div_inplace, div_scalar, mul,
    mul_inplace, relu, scale, scale_inplace, sigmoid, sub, sub_inplace,
};
pub use matmul::{matmul, transpose};
pub use reduce::{mean, sum};
