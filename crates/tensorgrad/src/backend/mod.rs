//! Backend abstraction for numeric kernels.
//!
//! Tensor operations never dispatch on a device themselves; they call the
//! kernels of a [`ComputeBackend`] on flat buffers. Only the CPU target is
//! implemented, by [`GenericBackend`] (naive loops).
//!
//! # Backends
//!
//! - `GenericBackend`: loop-based implementation (always available)

mod device;
mod generic;

pub use device::Device;
pub use generic::GenericBackend;

use crate::scalar::Scalar;

/// Synchronous kernels operating on raw, row-major buffers.
///
/// Callers guarantee that every slice has the length implied by the other
/// arguments; implementations may panic otherwise.
pub trait ComputeBackend {
    /// `out[i] = lhs[i] + rhs[i]`.
    fn add<T: Scalar>(lhs: &[T], rhs: &[T], out: &mut [T]);

    /// `out[i] = lhs[i] - rhs[i]`.
    fn sub<T: Scalar>(lhs: &[T], rhs: &[T], out: &mut [T]);

    /// `out[i] = lhs[i] * rhs[i]`.
    fn mul<T: Scalar>(lhs: &[T], rhs: &[T], out: &mut [T]);

    /// `out[i] = lhs[i] / rhs[i]`. Divisors are checked by the caller.
    fn div<T: Scalar>(lhs: &[T], rhs: &[T], out: &mut [T]);

    /// `out = lhs @ rhs` for an `m x k` times `k x n` product.
    fn matmul<T: Scalar>(lhs: &[T], rhs: &[T], out: &mut [T], m: usize, k: usize, n: usize);

    /// Write the transpose of a `rows x cols` matrix into `dst`.
    fn transpose<T: Scalar>(src: &[T], dst: &mut [T], rows: usize, cols: usize);

    /// Copy `src` into `dst`.
    fn copy<T: Scalar>(src: &[T], dst: &mut [T]);
}
