//! Generic (naive loop-based) backend implementation.

use crate::backend::ComputeBackend;
use crate::scalar::Scalar;

/// Generic backend using naive loop-based implementations.
///
/// This is the default CPU target. Matmul is the classic triple loop with an
/// `i-p-j` ordering so the inner loop walks both `rhs` and `out` rows.
pub struct GenericBackend;

impl GenericBackend {
    #[inline]
    fn zip_into<T: Scalar>(lhs: &[T], rhs: &[T], out: &mut [T], f: impl Fn(T, T) -> T) {
        for ((o, &a), &b) in out.iter_mut().zip(lhs.iter()).zip(rhs.iter()) {
            *o = f(a, b);
        }
    }
}

impl ComputeBackend for GenericBackend {
    fn add<T: Scalar>(lhs: &[T], rhs: &[T], out: &mut [T]) {
        Self::zip_into(lhs, rhs, out, |a, b| a + b);
    }

    fn sub<T: Scalar>(lhs: &[T], rhs: &[T], out: &mut [T]) {
        Self::zip_into(lhs, rhs, out, |a, b| a - b);
    }

    fn mul<T: Scalar>(lhs: &[T], rhs: &[T], out: &mut [T]) {
        Self::zip_into(lhs, rhs, out, |a, b| a * b);
    }

    fn div<T: Scalar>(lhs: &[T], rhs: &[T], out: &mut [T]) {
        Self::zip_into(lhs, rhs, out, |a, b| a / b);
    }

    fn matmul<T: Scalar>(lhs: &[T], rhs: &[T], out: &mut [T], m: usize, k: usize, n: usize) {
        for o in out.iter_mut() {
            *o = T::zero();
        }
        for i in 0..m {
            for p in 0..k {
                let a = lhs[i * k + p];
                let rhs_row = &rhs[p * n..(p + 1) * n];
                let out_row = &mut out[i * n..(i + 1) * n];
                for (o, &b) in out_row.iter_mut().zip(rhs_row.iter()) {
                    *o += a * b;
                }
            }
        }
    }

    fn transpose<T: Scalar>(src: &[T], dst: &mut [T], rows: usize, cols: usize) {
        for i in 0..rows {
            for j in 0..cols {
                dst[j * rows + i] = src[i * cols + j];
            }
        }
    }

    fn copy<T: Scalar>(src: &[T], dst: &mut [T]) {
        dst.copy_from_slice(src);
    }
}
