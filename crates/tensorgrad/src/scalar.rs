//! Scalar trait for tensor element types.

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Trait for the arithmetic element types supported by tensorgrad.
///
/// Requires the four arithmetic operators, ordering (for masks such as ReLU),
/// and construction of zero and one. The transcendental functions back the
/// activation operations.
pub trait Scalar:
    Copy
    + Debug
    + Display
    + Default
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + 'static
{
    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Lossy conversion from an element count.
    fn from_usize(n: usize) -> Self;

    /// Natural exponential.
    fn exp(self) -> Self;

    /// Hyperbolic tangent.
    fn tanh(self) -> Self;
}

macro_rules! impl_float_scalar {
    ($t:ty) => {
        impl Scalar for $t {
            #[inline]
            fn one() -> Self {
                1.0
            }

            #[inline]
            fn from_usize(n: usize) -> Self {
                n as $t
            }

            #[inline]
            fn exp(self) -> Self {
                <$t>::exp(self)
            }

            #[inline]
            fn tanh(self) -> Self {
                <$t>::tanh(self)
            }
        }
    };
}

impl_float_scalar!(f32);
impl_float_scalar!(f64);
