//! Element-wise arithmetic and the operator overloads built on it.

use crate::autodiff::op::Op;
use crate::autodiff::saved_tensor::SavedTensor;
use crate::autodiff::variable::Variable;
use crate::error::TensorError;
use crate::scalar::Scalar;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[allow(clippy::should_implement_trait)]
impl<T: Scalar> Variable<T> {
    /// Element-wise `self + other`; shapes must match.
    pub fn add(&self, other: &Self) -> Result<Self, TensorError> {
        let value = self.value().add(&other.value())?;
        Ok(Self::from_op(value, Op::Add, &[self, other]))
    }

    /// Element-wise `self - other`.
    pub fn sub(&self, other: &Self) -> Result<Self, TensorError> {
        let value = self.value().sub(&other.value())?;
        Ok(Self::from_op(value, Op::Sub, &[self, other]))
    }

    /// Element-wise `self * other`. Both operands are saved for backward.
    pub fn mul(&self, other: &Self) -> Result<Self, TensorError> {
        let (lhs, rhs) = (self.tensor(), other.tensor());
        let value = lhs.mul(&rhs)?;
        let op = Op::Mul {
            lhs: SavedTensor::new(lhs),
            rhs: SavedTensor::new(rhs),
        };
        Ok(Self::from_op(value, op, &[self, other]))
    }

    /// Element-wise `self / other`.
    ///
    /// # Errors
    ///
    /// `DivisionByZero` if any element of `other` is zero.
    pub fn div(&self, other: &Self) -> Result<Self, TensorError> {
        let (lhs, rhs) = (self.tensor(), other.tensor());
        let value = lhs.div(&rhs)?;
        let op = Op::Div {
            lhs: SavedTensor::new(lhs),
            rhs: SavedTensor::new(rhs),
        };
        Ok(Self::from_op(value, op, &[self, other]))
    }

    pub fn neg(&self) -> Self {
        let value = self.value().neg();
        Self::from_op(value, Op::Neg, &[self])
    }
}

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident) => {
        impl<T: Scalar> $trait<&Variable<T>> for &Variable<T> {
            type Output = Result<Variable<T>, TensorError>;

            fn $method(self, rhs: &Variable<T>) -> Self::Output {
                Variable::$method(self, rhs)
            }
        }

        impl<T: Scalar> $trait<Variable<T>> for &Variable<T> {
            type Output = Result<Variable<T>, TensorError>;

            fn $method(self, rhs: Variable<T>) -> Self::Output {
                Variable::$method(self, &rhs)
            }
        }

        impl<T: Scalar> $trait<&Variable<T>> for Variable<T> {
            type Output = Result<Variable<T>, TensorError>;

            fn $method(self, rhs: &Variable<T>) -> Self::Output {
                Variable::$method(&self, rhs)
            }
        }

        impl<T: Scalar> $trait<Variable<T>> for Variable<T> {
            type Output = Result<Variable<T>, TensorError>;

            fn $method(self, rhs: Variable<T>) -> Self::Output {
                Variable::$method(&self, &rhs)
            }
        }
    };
}

impl_binary_operator!(Add, add);
impl_binary_operator!(Sub, sub);
impl_binary_operator!(Mul, mul);
impl_binary_operator!(Div, div);

impl<T: Scalar> Neg for &Variable<T> {
    type Output = Variable<T>;

    fn neg(self) -> Variable<T> {
        Variable::neg(self)
    }
}

impl<T: Scalar> Neg for Variable<T> {
    type Output = Variable<T>;

    fn neg(self) -> Variable<T> {
        Variable::neg(&self)
    }
}
