//! Differentiable primitives and their backward rules.

use super::saved_tensor::SavedTensor;
use crate::error::TensorError;
use crate::operations::apply_binary;
use crate::scalar::Scalar;
use crate::shape::TensorShape;
use crate::tensor::Tensor;

/// The operation that produced a [`ComputeNode`](super::ComputeNode).
///
/// Each variant carries the forward state its backward rule reads. Inputs are
/// not stored here; they are the node's input list, in the same order as the
/// gradients returned by [`Op::backward`].
#[derive(Debug, Clone)]
pub enum Op<T: Scalar> {
    Add,
    Sub,
    Neg,
    Mul {
        lhs: SavedTensor<T>,
        rhs: SavedTensor<T>,
    },
    Div {
        lhs: SavedTensor<T>,
        rhs: SavedTensor<T>,
    },
    MatMul {
        lhs: SavedTensor<T>,
        rhs: SavedTensor<T>,
    },
    Sum {
        input_shape: TensorShape,
    },
    Mean {
        input_shape: TensorShape,
    },
    Relu {
        input: SavedTensor<T>,
    },
    /// Keeps the forward output, since the derivative is `s * (1 - s)`.
    Sigmoid {
        output: SavedTensor<T>,
    },
    Tanh {
        output: SavedTensor<T>,
    },
    Exp {
        output: SavedTensor<T>,
    },
    Reshape {
        input_shape: TensorShape,
    },
    Transpose,
}

impl<T: Scalar> Op<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Op::Add => "Add",
            Op::Sub => "Sub",
            Op::Neg => "Neg",
            Op::Mul { .. } => "Mul",
            Op::Div { .. } => "Div",
            Op::MatMul { .. } => "MatMul",
            Op::Sum { .. } => "Sum",
            Op::Mean { .. } => "Mean",
            Op::Relu { .. } => "ReLU",
            Op::Sigmoid { .. } => "Sigmoid",
            Op::Tanh { .. } => "Tanh",
            Op::Exp { .. } => "Exp",
            Op::Reshape { .. } => "Reshape",
            Op::Transpose => "Transpose",
        }
    }

    /// Number of inputs the operation consumes.
    pub fn arity(&self) -> usize {
        match self {
            Op::Add | Op::Sub | Op::Mul { .. } | Op::Div { .. } | Op::MatMul { .. } => 2,
            _ => 1,
        }
    }

    /// Compute VJP: given the gradient of the output, return one gradient
    /// per input, in input order.
    pub fn backward(&self, grad: &Tensor<T>) -> Result<Vec<Tensor<T>>, TensorError> {
        let grads = match self {
            Op::Add => vec![grad.clone(), grad.clone()],
            Op::Sub => vec![grad.clone(), grad.neg()],
            Op::Neg => vec![grad.neg()],
            Op::Mul { lhs, rhs } => vec![grad.mul(rhs)?, grad.mul(lhs)?],
            Op::Div { lhs, rhs } => {
                // The forward pass already rejected zero divisors.
                let grad_lhs = apply_binary(grad, rhs.get(), |g, b| g / b)?;
                let quotient = apply_binary(lhs.get(), rhs.get(), |a, b| -a / (b * b))?;
                vec![grad_lhs, grad.mul(&quotient)?]
            }
            Op::MatMul { lhs, rhs } => vec![
                grad.matmul(&rhs.transpose()?)?,
                lhs.transpose()?.matmul(grad)?,
            ],
            Op::Sum { input_shape } => vec![Tensor::full(input_shape, grad.item()?)],
            Op::Mean { input_shape } => {
                let n = T::from_usize(input_shape.total_size());
                vec![Tensor::full(input_shape, grad.item()? / n)]
            }
            Op::Relu { input } => vec![apply_binary(grad, input.get(), |g, x| {
                if x > T::zero() { g } else { T::zero() }
            })?],
            Op::Sigmoid { output } => {
                vec![apply_binary(grad, output.get(), |g, s| g * s * (T::one() - s))?]
            }
            Op::Tanh { output } => {
                vec![apply_binary(grad, output.get(), |g, t| g * (T::one() - t * t))?]
            }
            Op::Exp { output } => vec![grad.mul(output)?],
            Op::Reshape { input_shape } => vec![grad.reshape(input_shape)?],
            Op::Transpose => vec![grad.transpose()?],
        };
        debug_assert_eq!(grads.len(), self.arity());
        Ok(grads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn saved(data: Vec<f64>, shape: &[usize]) -> SavedTensor<f64> {
        SavedTensor::new(Tensor::from_vec(data, shape).unwrap())
    }

    #[test]
    fn test_add_routes_unchanged() {
        let g = Tensor::from_vec(vec![1.0, 2.0], &[2]).unwrap();
        let grads = Op::<f64>::Add.backward(&g).unwrap();
        assert_eq!(grads, vec![g.clone(), g]);
    }

    #[test]
    fn test_sub_negates_rhs() {
        let g = Tensor::from_vec(vec![1.0, -2.0], &[2]).unwrap();
        let grads = Op::<f64>::Sub.backward(&g).unwrap();
        assert_eq!(grads[0].data(), &[1.0, -2.0]);
        assert_eq!(grads[1].data(), &[-1.0, 2.0]);
    }

    #[test]
    fn test_mul_swaps_operands() {
        let op = Op::Mul {
            lhs: saved(vec![3.0], &[]),
            rhs: saved(vec![4.0], &[]),
        };
        let grads = op.backward(&Tensor::scalar(1.0)).unwrap();
        assert_eq!(grads[0].item().unwrap(), 4.0);
        assert_eq!(grads[1].item().unwrap(), 3.0);
    }

    #[test]
    fn test_div_quotient_rule() {
        let op = Op::Div {
            lhs: saved(vec![10.0], &[]),
            rhs: saved(vec![2.0], &[]),
        };
        let grads = op.backward(&Tensor::scalar(1.0)).unwrap();
        assert_relative_eq!(grads[0].item().unwrap(), 0.5);
        assert_relative_eq!(grads[1].item().unwrap(), -2.5);
    }

    #[test]
    fn test_matmul_transpose_rule() {
        let op = Op::MatMul {
            lhs: saved(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]),
            rhs: saved(vec![5.0, 6.0, 7.0, 8.0], &[2, 2]),
        };
        let grads = op.backward(&Tensor::ones(&[2, 2])).unwrap();
        assert_eq!(grads[0].data(), &[11.0, 15.0, 11.0, 15.0]);
        assert_eq!(grads[1].data(), &[4.0, 4.0, 6.0, 6.0]);
    }

    #[test]
    fn test_sum_and_mean_broadcast() {
        let shape = TensorShape::new(&[2, 2]);
        let grads = Op::<f64>::Sum {
            input_shape: shape.clone(),
        }
        .backward(&Tensor::scalar(3.0))
        .unwrap();
        assert_eq!(grads[0], Tensor::full(&[2, 2], 3.0));

        let grads = Op::<f64>::Mean { input_shape: shape }
            .backward(&Tensor::scalar(2.0))
            .unwrap();
        assert_eq!(grads[0], Tensor::full(&[2, 2], 0.5));
    }

    #[test]
    fn test_relu_masks() {
        let op = Op::Relu {
            input: saved(vec![-1.0, 0.0, 2.0], &[3]),
        };
        let grads = op.backward(&Tensor::full(&[3], 5.0)).unwrap();
        assert_eq!(grads[0].data(), &[0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_sigmoid_uses_output() {
        let op = Op::Sigmoid {
            output: saved(vec![0.5], &[]),
        };
        let grads = op.backward(&Tensor::scalar(1.0)).unwrap();
        assert_relative_eq!(grads[0].item().unwrap(), 0.25);
    }

    #[test]
    fn test_reshape_restores_input_shape() {
        let op = Op::<f64>::Reshape {
            input_shape: TensorShape::new(&[2, 3]),
        };
        let grads = op.backward(&Tensor::ones(&[6])).unwrap();
        assert_eq!(grads[0].shape(), &[2, 3]);
    }

    #[test]
    fn test_transpose_transposes_grad() {
        let g = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let grads = Op::<f64>::Transpose.backward(&g).unwrap();
        assert_eq!(grads[0].shape(), &[3, 2]);
        assert_eq!(grads[0].data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_names_and_arity() {
        assert_eq!(Op::<f32>::Add.name(), "Add");
        assert_eq!(Op::<f32>::Add.arity(), 2);
        assert_eq!(Op::<f32>::Transpose.arity(), 1);
    }
}
