//! Element-wise nonlinearities.

use crate::autodiff::op::Op;
use crate::autodiff::saved_tensor::SavedTensor;
use crate::autodiff::variable::Variable;
use crate::scalar::Scalar;

impl<T: Scalar> Variable<T> {
    /// `max(x, 0)`; the gradient is masked where the input is not positive.
    pub fn relu(&self) -> Self {
        let input = self.tensor();
        let value = input.relu();
        Self::from_op(
            value,
            Op::Relu {
                input: SavedTensor::new(input),
            },
            &[self],
        )
    }

    pub fn sigmoid(&self) -> Self {
        let value = self.value().sigmoid();
        let output = SavedTensor::new(value.clone());
        Self::from_op(value, Op::Sigmoid { output }, &[self])
    }

    pub fn tanh(&self) -> Self {
        let value = self.value().tanh();
        let output = SavedTensor::new(value.clone());
        Self::from_op(value, Op::Tanh { output }, &[self])
    }

    pub fn exp(&self) -> Self {
        let value = self.value().exp();
        let output = SavedTensor::new(value.clone());
        Self::from_op(value, Op::Exp { output }, &[self])
    }
}

#[cfg(test)]
mod tests {
    use crate::autodiff::Variable;
    use crate::tensor::Tensor;
    use approx::assert_relative_eq;

    fn vector(data: Vec<f64>) -> Variable<f64> {
        let n = data.len();
        Variable::leaf(Tensor::from_vec(data, &[n]).unwrap())
    }

    #[test]
    fn test_relu_mask() {
        let x = vector(vec![-2.0, 0.0, 3.0]);
        let y = x.relu();
        assert_eq!(y.value().data(), &[0.0, 0.0, 3.0]);

        y.sum().backward().unwrap();
        assert_eq!(x.grad().unwrap().data(), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_sigmoid_derivative() {
        let x = vector(vec![0.0, 2.0]);
        let y = x.sigmoid();
        assert_relative_eq!(y.value().data()[0], 0.5);

        y.sum().backward().unwrap();
        let grad = x.grad().unwrap();
        assert_relative_eq!(grad.data()[0], 0.25);

        let s = 1.0 / (1.0 + (-2.0f64).exp());
        assert_relative_eq!(grad.data()[1], s * (1.0 - s), epsilon = 1e-12);
    }

    #[test]
    fn test_tanh_derivative() {
        let x = vector(vec![0.5]);
        x.tanh().backward().unwrap();
        let t = 0.5f64.tanh();
        assert_relative_eq!(x.grad().unwrap().data()[0], 1.0 - t * t, epsilon = 1e-12);
    }

    #[test]
    fn test_exp_derivative() {
        let x = vector(vec![0.0, 1.0]);
        x.exp().sum().backward().unwrap();
        let grad = x.grad().unwrap();
        assert_relative_eq!(grad.data()[0], 1.0);
        assert_relative_eq!(grad.data()[1], std::f64::consts::E, epsilon = 1e-12);
    }

    #[test]
    fn test_activation_names() {
        let x = vector(vec![1.0]);
        assert_eq!(x.relu().op_name(), Some("ReLU"));
        assert_eq!(x.sigmoid().op_name(), Some("Sigmoid"));
        assert_eq!(x.tanh().op_name(), Some("Tanh"));
        assert_eq!(x.exp().op_name(), Some("Exp"));
    }
}
