//! Stochastic gradient descent.

use super::Optimizer;
use crate::autodiff::Variable;
use crate::error::TensorError;
use crate::operations::scale_inplace;
use crate::scalar::Scalar;
use log::{debug, trace};
use std::collections::HashSet;

/// Plain SGD: `param.value -= learning_rate * param.grad`.
///
/// # Example
///
/// ```
/// use tensorgrad::{Optimizer, Sgd, Tensor, Variable};
///
/// let w = Variable::leaf(Tensor::scalar(10.0_f64));
/// let mut sgd = Sgd::new(vec![w.clone()], 0.1);
///
/// (&w + &w)?.backward()?;
/// sgd.step()?;
/// assert!((w.value().item()? - 9.8).abs() < 1e-12);
/// # Ok::<(), tensorgrad::TensorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Sgd<T: Scalar> {
    params: Vec<Variable<T>>,
    learning_rate: T,
}

impl<T: Scalar> Sgd<T> {
    /// Track `params`. A parameter listed more than once is kept once.
    pub fn new(params: Vec<Variable<T>>, learning_rate: T) -> Self {
        let mut seen = HashSet::new();
        let params = params
            .into_iter()
            .filter(|param| seen.insert(param.id()))
            .collect();
        Self {
            params,
            learning_rate,
        }
    }

    /// The tracked parameters.
    pub fn params(&self) -> &[Variable<T>] {
        &self.params
    }
}

impl<T: Scalar> Optimizer<T> for Sgd<T> {
    /// Apply one update.
    ///
    /// Fails with [`TensorError::ValueBorrowed`] if a `value()` borrow of a
    /// tracked parameter is still held; parameters before it are already updated.
    fn step(&mut self) -> Result<(), TensorError> {
        debug!(
            "sgd step over {} params, lr={}",
            self.params.len(),
            self.learning_rate
        );
        for param in &self.params {
            if !param.requires_grad() {
                trace!("param {} skipped: does not require grad", param.id());
                continue;
            }
            let Some(grad) = param.grad() else {
                trace!("param {} skipped: no gradient", param.id());
                continue;
            };
            let mut update = grad;
            scale_inplace(&mut update, self.learning_rate);
            param.value_mut()?.sub_inplace(&update)?;
        }
        Ok(())
    }

    fn zero_grad(&mut self) {
        for param in &self.params {
            param.zero_grad();
        }
    }

    fn learning_rate(&self) -> T {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, learning_rate: T) {
        self.learning_rate = learning_rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::Tensor;
    use approx::assert_relative_eq;

    #[test]
    fn test_step_updates_value() {
        // d(2p)/dp = 2
        let p = Variable::leaf(Tensor::scalar(10.0));
        let mut sgd = Sgd::new(vec![p.clone()], 0.1);
        (&p + &p).unwrap().backward().unwrap();
        assert_eq!(p.grad().unwrap().item().unwrap(), 2.0);

        sgd.step().unwrap();
        assert_relative_eq!(p.value().item().unwrap(), 9.8, epsilon = 1e-12);
        assert!(p.requires_grad());
    }

    #[test]
    fn test_duplicate_params_updated_once() {
        let p = Variable::leaf(Tensor::scalar(10.0));
        let mut sgd = Sgd::new(vec![p.clone(), p.clone()], 0.1);
        assert_eq!(sgd.params().len(), 1);

        (&p + &p).unwrap().backward().unwrap();
        sgd.step().unwrap();
        assert_relative_eq!(p.value().item().unwrap(), 9.8, epsilon = 1e-12);
    }

    #[test]
    fn test_step_while_value_borrowed_fails() {
        let p = Variable::leaf(Tensor::scalar(1.0));
        let mut sgd = Sgd::new(vec![p.clone()], 0.5);
        (&p * &p).unwrap().backward().unwrap();

        let held = p.value();
        let err = sgd.step().unwrap_err();
        assert_eq!(err, TensorError::ValueBorrowed(p.id().index()));
        drop(held);

        sgd.step().unwrap();
        assert_relative_eq!(p.value().item().unwrap(), 0.0);
    }

    #[test]
    fn test_step_skips_params_without_requires_grad() {
        let frozen = Variable::new(Tensor::<f64>::full(&[2], 3.0));
        frozen.node().accumulate_grad(&Tensor::ones(&[2])).unwrap();
        assert!(frozen.grad().is_some());

        let mut sgd = Sgd::new(vec![frozen.clone()], 1.0);
        sgd.step().unwrap();
        assert_eq!(frozen.value().data(), &[3.0, 3.0]);
    }

    #[test]
    fn test_step_skips_params_without_grad() {
        let p = Variable::leaf(Tensor::<f64>::ones(&[3]));
        let mut sgd = Sgd::new(vec![p.clone()], 0.5);
        sgd.step().unwrap();
        assert_eq!(p.value().data(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_zero_grad_keeps_shape() {
        let p = Variable::leaf(Tensor::<f64>::ones(&[2, 2]));
        let mut sgd = Sgd::new(vec![p.clone()], 0.1);
        p.sum().backward().unwrap();

        sgd.zero_grad();
        let grad = p.grad().unwrap();
        assert_eq!(grad.shape(), &[2, 2]);
        assert!(grad.data().iter().all(|&g| g == 0.0));

        sgd.zero_grad();
        assert_eq!(p.grad().unwrap(), Tensor::zeros(&[2, 2]));
    }

    #[test]
    fn test_learning_rate_accessors() {
        let mut sgd = Sgd::<f32>::new(Vec::new(), 0.01);
        assert_eq!(sgd.learning_rate(), 0.01);
        sgd.set_learning_rate(0.5);
        assert_eq!(sgd.learning_rate(), 0.5);
        assert!(sgd.params().is_empty());
        assert!(sgd.step().is_ok());
    }

    #[test]
    fn test_descends_quadratic() {
        // minimize (w - 3)^2
        let w = Variable::leaf(Tensor::scalar(0.0));
        let target = Variable::scalar(3.0);
        let mut sgd = Sgd::new(vec![w.clone()], 0.1);

        for _ in 0..200 {
            sgd.zero_grad();
            let diff = (&w - &target).unwrap();
            (&diff * &diff).unwrap().backward().unwrap();
            sgd.step().unwrap();
        }
        assert_relative_eq!(w.value().item().unwrap(), 3.0, epsilon = 1e-6);
    }
}
