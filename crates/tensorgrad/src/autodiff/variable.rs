//! User-facing handle over a computation graph node.

use super::backward::run_backward;
use super::graph::{ComputeNode, NodeId};
use super::op::Op;
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;
use std::cell::{Ref, RefMut};
use std::fmt;
use std::rc::Rc;

/// A tensor value together with its node in the computation graph.
///
/// Cloning a `Variable` is cheap and yields another handle to the same node,
/// so gradients written by [`Variable::backward`] are visible through every
/// clone. Arithmetic on variables records a new node whose `requires_grad`
/// is the OR of its inputs' flags.
///
/// # Example
///
/// ```
/// use tensorgrad::{Tensor, Variable};
///
/// let x = Variable::leaf(Tensor::scalar(2.0));
/// let y = Variable::leaf(Tensor::scalar(3.0));
/// let b = Variable::leaf(Tensor::scalar(5.0));
///
/// let z = ((&x * &y)? + &b)?;
/// z.backward()?;
///
/// assert_eq!(z.value().item()?, 11.0);
/// assert_eq!(x.grad().unwrap().item()?, 3.0);
/// assert_eq!(y.grad().unwrap().item()?, 2.0);
/// assert_eq!(b.grad().unwrap().item()?, 1.0);
/// # Ok::<(), tensorgrad::TensorError>(())
/// ```
#[derive(Clone)]
pub struct Variable<T: Scalar> {
    node: Rc<ComputeNode<T>>,
}

impl<T: Scalar> Variable<T> {
    /// Wrap a tensor as a leaf. The tensor's own `requires_grad` flag is kept.
    pub fn new(value: Tensor<T>) -> Self {
        Self {
            node: Rc::new(ComputeNode::leaf(value)),
        }
    }

    /// Wrap a tensor as a leaf that requires grad.
    pub fn leaf(value: Tensor<T>) -> Self {
        Self::new(value.with_requires_grad(true))
    }

    /// Rank-0 leaf that does not require grad.
    pub fn scalar(value: T) -> Self {
        Self::new(Tensor::scalar(value))
    }

    /// Leaf built from row-major data; does not require grad.
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self, TensorError> {
        Ok(Self::new(Tensor::from_vec(data, shape)?))
    }

    /// Record the result of `op` applied to `inputs`.
    pub(crate) fn from_op(value: Tensor<T>, op: Op<T>, inputs: &[&Variable<T>]) -> Self {
        let requires_grad = inputs.iter().any(|v| v.requires_grad());
        let inputs = inputs.iter().map(|v| Rc::clone(&v.node)).collect();
        Self {
            node: Rc::new(ComputeNode::derived(
                value.with_requires_grad(requires_grad),
                inputs,
                op,
            )),
        }
    }

    pub(crate) fn node(&self) -> &Rc<ComputeNode<T>> {
        &self.node
    }

    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    /// Borrow the forward value.
    ///
    /// The borrow must be released before the value is updated in place,
    /// e.g. by an optimizer step.
    pub fn value(&self) -> Ref<'_, Tensor<T>> {
        self.node.value()
    }

    pub(crate) fn value_mut(&self) -> Result<RefMut<'_, Tensor<T>>, TensorError> {
        self.node.value_mut()
    }

    /// Owned copy of the forward value.
    pub fn tensor(&self) -> Tensor<T> {
        self.node.value().clone()
    }

    pub fn shape(&self) -> Vec<usize> {
        self.node.value().shape().to_vec()
    }

    pub fn requires_grad(&self) -> bool {
        self.node.requires_grad()
    }

    pub fn set_requires_grad(&self, requires_grad: bool) {
        self.node.set_requires_grad(requires_grad);
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    /// Name of the producing operation, `None` for leaves.
    pub fn op_name(&self) -> Option<&'static str> {
        self.node.op().map(Op::name)
    }

    /// The accumulated gradient, if any has been computed.
    pub fn grad(&self) -> Option<Tensor<T>> {
        self.node.grad()
    }

    /// Drop the accumulated gradient.
    pub fn clear_grad(&self) {
        self.node.clear_grad();
    }

    /// Reset the accumulated gradient to zeros of the value's shape.
    pub fn zero_grad(&self) {
        self.node.zero_grad();
    }

    /// A new leaf holding a copy of the value, cut off from the graph.
    pub fn detach(&self) -> Self {
        Self::new(self.tensor().with_requires_grad(false))
    }

    /// Backpropagate from this variable with an all-ones seed gradient.
    ///
    /// A no-op when the variable does not require grad.
    pub fn backward(&self) -> Result<(), TensorError> {
        let seed = self.node.value().ones_like();
        run_backward(&self.node, &seed)
    }

    /// Backpropagate with an explicit seed gradient of the variable's shape.
    pub fn backward_with(&self, seed: &Tensor<T>) -> Result<(), TensorError> {
        run_backward(&self.node, seed)
    }
}

impl<T: Scalar> From<Tensor<T>> for Variable<T> {
    fn from(value: Tensor<T>) -> Self {
        Self::new(value)
    }
}

impl<T: Scalar> fmt::Debug for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("id", &self.id())
            .field("op", &self.op_name())
            .field("value", &*self.value())
            .field("requires_grad", &self.requires_grad())
            .finish()
    }
}

impl<T: Scalar> fmt::Display for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
