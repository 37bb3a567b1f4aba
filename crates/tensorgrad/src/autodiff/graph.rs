//! Computation graph nodes for reverse-mode automatic differentiation.

use super::op::Op;
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Unique identifier for a node in the computation graph.
///
/// Ids are drawn from a per-thread counter and never reused within a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Get the internal index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

thread_local! {
    static NEXT_ID: Cell<usize> = const { Cell::new(0) };
}

fn next_node_id() -> NodeId {
    NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        NodeId(id)
    })
}

/// One vertex of the computation DAG.
///
/// A node owns the value it represents, shares ownership of the nodes it
/// was computed from, and carries the gradient accumulated into it during
/// the last backward traversal. Leaves have no producing [`Op`].
///
/// The `requires_grad` flag lives on the wrapped tensor.
pub struct ComputeNode<T: Scalar> {
    id: NodeId,
    value: RefCell<Tensor<T>>,
    inputs: Vec<Rc<ComputeNode<T>>>,
    grad: RefCell<Option<Tensor<T>>>,
    op: Option<Op<T>>,
}

impl<T: Scalar> ComputeNode<T> {
    /// Create a leaf node around a user-provided tensor.
    pub(crate) fn leaf(value: Tensor<T>) -> Self {
        Self {
            id: next_node_id(),
            value: RefCell::new(value),
            inputs: Vec::new(),
            grad: RefCell::new(None),
            op: None,
        }
    }

    /// Create a node produced by `op` from `inputs`.
    pub(crate) fn derived(value: Tensor<T>, inputs: Vec<Rc<ComputeNode<T>>>, op: Op<T>) -> Self {
        Self {
            id: next_node_id(),
            value: RefCell::new(value),
            inputs,
            grad: RefCell::new(None),
            op: Some(op),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Borrow the forward value.
    pub fn value(&self) -> Ref<'_, Tensor<T>> {
        self.value.borrow()
    }

    /// Mutably borrow the forward value, failing if a `value()` borrow is live.
    pub(crate) fn value_mut(&self) -> Result<RefMut<'_, Tensor<T>>, TensorError> {
        self.value
            .try_borrow_mut()
            .map_err(|_| TensorError::ValueBorrowed(self.id.index()))
    }

    pub fn inputs(&self) -> &[Rc<ComputeNode<T>>] {
        &self.inputs
    }

    pub fn op(&self) -> Option<&Op<T>> {
        self.op.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.op.is_none()
    }

    pub fn requires_grad(&self) -> bool {
        self.value.borrow().requires_grad()
    }

    pub(crate) fn set_requires_grad(&self, requires_grad: bool) {
        self.value.borrow_mut().set_requires_grad(requires_grad);
    }

    /// Copy of the accumulated gradient, if any contribution has arrived.
    pub fn grad(&self) -> Option<Tensor<T>> {
        self.grad.borrow().clone()
    }

    pub fn has_grad(&self) -> bool {
        self.grad.borrow().is_some()
    }

    /// Add `contribution` into the gradient buffer.
    ///
    /// The buffer is allocated as zeros of the value's shape on first use.
    pub(crate) fn accumulate_grad(&self, contribution: &Tensor<T>) -> Result<(), TensorError> {
        let mut slot = self.grad.borrow_mut();
        let buffer = slot.get_or_insert_with(|| self.value.borrow().zeros_like());
        buffer.add_inplace(contribution)
    }

    /// Drop the gradient buffer.
    pub(crate) fn clear_grad(&self) {
        self.grad.borrow_mut().take();
    }

    /// Zero the gradient buffer in place, allocating it if absent.
    pub(crate) fn zero_grad(&self) {
        let mut slot = self.grad.borrow_mut();
        match slot.as_mut() {
            Some(buffer) => buffer.clear(),
            None => *slot = Some(self.value.borrow().zeros_like()),
        }
    }
}

// Unlink inputs iteratively so dropping a long chain does not recurse.
impl<T: Scalar> Drop for ComputeNode<T> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.inputs);
        while let Some(input) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(input) {
                pending.append(&mut node.inputs);
            }
        }
    }
}

impl<T: Scalar> fmt::Debug for ComputeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeNode")
            .field("id", &self.id)
            .field("op", &self.op.as_ref().map(Op::name))
            .field("shape", &self.value.borrow().shape())
            .field("requires_grad", &self.requires_grad())
            .field("num_inputs", &self.inputs.len())
            .field("has_grad", &self.has_grad())
            .finish()
    }
}
