//! Backward pass execution for reverse-mode automatic differentiation.

use super::graph::{ComputeNode, NodeId};
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;
use log::{debug, trace};
use std::collections::HashSet;
use std::rc::Rc;

/// Nodes reachable from `root`, ordered so that every node precedes its inputs.
///
/// Built from an iterative depth-first post-order (a node is emitted only
/// once all of its inputs have been emitted), then reversed. Shared inputs
/// are visited once.
pub(crate) fn topological_order<T: Scalar>(
    root: &Rc<ComputeNode<T>>,
) -> Vec<Rc<ComputeNode<T>>> {
    let mut order = Vec::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![(Rc::clone(root), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            order.push(node);
            continue;
        }
        if !visited.insert(node.id()) {
            continue;
        }
        stack.push((Rc::clone(&node), true));
        for input in node.inputs().iter().rev() {
            if !visited.contains(&input.id()) {
                stack.push((Rc::clone(input), false));
            }
        }
    }

    order.reverse();
    order
}

/// Run the backward pass from `root`, seeded with `seed`.
///
/// Interior gradients are recomputed from scratch; leaf gradients are added
/// to whatever they already hold. Only nodes that require grad receive
/// contributions. A root that does not require grad is a no-op.
///
/// # Errors
///
/// Returns `ShapeMismatch` if `seed` does not match the root's shape, or any
/// error raised by an operation's backward rule.
pub(crate) fn run_backward<T: Scalar>(
    root: &Rc<ComputeNode<T>>,
    seed: &Tensor<T>,
) -> Result<(), TensorError> {
    if !root.requires_grad() {
        trace!("backward from {} skipped: root does not require grad", root.id());
        return Ok(());
    }
    root.value().ensure_same_shape(seed)?;

    let order = topological_order(root);
    debug!("backward from {} over {} nodes", root.id(), order.len());

    for node in order.iter().filter(|n| !n.is_leaf()) {
        node.clear_grad();
    }
    root.accumulate_grad(seed)?;

    for node in &order {
        let Some(op) = node.op() else {
            continue;
        };
        if !node.requires_grad() {
            continue;
        }
        let Some(grad) = node.grad() else {
            trace!("node {} ({}) received no gradient", node.id(), op.name());
            continue;
        };

        trace!("node {} ({}) backward", node.id(), op.name());
        let input_grads = op.backward(&grad)?;
        for (input, input_grad) in node.inputs().iter().zip(input_grads) {
            if input.requires_grad() {
                input.accumulate_grad(&input_grad)?;
            }
        }
    }

    Ok(())
}
