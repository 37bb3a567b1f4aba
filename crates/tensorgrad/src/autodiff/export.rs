//! Snapshot of a computation graph as a `petgraph` graph.
//!
//! Edges point from an input to the node consuming it, so the exported graph
//! reads in forward order. The edge weight is the input's position in the
//! consumer's argument list.

use super::backward::topological_order;
use super::graph::NodeId;
use super::variable::Variable;
use crate::scalar::Scalar;
use crate::shape::TensorShape;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fmt;

/// Node weight of an exported graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: NodeId,
    /// Producing operation, `"Leaf"` for leaves.
    pub op: &'static str,
    pub shape: TensorShape,
    pub requires_grad: bool,
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.op, self.shape)?;
        if self.requires_grad {
            write!(f, " grad")?;
        }
        Ok(())
    }
}

/// Build a `DiGraph` of every node reachable from `root`.
pub fn to_graph<T: Scalar>(root: &Variable<T>) -> DiGraph<GraphNode, usize> {
    let order = topological_order(root.node());
    let mut graph = DiGraph::with_capacity(order.len(), order.len());
    let mut indices: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(order.len());

    // Leaves come last in `order`; insert in forward order.
    for node in order.iter().rev() {
        let index = graph.add_node(GraphNode {
            id: node.id(),
            op: node.op().map_or("Leaf", |op| op.name()),
            shape: node.value().tensor_shape().clone(),
            requires_grad: node.requires_grad(),
        });
        indices.insert(node.id(), index);
    }

    for node in &order {
        let consumer = indices[&node.id()];
        for (position, input) in node.inputs().iter().enumerate() {
            graph.add_edge(indices[&input.id()], consumer, position);
        }
    }

    graph
}

/// Render the graph reachable from `root` in Graphviz DOT format.
///
/// ```
/// use tensorgrad::{Tensor, Variable};
/// use tensorgrad::autodiff::to_dot;
///
/// let x = Variable::leaf(Tensor::scalar(2.0));
/// let y = (&x * &x)?;
/// let dot = to_dot(&y);
/// assert!(dot.starts_with("digraph"));
/// assert!(dot.contains("Mul"));
/// # Ok::<(), tensorgrad::TensorError>(())
/// ```
pub fn to_dot<T: Scalar>(root: &Variable<T>) -> String {
    let graph = to_graph(root);
    format!("{}", Dot::new(&graph))
}
