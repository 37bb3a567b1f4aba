//! Reverse-mode automatic differentiation over a dynamic graph.
//!
//! Arithmetic on [`Variable`] handles records [`ComputeNode`]s as it runs.
//! Nodes share ownership of their inputs through `Rc`, so the graph is a DAG
//! that lives exactly as long as something still refers to it.
//!
//! # Architecture
//!
//! ```text
//! Variable<T>  ──wraps──►  Rc<ComputeNode<T>>
//!                               │  value: Tensor<T>
//!                               │  grad:  Option<Tensor<T>>
//!                               │  op:    Option<Op<T>>  ──saves──►  SavedTensor (Rc)
//!                               ▼
//!                          inputs: Vec<Rc<ComputeNode<T>>>
//! ```
//!
//! [`Variable::backward`] orders the reachable nodes by a depth-first
//! post-order, reversed, so each node runs its [`Op::backward`] only after
//! every consumer has added its contribution. Values reused along several
//! paths therefore receive the sum of all contributions.
//!
//! # Example
//!
//! ```
//! use tensorgrad::{Tensor, Variable};
//!
//! let x = Variable::leaf(Tensor::scalar(5.0));
//! let y = (&x * &x)?;
//! y.backward()?;
//! assert_eq!(x.grad().unwrap().item()?, 10.0);
//! # Ok::<(), tensorgrad::TensorError>(())
//! ```
//!
//! # Design Notes
//!
//! - Single-threaded: `Rc` and `RefCell`, no locking.
//! - Leaf gradients accumulate across backward calls until cleared; interior
//!   gradients are recomputed on every call.

mod backward;
#[cfg(feature = "export")]
mod export;
mod graph;
mod op;
mod ops;
mod saved_tensor;
mod variable;

#[cfg(feature = "export")]
pub use export::{GraphNode, to_dot, to_graph};
pub use graph::{ComputeNode, NodeId};
pub use op::Op;
pub use saved_tensor::SavedTensor;
pub use variable::Variable;
