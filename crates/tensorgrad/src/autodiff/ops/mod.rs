//! Tracked operations on [`Variable`](super::Variable).
//!
//! Every operation computes its forward value with the tensor primitives,
//! then records a node holding the state its backward rule needs.

mod activation;
mod arith;
mod linalg;
mod reduce;
