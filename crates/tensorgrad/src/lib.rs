//! tensorgrad - dense tensors with reverse-mode automatic differentiation
//!
//! This crate provides row-major n-dimensional tensors, a dynamic
//! computation graph built by arithmetic on [`Variable`] handles, and an
//! [`Sgd`] optimizer that consumes the resulting gradients.
//!
//! # Architecture
//!
//! ```text
//! Level 1: Autodiff (autodiff, optim modules)
//!     → Variable ops record ComputeNodes, backward() walks them
//!     → Sgd updates parameters from accumulated grads
//!
//! Level 2: Tensor API (tensor, operations modules)
//!     → element-wise, matmul, transpose, reshape, sum/mean
//!
//! Level 3: Backend implementation (backend module)
//!     → GenericBackend (naive loops on the CPU)
//! ```
//!
//! # Example
//!
//! ```
//! use tensorgrad::{Optimizer, Sgd, Tensor, Variable};
//!
//! // y = relu(x @ w), loss = mean(y)
//! let x = Variable::new(Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2])?);
//! let w = Variable::leaf(Tensor::<f64>::from_nested([[0.5, -1.0], [0.25, 1.0]])?);
//!
//! let loss = x.matmul(&w)?.relu().mean();
//! loss.backward()?;
//!
//! let grad = w.grad().unwrap();
//! assert_eq!(grad.shape(), &[2, 2]);
//!
//! let mut sgd = Sgd::new(vec![w.clone()], 0.1);
//! sgd.step()?;
//! sgd.zero_grad();
//! # Ok::<(), tensorgrad::TensorError>(())
//! ```
//!
//! # Features
//!
//! - `random` (default): `Tensor::random`, `Tensor::randn` and friends.
//! - `export` (default): graph export to `petgraph` and Graphviz DOT.

pub mod autodiff;
pub mod backend;
pub mod error;
pub mod nested;
pub mod operations;
pub mod optim;
#[cfg(feature = "random")]
pub mod random;
pub mod scalar;
pub mod shape;
pub mod storage;
pub mod strides;
pub mod tensor;

pub use autodiff::Variable;
pub use backend::Device;
pub use error::TensorError;
pub use nested::NestedData;
pub use optim::{Optimizer, Sgd};
#[cfg(feature = "random")]
pub use random::RandomScalar;
pub use scalar::Scalar;
pub use shape::TensorShape;
pub use storage::Dense;
pub use tensor::Tensor;
