//! Storage for tensor element data.
//!
//! Storage is always a flat buffer; shape and strides live on the
//! [`Tensor`](crate::Tensor) that owns it.

mod dense;

pub use dense::Dense;
