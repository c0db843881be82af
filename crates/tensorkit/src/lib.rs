//! # tensorkit
//!
//! A minimal N-dimensional tensor container with shared storage.
//!
//! ## Modules
//!
//! - **core** — Tensor container: shapes, row-major indexing, typed shared buffers, factories
//! - **ops** — Elementwise arithmetic: add, sub, mul, div over equally sized tensors

/// Tensor container: shapes, storage, element access.
pub use tensorkit_core as core;

/// Elementwise arithmetic operators.
pub use tensorkit_ops as ops;

pub use tensorkit_core::{DataType, Element, Shape, Storage, Tensor, TensorError, TensorResult};
