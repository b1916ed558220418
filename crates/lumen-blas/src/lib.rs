#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! The crate exposes two layers:
//!
//! - **Kernels** ([`level1`], [`level2`], [`level3`]): CBLAS-style functions
//!   over flat `f64` buffers with explicit lengths, increments and leading
//!   dimensions. Increments may be negative.
//! - **Typed operations** ([`ops`]): the same kernels applied to
//!   [`lumen_core`] vector and matrix views, with dimension checks.
//!
//! # Example
//!
//! ```rust
//! use lumen_blas::level1::ddot;
//!
//! // a negative increment walks y backwards
//! let x = [1.0, 2.0];
//! let y = [3.0, 4.0];
//! assert_eq!(ddot(2, &x, 1, &y, -1).unwrap(), 1.0 * 4.0 + 2.0 * 3.0);
//! ```

/// Error types for the BLAS module.
pub mod error;

/// Level 1 vector-vector kernels.
pub mod level1;

/// Level 2 matrix-vector kernels.
pub mod level2;

/// Level 3 matrix-matrix kernels.
pub mod level3;

/// Kernels applied to vector and matrix views.
pub mod ops;

mod stride;

/// Order, transpose, triangle and diagonal flags.
pub mod types;

pub use crate::error::BlasError;
pub use crate::types::{Diag, Order, Transpose, Uplo};
