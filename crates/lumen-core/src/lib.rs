#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `lumen-core` holds the data model shared by the BLAS and linear algebra
//! crates: owned storage blocks, owned vectors and matrices on top of them,
//! and borrowed views that address a strided window of another object.
//!
//! - **Block**: a contiguous owned buffer, fixed in size at construction.
//! - **Vector** / **Matrix**: owned objects that address a window of a block.
//! - **VectorView** / **MatrixView**: read-only borrowed windows.
//! - **VectorViewMut** / **MatrixViewMut**: mutable borrowed windows that
//!   write through to the parent storage.
//! - **Permutation**: an index bijection applied to vectors in place.
//!
//! Matrices are row-major: element `(i, j)` lives at `i * tda + j`, where the
//! row stride `tda` is at least the number of columns.
//!
//! # Quick Start
//!
//! ```rust
//! use lumen_core::Matrix;
//!
//! let mut m = Matrix::from_vec(3, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
//!
//! // views borrow the parent and write through to it
//! let mut sub = m.submatrix_mut(1, 1, 2, 2).unwrap();
//! sub.set(0, 0, 0.0);
//! assert_eq!(m.get(1, 1), 0.0);
//!
//! // a column view of a row-major matrix has stride tda
//! let col = m.column(2).unwrap();
//! assert_eq!(col.stride(), 3);
//! assert_eq!(col.to_vec(), vec![3.0, 6.0, 9.0]);
//! ```

/// Machine constants for IEEE-754 doubles.
pub mod consts;

/// Error types for the core module.
pub mod error;

/// Owned matrix type.
pub mod matrix;

/// Permutations of vector elements.
pub mod permutation;

/// Owned storage blocks.
pub mod storage;

/// Owned vector type.
pub mod vector;

/// Borrowed vector and matrix views.
pub mod view;

/// Serialization support for owned objects.
#[cfg(feature = "serde")]
pub mod serde;

pub use crate::error::CoreError;
pub use crate::matrix::Matrix;
pub use crate::permutation::Permutation;
pub use crate::storage::Block;
pub use crate::vector::Vector;
pub use crate::view::{MatrixView, MatrixViewMut, VectorView, VectorViewMut};
