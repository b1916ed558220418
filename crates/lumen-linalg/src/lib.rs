#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! The decompositions work in place on [`lumen_core`] views and are built on
//! the [`lumen_blas`] typed operations:
//!
//! - **LU** ([`lu`]): Gaussian elimination with partial pivoting, with solve,
//!   inverse, determinant and iterative refinement.
//! - **SVD** ([`svd`]): Householder bidiagonalization ([`bidiag`]) followed by
//!   implicit-shift QR iteration with Givens rotations.
//!
//! Each module offers the in-place routines and an owned wrapper
//! ([`LuDecomposition`], [`SvDecomposition`]) that copies its input.
//!
//! # Example
//!
//! ```rust
//! use lumen_core::{Matrix, Vector};
//! use lumen_linalg::{LuDecomposition, SvDecomposition};
//!
//! let a = Matrix::from_vec(2, 2, vec![2.0, 1.0, 1.0, 3.0]).unwrap();
//! let b = Vector::from_vec(vec![3.0, 5.0]).unwrap();
//!
//! let x = LuDecomposition::new(&a).unwrap().solve(&b).unwrap();
//! let y = SvDecomposition::new(&a).unwrap().solve(&b).unwrap();
//! assert!((x.get(0) - y.get(0)).abs() < 1e-12);
//! assert!((x.get(1) - y.get(1)).abs() < 1e-12);
//! ```

/// Bidiagonalization by Householder reflections.
pub mod bidiag;

/// Error types for the linear algebra module.
pub mod error;

/// Givens rotations.
pub mod givens;

/// Householder reflections.
pub mod householder;

/// LU decomposition with partial pivoting.
pub mod lu;

/// Singular value decomposition.
pub mod svd;

mod svdstep;

pub use crate::error::LinalgError;
pub use crate::lu::LuDecomposition;
pub use crate::svd::SvDecomposition;
