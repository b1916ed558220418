#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use lumen_core as core;

#[doc(inline)]
pub use lumen_blas as blas;

#[doc(inline)]
pub use lumen_linalg as linalg;
