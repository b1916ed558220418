//! IEEE-754 double precision machine constants.
//!
//! The numerical engines compare against these values when deciding whether an
//! off-diagonal entry is negligible or whether a block needs rescaling before
//! its Givens arithmetic is carried out.

/// Difference between 1.0 and the next representable double.
pub const DBL_EPSILON: f64 = f64::EPSILON;

/// Smallest positive normal double.
pub const DBL_MIN: f64 = f64::MIN_POSITIVE;

/// Largest finite double.
pub const DBL_MAX: f64 = f64::MAX;

/// Square root of [`DBL_MIN`].
pub const SQRT_DBL_MIN: f64 = 1.491_668_146_240_041_3e-154;

/// Square root of [`DBL_MAX`].
pub const SQRT_DBL_MAX: f64 = 1.340_780_792_994_259_6e154;
