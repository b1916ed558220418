use lumen_core::CoreError;
use thiserror::Error;

/// An error type for BLAS kernels and their typed wrappers.
#[derive(Error, Debug, PartialEq)]
pub enum BlasError {
    /// The combination of order, transpose and triangle flags is not supported.
    #[error("Unrecognized operation")]
    UnrecognizedOperation,

    /// A vector increment of zero was passed to a kernel that needs to walk the vector.
    #[error("Invalid increment {0}: increments must be non-zero")]
    InvalidIncrement(isize),

    /// The leading dimension of a matrix argument is smaller than its row length.
    #[error("Invalid leading dimension {lda}: must be at least {min}")]
    InvalidLeadingDimension {
        /// The leading dimension passed in.
        lda: usize,
        /// The minimum acceptable leading dimension.
        min: usize,
    },

    /// A buffer is too short for the declared dimensions and increment.
    #[error("Buffer too small: {required} elements required, {available} available")]
    BufferTooSmall {
        /// Number of elements the kernel reaches into.
        required: usize,
        /// Number of elements actually present.
        available: usize,
    },

    /// The operands of a typed operation have incompatible dimensions.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Error from the core module.
    #[error(transparent)]
    CoreError(#[from] CoreError),
}

impl BlasError {
    pub(crate) fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }
}
