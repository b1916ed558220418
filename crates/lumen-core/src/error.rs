use thiserror::Error;

/// An error type for storage, view and permutation operations.
///
/// Every variant is a precondition violation: the caller passed a shape, an
/// index or a buffer that cannot describe a valid object.
#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    /// A block, vector, matrix or permutation was requested with zero elements.
    #[error("Invalid size {0}: sizes must be at least 1")]
    InvalidSize(usize),

    /// A vector stride of zero was requested.
    #[error("Invalid stride {0}: strides must be at least 1")]
    InvalidStride(usize),

    /// The row stride of a matrix is smaller than its number of columns.
    #[error("Invalid row stride: tda {tda} is smaller than the number of columns {size2}")]
    InvalidTda {
        /// The requested row stride.
        tda: usize,
        /// The number of columns of the matrix.
        size2: usize,
    },

    /// The requested window does not fit in the underlying storage.
    #[error("View out of bounds: the view needs {required} elements but only {available} are available")]
    ViewOutOfBounds {
        /// Number of elements the window reaches into.
        required: usize,
        /// Number of elements actually available.
        available: usize,
    },

    /// A row, column or element index exceeds its dimension.
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index.
        index: usize,
        /// The size of the dimension being indexed.
        size: usize,
    },

    /// Two objects that must have the same length do not.
    #[error("Length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// The expected number of elements.
        expected: usize,
        /// The number of elements provided.
        actual: usize,
    },

    /// Two matrices that must have the same shape do not.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// The expected `[rows, cols]`.
        expected: [usize; 2],
        /// The `[rows, cols]` provided.
        actual: [usize; 2],
    },

    /// A square matrix was required.
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// The index array of a permutation is not a bijection.
    #[error("Invalid permutation: the indices are not a bijection on [0, {0})")]
    InvalidPermutation(usize),
}

impl CoreError {
    /// Creates an IndexOutOfBounds error.
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// Creates a LengthMismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }
}
