use lumen_blas::BlasError;
use lumen_core::CoreError;
use thiserror::Error;

/// An error type for the decomposition engines.
///
/// The variants fall into the four kinds reported by the classification
/// helpers: malformed arguments, singular data, non-convergence and internal
/// consistency failures.
#[derive(Error, Debug, PartialEq)]
pub enum LinalgError {
    /// A square matrix was required.
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// The SVD requires at least as many rows as columns.
    #[error("Matrix has more columns than rows ({rows}x{cols}), the SVD needs M >= N")]
    WideMatrix {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// A vector, matrix or permutation argument has the wrong size.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// The expected size.
        expected: usize,
        /// The size provided.
        actual: usize,
    },

    /// The factorized matrix has a zero pivot.
    #[error("Matrix is singular")]
    Singular,

    /// The SVD iteration did not converge within its sweep bound.
    #[error("SVD did not converge after {iterations} iterations")]
    NotConverged {
        /// Number of sweeps performed.
        iterations: usize,
    },

    /// Error from the core module.
    #[error(transparent)]
    CoreError(#[from] CoreError),

    /// Error from a BLAS kernel.
    #[error(transparent)]
    BlasError(#[from] BlasError),
}

impl LinalgError {
    pub(crate) fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Returns true if the caller passed malformed arguments.
    pub fn is_precondition(&self) -> bool {
        match self {
            Self::NotSquare { .. }
            | Self::WideMatrix { .. }
            | Self::LengthMismatch { .. }
            | Self::CoreError(_) => true,
            Self::BlasError(e) => !matches!(e, BlasError::UnrecognizedOperation),
            Self::Singular | Self::NotConverged { .. } => false,
        }
    }

    /// Returns true if the data cannot be factorized or solved.
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::Singular)
    }

    /// Returns true if an iterative algorithm exceeded its iteration bound.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, Self::NotConverged { .. })
    }

    /// Returns true if the error points at an implementation bug rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::BlasError(BlasError::UnrecognizedOperation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let errors = [
            LinalgError::NotSquare { rows: 2, cols: 3 },
            LinalgError::Singular,
            LinalgError::NotConverged { iterations: 300 },
            LinalgError::BlasError(BlasError::UnrecognizedOperation),
            LinalgError::from(CoreError::InvalidSize(0)),
            LinalgError::from(BlasError::InvalidIncrement(0)),
        ];
        let kinds: Vec<[bool; 4]> = errors
            .iter()
            .map(|e| {
                [
                    e.is_precondition(),
                    e.is_singular(),
                    e.is_convergence_failure(),
                    e.is_internal(),
                ]
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                [true, false, false, false],
                [false, true, false, false],
                [false, false, true, false],
                [false, false, false, true],
                [true, false, false, false],
                [true, false, false, false],
            ]
        );
    }
}
