/// Storage order of a matrix argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Consecutive elements of a row are adjacent in memory.
    RowMajor,
    /// Consecutive elements of a column are adjacent in memory.
    ColMajor,
}

/// Whether a matrix argument is used as-is or transposed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transpose {
    /// Use the matrix as stored.
    NoTrans,
    /// Use the transpose of the matrix.
    Trans,
    /// Use the conjugate transpose, identical to [`Transpose::Trans`] for real data.
    ConjTrans,
}

impl Transpose {
    /// Maps [`Transpose::ConjTrans`] onto [`Transpose::Trans`].
    #[inline]
    pub(crate) fn real(self) -> Self {
        match self {
            Transpose::ConjTrans => Transpose::Trans,
            t => t,
        }
    }
}

/// Which triangle of a matrix argument is referenced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Uplo {
    /// The upper triangle.
    Upper,
    /// The lower triangle.
    Lower,
}

/// Whether a triangular matrix has an implicit unit diagonal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Diag {
    /// The diagonal is read from storage.
    NonUnit,
    /// The diagonal is assumed to be all ones and is never read.
    Unit,
}
