use num_traits::{One, Zero};

use crate::{
    error::CoreError,
    storage::Block,
    view::{matrix_window, MatrixView, MatrixViewMut, VectorView, VectorViewMut},
};

/// An owned, row-major matrix backed by a [`Block`].
///
/// Element `(i, j)` lives at `block[offset + i * tda + j]`. Owned matrices
/// created with [`Matrix::new`] or [`Matrix::from_vec`] are dense, so their
/// row stride equals the number of columns.
///
/// # Examples
///
/// ```rust
/// use lumen_core::Matrix;
///
/// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(m.shape(), [2, 3]);
/// assert_eq!(m.get(1, 0), 4.0);
/// assert_eq!(m.row(0).unwrap().to_vec(), vec![1.0, 2.0, 3.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T = f64> {
    block: Block<T>,
    offset: usize,
    size1: usize,
    size2: usize,
    tda: usize,
}

impl<T> Matrix<T> {
    /// Creates a dense `size1 x size2` matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSize`] if a dimension is zero and
    /// [`CoreError::LengthMismatch`] if `data.len() != size1 * size2`.
    pub fn from_vec(size1: usize, size2: usize, data: Vec<T>) -> Result<Self, CoreError> {
        if size1 == 0 {
            return Err(CoreError::InvalidSize(size1));
        }
        if size2 == 0 {
            return Err(CoreError::InvalidSize(size2));
        }
        if data.len() != size1 * size2 {
            return Err(CoreError::length_mismatch(size1 * size2, data.len()));
        }
        Self::from_block(Block::from_vec(data)?, 0, size1, size2, size2)
    }

    /// Creates a matrix over an existing block.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero, if `tda < size2` or if the
    /// last element falls outside the block.
    pub fn from_block(
        block: Block<T>,
        offset: usize,
        size1: usize,
        size2: usize,
        tda: usize,
    ) -> Result<Self, CoreError> {
        matrix_window(block.len(), offset, size1, size2, tda)?;
        Ok(Self {
            block,
            offset,
            size1,
            size2,
            tda,
        })
    }

    /// Returns the number of rows.
    #[inline]
    pub fn size1(&self) -> usize {
        self.size1
    }

    /// Returns the number of columns.
    #[inline]
    pub fn size2(&self) -> usize {
        self.size2
    }

    /// Returns `[rows, cols]`.
    #[inline]
    pub fn shape(&self) -> [usize; 2] {
        [self.size1, self.size2]
    }

    /// Returns the row stride.
    #[inline]
    pub fn tda(&self) -> usize {
        self.tda
    }

    /// Returns true if the matrix has as many rows as columns.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.size1 == self.size2
    }

    /// Consumes the matrix and returns the backing block.
    pub fn into_block(self) -> Block<T> {
        self.block
    }

    fn end(&self) -> usize {
        self.offset + (self.size1 - 1) * self.tda + self.size2
    }

    /// Returns a read-only view of the whole matrix.
    pub fn view(&self) -> MatrixView<'_, T> {
        let end = self.end();
        MatrixView::from_parts(
            &self.block.as_slice()[self.offset..end],
            self.size1,
            self.size2,
            self.tda,
        )
    }

    /// Returns a mutable view of the whole matrix.
    pub fn view_mut(&mut self) -> MatrixViewMut<'_, T> {
        let end = self.end();
        MatrixViewMut::from_parts(
            &mut self.block.as_mut_slice()[self.offset..end],
            self.size1,
            self.size2,
            self.tda,
        )
    }

    /// Returns a view of row `i`.
    pub fn row(&self, i: usize) -> Result<VectorView<'_, T>, CoreError> {
        self.view().row(i)
    }

    /// Returns a view of column `j`.
    pub fn column(&self, j: usize) -> Result<VectorView<'_, T>, CoreError> {
        self.view().column(j)
    }

    /// Returns a view of the main diagonal.
    pub fn diagonal(&self) -> VectorView<'_, T> {
        self.view().diagonal()
    }

    /// Returns a view of `n` elements of row `i` starting at column `offset`.
    pub fn subrow(&self, i: usize, offset: usize, n: usize) -> Result<VectorView<'_, T>, CoreError> {
        self.view().subrow(i, offset, n)
    }

    /// Returns a view of `n` elements of column `j` starting at row `offset`.
    pub fn subcolumn(
        &self,
        j: usize,
        offset: usize,
        n: usize,
    ) -> Result<VectorView<'_, T>, CoreError> {
        self.view().subcolumn(j, offset, n)
    }

    /// Returns the `n1 x n2` sub-matrix whose top-left corner is `(k1, k2)`.
    pub fn submatrix(
        &self,
        k1: usize,
        k2: usize,
        n1: usize,
        n2: usize,
    ) -> Result<MatrixView<'_, T>, CoreError> {
        self.view().submatrix(k1, k2, n1, n2)
    }

    /// Returns a mutable view of row `i`.
    pub fn row_mut(&mut self, i: usize) -> Result<VectorViewMut<'_, T>, CoreError> {
        self.view_mut().into_row(i)
    }

    /// Returns a mutable view of column `j`.
    pub fn column_mut(&mut self, j: usize) -> Result<VectorViewMut<'_, T>, CoreError> {
        self.view_mut().into_column(j)
    }

    /// Returns a mutable view of the main diagonal.
    pub fn diagonal_mut(&mut self) -> VectorViewMut<'_, T> {
        self.view_mut().into_diagonal()
    }

    /// Returns a mutable `n1 x n2` sub-matrix view whose top-left corner is `(k1, k2)`.
    pub fn submatrix_mut(
        &mut self,
        k1: usize,
        k2: usize,
        n1: usize,
        n2: usize,
    ) -> Result<MatrixViewMut<'_, T>, CoreError> {
        self.view_mut().into_submatrix(k1, k2, n1, n2)
    }

    /// Exchanges rows `i` and `j`.
    pub fn swap_rows(&mut self, i: usize, j: usize) -> Result<(), CoreError> {
        self.view_mut().swap_rows(i, j)
    }

    /// Exchanges columns `i` and `j`.
    pub fn swap_columns(&mut self, i: usize, j: usize) -> Result<(), CoreError> {
        self.view_mut().swap_columns(i, j)
    }
}

impl<T: Zero + Clone> Matrix<T> {
    /// Allocates a dense `size1 x size2` matrix of zeros.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSize`] if a dimension is zero.
    pub fn new(size1: usize, size2: usize) -> Result<Self, CoreError> {
        if size1 == 0 {
            return Err(CoreError::InvalidSize(size1));
        }
        if size2 == 0 {
            return Err(CoreError::InvalidSize(size2));
        }
        Self::from_block(Block::new(size1 * size2)?, 0, size1, size2, size2)
    }
}

impl<T: Zero + One + Copy> Matrix<T> {
    /// Allocates the `n x n` identity matrix.
    pub fn identity(n: usize) -> Result<Self, CoreError> {
        let mut m = Self::new(n, n)?;
        m.set_identity();
        Ok(m)
    }

    /// Sets the diagonal to one and every other element to zero.
    pub fn set_identity(&mut self) {
        self.view_mut().set_identity();
    }
}

impl<T: Copy> Matrix<T> {
    /// Returns element `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        assert!(
            i < self.size1 && j < self.size2,
            "index ({i}, {j}) out of range ({}, {})",
            self.size1,
            self.size2
        );
        self.block.as_slice()[self.offset + i * self.tda + j]
    }

    /// Sets element `(i, j)` to `x`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, x: T) {
        assert!(
            i < self.size1 && j < self.size2,
            "index ({i}, {j}) out of range ({}, {})",
            self.size1,
            self.size2
        );
        self.block.as_mut_slice()[self.offset + i * self.tda + j] = x;
    }

    /// Sets every element to `x`.
    pub fn set_all(&mut self, x: T) {
        self.view_mut().set_all(x);
    }

    /// Copies the elements of `src` into this matrix.
    pub fn copy_from(&mut self, src: &MatrixView<'_, T>) -> Result<(), CoreError> {
        self.view_mut().copy_from(src)
    }

    /// Copies the elements into a new dense row-major vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.view().to_vec()
    }
}

impl<T: Copy + Zero> Matrix<T> {
    /// Sets every element to zero.
    pub fn set_zero(&mut self) {
        self.view_mut().set_zero();
    }
}
