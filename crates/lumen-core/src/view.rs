use std::ops::Range;

use num_traits::{One, Zero};

use crate::error::CoreError;

/// Location of a strided vector inside a parent buffer.
struct VectorWindow {
    range: Range<usize>,
    size: usize,
    stride: usize,
}

/// Location of a row-major matrix inside a parent buffer.
struct MatrixWindow {
    range: Range<usize>,
    size1: usize,
    size2: usize,
}

/// Validates a vector window over a buffer of `len` elements and returns the
/// slice range it spans.
pub(crate) fn vector_window(
    len: usize,
    offset: usize,
    size: usize,
    stride: usize,
) -> Result<Range<usize>, CoreError> {
    if size == 0 {
        return Err(CoreError::InvalidSize(size));
    }
    if stride == 0 {
        return Err(CoreError::InvalidStride(stride));
    }
    let required = offset + (size - 1) * stride + 1;
    if required > len {
        return Err(CoreError::ViewOutOfBounds {
            required,
            available: len,
        });
    }
    Ok(offset..required)
}

/// Validates a matrix window over a buffer of `len` elements and returns the
/// slice range it spans.
pub(crate) fn matrix_window(
    len: usize,
    offset: usize,
    size1: usize,
    size2: usize,
    tda: usize,
) -> Result<Range<usize>, CoreError> {
    if size1 == 0 {
        return Err(CoreError::InvalidSize(size1));
    }
    if size2 == 0 {
        return Err(CoreError::InvalidSize(size2));
    }
    if tda < size2 {
        return Err(CoreError::InvalidTda { tda, size2 });
    }
    let required = offset + (size1 - 1) * tda + size2;
    if required > len {
        return Err(CoreError::ViewOutOfBounds {
            required,
            available: len,
        });
    }
    Ok(offset..required)
}

fn subvector_window(
    size: usize,
    stride: usize,
    offset: usize,
    sub_stride: usize,
    n: usize,
) -> Result<VectorWindow, CoreError> {
    if n == 0 {
        return Err(CoreError::InvalidSize(n));
    }
    if sub_stride == 0 {
        return Err(CoreError::InvalidStride(sub_stride));
    }
    let last = offset + (n - 1) * sub_stride;
    if last >= size {
        return Err(CoreError::ViewOutOfBounds {
            required: last + 1,
            available: size,
        });
    }
    let start = offset * stride;
    let new_stride = sub_stride * stride;
    Ok(VectorWindow {
        range: start..start + (n - 1) * new_stride + 1,
        size: n,
        stride: new_stride,
    })
}

fn row_window(size1: usize, size2: usize, tda: usize, i: usize) -> Result<VectorWindow, CoreError> {
    if i >= size1 {
        return Err(CoreError::index_out_of_bounds(i, size1));
    }
    let start = i * tda;
    Ok(VectorWindow {
        range: start..start + size2,
        size: size2,
        stride: 1,
    })
}

fn column_window(
    size1: usize,
    size2: usize,
    tda: usize,
    j: usize,
) -> Result<VectorWindow, CoreError> {
    if j >= size2 {
        return Err(CoreError::index_out_of_bounds(j, size2));
    }
    Ok(VectorWindow {
        range: j..j + (size1 - 1) * tda + 1,
        size: size1,
        stride: tda,
    })
}

fn diagonal_window(size1: usize, size2: usize, tda: usize) -> VectorWindow {
    let size = size1.min(size2);
    VectorWindow {
        range: 0..(size - 1) * (tda + 1) + 1,
        size,
        stride: tda + 1,
    }
}

#[allow(clippy::too_many_arguments)]
fn submatrix_window(
    size1: usize,
    size2: usize,
    tda: usize,
    k1: usize,
    k2: usize,
    n1: usize,
    n2: usize,
) -> Result<MatrixWindow, CoreError> {
    if n1 == 0 {
        return Err(CoreError::InvalidSize(n1));
    }
    if n2 == 0 {
        return Err(CoreError::InvalidSize(n2));
    }
    if k1 + n1 > size1 {
        return Err(CoreError::ViewOutOfBounds {
            required: k1 + n1,
            available: size1,
        });
    }
    if k2 + n2 > size2 {
        return Err(CoreError::ViewOutOfBounds {
            required: k2 + n2,
            available: size2,
        });
    }
    let start = k1 * tda + k2;
    Ok(MatrixWindow {
        range: start..start + (n1 - 1) * tda + n2,
        size1: n1,
        size2: n2,
    })
}

/// A read-only, non-owning view of a strided vector.
///
/// Logical element `i` lives at `as_slice()[i * stride]`. The view borrows
/// the storage of another vector or matrix for its lifetime `'a`.
///
/// # Examples
///
/// ```rust
/// use lumen_core::VectorView;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let v = VectorView::from_slice(&data, 1, 3, 2).unwrap();
/// assert_eq!(v.to_vec(), vec![2.0, 4.0, 6.0]);
/// ```
#[derive(Debug)]
pub struct VectorView<'a, T = f64> {
    data: &'a [T],
    size: usize,
    stride: usize,
}

impl<T> Clone for VectorView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VectorView<'_, T> {}

impl<'a, T> VectorView<'a, T> {
    /// Creates a view of `size` elements starting at `offset` and stepping by `stride`.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` or `stride` is zero or if the last element
    /// falls outside `data`.
    pub fn from_slice(
        data: &'a [T],
        offset: usize,
        size: usize,
        stride: usize,
    ) -> Result<Self, CoreError> {
        let range = vector_window(data.len(), offset, size, stride)?;
        Ok(Self {
            data: &data[range],
            size,
            stride,
        })
    }

    /// Creates a view from a range already validated by the caller.
    pub(crate) fn from_parts(data: &'a [T], size: usize, stride: usize) -> Self {
        Self { data, size, stride }
    }

    /// Returns the number of logical elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the distance in storage between consecutive logical elements.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the storage window addressed by the view.
    ///
    /// The slice starts at logical element 0 and ends at logical element
    /// `size - 1`; elements in between that are skipped by the stride are
    /// included.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns an iterator over the logical elements.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + 'a {
        self.data.iter().step_by(self.stride)
    }

    /// Returns a view of `n` consecutive logical elements starting at `offset`.
    pub fn subvector(&self, offset: usize, n: usize) -> Result<VectorView<'a, T>, CoreError> {
        self.subvector_with_stride(offset, 1, n)
    }

    /// Returns a view of `n` logical elements starting at `offset`, taking
    /// every `stride`-th element.
    pub fn subvector_with_stride(
        &self,
        offset: usize,
        stride: usize,
        n: usize,
    ) -> Result<VectorView<'a, T>, CoreError> {
        let w = subvector_window(self.size, self.stride, offset, stride, n)?;
        Ok(VectorView {
            data: &self.data[w.range],
            size: w.size,
            stride: w.stride,
        })
    }
}

impl<T: Copy> VectorView<'_, T> {
    /// Returns logical element `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn get(&self, i: usize) -> T {
        assert!(i < self.size, "index {i} out of range {}", self.size);
        self.data[i * self.stride]
    }

    /// Copies the logical elements into a new vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().copied().collect()
    }
}

/// A mutable, non-owning view of a strided vector.
///
/// Writing through the view mutates the aliased storage of the parent
/// vector or matrix and nothing else.
#[derive(Debug)]
pub struct VectorViewMut<'a, T = f64> {
    data: &'a mut [T],
    size: usize,
    stride: usize,
}

impl<'a, T> VectorViewMut<'a, T> {
    /// Creates a mutable view of `size` elements starting at `offset` and
    /// stepping by `stride`.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` or `stride` is zero or if the last element
    /// falls outside `data`.
    pub fn from_slice(
        data: &'a mut [T],
        offset: usize,
        size: usize,
        stride: usize,
    ) -> Result<Self, CoreError> {
        let range = vector_window(data.len(), offset, size, stride)?;
        Ok(Self {
            data: &mut data[range],
            size,
            stride,
        })
    }

    pub(crate) fn from_parts(data: &'a mut [T], size: usize, stride: usize) -> Self {
        Self { data, size, stride }
    }

    /// Returns the number of logical elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the distance in storage between consecutive logical elements.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the storage window addressed by the view.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data
    }

    /// Returns the storage window addressed by the view as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
    }

    /// Returns a read-only view of the same elements.
    #[inline]
    pub fn as_view(&self) -> VectorView<'_, T> {
        VectorView::from_parts(self.data, self.size, self.stride)
    }

    /// Reborrows the view for a shorter lifetime.
    #[inline]
    pub fn reborrow(&mut self) -> VectorViewMut<'_, T> {
        VectorViewMut {
            data: &mut *self.data,
            size: self.size,
            stride: self.stride,
        }
    }

    /// Returns an iterator over the logical elements.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter().step_by(self.stride)
    }

    /// Returns a mutable iterator over the logical elements.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut().step_by(self.stride)
    }

    /// Returns a mutable view of `n` consecutive elements starting at `offset`.
    pub fn subvector_mut(
        &mut self,
        offset: usize,
        n: usize,
    ) -> Result<VectorViewMut<'_, T>, CoreError> {
        self.reborrow().into_subvector_with_stride(offset, 1, n)
    }

    /// Converts the view into a mutable view of `n` consecutive elements
    /// starting at `offset`, keeping the parent lifetime.
    pub fn into_subvector(self, offset: usize, n: usize) -> Result<VectorViewMut<'a, T>, CoreError> {
        self.into_subvector_with_stride(offset, 1, n)
    }

    /// Converts the view into a mutable view of `n` elements starting at
    /// `offset` and taking every `stride`-th element.
    pub fn into_subvector_with_stride(
        self,
        offset: usize,
        stride: usize,
        n: usize,
    ) -> Result<VectorViewMut<'a, T>, CoreError> {
        let w = subvector_window(self.size, self.stride, offset, stride, n)?;
        let data = self.data;
        Ok(VectorViewMut {
            data: &mut data[w.range],
            size: w.size,
            stride: w.stride,
        })
    }

    /// Exchanges logical elements `i` and `j`.
    pub fn swap_elements(&mut self, i: usize, j: usize) -> Result<(), CoreError> {
        if i >= self.size {
            return Err(CoreError::index_out_of_bounds(i, self.size));
        }
        if j >= self.size {
            return Err(CoreError::index_out_of_bounds(j, self.size));
        }
        self.data.swap(i * self.stride, j * self.stride);
        Ok(())
    }
}

impl<T: Copy> VectorViewMut<'_, T> {
    /// Returns logical element `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn get(&self, i: usize) -> T {
        assert!(i < self.size, "index {i} out of range {}", self.size);
        self.data[i * self.stride]
    }

    /// Sets logical element `i` to `x`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn set(&mut self, i: usize, x: T) {
        assert!(i < self.size, "index {i} out of range {}", self.size);
        self.data[i * self.stride] = x;
    }

    /// Sets every logical element to `x`.
    pub fn set_all(&mut self, x: T) {
        self.iter_mut().for_each(|v| *v = x);
    }

    /// Copies the elements of `src` into this view.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LengthMismatch`] if the sizes differ.
    pub fn copy_from(&mut self, src: &VectorView<'_, T>) -> Result<(), CoreError> {
        if src.size() != self.size {
            return Err(CoreError::length_mismatch(self.size, src.size()));
        }
        self.iter_mut().zip(src.iter()).for_each(|(d, s)| *d = *s);
        Ok(())
    }

    /// Copies the logical elements into a new vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().copied().collect()
    }
}

impl<T: Copy + Zero> VectorViewMut<'_, T> {
    /// Sets every logical element to zero.
    pub fn set_zero(&mut self) {
        self.set_all(T::zero());
    }
}

/// A read-only, non-owning view of a row-major matrix.
///
/// Element `(i, j)` lives at `as_slice()[i * tda + j]`; `tda` may exceed the
/// number of columns when the view addresses a sub-matrix.
///
/// # Examples
///
/// ```rust
/// use lumen_core::MatrixView;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let m = MatrixView::from_slice(&data, 0, 2, 3, 3).unwrap();
/// assert_eq!(m.get(1, 2), 6.0);
/// assert_eq!(m.column(1).unwrap().to_vec(), vec![2.0, 5.0]);
/// ```
#[derive(Debug)]
pub struct MatrixView<'a, T = f64> {
    data: &'a [T],
    size1: usize,
    size2: usize,
    tda: usize,
}

impl<T> Clone for MatrixView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatrixView<'_, T> {}

impl<'a, T> MatrixView<'a, T> {
    /// Creates a `size1 x size2` view starting at `offset` with row stride `tda`.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero, if `tda < size2` or if the
    /// last element falls outside `data`.
    pub fn from_slice(
        data: &'a [T],
        offset: usize,
        size1: usize,
        size2: usize,
        tda: usize,
    ) -> Result<Self, CoreError> {
        let range = matrix_window(data.len(), offset, size1, size2, tda)?;
        Ok(Self {
            data: &data[range],
            size1,
            size2,
            tda,
        })
    }

    pub(crate) fn from_parts(data: &'a [T], size1: usize, size2: usize, tda: usize) -> Self {
        Self {
            data,
            size1,
            size2,
            tda,
        }
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

    /// Returns the storage window addressed by the view.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns a view of row `i`.
    pub fn row(&self, i: usize) -> Result<VectorView<'a, T>, CoreError> {
        let w = row_window(self.size1, self.size2, self.tda, i)?;
        Ok(VectorView::from_parts(&self.data[w.range], w.size, w.stride))
    }

    /// Returns a view of column `j`.
    pub fn column(&self, j: usize) -> Result<VectorView<'a, T>, CoreError> {
        let w = column_window(self.size1, self.size2, self.tda, j)?;
        Ok(VectorView::from_parts(&self.data[w.range], w.size, w.stride))
    }

    /// Returns a view of the main diagonal.
    pub fn diagonal(&self) -> VectorView<'a, T> {
        let w = diagonal_window(self.size1, self.size2, self.tda);
        VectorView::from_parts(&self.data[w.range], w.size, w.stride)
    }

    /// Returns a view of `n` elements of row `i` starting at column `offset`.
    pub fn subrow(&self, i: usize, offset: usize, n: usize) -> Result<VectorView<'a, T>, CoreError> {
        self.row(i)?.subvector(offset, n)
    }

    /// Returns a view of `n` elements of column `j` starting at row `offset`.
    pub fn subcolumn(
        &self,
        j: usize,
        offset: usize,
        n: usize,
    ) -> Result<VectorView<'a, T>, CoreError> {
        self.column(j)?.subvector(offset, n)
    }

    /// Returns the `n1 x n2` sub-matrix whose top-left corner is `(k1, k2)`.
    pub fn submatrix(
        &self,
        k1: usize,
        k2: usize,
        n1: usize,
        n2: usize,
    ) -> Result<MatrixView<'a, T>, CoreError> {
        let w = submatrix_window(self.size1, self.size2, self.tda, k1, k2, n1, n2)?;
        Ok(MatrixView::from_parts(
            &self.data[w.range],
            w.size1,
            w.size2,
            self.tda,
        ))
    }
}

impl<T: Copy> MatrixView<'_, T> {
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
        self.data[i * self.tda + j]
    }

    /// Copies the elements into a new dense row-major vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.data
            .chunks(self.tda)
            .flat_map(|row| row[..self.size2].iter().copied())
            .collect()
    }
}

/// A mutable, non-owning view of a row-major matrix.
#[derive(Debug)]
pub struct MatrixViewMut<'a, T = f64> {
    data: &'a mut [T],
    size1: usize,
    size2: usize,
    tda: usize,
}

impl<'a, T> MatrixViewMut<'a, T> {
    /// Creates a mutable `size1 x size2` view starting at `offset` with row
    /// stride `tda`.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero, if `tda < size2` or if the
    /// last element falls outside `data`.
    pub fn from_slice(
        data: &'a mut [T],
        offset: usize,
        size1: usize,
        size2: usize,
        tda: usize,
    ) -> Result<Self, CoreError> {
        let range = matrix_window(data.len(), offset, size1, size2, tda)?;
        Ok(Self {
            data: &mut data[range],
            size1,
            size2,
            tda,
        })
    }

    pub(crate) fn from_parts(data: &'a mut [T], size1: usize, size2: usize, tda: usize) -> Self {
        Self {
            data,
            size1,
            size2,
            tda,
        }
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

    /// Returns the storage window addressed by the view.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data
    }

    /// Returns the storage window addressed by the view as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
    }

    /// Returns a read-only view of the same elements.
    #[inline]
    pub fn as_view(&self) -> MatrixView<'_, T> {
        MatrixView::from_parts(self.data, self.size1, self.size2, self.tda)
    }

    /// Reborrows the view for a shorter lifetime.
    #[inline]
    pub fn reborrow(&mut self) -> MatrixViewMut<'_, T> {
        MatrixViewMut {
            data: &mut *self.data,
            size1: self.size1,
            size2: self.size2,
            tda: self.tda,
        }
    }

    /// Converts the view into a mutable view of row `i`.
    pub fn into_row(self, i: usize) -> Result<VectorViewMut<'a, T>, CoreError> {
        let w = row_window(self.size1, self.size2, self.tda, i)?;
        let data = self.data;
        Ok(VectorViewMut::from_parts(&mut data[w.range], w.size, w.stride))
    }

    /// Converts the view into a mutable view of column `j`.
    pub fn into_column(self, j: usize) -> Result<VectorViewMut<'a, T>, CoreError> {
        let w = column_window(self.size1, self.size2, self.tda, j)?;
        let data = self.data;
        Ok(VectorViewMut::from_parts(&mut data[w.range], w.size, w.stride))
    }

    /// Converts the view into a mutable view of the main diagonal.
    pub fn into_diagonal(self) -> VectorViewMut<'a, T> {
        let w = diagonal_window(self.size1, self.size2, self.tda);
        let data = self.data;
        VectorViewMut::from_parts(&mut data[w.range], w.size, w.stride)
    }

    /// Converts the view into a mutable `n1 x n2` sub-matrix view whose
    /// top-left corner is `(k1, k2)`.
    pub fn into_submatrix(
        self,
        k1: usize,
        k2: usize,
        n1: usize,
        n2: usize,
    ) -> Result<MatrixViewMut<'a, T>, CoreError> {
        let w = submatrix_window(self.size1, self.size2, self.tda, k1, k2, n1, n2)?;
        let tda = self.tda;
        let data = self.data;
        Ok(MatrixViewMut::from_parts(
            &mut data[w.range],
            w.size1,
            w.size2,
            tda,
        ))
    }

    /// Returns a mutable view of row `i`.
    pub fn row_mut(&mut self, i: usize) -> Result<VectorViewMut<'_, T>, CoreError> {
        self.reborrow().into_row(i)
    }

    /// Returns a mutable view of column `j`.
    pub fn column_mut(&mut self, j: usize) -> Result<VectorViewMut<'_, T>, CoreError> {
        self.reborrow().into_column(j)
    }

    /// Returns a mutable view of the main diagonal.
    pub fn diagonal_mut(&mut self) -> VectorViewMut<'_, T> {
        self.reborrow().into_diagonal()
    }

    /// Returns a mutable `n1 x n2` sub-matrix view whose top-left corner is `(k1, k2)`.
    pub fn submatrix_mut(
        &mut self,
        k1: usize,
        k2: usize,
        n1: usize,
        n2: usize,
    ) -> Result<MatrixViewMut<'_, T>, CoreError> {
        self.reborrow().into_submatrix(k1, k2, n1, n2)
    }

    /// Exchanges rows `i` and `j`.
    pub fn swap_rows(&mut self, i: usize, j: usize) -> Result<(), CoreError> {
        if i >= self.size1 {
            return Err(CoreError::index_out_of_bounds(i, self.size1));
        }
        if j >= self.size1 {
            return Err(CoreError::index_out_of_bounds(j, self.size1));
        }
        if i != j {
            for k in 0..self.size2 {
                self.data.swap(i * self.tda + k, j * self.tda + k);
            }
        }
        Ok(())
    }

    /// Exchanges columns `i` and `j`.
    pub fn swap_columns(&mut self, i: usize, j: usize) -> Result<(), CoreError> {
        if i >= self.size2 {
            return Err(CoreError::index_out_of_bounds(i, self.size2));
        }
        if j >= self.size2 {
            return Err(CoreError::index_out_of_bounds(j, self.size2));
        }
        if i != j {
            for k in 0..self.size1 {
                self.data.swap(k * self.tda + i, k * self.tda + j);
            }
        }
        Ok(())
    }
}

impl<T: Copy> MatrixViewMut<'_, T> {
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
        self.data[i * self.tda + j]
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
        self.data[i * self.tda + j] = x;
    }

    /// Sets every element to `x`.
    pub fn set_all(&mut self, x: T) {
        let size2 = self.size2;
        self.data
            .chunks_mut(self.tda)
            .for_each(|row| row[..size2].iter_mut().for_each(|v| *v = x));
    }

    /// Copies the elements of `src` into this view.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ShapeMismatch`] if the shapes differ.
    pub fn copy_from(&mut self, src: &MatrixView<'_, T>) -> Result<(), CoreError> {
        if src.size1() != self.size1 || src.size2() != self.size2 {
            return Err(CoreError::ShapeMismatch {
                expected: [self.size1, self.size2],
                actual: [src.size1(), src.size2()],
            });
        }
        for i in 0..self.size1 {
            for j in 0..self.size2 {
                self.data[i * self.tda + j] = src.get(i, j);
            }
        }
        Ok(())
    }

    /// Copies the elements into a new dense row-major vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_view().to_vec()
    }
}

impl<T: Copy + Zero> MatrixViewMut<'_, T> {
    /// Sets every element to zero.
    pub fn set_zero(&mut self) {
        self.set_all(T::zero());
    }
}

impl<T: Copy + Zero + One> MatrixViewMut<'_, T> {
    /// Sets the diagonal to one and every other element to zero.
    pub fn set_identity(&mut self) {
        for i in 0..self.size1 {
            for j in 0..self.size2 {
                let x = if i == j { T::one() } else { T::zero() };
                self.data[i * self.tda + j] = x;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_view_stride() -> Result<(), CoreError> {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let v = VectorView::from_slice(&data, 1, 3, 3)?;
        assert_eq!(v.size(), 3);
        assert_eq!(v.stride(), 3);
        assert_eq!(v.to_vec(), vec![2.0, 5.0, 8.0]);
        assert_eq!(v.as_slice().len(), 7);
        Ok(())
    }

    #[test]
    fn test_vector_view_out_of_bounds() {
        let data = [1.0, 2.0, 3.0];
        let res = VectorView::from_slice(&data, 1, 2, 2);
        assert_eq!(
            res.err(),
            Some(CoreError::ViewOutOfBounds {
                required: 4,
                available: 3
            })
        );
        assert_eq!(
            VectorView::from_slice(&data, 0, 0, 1).err(),
            Some(CoreError::InvalidSize(0))
        );
        assert_eq!(
            VectorView::from_slice(&data, 0, 2, 0).err(),
            Some(CoreError::InvalidStride(0))
        );
    }

    #[test]
    fn test_subvector_with_stride() -> Result<(), CoreError> {
        let data: Vec<f64> = (0..12).map(f64::from).collect();
        let v = VectorView::from_slice(&data, 0, 6, 2)?;
        let sub = v.subvector_with_stride(1, 2, 3)?;
        assert_eq!(sub.stride(), 4);
        assert_eq!(sub.to_vec(), vec![2.0, 6.0, 10.0]);
        assert!(v.subvector(4, 3).is_err());
        Ok(())
    }

    #[test]
    fn test_matrix_view_rows_columns() -> Result<(), CoreError> {
        // 3x3 matrix padded to a row stride of 4
        let data = [
            1.0, 2.0, 3.0, -1.0, //
            4.0, 5.0, 6.0, -1.0, //
            7.0, 8.0, 9.0,
        ];
        let m = MatrixView::from_slice(&data, 0, 3, 3, 4)?;
        assert_eq!(m.row(1)?.to_vec(), vec![4.0, 5.0, 6.0]);
        assert_eq!(m.column(2)?.to_vec(), vec![3.0, 6.0, 9.0]);
        assert_eq!(m.diagonal().to_vec(), vec![1.0, 5.0, 9.0]);
        assert_eq!(m.subrow(2, 1, 2)?.to_vec(), vec![8.0, 9.0]);
        assert_eq!(m.subcolumn(0, 1, 2)?.to_vec(), vec![4.0, 7.0]);
        assert_eq!(m.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(m.row(3).err(), Some(CoreError::index_out_of_bounds(3, 3)));
        Ok(())
    }

    #[test]
    fn test_matrix_invalid_tda() {
        let data = [0.0; 6];
        assert_eq!(
            MatrixView::from_slice(&data, 0, 2, 3, 2).err(),
            Some(CoreError::InvalidTda { tda: 2, size2: 3 })
        );
    }

    #[test]
    fn test_submatrix_aliasing() -> Result<(), CoreError> {
        let mut data: Vec<f64> = (0..16).map(f64::from).collect();
        {
            let mut m = MatrixViewMut::from_slice(&mut data, 0, 4, 4, 4)?;
            let mut sub = m.submatrix_mut(1, 2, 2, 2)?;
            assert_eq!(sub.tda(), 4);
            sub.set(0, 0, -1.0);
            sub.set(1, 1, -2.0);
        }
        // (1, 2) -> 6 and (2, 3) -> 11 in the parent storage
        for (k, x) in data.iter().enumerate() {
            match k {
                6 => assert_eq!(*x, -1.0),
                11 => assert_eq!(*x, -2.0),
                _ => assert_eq!(*x, k as f64),
            }
        }
        Ok(())
    }

    #[test]
    fn test_column_write_through() -> Result<(), CoreError> {
        let mut data = vec![0.0; 6];
        {
            let m = MatrixViewMut::from_slice(&mut data, 0, 2, 3, 3)?;
            let mut col = m.into_column(1)?;
            col.set_all(7.0);
        }
        assert_eq!(data, vec![0.0, 7.0, 0.0, 0.0, 7.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_swap_rows_columns() -> Result<(), CoreError> {
        let mut data = vec![1.0, 2.0, 3.0, 4.0];
        let mut m = MatrixViewMut::from_slice(&mut data, 0, 2, 2, 2)?;
        m.swap_rows(0, 1)?;
        assert_eq!(m.to_vec(), vec![3.0, 4.0, 1.0, 2.0]);
        m.swap_columns(0, 1)?;
        assert_eq!(m.to_vec(), vec![4.0, 3.0, 2.0, 1.0]);
        assert!(m.swap_rows(0, 2).is_err());
        Ok(())
    }

    #[test]
    fn test_set_identity_and_copy() -> Result<(), CoreError> {
        let mut a = vec![5.0; 9];
        let mut b = vec![0.0; 9];
        let mut ma = MatrixViewMut::from_slice(&mut a, 0, 3, 3, 3)?;
        ma.set_identity();
        let mut mb = MatrixViewMut::from_slice(&mut b, 0, 3, 3, 3)?;
        mb.copy_from(&ma.as_view())?;
        assert_eq!(mb.to_vec(), vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

        let mut c = vec![0.0; 4];
        let mut mc = MatrixViewMut::from_slice(&mut c, 0, 2, 2, 2)?;
        assert_eq!(
            mc.copy_from(&ma.as_view()),
            Err(CoreError::ShapeMismatch {
                expected: [2, 2],
                actual: [3, 3]
            })
        );
        Ok(())
    }

    #[test]
    fn test_vector_swap_and_copy() -> Result<(), CoreError> {
        let mut data = vec![1.0, 0.0, 2.0, 0.0, 3.0];
        let mut v = VectorViewMut::from_slice(&mut data, 0, 3, 2)?;
        v.swap_elements(0, 2)?;
        assert_eq!(v.to_vec(), vec![3.0, 2.0, 1.0]);
        let src = [9.0, 8.0, 7.0];
        v.copy_from(&VectorView::from_slice(&src, 0, 3, 1)?)?;
        assert_eq!(data, vec![9.0, 0.0, 8.0, 0.0, 7.0]);
        Ok(())
    }
}
