use num_traits::Zero;

use crate::{
    error::CoreError,
    storage::Block,
    view::{vector_window, VectorView, VectorViewMut},
};

/// An owned, strided vector backed by a [`Block`].
///
/// Element `i` lives at `block[offset + i * stride]`.
///
/// # Examples
///
/// ```rust
/// use lumen_core::Vector;
///
/// let mut v = Vector::from_vec(vec![1.0, 2.0, 3.0]).unwrap();
/// v.set(1, 5.0);
/// assert_eq!(v.get(1), 5.0);
/// assert_eq!(v.to_vec(), vec![1.0, 5.0, 3.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Vector<T = f64> {
    block: Block<T>,
    offset: usize,
    size: usize,
    stride: usize,
}

impl<T> Vector<T> {
    /// Creates a contiguous vector that takes ownership of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSize`] if `data` is empty.
    pub fn from_vec(data: Vec<T>) -> Result<Self, CoreError> {
        let size = data.len();
        Self::from_block(Block::from_vec(data)?, 0, size, 1)
    }

    /// Creates a vector over an existing block.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` or `stride` is zero or if the last element
    /// falls outside the block.
    pub fn from_block(
        block: Block<T>,
        offset: usize,
        size: usize,
        stride: usize,
    ) -> Result<Self, CoreError> {
        vector_window(block.len(), offset, size, stride)?;
        Ok(Self {
            block,
            offset,
            size,
            stride,
        })
    }

    /// Returns the number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the distance in storage between consecutive elements.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing block.
    pub fn block(&self) -> &Block<T> {
        &self.block
    }

    /// Consumes the vector and returns the backing block.
    pub fn into_block(self) -> Block<T> {
        self.block
    }

    /// Returns the elements as a contiguous slice when the stride is one.
    pub fn as_slice(&self) -> Option<&[T]> {
        (self.stride == 1).then(|| &self.block.as_slice()[self.offset..self.offset + self.size])
    }

    /// Returns the elements as a contiguous mutable slice when the stride is one.
    pub fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        if self.stride != 1 {
            return None;
        }
        let (offset, size) = (self.offset, self.size);
        Some(&mut self.block.as_mut_slice()[offset..offset + size])
    }

    /// Returns a read-only view of the whole vector.
    pub fn view(&self) -> VectorView<'_, T> {
        let end = self.offset + (self.size - 1) * self.stride + 1;
        VectorView::from_parts(
            &self.block.as_slice()[self.offset..end],
            self.size,
            self.stride,
        )
    }

    /// Returns a mutable view of the whole vector.
    pub fn view_mut(&mut self) -> VectorViewMut<'_, T> {
        let end = self.offset + (self.size - 1) * self.stride + 1;
        VectorViewMut::from_parts(
            &mut self.block.as_mut_slice()[self.offset..end],
            self.size,
            self.stride,
        )
    }

    /// Returns a view of `n` consecutive elements starting at `offset`.
    pub fn subvector(&self, offset: usize, n: usize) -> Result<VectorView<'_, T>, CoreError> {
        self.view().subvector(offset, n)
    }

    /// Returns a view of `n` elements starting at `offset` and taking every
    /// `stride`-th element.
    pub fn subvector_with_stride(
        &self,
        offset: usize,
        stride: usize,
        n: usize,
    ) -> Result<VectorView<'_, T>, CoreError> {
        self.view().subvector_with_stride(offset, stride, n)
    }

    /// Returns a mutable view of `n` consecutive elements starting at `offset`.
    pub fn subvector_mut(
        &mut self,
        offset: usize,
        n: usize,
    ) -> Result<VectorViewMut<'_, T>, CoreError> {
        self.view_mut().into_subvector(offset, n)
    }

    /// Returns a mutable view of `n` elements starting at `offset` and taking
    /// every `stride`-th element.
    pub fn subvector_with_stride_mut(
        &mut self,
        offset: usize,
        stride: usize,
        n: usize,
    ) -> Result<VectorViewMut<'_, T>, CoreError> {
        self.view_mut()
            .into_subvector_with_stride(offset, stride, n)
    }

    /// Exchanges elements `i` and `j`.
    pub fn swap_elements(&mut self, i: usize, j: usize) -> Result<(), CoreError> {
        self.view_mut().swap_elements(i, j)
    }
}

impl<T: Zero + Clone> Vector<T> {
    /// Allocates a contiguous vector of `size` zeros.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSize`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, CoreError> {
        Self::from_block(Block::new(size)?, 0, size, 1)
    }
}

impl<T: Copy> Vector<T> {
    /// Returns element `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn get(&self, i: usize) -> T {
        assert!(i < self.size, "index {i} out of range {}", self.size);
        self.block.as_slice()[self.offset + i * self.stride]
    }

    /// Sets element `i` to `x`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn set(&mut self, i: usize, x: T) {
        assert!(i < self.size, "index {i} out of range {}", self.size);
        self.block.as_mut_slice()[self.offset + i * self.stride] = x;
    }

    /// Sets every element to `x`.
    pub fn set_all(&mut self, x: T) {
        self.view_mut().set_all(x);
    }

    /// Copies the elements of `src` into this vector.
    pub fn copy_from(&mut self, src: &VectorView<'_, T>) -> Result<(), CoreError> {
        self.view_mut().copy_from(src)
    }

    /// Copies the elements into a new contiguous vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.view().to_vec()
    }
}

impl<T: Copy + Zero> Vector<T> {
    /// Sets every element to zero.
    pub fn set_zero(&mut self) {
        self.view_mut().set_zero();
    }
}
