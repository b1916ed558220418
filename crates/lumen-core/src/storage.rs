//! Owned element storage.
//!
//! A [`Block`] is the unit of ownership behind every [`Vector`](crate::Vector)
//! and [`Matrix`](crate::Matrix). Views created from those types borrow the
//! block, so the borrow checker guarantees they never outlive it.

use num_traits::Zero;

use crate::error::CoreError;

/// A contiguous, owned buffer of elements.
///
/// Blocks are created once and never resized. The element count is fixed at
/// construction and is always at least one.
///
/// # Examples
///
/// ```rust
/// use lumen_core::Block;
///
/// let block = Block::<f64>::new(4).unwrap();
/// assert_eq!(block.len(), 4);
/// assert_eq!(block.as_slice(), &[0.0; 4]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Block<T = f64> {
    data: Vec<T>,
}

impl<T> Block<T> {
    /// Creates a block that takes ownership of `data` without copying it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSize`] if `data` is empty.
    pub fn from_vec(data: Vec<T>) -> Result<Self, CoreError> {
        if data.is_empty() {
            return Err(CoreError::InvalidSize(0));
        }
        Ok(Self { data })
    }

    /// Returns the number of elements held by the block.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the block holds no elements.
    ///
    /// A successfully constructed block is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the block contents as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the block contents as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the block and returns the underlying vector.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Zero + Clone> Block<T> {
    /// Allocates a zero-filled block of `len` elements.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSize`] if `len` is zero.
    pub fn new(len: usize) -> Result<Self, CoreError> {
        if len == 0 {
            return Err(CoreError::InvalidSize(len));
        }
        Ok(Self {
            data: vec![T::zero(); len],
        })
    }
}
