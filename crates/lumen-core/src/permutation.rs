use crate::{error::CoreError, view::VectorViewMut};

/// A bijection on `{0, ..., n-1}` stored as an index array.
///
/// Applying the permutation to a vector `v` produces `v'[i] = v[p[i]]`.
///
/// # Examples
///
/// ```rust
/// use lumen_core::{Permutation, Vector};
///
/// let p = Permutation::from_vec(vec![2, 0, 1]).unwrap();
/// let mut v = Vector::from_vec(vec![10.0, 20.0, 30.0]).unwrap();
/// p.permute_vector(&mut v.view_mut()).unwrap();
/// assert_eq!(v.to_vec(), vec![30.0, 10.0, 20.0]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    data: Vec<usize>,
}

impl Permutation {
    /// Creates the identity permutation of size `n`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSize`] if `n` is zero.
    pub fn new(n: usize) -> Result<Self, CoreError> {
        if n == 0 {
            return Err(CoreError::InvalidSize(n));
        }
        Ok(Self {
            data: (0..n).collect(),
        })
    }

    /// Creates a permutation from an index array.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPermutation`] if `data` is not a bijection
    /// on `{0, ..., n-1}`.
    pub fn from_vec(data: Vec<usize>) -> Result<Self, CoreError> {
        if data.is_empty() {
            return Err(CoreError::InvalidSize(0));
        }
        let p = Self { data };
        if !p.is_valid() {
            return Err(CoreError::InvalidPermutation(p.size()));
        }
        Ok(p)
    }

    /// Resets the permutation to the identity.
    pub fn init(&mut self) {
        self.data
            .iter_mut()
            .enumerate()
            .for_each(|(i, p)| *p = i);
    }

    /// Returns the number of elements permuted.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the image of `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn get(&self, i: usize) -> usize {
        self.data[i]
    }

    /// Returns the index array.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.data
    }

    /// Exchanges entries `i` and `j` of the index array.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), CoreError> {
        let n = self.size();
        if i >= n {
            return Err(CoreError::index_out_of_bounds(i, n));
        }
        if j >= n {
            return Err(CoreError::index_out_of_bounds(j, n));
        }
        self.data.swap(i, j);
        Ok(())
    }

    /// Returns true if every index in `0..n` appears exactly once.
    pub fn is_valid(&self) -> bool {
        let n = self.size();
        let mut seen = vec![false; n];
        for &p in &self.data {
            if p >= n || seen[p] {
                return false;
            }
            seen[p] = true;
        }
        true
    }

    /// Returns the inverse permutation.
    pub fn inverse(&self) -> Self {
        let mut data = vec![0; self.size()];
        for (i, &p) in self.data.iter().enumerate() {
            data[p] = i;
        }
        Self { data }
    }

    /// Applies the permutation in place: `v'[i] = v[p[i]]`.
    ///
    /// The permutation is decomposed into cycles which are rotated one at a
    /// time, so no scratch buffer is allocated.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LengthMismatch`] if the vector size differs from
    /// the permutation size.
    pub fn permute_vector<T: Copy>(&self, v: &mut VectorViewMut<'_, T>) -> Result<(), CoreError> {
        let n = self.size();
        if v.size() != n {
            return Err(CoreError::length_mismatch(n, v.size()));
        }
        let p = &self.data;
        for i in 0..n {
            let mut k = p[i];
            while k > i {
                k = p[k];
            }
            if k < i {
                // cycle already handled from its smallest element
                continue;
            }
            let mut pk = p[k];
            if pk == i {
                continue;
            }
            let t = v.get(i);
            while pk != i {
                let x = v.get(pk);
                v.set(k, x);
                k = pk;
                pk = p[k];
            }
            v.set(k, t);
        }
        Ok(())
    }

    /// Applies the inverse permutation in place: `v'[p[i]] = v[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LengthMismatch`] if the vector size differs from
    /// the permutation size.
    pub fn permute_vector_inverse<T: Copy>(
        &self,
        v: &mut VectorViewMut<'_, T>,
    ) -> Result<(), CoreError> {
        let n = self.size();
        if v.size() != n {
            return Err(CoreError::length_mismatch(n, v.size()));
        }
        let p = &self.data;
        for i in 0..n {
            let mut k = p[i];
            while k > i {
                k = p[k];
            }
            if k < i {
                continue;
            }
            let mut pk = p[k];
            if pk == i {
                continue;
            }
            let mut t = v.get(k);
            while pk != i {
                let r = v.get(pk);
                v.set(pk, t);
                t = r;
                k = pk;
                pk = p[k];
            }
            v.set(pk, t);
        }
        Ok(())
    }
}
