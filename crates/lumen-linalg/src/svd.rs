//! Singular value decomposition by Golub-Kahan-Reinsch iteration.
//!
//! An `M x N` matrix with `M >= N` is factorized as `A = U diag(S) Vᵀ`. The
//! matrix is first bidiagonalized, then implicit-shift QR sweeps are run on
//! the largest trailing unreduced block until every superdiagonal element is
//! negligible. The singular values come out non-negative and in descending
//! order.

use log::{debug, trace, warn};
use lumen_blas::{ops, Transpose};
use lumen_core::{
    consts::{SQRT_DBL_MAX, SQRT_DBL_MIN},
    Matrix, MatrixView, MatrixViewMut, Vector, VectorView, VectorViewMut,
};

use crate::{
    bidiag::{bidiag_decomp, bidiag_unpack2},
    error::LinalgError,
    svdstep::{chop_small_elements, qrstep},
};

/// Upper bound on QR sweeps per column before the iteration gives up.
pub const SVD_SWEEP_FACTOR: usize = 100;

fn is_negligible(x: f64) -> bool {
    x == 0.0 || x.is_nan()
}

/// Computes the singular value decomposition `A = U diag(S) Vᵀ` in place.
///
/// # Arguments
///
/// * `a` - The `M x N` matrix, `M >= N`. Overwritten with `U`.
/// * `v` - Receives the `N x N` orthogonal matrix `V` (not `Vᵀ`).
/// * `s` - Receives the `N` singular values in descending order.
/// * `work` - Workspace of length `N`.
///
/// # Errors
///
/// Returns [`LinalgError::WideMatrix`] if `M < N`, a precondition error if
/// `v`, `s` or `work` have the wrong size, and [`LinalgError::NotConverged`]
/// if the iteration needs more than `SVD_SWEEP_FACTOR * N` sweeps.
///
/// Example:
/// ```
/// use lumen_core::{Matrix, Vector};
/// use lumen_linalg::svd::sv_decomp;
///
/// let mut a = Matrix::from_vec(2, 2, vec![3.0, 0.0, 0.0, -4.0]).unwrap();
/// let mut v = Matrix::new(2, 2).unwrap();
/// let mut s = Vector::new(2).unwrap();
/// let mut work = Vector::new(2).unwrap();
/// sv_decomp(&mut a.view_mut(), &mut v.view_mut(), &mut s.view_mut(), &mut work.view_mut()).unwrap();
/// assert!((s.get(0) - 4.0).abs() < 1e-12);
/// assert!((s.get(1) - 3.0).abs() < 1e-12);
/// ```
pub fn sv_decomp(
    a: &mut MatrixViewMut<'_>,
    v: &mut MatrixViewMut<'_>,
    s: &mut VectorViewMut<'_>,
    work: &mut VectorViewMut<'_>,
) -> Result<(), LinalgError> {
    let (m, n) = (a.size1(), a.size2());
    if m < n {
        return Err(LinalgError::WideMatrix { rows: m, cols: n });
    }
    if v.size1() != n {
        return Err(LinalgError::length_mismatch(n, v.size1()));
    }
    if v.size1() != v.size2() {
        return Err(LinalgError::NotSquare {
            rows: v.size1(),
            cols: v.size2(),
        });
    }
    if s.size() != n {
        return Err(LinalgError::length_mismatch(n, s.size()));
    }
    if work.size() != n {
        return Err(LinalgError::length_mismatch(n, work.size()));
    }

    if n == 1 {
        let mut column = a.column_mut(0)?;
        let norm = ops::nrm2(&column.as_view())?;
        s.set(0, norm);
        v.set(0, 0, 1.0);
        if norm != 0.0 {
            ops::scal(1.0 / norm, &mut column)?;
        }
        return Ok(());
    }

    let mut f = work.subvector_mut(0, n - 1)?;

    bidiag_decomp(a, s, &mut f)?;
    bidiag_unpack2(a, s, &mut f, v)?;
    chop_small_elements(&s.as_view(), &mut f);

    let mut b = n - 1;
    let mut iter = 0;
    while b > 0 {
        if is_negligible(f.get(b - 1)) {
            b -= 1;
            continue;
        }

        // largest unreduced block [a0, b] ending at b
        let mut a0 = b - 1;
        while a0 > 0 && !is_negligible(f.get(a0 - 1)) {
            a0 -= 1;
        }

        iter += 1;
        if iter > SVD_SWEEP_FACTOR * n {
            warn!("svd: no convergence after {} sweeps on a {m}x{n} matrix", iter - 1);
            return Err(LinalgError::NotConverged {
                iterations: iter - 1,
            });
        }

        let n_block = b - a0 + 1;
        trace!("svd: sweep {iter} on block [{a0}, {b}]");

        let mut s_block = s.subvector_mut(a0, n_block)?;
        let mut f_block = f.subvector_mut(a0, n_block - 1)?;
        let mut u_block = a.submatrix_mut(0, a0, m, n_block)?;
        let mut v_block = v.submatrix_mut(0, a0, n, n_block)?;

        let norm = s_block
            .iter()
            .chain(f_block.iter())
            .fold(0.0f64, |acc, x| acc.max(x.abs()));

        // keep the shift and rotation arithmetic away from overflow and underflow
        let scale = if norm > SQRT_DBL_MAX {
            Some(norm / SQRT_DBL_MAX)
        } else if norm < SQRT_DBL_MIN && norm > 0.0 {
            Some(norm / SQRT_DBL_MIN)
        } else {
            None
        };

        if let Some(scale) = scale {
            ops::scal(1.0 / scale, &mut s_block)?;
            ops::scal(1.0 / scale, &mut f_block)?;
        }

        qrstep(&mut s_block, &mut f_block, &mut u_block, &mut v_block)?;
        chop_small_elements(&s_block.as_view(), &mut f_block);

        if let Some(scale) = scale {
            ops::scal(scale, &mut s_block)?;
            ops::scal(scale, &mut f_block)?;
        }
    }

    // non-negative singular values, reflecting the matching column of V
    for j in 0..n {
        let sj = s.get(j);
        if sj < 0.0 {
            ops::scal(-1.0, &mut v.column_mut(j)?)?;
            s.set(j, -sj);
        }
    }

    // selection sort into descending order, the leftmost maximum wins ties
    for i in 0..n {
        let mut s_max = s.get(i);
        let mut i_max = i;
        for j in i + 1..n {
            let sj = s.get(j);
            if sj > s_max {
                s_max = sj;
                i_max = j;
            }
        }
        if i_max != i {
            s.swap_elements(i, i_max)?;
            a.swap_columns(i, i_max)?;
            v.swap_columns(i, i_max)?;
        }
    }

    debug!("svd: {m}x{n} matrix converged after {iter} sweeps");
    Ok(())
}

/// Solves `A x = b` in the least-squares sense from the factors computed by
/// [`sv_decomp`].
///
/// Computes `x = V diag(S)⁺ Uᵀ b`, where zero singular values contribute
/// nothing. Small singular values should be zeroed beforehand to truncate an
/// ill-conditioned system.
///
/// # Errors
///
/// Returns a precondition error if the factor sizes and `b`, `x` disagree.
pub fn sv_solve(
    u: &MatrixView<'_>,
    v: &MatrixView<'_>,
    s: &VectorView<'_>,
    b: &VectorView<'_>,
    x: &mut VectorViewMut<'_>,
) -> Result<(), LinalgError> {
    let n = u.size2();
    if u.size1() != b.size() {
        return Err(LinalgError::length_mismatch(u.size1(), b.size()));
    }
    if s.size() != n {
        return Err(LinalgError::length_mismatch(n, s.size()));
    }
    if v.size1() != v.size2() {
        return Err(LinalgError::NotSquare {
            rows: v.size1(),
            cols: v.size2(),
        });
    }
    if v.size1() != n {
        return Err(LinalgError::length_mismatch(n, v.size1()));
    }
    if x.size() != n {
        return Err(LinalgError::length_mismatch(n, x.size()));
    }

    let mut w = Vector::<f64>::new(n)?;
    ops::gemv(Transpose::Trans, 1.0, u, b, 0.0, &mut w.view_mut())?;
    for i in 0..n {
        let alpha = s.get(i);
        if alpha != 0.0 {
            w.set(i, w.get(i) / alpha);
        } else {
            w.set(i, 0.0);
        }
    }
    ops::gemv(Transpose::NoTrans, 1.0, v, &w.view(), 0.0, x)?;
    Ok(())
}

/// An owned singular value decomposition of an `M x N` matrix, `M >= N`.
///
/// # Examples
///
/// ```rust
/// use lumen_core::Matrix;
/// use lumen_linalg::SvDecomposition;
///
/// let a = Matrix::from_vec(3, 2, vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
/// let svd = SvDecomposition::new(&a).unwrap();
/// assert_eq!(svd.rank(1e-12), 2);
/// assert!((svd.condition_number() - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct SvDecomposition {
    u: Matrix,
    v: Matrix,
    s: Vector,
}

impl SvDecomposition {
    /// Factorizes a copy of `a`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::WideMatrix`] if `a` has more columns than rows
    /// and [`LinalgError::NotConverged`] if the iteration fails.
    pub fn new(a: &Matrix) -> Result<Self, LinalgError> {
        let n = a.size2();
        if a.size1() < n {
            return Err(LinalgError::WideMatrix {
                rows: a.size1(),
                cols: n,
            });
        }
        let mut u = a.clone();
        let mut v = Matrix::new(n, n)?;
        let mut s = Vector::new(n)?;
        let mut work = Vector::<f64>::new(n)?;
        sv_decomp(
            &mut u.view_mut(),
            &mut v.view_mut(),
            &mut s.view_mut(),
            &mut work.view_mut(),
        )?;
        Ok(Self { u, v, s })
    }

    /// Returns the `M x N` left factor `U`.
    pub fn u(&self) -> &Matrix {
        &self.u
    }

    /// Returns the `N x N` right factor `V`.
    pub fn v(&self) -> &Matrix {
        &self.v
    }

    /// Returns the singular values in descending order.
    pub fn singular_values(&self) -> &Vector {
        &self.s
    }

    /// Solves `A x = b` in the least-squares sense.
    pub fn solve(&self, b: &Vector) -> Result<Vector, LinalgError> {
        let mut x = Vector::new(self.s.size())?;
        sv_solve(
            &self.u.view(),
            &self.v.view(),
            &self.s.view(),
            &b.view(),
            &mut x.view_mut(),
        )?;
        Ok(x)
    }

    /// Returns the number of singular values greater than `tol`.
    pub fn rank(&self, tol: f64) -> usize {
        self.s.view().iter().filter(|&&x| x > tol).count()
    }

    /// Returns the ratio of the largest to the smallest singular value;
    /// infinite when the smallest is zero.
    pub fn condition_number(&self) -> f64 {
        let n = self.s.size();
        let (max, min) = (self.s.get(0), self.s.get(n - 1));
        if min == 0.0 {
            return f64::INFINITY;
        }
        max / min
    }
}
