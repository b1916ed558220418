//! LU decomposition with partial pivoting.
//!
//! A square matrix `A` is factorized in place as `P A = L U`, where `L` is
//! unit lower triangular (its diagonal is implicit) and `U` is upper
//! triangular. Both factors share the storage of `A`. The row exchanges are
//! recorded in a [`Permutation`] and their parity in `signum`.

use log::{debug, trace};
use lumen_blas::{ops, Diag, Transpose, Uplo};
use lumen_core::{Matrix, MatrixView, MatrixViewMut, Permutation, Vector, VectorView, VectorViewMut};

use crate::error::LinalgError;

fn check_square(rows: usize, cols: usize) -> Result<(), LinalgError> {
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    Ok(())
}

fn check_size(expected: usize, actual: usize) -> Result<(), LinalgError> {
    if expected != actual {
        return Err(LinalgError::length_mismatch(expected, actual));
    }
    Ok(())
}

fn is_singular(lu: &MatrixView<'_>) -> bool {
    lu.diagonal().iter().any(|&u| u == 0.0)
}

/// Factorizes the square matrix `a` in place as `P A = L U`.
///
/// The pivot of column `j` is the first row at or below `j` holding the
/// largest magnitude in that column. A zero pivot is not an error at this
/// stage: the factorization completes and the singularity is reported by the
/// solvers.
///
/// # Arguments
///
/// * `a` - The matrix to factorize, overwritten with `L` and `U`.
/// * `p` - Receives the row permutation.
///
/// # Returns
///
/// The sign of the permutation, `1` or `-1`.
///
/// # Errors
///
/// Returns [`LinalgError::NotSquare`] if `a` is not square and
/// [`LinalgError::LengthMismatch`] if the permutation size differs.
///
/// Example:
/// ```
/// use lumen_core::{Matrix, Permutation};
/// use lumen_linalg::lu::{lu_decomp, lu_det};
///
/// let mut a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let mut p = Permutation::new(2).unwrap();
/// let signum = lu_decomp(&mut a.view_mut(), &mut p).unwrap();
/// assert_eq!(signum, -1);
/// assert_eq!(p.as_slice(), &[1, 0]);
/// assert!((lu_det(&a.view(), signum) + 2.0).abs() < 1e-12);
/// ```
pub fn lu_decomp(a: &mut MatrixViewMut<'_>, p: &mut Permutation) -> Result<i32, LinalgError> {
    let n = a.size1();
    check_square(n, a.size2())?;
    check_size(n, p.size())?;

    p.init();
    let mut signum = 1;

    for j in 0..n - 1 {
        let mut max = a.get(j, j).abs();
        let mut i_pivot = j;
        for i in j + 1..n {
            let aij = a.get(i, j).abs();
            if aij > max {
                max = aij;
                i_pivot = i;
            }
        }

        if i_pivot != j {
            trace!("lu: column {j}, swapping rows {j} and {i_pivot}");
            a.swap_rows(j, i_pivot)?;
            p.swap(j, i_pivot)?;
            signum = -signum;
        }

        let ajj = a.get(j, j);
        if ajj != 0.0 {
            for i in j + 1..n {
                let aij = a.get(i, j) / ajj;
                a.set(i, j, aij);
                for k in j + 1..n {
                    let aik = a.get(i, k);
                    let ajk = a.get(j, k);
                    a.set(i, k, aik - aij * ajk);
                }
            }
        }
    }

    debug!("lu: factorized {n}x{n} matrix, signum {signum}");
    Ok(signum)
}

/// Solves `A x = b` using the factorization computed by [`lu_decomp`].
///
/// # Errors
///
/// Returns [`LinalgError::Singular`] if `U` has a zero on its diagonal, and a
/// precondition error if the sizes of `lu`, `p`, `b` and `x` disagree.
pub fn lu_solve(
    lu: &MatrixView<'_>,
    p: &Permutation,
    b: &VectorView<'_>,
    x: &mut VectorViewMut<'_>,
) -> Result<(), LinalgError> {
    check_square(lu.size1(), lu.size2())?;
    check_size(lu.size1(), b.size())?;
    check_size(lu.size1(), x.size())?;
    check_size(lu.size1(), p.size())?;
    if is_singular(lu) {
        return Err(LinalgError::Singular);
    }
    x.copy_from(b)?;
    lu_svx(lu, p, x)
}

/// Solves `A x = b` in place; `x` holds `b` on entry and the solution on exit.
///
/// # Errors
///
/// Returns [`LinalgError::Singular`] if `U` has a zero on its diagonal.
pub fn lu_svx(
    lu: &MatrixView<'_>,
    p: &Permutation,
    x: &mut VectorViewMut<'_>,
) -> Result<(), LinalgError> {
    let n = lu.size1();
    check_square(n, lu.size2())?;
    check_size(n, p.size())?;
    check_size(n, x.size())?;

    if is_singular(lu) {
        return Err(LinalgError::Singular);
    }

    // b' = P b, then L y = b' and U x = y
    p.permute_vector(x)?;
    ops::trsv(Uplo::Lower, Transpose::NoTrans, Diag::Unit, lu, x)?;
    ops::trsv(Uplo::Upper, Transpose::NoTrans, Diag::NonUnit, lu, x)?;
    Ok(())
}

/// Improves a solution of `A x = b` by one step of iterative refinement.
///
/// The residual `A x - b` is computed against the original matrix `a`, solved
/// with the factorization and subtracted from `x`.
///
/// # Arguments
///
/// * `a` - The original matrix.
/// * `lu` - Its factorization.
/// * `p` - The row permutation of the factorization.
/// * `b` - The right-hand side.
/// * `x` - The solution to improve.
/// * `residual` - Workspace of the same length as `x`.
pub fn lu_refine(
    a: &MatrixView<'_>,
    lu: &MatrixView<'_>,
    p: &Permutation,
    b: &VectorView<'_>,
    x: &mut VectorViewMut<'_>,
    residual: &mut VectorViewMut<'_>,
) -> Result<(), LinalgError> {
    let n = a.size1();
    check_square(n, a.size2())?;
    check_square(lu.size1(), lu.size2())?;
    check_size(n, lu.size1())?;
    check_size(n, b.size())?;
    check_size(n, x.size())?;
    check_size(n, residual.size())?;

    if is_singular(lu) {
        return Err(LinalgError::Singular);
    }

    residual.copy_from(b)?;
    ops::gemv(Transpose::NoTrans, 1.0, a, &x.as_view(), -1.0, residual)?;
    lu_svx(lu, p, residual)?;
    ops::axpy(-1.0, &residual.as_view(), x)?;
    Ok(())
}

/// Computes the inverse of `A` from its factorization by solving against
/// each column of the identity.
///
/// # Errors
///
/// Returns [`LinalgError::Singular`] if `U` has a zero on its diagonal.
pub fn lu_invert(
    lu: &MatrixView<'_>,
    p: &Permutation,
    inverse: &mut MatrixViewMut<'_>,
) -> Result<(), LinalgError> {
    let n = lu.size1();
    check_square(n, lu.size2())?;
    check_square(inverse.size1(), inverse.size2())?;
    check_size(n, inverse.size1())?;

    if is_singular(lu) {
        return Err(LinalgError::Singular);
    }

    inverse.set_identity();
    for i in 0..n {
        let mut column = inverse.column_mut(i)?;
        lu_svx(lu, p, &mut column)?;
    }
    Ok(())
}

/// Returns the determinant `signum * Π U_ii`.
pub fn lu_det(lu: &MatrixView<'_>, signum: i32) -> f64 {
    lu.diagonal()
        .iter()
        .fold(f64::from(signum), |det, &u| det * u)
}

/// Returns `ln |det A|`; negative infinity for a singular factorization.
pub fn lu_lndet(lu: &MatrixView<'_>) -> f64 {
    lu.diagonal().iter().map(|u| u.abs().ln()).sum()
}

/// Returns the sign of the determinant, or zero for a singular factorization.
pub fn lu_sgndet(lu: &MatrixView<'_>, signum: i32) -> i32 {
    let mut s = signum;
    for &u in lu.diagonal().iter() {
        if u < 0.0 {
            s = -s;
        } else if u == 0.0 {
            return 0;
        }
    }
    s
}

/// An owned LU factorization of a square matrix.
///
/// # Examples
///
/// ```rust
/// use lumen_core::{Matrix, Vector};
/// use lumen_linalg::LuDecomposition;
///
/// let a = Matrix::from_vec(2, 2, vec![4.0, 3.0, 6.0, 3.0]).unwrap();
/// let lu = LuDecomposition::new(&a).unwrap();
/// let x = lu.solve(&Vector::from_vec(vec![10.0, 12.0]).unwrap()).unwrap();
/// assert!((x.get(0) - 1.0).abs() < 1e-12);
/// assert!((x.get(1) - 2.0).abs() < 1e-12);
/// assert!((lu.det() + 6.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct LuDecomposition {
    lu: Matrix,
    permutation: Permutation,
    signum: i32,
}

impl LuDecomposition {
    /// Factorizes a copy of `a`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::NotSquare`] if `a` is not square.
    pub fn new(a: &Matrix) -> Result<Self, LinalgError> {
        check_square(a.size1(), a.size2())?;
        let mut lu = a.clone();
        let mut permutation = Permutation::new(a.size1())?;
        let signum = lu_decomp(&mut lu.view_mut(), &mut permutation)?;
        Ok(Self {
            lu,
            permutation,
            signum,
        })
    }

    /// Returns the packed factors: `L` below the diagonal, `U` on and above it.
    pub fn lu(&self) -> &Matrix {
        &self.lu
    }

    /// Returns the row permutation.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Returns the sign of the row permutation.
    pub fn signum(&self) -> i32 {
        self.signum
    }

    /// Returns true if `U` has a zero on its diagonal.
    pub fn is_singular(&self) -> bool {
        is_singular(&self.lu.view())
    }

    /// Solves `A x = b`.
    pub fn solve(&self, b: &Vector) -> Result<Vector, LinalgError> {
        let mut x = b.clone();
        lu_svx(&self.lu.view(), &self.permutation, &mut x.view_mut())?;
        Ok(x)
    }

    /// Computes `A⁻¹`.
    pub fn inverse(&self) -> Result<Matrix, LinalgError> {
        let n = self.lu.size1();
        let mut inverse = Matrix::new(n, n)?;
        lu_invert(&self.lu.view(), &self.permutation, &mut inverse.view_mut())?;
        Ok(inverse)
    }

    /// Returns `det A`.
    pub fn det(&self) -> f64 {
        lu_det(&self.lu.view(), self.signum)
    }

    /// Returns `ln |det A|`.
    pub fn lndet(&self) -> f64 {
        lu_lndet(&self.lu.view())
    }

    /// Returns the sign of `det A`, or zero if `A` is singular.
    pub fn sgndet(&self) -> i32 {
        lu_sgndet(&self.lu.view(), self.signum)
    }
}
