//! Householder bidiagonalization.
//!
//! An `M x N` matrix with `M >= N` is reduced to `A = U B Vᵀ`, where `B` is
//! upper bidiagonal. The reflections are stored in place: the column vectors
//! below the diagonal, the row vectors right of the superdiagonal, and their
//! coefficients in `tau_u` and `tau_v`.

use lumen_core::{MatrixViewMut, Vector, VectorViewMut};

use crate::{
    error::LinalgError,
    householder::{householder_hm, householder_hm1, householder_mh, householder_transform},
};

fn check_args(
    a: &MatrixViewMut<'_>,
    tau_u: &VectorViewMut<'_>,
    tau_v: &VectorViewMut<'_>,
) -> Result<(), LinalgError> {
    let (m, n) = (a.size1(), a.size2());
    if m < n {
        return Err(LinalgError::WideMatrix { rows: m, cols: n });
    }
    if tau_u.size() != n {
        return Err(LinalgError::length_mismatch(n, tau_u.size()));
    }
    // a single column has no row reflections and leaves tau_v untouched
    if n > 1 && tau_v.size() != n - 1 {
        return Err(LinalgError::length_mismatch(n - 1, tau_v.size()));
    }
    Ok(())
}

/// Reduces `a` to upper bidiagonal form in place.
///
/// # Arguments
///
/// * `a` - The `M x N` matrix, `M >= N`. On exit holds `B` on its diagonal
///   and superdiagonal and the Householder vectors elsewhere.
/// * `tau_u` - Receives the `N` column reflection coefficients.
/// * `tau_v` - Receives the `N - 1` row reflection coefficients.
///
/// # Errors
///
/// Returns [`LinalgError::WideMatrix`] if `M < N` and
/// [`LinalgError::LengthMismatch`] if a coefficient vector has the wrong size.
pub fn bidiag_decomp(
    a: &mut MatrixViewMut<'_>,
    tau_u: &mut VectorViewMut<'_>,
    tau_v: &mut VectorViewMut<'_>,
) -> Result<(), LinalgError> {
    check_args(a, tau_u, tau_v)?;
    let (m, n) = (a.size1(), a.size2());

    // reflection vectors are copied out of `a` so the trailing block can be
    // updated while reading them
    let mut scratch = Vector::<f64>::new(m)?;

    for i in 0..n {
        // column reflection zeroing A[i+1.., i]
        let mut v = scratch.subvector_mut(0, m - i)?;
        v.copy_from(&a.as_view().subcolumn(i, i, m - i)?)?;
        let tau = householder_transform(&mut v)?;
        a.column_mut(i)?
            .into_subvector(i, m - i)?
            .copy_from(&v.as_view())?;
        if i + 1 < n {
            let mut rest = a.submatrix_mut(i, i + 1, m - i, n - i - 1)?;
            householder_hm(tau, &v.as_view(), &mut rest)?;
        }
        tau_u.set(i, tau);

        // row reflection zeroing A[i, i+2..]
        if i + 1 < n {
            let mut v = scratch.subvector_mut(0, n - i - 1)?;
            v.copy_from(&a.as_view().subrow(i, i + 1, n - i - 1)?)?;
            let tau = householder_transform(&mut v)?;
            a.row_mut(i)?
                .into_subvector(i + 1, n - i - 1)?
                .copy_from(&v.as_view())?;
            if i + 1 < m {
                let mut rest = a.submatrix_mut(i + 1, i + 1, m - i - 1, n - i - 1)?;
                householder_mh(tau, &v.as_view(), &mut rest)?;
            }
            tau_v.set(i, tau);
        }
    }
    Ok(())
}

/// Unpacks the output of [`bidiag_decomp`] into `U`, `V` and the bidiagonal.
///
/// On exit `a` holds the `M x N` matrix `U` with orthonormal columns, `v`
/// holds the `N x N` orthogonal `V`, `tau_u` holds the diagonal of `B` and
/// `tau_v` its superdiagonal.
///
/// # Errors
///
/// Returns a precondition error if `v` is not `N x N` or the coefficient
/// vectors have the wrong size.
pub fn bidiag_unpack2(
    a: &mut MatrixViewMut<'_>,
    tau_u: &mut VectorViewMut<'_>,
    tau_v: &mut VectorViewMut<'_>,
    v: &mut MatrixViewMut<'_>,
) -> Result<(), LinalgError> {
    check_args(a, tau_u, tau_v)?;
    let (m, n) = (a.size1(), a.size2());
    if v.size1() != v.size2() {
        return Err(LinalgError::NotSquare {
            rows: v.size1(),
            cols: v.size2(),
        });
    }
    if v.size1() != n {
        return Err(LinalgError::length_mismatch(n, v.size1()));
    }

    v.set_identity();
    for i in (0..n - 1).rev() {
        let h = a.as_view().subrow(i, i + 1, n - i - 1)?;
        let mut block = v.submatrix_mut(i + 1, i + 1, n - i - 1, n - i - 1)?;
        householder_hm(tau_v.get(i), &h, &mut block)?;
    }

    for i in 0..n - 1 {
        tau_v.set(i, a.get(i, i + 1));
    }

    // U overwrites A from the right so each reflector is read before it is replaced
    for j in (0..n).rev() {
        let tj = tau_u.get(j);
        tau_u.set(j, a.get(j, j));
        let mut block = a.submatrix_mut(j, j, m - j, n - j)?;
        householder_hm1(tj, &mut block)?;
    }
    Ok(())
}
