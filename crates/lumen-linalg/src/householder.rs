//! Householder reflections.
//!
//! A reflection is stored as a scalar `tau` and a vector `v` whose first
//! element is implicitly one, so that `P = I - tau v vᵀ`. A `tau` of zero
//! stands for the identity.

use lumen_blas::ops;
use lumen_core::{
    consts::{DBL_EPSILON, DBL_MIN},
    MatrixViewMut, VectorView, VectorViewMut,
};

use crate::error::LinalgError;

/// Prepares a Householder reflection that annihilates `v[1..]`.
///
/// On return `v[0]` holds `beta`, the image of `v` under the reflection, and
/// `v[1..]` holds the essential part of the Householder vector. Returns
/// `tau`, or zero when `v` already has no component below its first element.
///
/// Example:
/// ```
/// use lumen_core::Vector;
/// use lumen_linalg::householder::householder_transform;
///
/// let mut v = Vector::from_vec(vec![3.0, 4.0]).unwrap();
/// let tau = householder_transform(&mut v.view_mut()).unwrap();
/// assert!((v.get(0) + 5.0).abs() < 1e-12);
/// assert!((tau - 1.6).abs() < 1e-12);
/// ```
pub fn householder_transform(v: &mut VectorViewMut<'_>) -> Result<f64, LinalgError> {
    let n = v.size();
    if n == 1 {
        return Ok(0.0);
    }

    let xnorm = ops::nrm2(&v.as_view().subvector(1, n - 1)?)?;
    if xnorm == 0.0 {
        return Ok(0.0);
    }

    let alpha = v.get(0);
    let sign = if alpha >= 0.0 { 1.0 } else { -1.0 };
    let beta = -sign * alpha.hypot(xnorm);
    let tau = (beta - alpha) / beta;

    let s = alpha - beta;
    let mut x = v.subvector_mut(1, n - 1)?;
    if s.abs() > DBL_MIN {
        ops::scal(1.0 / s, &mut x)?;
    } else {
        ops::scal(DBL_EPSILON / s, &mut x)?;
        ops::scal(1.0 / DBL_EPSILON, &mut x)?;
    }
    v.set(0, beta);

    Ok(tau)
}

/// Applies the reflection `P = I - tau v vᵀ` from the left: `A ← P A`.
///
/// Only `v[1..]` is read; `v[0]` is taken to be one.
///
/// # Errors
///
/// Returns [`LinalgError::LengthMismatch`] if `v` and the rows of `A` differ in length.
pub fn householder_hm(
    tau: f64,
    v: &VectorView<'_>,
    a: &mut MatrixViewMut<'_>,
) -> Result<(), LinalgError> {
    if v.size() != a.size1() {
        return Err(LinalgError::length_mismatch(a.size1(), v.size()));
    }
    if tau == 0.0 {
        return Ok(());
    }

    for j in 0..a.size2() {
        let mut wj = a.get(0, j);
        for i in 1..a.size1() {
            wj += a.get(i, j) * v.get(i);
        }

        let a0j = a.get(0, j);
        a.set(0, j, a0j - tau * wj);
        for i in 1..a.size1() {
            let aij = a.get(i, j);
            a.set(i, j, aij - tau * v.get(i) * wj);
        }
    }
    Ok(())
}

/// Applies the reflection `P = I - tau v vᵀ` from the right: `A ← A P`.
///
/// Only `v[1..]` is read; `v[0]` is taken to be one.
///
/// # Errors
///
/// Returns [`LinalgError::LengthMismatch`] if `v` and the columns of `A`
/// differ in length.
pub fn householder_mh(
    tau: f64,
    v: &VectorView<'_>,
    a: &mut MatrixViewMut<'_>,
) -> Result<(), LinalgError> {
    if v.size() != a.size2() {
        return Err(LinalgError::length_mismatch(a.size2(), v.size()));
    }
    if tau == 0.0 {
        return Ok(());
    }

    for i in 0..a.size1() {
        let mut wi = a.get(i, 0);
        for j in 1..a.size2() {
            wi += a.get(i, j) * v.get(j);
        }

        let ai0 = a.get(i, 0);
        a.set(i, 0, ai0 - tau * wi);
        for j in 1..a.size2() {
            let aij = a.get(i, j);
            a.set(i, j, aij - tau * wi * v.get(j));
        }
    }
    Ok(())
}

/// Expands a reflection stored in the first column of `A` into `P A`, where
/// the rest of `A` is taken to be the identity.
///
/// On entry `A[1.., 0]` holds the essential part of the Householder vector.
/// This is the in-place step used when accumulating an orthogonal factor
/// from right to left.
pub fn householder_hm1(tau: f64, a: &mut MatrixViewMut<'_>) -> Result<(), LinalgError> {
    let (m, n) = (a.size1(), a.size2());

    if tau == 0.0 {
        a.set(0, 0, 1.0);
        for j in 1..n {
            a.set(0, j, 0.0);
        }
        for i in 1..m {
            a.set(i, 0, 0.0);
        }
        return Ok(());
    }

    for j in 1..n {
        let mut wj = 0.0;
        for i in 1..m {
            wj += a.get(i, j) * a.get(i, 0);
        }

        a.set(0, j, -tau * wj);
        for i in 1..m {
            let vi = a.get(i, 0);
            let aij = a.get(i, j);
            a.set(i, j, aij - tau * vi * wj);
        }
    }

    for i in 1..m {
        let vi = a.get(i, 0);
        a.set(i, 0, -tau * vi);
    }
    a.set(0, 0, 1.0 - tau);
    Ok(())
}

/// Applies the reflection `P = I - tau v vᵀ` to a vector: `w ← P w`.
///
/// # Errors
///
/// Returns [`LinalgError::LengthMismatch`] if `v` and `w` differ in length.
pub fn householder_hv(
    tau: f64,
    v: &VectorView<'_>,
    w: &mut VectorViewMut<'_>,
) -> Result<(), LinalgError> {
    let n = v.size();
    if w.size() != n {
        return Err(LinalgError::length_mismatch(n, w.size()));
    }
    if tau == 0.0 {
        return Ok(());
    }

    let d0 = w.get(0);
    if n == 1 {
        w.set(0, d0 - tau * d0);
        return Ok(());
    }

    let v1 = v.subvector(1, n - 1)?;
    let d1 = ops::dot(&v1, &w.as_view().subvector(1, n - 1)?)?;
    let d = d0 + d1;

    w.set(0, d0 - tau * d);
    ops::axpy(-tau * d, &v1, &mut w.subvector_mut(1, n - 1)?)?;
    Ok(())
}
