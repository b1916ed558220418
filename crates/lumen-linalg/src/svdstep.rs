//! One implicit-shift QR sweep of the Golub-Kahan bidiagonal SVD.
//!
//! Every routine works on an unreduced block: `d` is the diagonal, `f` the
//! superdiagonal (one shorter), and `u`/`v` are the columns of the left and
//! right factors the block touches.

use lumen_core::{
    consts::{DBL_EPSILON, SQRT_DBL_MAX, SQRT_DBL_MIN},
    MatrixViewMut, VectorView, VectorViewMut,
};

use crate::{
    error::LinalgError,
    givens::{create_givens, rotate_columns},
};

/// Binary exponent `e` with `x = m 2^e` and `0.5 <= |m| < 1`; zero for zero
/// and non-finite input.
fn frexp_exponent(x: f64) -> i32 {
    if x == 0.0 || !x.is_finite() {
        return 0;
    }
    let biased = ((x.to_bits() >> 52) & 0x7ff) as i32;
    if biased == 0 {
        // subnormal, normalize first
        return frexp_exponent(x * 2f64.powi(54)) - 54;
    }
    biased - 1022
}

/// Sets to zero every superdiagonal element negligible against its neighbours.
pub(crate) fn chop_small_elements(d: &VectorView<'_>, f: &mut VectorViewMut<'_>) {
    let n = d.size();
    let mut d_i = d.get(0);
    for i in 0..n - 1 {
        let f_i = f.get(i);
        let d_ip1 = d.get(i + 1);
        if f_i.abs() < DBL_EPSILON * (d_i.abs() + d_ip1.abs()) {
            f.set(i, 0.0);
        }
        d_i = d_ip1;
    }
}

/// Returns the eigenvalue of the trailing `2 x 2` block of `BᵀB` closest to
/// its bottom-right element.
pub(crate) fn trailing_eigenvalue(d: &VectorView<'_>, f: &VectorView<'_>) -> f64 {
    let n = d.size();
    let da = d.get(n - 2);
    let db = d.get(n - 1);
    let fa = if n > 2 { f.get(n - 3) } else { 0.0 };
    let fb = f.get(n - 2);

    // [da² + fa², da fb; da fb, db² + fb²], whose roots are non-negative
    let ta = da * da + fa * fa;
    let tb = db * db + fb * fb;
    let tab = da * fb;
    let dt = (ta - tb) / 2.0;
    let s = ta + tb;
    let (da2, db2, fa2, fb2) = (da * da, db * db, fa * fa, fb * fb);
    let p = da2 * db2 + fa2 * db2 + fa2 * fb2;
    let discriminant = dt.hypot(tab);
    let r1 = s / 2.0 + discriminant;

    if dt >= 0.0 {
        // tb <= ta, take the smaller root through the product
        if r1 > 0.0 {
            p / r1
        } else {
            0.0
        }
    } else {
        r1
    }
}

/// Computes the rotation `(c, s)` that makes the columns of
/// `[d0 f0; 0 d1]` orthogonal.
pub(crate) fn create_schur(d0: f64, f0: f64, d1: f64) -> (f64, f64) {
    if d0 == 0.0 || f0 == 0.0 {
        return (1.0, 0.0);
    }

    let (mut d0, mut f0, mut d1) = (d0, f0, d1);
    let out_of_range = |x: f64| x.abs() < SQRT_DBL_MIN || x.abs() > SQRT_DBL_MAX;
    if out_of_range(d0) || out_of_range(f0) || out_of_range(d1) {
        // bring |d0 f0| back into the representable range
        let scale = 2f64.powi(-(frexp_exponent(d0) + frexp_exponent(f0)) / 4);
        d0 *= scale;
        f0 *= scale;
        d1 *= scale;
    }

    let apq = 2.0 * d0 * f0;
    if apq == 0.0 {
        return (1.0, 0.0);
    }

    let tau = (f0 * f0 + (d1 + d0) * (d1 - d0)) / apq;
    let t = if tau >= 0.0 {
        1.0 / (tau + 1f64.hypot(tau))
    } else {
        -1.0 / (-tau + 1f64.hypot(tau))
    };
    let c = 1.0 / 1f64.hypot(t);
    (c, t * c)
}

/// Diagonalizes a `2 x 2` block in closed form.
pub(crate) fn svd2(
    d: &mut VectorViewMut<'_>,
    f: &mut VectorViewMut<'_>,
    u: &mut MatrixViewMut<'_>,
    v: &mut MatrixViewMut<'_>,
) -> Result<(), LinalgError> {
    let d0 = d.get(0);
    let f0 = f.get(0);
    let d1 = d.get(1);

    if d0 == 0.0 {
        // [0 f0; 0 d1] becomes [d 0; 0 0] with B ← Gᵀ B X, X the column swap
        let (c, s) = create_givens(f0, d1);
        d.set(0, c * f0 - s * d1);
        f.set(0, s * f0 + c * d1);
        d.set(1, 0.0);
        rotate_columns(u, 0, 1, c, s)?;
        v.swap_columns(0, 1)?;
        return Ok(());
    }

    if d1 == 0.0 {
        // [d0 f0; 0 0] becomes [d 0; 0 0] with B ← B G
        let (c, s) = create_givens(d0, f0);
        d.set(0, d0 * c - f0 * s);
        f.set(0, 0.0);
        rotate_columns(v, 0, 1, c, s)?;
        return Ok(());
    }

    let (c, s) = create_schur(d0, f0, d1);
    let mut a11 = c * d0 - s * f0;
    let mut a21 = -s * d1;
    let mut a12 = s * d0 + c * f0;
    let mut a22 = c * d1;
    rotate_columns(v, 0, 1, c, s)?;

    // keep the column with the larger norm first
    if a11.hypot(a21) < a12.hypot(a22) {
        std::mem::swap(&mut a11, &mut a12);
        std::mem::swap(&mut a21, &mut a22);
        v.swap_columns(0, 1)?;
    }

    let (c, s) = create_givens(a11, a21);
    d.set(0, c * a11 - s * a21);
    f.set(0, c * a12 - s * a22);
    d.set(1, s * a12 + c * a22);
    rotate_columns(u, 0, 1, c, s)?;
    Ok(())
}

/// Moves a zero at `d[k0]` (not the last element) out of the block by
/// rotating rows `k0` and `k + 1` for `k = k0..n-1`.
pub(crate) fn chase_out_intermediate_zero(
    d: &mut VectorViewMut<'_>,
    f: &mut VectorViewMut<'_>,
    u: &mut MatrixViewMut<'_>,
    k0: usize,
) -> Result<(), LinalgError> {
    let n = d.size();
    let mut x = f.get(k0);
    let mut y = d.get(k0 + 1);

    for k in k0..n - 1 {
        let (c, s) = create_givens(y, -x);
        rotate_columns(u, k0, k + 1, c, s)?;

        d.set(k + 1, s * x + c * y);
        if k == k0 {
            f.set(k, c * x - s * y);
        }
        if k < n - 2 {
            let z = f.get(k + 1);
            f.set(k + 1, c * z);
            x = -s * z;
            y = d.get(k + 2);
        }
    }
    Ok(())
}

/// Moves a zero at the last diagonal element out of the block by rotating
/// columns `k` and `n - 1` for `k = n-2` down to `0`.
pub(crate) fn chase_out_trailing_zero(
    d: &mut VectorViewMut<'_>,
    f: &mut VectorViewMut<'_>,
    v: &mut MatrixViewMut<'_>,
) -> Result<(), LinalgError> {
    let n = d.size();
    let mut x = d.get(n - 2);
    let mut y = f.get(n - 2);

    for k in (0..n - 1).rev() {
        let (c, s) = create_givens(x, y);
        rotate_columns(v, k, n - 1, c, s)?;

        d.set(k, c * x - s * y);
        if k == n - 2 {
            f.set(k, s * x + c * y);
        }
        if k > 0 {
            let z = f.get(k - 1);
            f.set(k - 1, c * z);
            x = d.get(k - 1);
            y = s * z;
        }
    }
    Ok(())
}

/// Performs one implicit-shift QR sweep on an unreduced block.
///
/// Blocks of size two are solved directly, and a zero on the diagonal is
/// chased out instead of sweeping.
pub(crate) fn qrstep(
    d: &mut VectorViewMut<'_>,
    f: &mut VectorViewMut<'_>,
    u: &mut MatrixViewMut<'_>,
    v: &mut MatrixViewMut<'_>,
) -> Result<(), LinalgError> {
    let n = d.size();
    if n == 1 {
        return Ok(());
    }
    if n == 2 {
        return svd2(d, f, u, v);
    }

    for i in 0..n - 1 {
        if d.get(i) == 0.0 {
            return chase_out_intermediate_zero(d, f, u, i);
        }
    }
    if d.get(n - 1) == 0.0 {
        return chase_out_trailing_zero(d, f, v);
    }

    let mu = trailing_eigenvalue(&d.as_view(), &f.as_view());
    let d0 = d.get(0);
    let f0 = f.get(0);
    let mut y = d0 * d0 - mu;
    let mut z = d0 * f0;

    // bulge-chasing recurrence: bk is the superdiagonal of the current row,
    // (ap, bp) the diagonal and superdiagonal below it, aq the next diagonal
    let mut bk = 0.0;
    let mut ap = d0;
    let mut bp = f0;
    let mut aq = d.get(1);

    for k in 0..n - 1 {
        let (c, s) = create_givens(y, z);
        rotate_columns(v, k, k + 1, c, s)?;

        // B ← B G
        let bk1 = c * bk - s * z;
        let ak = c * ap - s * bp;
        bk = s * ap + c * bp;
        let zk = -s * aq;
        ap = c * aq;
        if k > 0 {
            f.set(k - 1, bk1);
        }
        bp = if k < n - 2 { f.get(k + 1) } else { 0.0 };

        let (c, s) = create_givens(ak, zk);
        rotate_columns(u, k, k + 1, c, s)?;

        // B ← Gᵀ B
        d.set(k, c * ak - s * zk);
        let bk1 = c * bk - s * ap;
        z = -s * bp;
        ap = s * bk + c * ap;
        bp *= c;
        bk = bk1;
        aq = if k < n - 2 { d.get(k + 2) } else { 0.0 };
        y = bk;
    }

    f.set(n - 2, bk);
    d.set(n - 1, ap);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lumen_core::{Matrix, Vector};

    /// Dense `U B Vᵀ` for a bidiagonal `(d, f)`.
    fn reconstruct(d: &Vector, f: &Vector, u: &Matrix, v: &Matrix) -> Vec<f64> {
        let (m, n) = (u.size1(), v.size1());
        let mut out = vec![0.0; m * n];
        for i in 0..m {
            for j in 0..n {
                let mut x = 0.0;
                for k in 0..n {
                    let mut ub = u.get(i, k) * d.get(k);
                    if k > 0 {
                        ub += u.get(i, k - 1) * f.get(k - 1);
                    }
                    x += ub * v.get(j, k);
                }
                out[i * n + j] = x;
            }
        }
        out
    }

    #[test]
    fn test_frexp_exponent() {
        assert_eq!(frexp_exponent(1.0), 1);
        assert_eq!(frexp_exponent(0.5), 0);
        assert_eq!(frexp_exponent(-3.0), 2);
        assert_eq!(frexp_exponent(1e-310), -1029);
        assert_eq!(frexp_exponent(0.0), 0);
    }

    #[test]
    fn test_chop_small_elements() -> Result<(), LinalgError> {
        let d = Vector::from_vec(vec![1.0, 1.0, 1.0])?;
        let mut f = Vector::from_vec(vec![1e-17, 0.5])?;
        chop_small_elements(&d.view(), &mut f.view_mut());
        assert_eq!(f.to_vec(), vec![0.0, 0.5]);
        Ok(())
    }

    #[test]
    fn test_trailing_eigenvalue() -> Result<(), LinalgError> {
        // BᵀB trailing block of [[3, 1], [0, 2]] is [[9, 3], [3, 5]], roots 7 ± √13
        let d = Vector::from_vec(vec![3.0, 2.0])?;
        let f = Vector::from_vec(vec![1.0])?;
        let mu = trailing_eigenvalue(&d.view(), &f.view());
        assert_relative_eq!(mu, 7.0 - 13f64.sqrt(), max_relative = 1e-14);
        Ok(())
    }

    #[test]
    fn test_create_schur_orthogonalizes() {
        for (d0, f0, d1) in [(3.0, 1.0, 2.0), (1.0, 4.0, -1.0), (1e200, 1e200, 1e-200)] {
            let (c, s) = create_schur(d0, f0, d1);
            assert_relative_eq!(c * c + s * s, 1.0, max_relative = 1e-14);
            // columns of [d0 f0; 0 d1] G are orthogonal
            let (a11, a21) = (c * d0 - s * f0, -s * d1);
            let (a12, a22) = (s * d0 + c * f0, c * d1);
            let scale = (a11.hypot(a21) * a12.hypot(a22)).max(f64::MIN_POSITIVE);
            assert!(((a11 * a12 + a21 * a22) / scale).abs() < 1e-12);
        }
        assert_eq!(create_schur(0.0, 1.0, 2.0), (1.0, 0.0));
    }

    #[test]
    fn test_svd2_cases() -> Result<(), LinalgError> {
        for (d0, f0, d1) in [(3.0, 1.0, 2.0), (0.0, 1.0, 2.0), (3.0, 4.0, 0.0)] {
            let d_in = Vector::from_vec(vec![d0, d1])?;
            let f_in = Vector::from_vec(vec![f0])?;
            let mut d = d_in.clone();
            let mut f = f_in.clone();
            let mut u = Matrix::<f64>::identity(2)?;
            let mut v = Matrix::<f64>::identity(2)?;
            svd2(&mut d.view_mut(), &mut f.view_mut(), &mut u.view_mut(), &mut v.view_mut())?;

            assert_relative_eq!(f.get(0), 0.0, epsilon = 1e-13);
            let expected = reconstruct(&d_in, &f_in, &Matrix::identity(2)?, &Matrix::identity(2)?);
            for (x, e) in reconstruct(&d, &f, &u, &v).iter().zip(expected.iter()) {
                assert_relative_eq!(*x, *e, epsilon = 1e-13);
            }
        }
        Ok(())
    }

    #[test]
    fn test_qrstep_preserves_product() -> Result<(), LinalgError> {
        let d_in = Vector::from_vec(vec![4.0, 3.0, 2.0, 1.0])?;
        let f_in = Vector::from_vec(vec![1.0, 1.0, 1.0])?;
        let expected = reconstruct(&d_in, &f_in, &Matrix::identity(4)?, &Matrix::identity(4)?);

        let mut d = d_in.clone();
        let mut f = f_in.clone();
        let mut u = Matrix::<f64>::identity(4)?;
        let mut v = Matrix::<f64>::identity(4)?;
        for _ in 0..3 {
            qrstep(&mut d.view_mut(), &mut f.view_mut(), &mut u.view_mut(), &mut v.view_mut())?;
        }

        for (x, e) in reconstruct(&d, &f, &u, &v).iter().zip(expected.iter()) {
            assert_relative_eq!(*x, *e, epsilon = 1e-12);
        }
        // the trailing off-diagonal converges first
        assert!(f.get(2).abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn test_chase_out_zeros_preserve_product() -> Result<(), LinalgError> {
        let f_in = Vector::from_vec(vec![1.0, 2.0])?;
        for d_vals in [vec![2.0, 0.0, 3.0], vec![2.0, 3.0, 0.0]] {
            let d_in = Vector::from_vec(d_vals)?;
            let expected = reconstruct(&d_in, &f_in, &Matrix::identity(3)?, &Matrix::identity(3)?);

            let mut d = d_in.clone();
            let mut f = f_in.clone();
            let mut u = Matrix::<f64>::identity(3)?;
            let mut v = Matrix::<f64>::identity(3)?;
            qrstep(&mut d.view_mut(), &mut f.view_mut(), &mut u.view_mut(), &mut v.view_mut())?;

            for (x, e) in reconstruct(&d, &f, &u, &v).iter().zip(expected.iter()) {
                assert_relative_eq!(*x, *e, epsilon = 1e-13);
            }
        }
        Ok(())
    }
}
