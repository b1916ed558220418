//! Level 2 kernels: matrix-vector operations.
//!
//! Matrices are passed as a flat buffer plus a leading dimension `lda`. The
//! [`Order`] flag only changes how `M`, `N` and the transpose flag are
//! interpreted; the buffer itself is always indexed as `a[lda * r + c]`.

use crate::{
    error::BlasError,
    stride::{check_matrix, check_vector, offset},
    types::{Diag, Order, Transpose, Uplo},
};

/// Computes `y ← alpha * op(A) * x + beta * y`.
///
/// # Arguments
///
/// * `order` - Storage order of `a`.
/// * `trans_a` - Whether `A` is transposed.
/// * `m` - Number of rows of `A`.
/// * `n` - Number of columns of `A`.
/// * `alpha` - Scale applied to the product.
/// * `a` - Matrix buffer.
/// * `lda` - Leading dimension of `a`.
/// * `x` - Input vector buffer, of length `n` (or `m` when transposed).
/// * `incx` - Increment of `x`.
/// * `beta` - Scale applied to `y` before the update. A zero `beta` zeroes
///   `y` outright, so NaN or infinite values in `y` do not propagate.
/// * `y` - Input/output vector buffer, of length `m` (or `n` when transposed).
/// * `incy` - Increment of `y`.
///
/// # Errors
///
/// Returns an error if an increment is zero, if `lda` is too small or if a
/// buffer is too short for the declared dimensions.
///
/// Example:
/// ```
/// use lumen_blas::level2::dgemv;
/// use lumen_blas::{Order, Transpose};
///
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let x = [1.0, 1.0, 1.0];
/// let mut y = [0.0, 0.0];
/// dgemv(Order::RowMajor, Transpose::NoTrans, 2, 3, 1.0, &a, 3, &x, 1, 0.0, &mut y, 1).unwrap();
/// assert_eq!(y, [6.0, 15.0]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn dgemv(
    order: Order,
    trans_a: Transpose,
    m: usize,
    n: usize,
    alpha: f64,
    a: &[f64],
    lda: usize,
    x: &[f64],
    incx: isize,
    beta: f64,
    y: &mut [f64],
    incy: isize,
) -> Result<(), BlasError> {
    let trans = trans_a.real();
    let (len_x, len_y) = match trans {
        Transpose::NoTrans => (n, m),
        _ => (m, n),
    };
    let (rows, cols) = match order {
        Order::RowMajor => (m, n),
        Order::ColMajor => (n, m),
    };
    check_matrix(rows, cols, lda, a.len())?;
    check_vector(len_x, incx, x.len())?;
    check_vector(len_y, incy, y.len())?;

    if m == 0 || n == 0 {
        return Ok(());
    }
    if alpha == 0.0 && beta == 1.0 {
        return Ok(());
    }

    if beta == 0.0 {
        let mut iy = offset(len_y, incy);
        for _ in 0..len_y {
            y[iy as usize] = 0.0;
            iy += incy;
        }
    } else if beta != 1.0 {
        let mut iy = offset(len_y, incy);
        for _ in 0..len_y {
            y[iy as usize] *= beta;
            iy += incy;
        }
    }

    if alpha == 0.0 {
        return Ok(());
    }

    match (order, trans) {
        (Order::RowMajor, Transpose::NoTrans) | (Order::ColMajor, Transpose::Trans) => {
            let mut iy = offset(len_y, incy);
            for i in 0..len_y {
                let mut temp = 0.0;
                let mut ix = offset(len_x, incx);
                for j in 0..len_x {
                    temp += x[ix as usize] * a[lda * i + j];
                    ix += incx;
                }
                y[iy as usize] += alpha * temp;
                iy += incy;
            }
        }
        (Order::RowMajor, Transpose::Trans) | (Order::ColMajor, Transpose::NoTrans) => {
            let mut ix = offset(len_x, incx);
            for j in 0..len_x {
                let temp = alpha * x[ix as usize];
                if temp != 0.0 {
                    let mut iy = offset(len_y, incy);
                    for i in 0..len_y {
                        y[iy as usize] += temp * a[lda * j + i];
                        iy += incy;
                    }
                }
                ix += incx;
            }
        }
        _ => return Err(BlasError::UnrecognizedOperation),
    }
    Ok(())
}

/// Solves `op(A) * x = b` in place, where `A` is triangular and `x` holds `b` on entry.
///
/// No singularity check is performed: a zero on the diagonal of a
/// [`Diag::NonUnit`] matrix produces infinities or NaNs.
///
/// # Arguments
///
/// * `order` - Storage order of `a`.
/// * `uplo` - Which triangle of `A` is referenced.
/// * `trans_a` - Whether `A` is transposed.
/// * `diag` - Whether `A` has an implicit unit diagonal.
/// * `n` - Order of `A`.
/// * `a` - Matrix buffer.
/// * `lda` - Leading dimension of `a`.
/// * `x` - Right-hand side on entry, solution on exit.
/// * `incx` - Increment of `x`.
///
/// Example:
/// ```
/// use lumen_blas::level2::dtrsv;
/// use lumen_blas::{Diag, Order, Transpose, Uplo};
///
/// // [2 1; 0 4] x = [4 8]
/// let a = [2.0, 1.0, 0.0, 4.0];
/// let mut x = [4.0, 8.0];
/// dtrsv(Order::RowMajor, Uplo::Upper, Transpose::NoTrans, Diag::NonUnit, 2, &a, 2, &mut x, 1)
///     .unwrap();
/// assert_eq!(x, [1.0, 2.0]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn dtrsv(
    order: Order,
    uplo: Uplo,
    trans_a: Transpose,
    diag: Diag,
    n: usize,
    a: &[f64],
    lda: usize,
    x: &mut [f64],
    incx: isize,
) -> Result<(), BlasError> {
    check_matrix(n, n, lda, a.len())?;
    check_vector(n, incx, x.len())?;

    if n == 0 {
        return Ok(());
    }

    let nonunit = diag == Diag::NonUnit;
    let direct = |i: usize, j: usize| a[lda * i + j];
    let transposed = |i: usize, j: usize| a[lda * j + i];

    match (order, trans_a.real(), uplo) {
        (Order::RowMajor, Transpose::NoTrans, Uplo::Upper)
        | (Order::ColMajor, Transpose::Trans, Uplo::Lower) => {
            back_substitute(n, direct, x, incx, nonunit);
        }
        (Order::RowMajor, Transpose::NoTrans, Uplo::Lower)
        | (Order::ColMajor, Transpose::Trans, Uplo::Upper) => {
            forward_substitute(n, direct, x, incx, nonunit);
        }
        (Order::RowMajor, Transpose::Trans, Uplo::Upper)
        | (Order::ColMajor, Transpose::NoTrans, Uplo::Lower) => {
            forward_substitute(n, transposed, x, incx, nonunit);
        }
        (Order::RowMajor, Transpose::Trans, Uplo::Lower)
        | (Order::ColMajor, Transpose::NoTrans, Uplo::Upper) => {
            back_substitute(n, transposed, x, incx, nonunit);
        }
        _ => return Err(BlasError::UnrecognizedOperation),
    }
    Ok(())
}

/// Back substitution for an upper triangular system whose entry `(i, j)` is `a(i, j)`.
fn back_substitute<F>(n: usize, a: F, x: &mut [f64], incx: isize, nonunit: bool)
where
    F: Fn(usize, usize) -> f64,
{
    let mut ix = offset(n, incx) + incx * (n as isize - 1);
    if nonunit {
        x[ix as usize] /= a(n - 1, n - 1);
    }
    ix -= incx;
    for i in (0..n - 1).rev() {
        let mut tmp = x[ix as usize];
        let mut jx = ix + incx;
        for j in i + 1..n {
            tmp -= a(i, j) * x[jx as usize];
            jx += incx;
        }
        x[ix as usize] = if nonunit { tmp / a(i, i) } else { tmp };
        ix -= incx;
    }
}

/// Forward substitution for a lower triangular system whose entry `(i, j)` is `a(i, j)`.
fn forward_substitute<F>(n: usize, a: F, x: &mut [f64], incx: isize, nonunit: bool)
where
    F: Fn(usize, usize) -> f64,
{
    let mut ix = offset(n, incx);
    if nonunit {
        x[ix as usize] /= a(0, 0);
    }
    ix += incx;
    for i in 1..n {
        let mut tmp = x[ix as usize];
        let mut jx = offset(n, incx);
        for j in 0..i {
            tmp -= a(i, j) * x[jx as usize];
            jx += incx;
        }
        x[ix as usize] = if nonunit { tmp / a(i, i) } else { tmp };
        ix += incx;
    }
}

/// Computes the rank-one update `A ← alpha * x * yᵀ + A`.
///
/// # Arguments
///
/// * `order` - Storage order of `a`.
/// * `m` - Number of rows of `A`, and length of `x`.
/// * `n` - Number of columns of `A`, and length of `y`.
/// * `alpha` - Scale applied to the outer product.
/// * `x` - Column vector buffer.
/// * `incx` - Increment of `x`.
/// * `y` - Row vector buffer.
/// * `incy` - Increment of `y`.
/// * `a` - Matrix buffer, updated in place.
/// * `lda` - Leading dimension of `a`.
#[allow(clippy::too_many_arguments)]
pub fn dger(
    order: Order,
    m: usize,
    n: usize,
    alpha: f64,
    x: &[f64],
    incx: isize,
    y: &[f64],
    incy: isize,
    a: &mut [f64],
    lda: usize,
) -> Result<(), BlasError> {
    let (rows, cols) = match order {
        Order::RowMajor => (m, n),
        Order::ColMajor => (n, m),
    };
    check_matrix(rows, cols, lda, a.len())?;
    check_vector(m, incx, x.len())?;
    check_vector(n, incy, y.len())?;

    match order {
        Order::RowMajor => {
            let mut ix = offset(m, incx);
            for i in 0..m {
                let tmp = alpha * x[ix as usize];
                let mut jy = offset(n, incy);
                for j in 0..n {
                    a[lda * i + j] += y[jy as usize] * tmp;
                    jy += incy;
                }
                ix += incx;
            }
        }
        Order::ColMajor => {
            let mut jy = offset(n, incy);
            for j in 0..n {
                let tmp = alpha * y[jy as usize];
                let mut ix = offset(m, incx);
                for i in 0..m {
                    a[i + lda * j] += x[ix as usize] * tmp;
                    ix += incx;
                }
                jy += incy;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // 2x3 matrix [[1 2 3] [4 5 6]] in both storage orders
    const A_ROW: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    const A_COL: [f64; 6] = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];

    #[test]
    fn test_dgemv_orders_agree() -> Result<(), BlasError> {
        let x = [1.0, -1.0, 2.0];
        let mut y_row = [1.0, 1.0];
        let mut y_col = [1.0, 1.0];
        dgemv(
            Order::RowMajor,
            Transpose::NoTrans,
            2,
            3,
            2.0,
            &A_ROW,
            3,
            &x,
            1,
            -1.0,
            &mut y_row,
            1,
        )?;
        dgemv(
            Order::ColMajor,
            Transpose::NoTrans,
            2,
            3,
            2.0,
            &A_COL,
            2,
            &x,
            1,
            -1.0,
            &mut y_col,
            1,
        )?;
        // A x = [5, 11]
        assert_eq!(y_row, [9.0, 21.0]);
        assert_eq!(y_col, y_row);
        Ok(())
    }

    #[test]
    fn test_dgemv_transposed() -> Result<(), BlasError> {
        let x = [1.0, 2.0];
        let mut y = [0.0; 3];
        dgemv(
            Order::RowMajor,
            Transpose::ConjTrans,
            2,
            3,
            1.0,
            &A_ROW,
            3,
            &x,
            1,
            0.0,
            &mut y,
            1,
        )?;
        assert_eq!(y, [9.0, 12.0, 15.0]);
        Ok(())
    }

    #[test]
    fn test_dgemv_beta_zero_clears_nan() -> Result<(), BlasError> {
        let x = [0.0, 0.0, 0.0];
        let mut y = [f64::NAN, f64::INFINITY];
        dgemv(
            Order::RowMajor,
            Transpose::NoTrans,
            2,
            3,
            1.0,
            &A_ROW,
            3,
            &x,
            1,
            0.0,
            &mut y,
            1,
        )?;
        assert_eq!(y, [0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_dgemv_identity_scaling_is_noop() -> Result<(), BlasError> {
        // alpha = 0 and beta = 1 must not touch y, so NaN survives
        let x = [1.0, 2.0, 3.0];
        let mut y = [f64::NAN, 7.0];
        dgemv(
            Order::RowMajor,
            Transpose::NoTrans,
            2,
            3,
            0.0,
            &A_ROW,
            3,
            &x,
            1,
            1.0,
            &mut y,
            1,
        )?;
        assert!(y[0].is_nan());
        assert_eq!(y[1], 7.0);
        Ok(())
    }

    #[test]
    fn test_dgemv_bad_lda() {
        let x = [0.0; 3];
        let mut y = [0.0; 2];
        assert_eq!(
            dgemv(
                Order::RowMajor,
                Transpose::NoTrans,
                2,
                3,
                1.0,
                &A_ROW,
                2,
                &x,
                1,
                0.0,
                &mut y,
                1,
            ),
            Err(BlasError::InvalidLeadingDimension { lda: 2, min: 3 })
        );
    }

    fn check_trsv(order: Order, uplo: Uplo, trans: Transpose, a: &[f64], expected: [f64; 3]) {
        // every system below is built so that op(A) x = [1 1 1] has the given solution
        let mut x = [1.0, 1.0, 1.0];
        dtrsv(order, uplo, trans, Diag::NonUnit, 3, a, 3, &mut x, 1).unwrap();
        for (v, e) in x.iter().zip(expected.iter()) {
            assert_relative_eq!(*v, *e, max_relative = 1e-14);
        }
    }

    #[test]
    fn test_dtrsv_all_patterns() {
        // U = [[2 1 1] [0 2 1] [0 0 2]] stored row-major
        let u = [2.0, 1.0, 1.0, 0.0, 2.0, 1.0, 0.0, 0.0, 2.0];
        // L = Uᵀ stored row-major
        let l = [2.0, 0.0, 0.0, 1.0, 2.0, 0.0, 1.0, 1.0, 2.0];
        let upper_solution = [0.125, 0.25, 0.5];
        let lower_solution = [0.5, 0.25, 0.125];

        check_trsv(Order::RowMajor, Uplo::Upper, Transpose::NoTrans, &u, upper_solution);
        check_trsv(Order::RowMajor, Uplo::Lower, Transpose::NoTrans, &l, lower_solution);
        check_trsv(Order::RowMajor, Uplo::Upper, Transpose::Trans, &u, lower_solution);
        check_trsv(Order::RowMajor, Uplo::Lower, Transpose::Trans, &l, upper_solution);
        // the row-major buffer of U is the column-major buffer of L
        check_trsv(Order::ColMajor, Uplo::Lower, Transpose::NoTrans, &u, lower_solution);
        check_trsv(Order::ColMajor, Uplo::Upper, Transpose::NoTrans, &l, upper_solution);
        check_trsv(Order::ColMajor, Uplo::Lower, Transpose::Trans, &u, upper_solution);
        check_trsv(Order::ColMajor, Uplo::Upper, Transpose::Trans, &l, lower_solution);
    }

    #[test]
    fn test_dtrsv_unit_negative_increment() -> Result<(), BlasError> {
        // unit lower [[1 0] [3 1]] x = [1 5] with x stored reversed
        let a = [9.0, 0.0, 3.0, 9.0];
        let mut x = [5.0, 1.0];
        dtrsv(
            Order::RowMajor,
            Uplo::Lower,
            Transpose::NoTrans,
            Diag::Unit,
            2,
            &a,
            2,
            &mut x,
            -1,
        )?;
        assert_eq!(x, [2.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_dger_orders_agree() -> Result<(), BlasError> {
        let x = [1.0, 2.0];
        let y = [1.0, 0.0, -1.0];
        let mut a_row = A_ROW;
        let mut a_col = A_COL;
        dger(Order::RowMajor, 2, 3, 2.0, &x, 1, &y, 1, &mut a_row, 3)?;
        dger(Order::ColMajor, 2, 3, 2.0, &x, 1, &y, 1, &mut a_col, 2)?;
        assert_eq!(a_row, [3.0, 2.0, 1.0, 8.0, 5.0, 2.0]);
        assert_eq!(a_col, [3.0, 8.0, 2.0, 5.0, 1.0, 2.0]);
        Ok(())
    }
}
