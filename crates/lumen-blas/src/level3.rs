//! Level 3 kernels: matrix-matrix operations.

use crate::{
    error::BlasError,
    stride::check_matrix,
    types::{Order, Transpose},
};

/// Computes `C ← alpha * op(A) * op(B) + beta * C`.
///
/// A column-major call is rewritten as the row-major product
/// `Cᵀ = op(B)ᵀ op(A)ᵀ`, so a single set of row-major loop nests serves both
/// storage orders.
///
/// # Arguments
///
/// * `order` - Storage order of all three matrices.
/// * `trans_a` - Whether `A` is transposed.
/// * `trans_b` - Whether `B` is transposed.
/// * `m` - Number of rows of `op(A)` and `C`.
/// * `n` - Number of columns of `op(B)` and `C`.
/// * `k` - Number of columns of `op(A)` and rows of `op(B)`.
/// * `alpha` - Scale applied to the product.
/// * `a` - Buffer of `A`.
/// * `lda` - Leading dimension of `a`.
/// * `b` - Buffer of `B`.
/// * `ldb` - Leading dimension of `b`.
/// * `beta` - Scale applied to `C` before the update; zero clears `C`.
/// * `c` - Buffer of `C`, updated in place.
/// * `ldc` - Leading dimension of `c`.
///
/// # Errors
///
/// Returns an error if a leading dimension is too small or a buffer is too
/// short for the declared dimensions.
///
/// Example:
/// ```
/// use lumen_blas::level3::dgemm;
/// use lumen_blas::{Order, Transpose};
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let b = [5.0, 6.0, 7.0, 8.0];
/// let mut c = [0.0; 4];
/// dgemm(
///     Order::RowMajor, Transpose::NoTrans, Transpose::NoTrans,
///     2, 2, 2, 1.0, &a, 2, &b, 2, 0.0, &mut c, 2,
/// ).unwrap();
/// assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn dgemm(
    order: Order,
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: f64,
    a: &[f64],
    lda: usize,
    b: &[f64],
    ldb: usize,
    beta: f64,
    c: &mut [f64],
    ldc: usize,
) -> Result<(), BlasError> {
    let (n1, n2, f, ldf, trans_f, g, ldg, trans_g) = match order {
        Order::RowMajor => (m, n, a, lda, trans_a.real(), b, ldb, trans_b.real()),
        Order::ColMajor => (n, m, b, ldb, trans_b.real(), a, lda, trans_a.real()),
    };

    let (f_rows, f_cols) = match trans_f {
        Transpose::NoTrans => (n1, k),
        _ => (k, n1),
    };
    let (g_rows, g_cols) = match trans_g {
        Transpose::NoTrans => (k, n2),
        _ => (n2, k),
    };
    check_matrix(f_rows, f_cols, ldf, f.len())?;
    check_matrix(g_rows, g_cols, ldg, g.len())?;
    check_matrix(n1, n2, ldc, c.len())?;

    if n1 == 0 || n2 == 0 || (alpha == 0.0 && beta == 1.0) {
        return Ok(());
    }

    if beta == 0.0 {
        for i in 0..n1 {
            c[ldc * i..ldc * i + n2].iter_mut().for_each(|v| *v = 0.0);
        }
    } else if beta != 1.0 {
        for i in 0..n1 {
            c[ldc * i..ldc * i + n2].iter_mut().for_each(|v| *v *= beta);
        }
    }

    if alpha == 0.0 {
        return Ok(());
    }

    match (trans_f, trans_g) {
        (Transpose::NoTrans, Transpose::NoTrans) => {
            for l in 0..k {
                for i in 0..n1 {
                    let temp = alpha * f[ldf * i + l];
                    if temp != 0.0 {
                        for j in 0..n2 {
                            c[ldc * i + j] += temp * g[ldg * l + j];
                        }
                    }
                }
            }
        }
        (Transpose::NoTrans, Transpose::Trans) => {
            for i in 0..n1 {
                for j in 0..n2 {
                    let mut temp = 0.0;
                    for l in 0..k {
                        temp += f[ldf * i + l] * g[ldg * j + l];
                    }
                    c[ldc * i + j] += alpha * temp;
                }
            }
        }
        (Transpose::Trans, Transpose::NoTrans) => {
            for l in 0..k {
                for i in 0..n1 {
                    let temp = alpha * f[ldf * l + i];
                    if temp != 0.0 {
                        for j in 0..n2 {
                            c[ldc * i + j] += temp * g[ldg * l + j];
                        }
                    }
                }
            }
        }
        (Transpose::Trans, Transpose::Trans) => {
            for i in 0..n1 {
                for j in 0..n2 {
                    let mut temp = 0.0;
                    for l in 0..k {
                        temp += f[ldf * l + i] * g[ldg * j + l];
                    }
                    c[ldc * i + j] += alpha * temp;
                }
            }
        }
        _ => return Err(BlasError::UnrecognizedOperation),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // A = [[1 2 3] [4 5 6]], B = [[1 0] [0 1] [1 1]], A B = [[4 5] [10 11]]
    const A: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    const AT: [f64; 6] = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
    const B: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
    const BT: [f64; 6] = [1.0, 0.0, 1.0, 0.0, 1.0, 1.0];
    const AB: [f64; 4] = [4.0, 5.0, 10.0, 11.0];

    fn gemm_row(ta: Transpose, tb: Transpose, a: &[f64], lda: usize, b: &[f64], ldb: usize) -> [f64; 4] {
        let mut c = [0.0; 4];
        dgemm(Order::RowMajor, ta, tb, 2, 2, 3, 1.0, a, lda, b, ldb, 0.0, &mut c, 2).unwrap();
        c
    }

    #[test]
    fn test_dgemm_transpose_variants() {
        use Transpose::{NoTrans, Trans};
        assert_eq!(gemm_row(NoTrans, NoTrans, &A, 3, &B, 2), AB);
        assert_eq!(gemm_row(NoTrans, Trans, &A, 3, &BT, 3), AB);
        assert_eq!(gemm_row(Trans, NoTrans, &AT, 2, &B, 2), AB);
        assert_eq!(gemm_row(Trans, Trans, &AT, 2, &BT, 3), AB);
    }

    #[test]
    fn test_dgemm_col_major() -> Result<(), BlasError> {
        // column-major buffers of A and B are the row-major buffers of their transposes
        let mut c = [0.0; 4];
        dgemm(
            Order::ColMajor,
            Transpose::NoTrans,
            Transpose::NoTrans,
            2,
            2,
            3,
            1.0,
            &AT,
            2,
            &BT,
            3,
            0.0,
            &mut c,
            2,
        )?;
        // C is returned column-major
        assert_eq!(c, [4.0, 10.0, 5.0, 11.0]);
        Ok(())
    }

    #[test]
    fn test_dgemm_alpha_beta() -> Result<(), BlasError> {
        let mut c = [1.0, 1.0, 1.0, 1.0];
        dgemm(
            Order::RowMajor,
            Transpose::NoTrans,
            Transpose::NoTrans,
            2,
            2,
            3,
            2.0,
            &A,
            3,
            &B,
            2,
            -1.0,
            &mut c,
            2,
        )?;
        assert_eq!(c, [7.0, 9.0, 19.0, 21.0]);

        // alpha = 0 and beta = 1 leaves C untouched, even NaN
        let mut c = [f64::NAN, 1.0, 2.0, 3.0];
        dgemm(
            Order::RowMajor,
            Transpose::NoTrans,
            Transpose::NoTrans,
            2,
            2,
            3,
            0.0,
            &A,
            3,
            &B,
            2,
            1.0,
            &mut c,
            2,
        )?;
        assert!(c[0].is_nan());
        assert_eq!(&c[1..], &[1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_dgemm_short_buffer() {
        let mut c = [0.0; 3];
        assert_eq!(
            dgemm(
                Order::RowMajor,
                Transpose::NoTrans,
                Transpose::NoTrans,
                2,
                2,
                3,
                1.0,
                &A,
                3,
                &B,
                2,
                0.0,
                &mut c,
                2,
            ),
            Err(BlasError::BufferTooSmall {
                required: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_dgemm_beta_zero_clears_nan() -> Result<(), BlasError> {
        let mut c = [f64::NAN, f64::INFINITY, f64::NAN, 1.0];
        dgemm(
            Order::RowMajor,
            Transpose::NoTrans,
            Transpose::NoTrans,
            2,
            2,
            3,
            1.0,
            &A,
            3,
            &B,
            2,
            0.0,
            &mut c,
            2,
        )?;
        assert_eq!(c, AB);
        Ok(())
    }

    #[test]
    fn test_dgemm_empty_output() -> Result<(), BlasError> {
        // 2x1 times 1x0 gives an empty 2x0 result
        let mut c: [f64; 0] = [];
        dgemm(
            Order::RowMajor,
            Transpose::NoTrans,
            Transpose::NoTrans,
            2,
            0,
            1,
            1.0,
            &[1.0, 2.0],
            1,
            &[],
            1,
            0.5,
            &mut c,
            1,
        )?;

        let mut c: [f64; 0] = [];
        dgemm(
            Order::ColMajor,
            Transpose::Trans,
            Transpose::NoTrans,
            0,
            2,
            1,
            1.0,
            &[],
            1,
            &[1.0, 2.0],
            1,
            0.0,
            &mut c,
            1,
        )?;
        Ok(())
    }
}
