//! Typed wrappers that run the kernels on vector and matrix views.
//!
//! Each wrapper checks that the operand dimensions agree, then forwards the
//! view storage to the corresponding kernel. Views always have positive
//! strides and are stored row-major, so no order flag is needed here.

use lumen_core::{MatrixView, MatrixViewMut, VectorView, VectorViewMut};

use crate::{
    error::BlasError,
    level1, level2, level3,
    types::{Diag, Order, Transpose, Uplo},
};

fn check_same_size(x: usize, y: usize) -> Result<(), BlasError> {
    if x != y {
        return Err(BlasError::dimension_mismatch(format!(
            "vector lengths differ: {x} != {y}"
        )));
    }
    Ok(())
}

#[inline]
fn inc(stride: usize) -> isize {
    stride as isize
}

/// Computes `y ← alpha * x + y`.
pub fn axpy(alpha: f64, x: &VectorView<'_>, y: &mut VectorViewMut<'_>) -> Result<(), BlasError> {
    check_same_size(x.size(), y.size())?;
    let (n, incy) = (y.size(), inc(y.stride()));
    level1::daxpy(n, alpha, x.as_slice(), inc(x.stride()), y.as_mut_slice(), incy)
}

/// Computes the dot product of `x` and `y`.
pub fn dot(x: &VectorView<'_>, y: &VectorView<'_>) -> Result<f64, BlasError> {
    check_same_size(x.size(), y.size())?;
    level1::ddot(
        x.size(),
        x.as_slice(),
        inc(x.stride()),
        y.as_slice(),
        inc(y.stride()),
    )
}

/// Computes the Euclidean norm of `x`.
///
/// Example:
/// ```
/// use lumen_core::Vector;
/// use lumen_blas::ops::nrm2;
///
/// let v = Vector::from_vec(vec![3.0, 4.0]).unwrap();
/// assert_eq!(nrm2(&v.view()).unwrap(), 5.0);
/// ```
pub fn nrm2(x: &VectorView<'_>) -> Result<f64, BlasError> {
    level1::dnrm2(x.size(), x.as_slice(), inc(x.stride()))
}

/// Computes the sum of absolute values of `x`.
pub fn asum(x: &VectorView<'_>) -> Result<f64, BlasError> {
    level1::dasum(x.size(), x.as_slice(), inc(x.stride()))
}

/// Returns the index of the first element of largest magnitude in `x`.
pub fn iamax(x: &VectorView<'_>) -> Result<usize, BlasError> {
    level1::idamax(x.size(), x.as_slice(), inc(x.stride()))
}

/// Computes `x ← alpha * x`.
pub fn scal(alpha: f64, x: &mut VectorViewMut<'_>) -> Result<(), BlasError> {
    let (n, incx) = (x.size(), inc(x.stride()));
    level1::dscal(n, alpha, x.as_mut_slice(), incx)
}

/// Exchanges the contents of `x` and `y`.
pub fn swap(x: &mut VectorViewMut<'_>, y: &mut VectorViewMut<'_>) -> Result<(), BlasError> {
    check_same_size(x.size(), y.size())?;
    let (n, incx, incy) = (x.size(), inc(x.stride()), inc(y.stride()));
    level1::dswap(n, x.as_mut_slice(), incx, y.as_mut_slice(), incy)
}

/// Copies `x` into `y`.
pub fn copy(x: &VectorView<'_>, y: &mut VectorViewMut<'_>) -> Result<(), BlasError> {
    check_same_size(x.size(), y.size())?;
    let (n, incy) = (y.size(), inc(y.stride()));
    level1::dcopy(n, x.as_slice(), inc(x.stride()), y.as_mut_slice(), incy)
}

/// Applies the plane rotation `x' = c x + s y`, `y' = -s x + c y`.
pub fn rot(
    x: &mut VectorViewMut<'_>,
    y: &mut VectorViewMut<'_>,
    c: f64,
    s: f64,
) -> Result<(), BlasError> {
    check_same_size(x.size(), y.size())?;
    let (n, incx, incy) = (x.size(), inc(x.stride()), inc(y.stride()));
    level1::drot(n, x.as_mut_slice(), incx, y.as_mut_slice(), incy, c, s)
}

/// Computes `y ← alpha * op(A) * x + beta * y`.
///
/// # Errors
///
/// Returns [`BlasError::DimensionMismatch`] unless `op(A)` has as many
/// columns as `x` and as many rows as `y`.
pub fn gemv(
    trans_a: Transpose,
    alpha: f64,
    a: &MatrixView<'_>,
    x: &VectorView<'_>,
    beta: f64,
    y: &mut VectorViewMut<'_>,
) -> Result<(), BlasError> {
    let (m, n) = (a.size1(), a.size2());
    let (len_x, len_y) = match trans_a.real() {
        Transpose::NoTrans => (n, m),
        _ => (m, n),
    };
    if len_x != x.size() || len_y != y.size() {
        return Err(BlasError::dimension_mismatch(format!(
            "gemv: op(A) is {len_y}x{len_x}, x has {} elements, y has {}",
            x.size(),
            y.size()
        )));
    }
    let incy = inc(y.stride());
    level2::dgemv(
        Order::RowMajor,
        trans_a,
        m,
        n,
        alpha,
        a.as_slice(),
        a.tda(),
        x.as_slice(),
        inc(x.stride()),
        beta,
        y.as_mut_slice(),
        incy,
    )
}

/// Solves `op(A) * x = b` in place for triangular `A`; `x` holds `b` on entry.
///
/// # Errors
///
/// Returns [`BlasError::DimensionMismatch`] if `A` is not square or its order
/// differs from the length of `x`.
pub fn trsv(
    uplo: Uplo,
    trans_a: Transpose,
    diag: Diag,
    a: &MatrixView<'_>,
    x: &mut VectorViewMut<'_>,
) -> Result<(), BlasError> {
    if !a.is_square() {
        return Err(BlasError::dimension_mismatch(format!(
            "trsv: matrix must be square, got {}x{}",
            a.size1(),
            a.size2()
        )));
    }
    if a.size1() != x.size() {
        return Err(BlasError::dimension_mismatch(format!(
            "trsv: matrix order {} differs from vector length {}",
            a.size1(),
            x.size()
        )));
    }
    let (n, incx) = (x.size(), inc(x.stride()));
    level2::dtrsv(
        Order::RowMajor,
        uplo,
        trans_a,
        diag,
        n,
        a.as_slice(),
        a.tda(),
        x.as_mut_slice(),
        incx,
    )
}

/// Computes the rank-one update `A ← alpha * x * yᵀ + A`.
pub fn ger(
    alpha: f64,
    x: &VectorView<'_>,
    y: &VectorView<'_>,
    a: &mut MatrixViewMut<'_>,
) -> Result<(), BlasError> {
    let (m, n, lda) = (a.size1(), a.size2(), a.tda());
    if x.size() != m || y.size() != n {
        return Err(BlasError::dimension_mismatch(format!(
            "ger: A is {m}x{n}, x has {} elements, y has {}",
            x.size(),
            y.size()
        )));
    }
    level2::dger(
        Order::RowMajor,
        m,
        n,
        alpha,
        x.as_slice(),
        inc(x.stride()),
        y.as_slice(),
        inc(y.stride()),
        a.as_mut_slice(),
        lda,
    )
}

/// Computes `C ← alpha * op(A) * op(B) + beta * C`.
///
/// # Errors
///
/// Returns [`BlasError::DimensionMismatch`] unless `op(A)` is `M x K`,
/// `op(B)` is `K x N` and `C` is `M x N`.
///
/// Example:
/// ```
/// use lumen_core::Matrix;
/// use lumen_blas::{ops::gemm, Transpose};
///
/// let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let mut c = Matrix::new(2, 2).unwrap();
/// gemm(Transpose::NoTrans, Transpose::Trans, 1.0, &a.view(), &a.view(), 0.0, &mut c.view_mut())
///     .unwrap();
/// assert_eq!(c.to_vec(), vec![14.0, 32.0, 32.0, 77.0]);
/// ```
pub fn gemm(
    trans_a: Transpose,
    trans_b: Transpose,
    alpha: f64,
    a: &MatrixView<'_>,
    b: &MatrixView<'_>,
    beta: f64,
    c: &mut MatrixViewMut<'_>,
) -> Result<(), BlasError> {
    let (ma, na) = match trans_a.real() {
        Transpose::NoTrans => (a.size1(), a.size2()),
        _ => (a.size2(), a.size1()),
    };
    let (mb, nb) = match trans_b.real() {
        Transpose::NoTrans => (b.size1(), b.size2()),
        _ => (b.size2(), b.size1()),
    };
    let (m, n, ldc) = (c.size1(), c.size2(), c.tda());
    if m != ma || n != nb || na != mb {
        return Err(BlasError::dimension_mismatch(format!(
            "gemm: op(A) is {ma}x{na}, op(B) is {mb}x{nb}, C is {m}x{n}"
        )));
    }
    level3::dgemm(
        Order::RowMajor,
        trans_a,
        trans_b,
        m,
        n,
        na,
        alpha,
        a.as_slice(),
        a.tda(),
        b.as_slice(),
        b.tda(),
        beta,
        c.as_mut_slice(),
        ldc,
    )
}
