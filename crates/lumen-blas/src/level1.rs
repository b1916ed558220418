//! Level 1 kernels: vector-vector operations over strided slices.
//!
//! Every kernel takes the logical length `n`, one or two buffers and their
//! increments. A negative increment walks the vector backwards: logical
//! element 0 then sits at the far end of the buffer.

use crate::{
    error::BlasError,
    stride::{check_vector, offset},
};

/// Parameters of a Givens rotation computed by [`drotg`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    /// The rotated length `r = ±sqrt(a² + b²)`.
    pub r: f64,
    /// The reconstruction parameter from which `c` and `s` can be recovered.
    pub z: f64,
    /// The cosine of the rotation angle.
    pub c: f64,
    /// The sine of the rotation angle.
    pub s: f64,
}

/// Computes `y ← alpha * x + y`.
///
/// # Arguments
///
/// * `n` - Number of logical elements.
/// * `alpha` - Scale applied to `x`.
/// * `x` - Input vector buffer.
/// * `incx` - Increment of `x`.
/// * `y` - Input/output vector buffer.
/// * `incy` - Increment of `y`.
///
/// # Errors
///
/// Returns an error if an increment is zero or a buffer is too short.
///
/// Example:
/// ```
/// use lumen_blas::level1::daxpy;
///
/// let x = [1.0, 2.0, 3.0];
/// let mut y = [1.0, 1.0, 1.0];
/// daxpy(3, 2.0, &x, 1, &mut y, 1).unwrap();
/// assert_eq!(y, [3.0, 5.0, 7.0]);
/// ```
pub fn daxpy(
    n: usize,
    alpha: f64,
    x: &[f64],
    incx: isize,
    y: &mut [f64],
    incy: isize,
) -> Result<(), BlasError> {
    check_vector(n, incx, x.len())?;
    check_vector(n, incy, y.len())?;

    if alpha == 0.0 {
        return Ok(());
    }

    if incx == 1 && incy == 1 {
        let m = n % 4;
        for i in 0..m {
            y[i] += alpha * x[i];
        }
        for i in (m..n).step_by(4) {
            y[i] += alpha * x[i];
            y[i + 1] += alpha * x[i + 1];
            y[i + 2] += alpha * x[i + 2];
            y[i + 3] += alpha * x[i + 3];
        }
    } else {
        let mut ix = offset(n, incx);
        let mut iy = offset(n, incy);
        for _ in 0..n {
            y[iy as usize] += alpha * x[ix as usize];
            ix += incx;
            iy += incy;
        }
    }
    Ok(())
}

/// Computes the dot product `Σ x[i] * y[i]`, accumulated in logical index order.
///
/// Example:
/// ```
/// use lumen_blas::level1::ddot;
///
/// let x = [1.0, 2.0, 3.0];
/// let y = [4.0, 5.0, 6.0];
/// assert_eq!(ddot(3, &x, 1, &y, 1).unwrap(), 32.0);
/// ```
pub fn ddot(n: usize, x: &[f64], incx: isize, y: &[f64], incy: isize) -> Result<f64, BlasError> {
    check_vector(n, incx, x.len())?;
    check_vector(n, incy, y.len())?;

    let mut r = 0.0;
    let mut ix = offset(n, incx);
    let mut iy = offset(n, incy);
    for _ in 0..n {
        r += x[ix as usize] * y[iy as usize];
        ix += incx;
        iy += incy;
    }
    Ok(r)
}

/// Computes the Euclidean norm of `x` without intermediate overflow.
///
/// The sum of squares is accumulated relative to the largest magnitude seen
/// so far. Returns zero when `n == 0` or `incx <= 0`.
pub fn dnrm2(n: usize, x: &[f64], incx: isize) -> Result<f64, BlasError> {
    if n == 0 || incx <= 0 {
        return Ok(0.0);
    }
    check_vector(n, incx, x.len())?;
    if n == 1 {
        return Ok(x[0].abs());
    }

    let mut scale = 0.0;
    let mut ssq = 1.0;
    let mut ix = 0;
    for _ in 0..n {
        let xi = x[ix];
        if xi != 0.0 {
            let ax = xi.abs();
            if scale < ax {
                ssq = 1.0 + ssq * (scale / ax) * (scale / ax);
                scale = ax;
            } else {
                ssq += (ax / scale) * (ax / scale);
            }
        }
        ix += incx as usize;
    }
    Ok(scale * ssq.sqrt())
}

/// Computes `Σ |x[i]|`. Returns zero when `n == 0` or `incx <= 0`.
pub fn dasum(n: usize, x: &[f64], incx: isize) -> Result<f64, BlasError> {
    if n == 0 || incx <= 0 {
        return Ok(0.0);
    }
    check_vector(n, incx, x.len())?;
    Ok(x.iter().step_by(incx as usize).take(n).map(|v| v.abs()).sum())
}

/// Returns the index of the first element of largest magnitude.
///
/// Returns zero when `n == 0` or `incx <= 0`.
pub fn idamax(n: usize, x: &[f64], incx: isize) -> Result<usize, BlasError> {
    if n == 0 || incx <= 0 {
        return Ok(0);
    }
    check_vector(n, incx, x.len())?;

    let mut max = 0.0;
    let mut result = 0;
    for (i, v) in x.iter().step_by(incx as usize).take(n).enumerate() {
        if v.abs() > max {
            max = v.abs();
            result = i;
        }
    }
    Ok(result)
}

/// Computes `x ← alpha * x`. Does nothing when `incx <= 0`.
pub fn dscal(n: usize, alpha: f64, x: &mut [f64], incx: isize) -> Result<(), BlasError> {
    if n == 0 || incx <= 0 {
        return Ok(());
    }
    check_vector(n, incx, x.len())?;
    x.iter_mut()
        .step_by(incx as usize)
        .take(n)
        .for_each(|v| *v *= alpha);
    Ok(())
}

/// Exchanges the contents of `x` and `y`.
pub fn dswap(
    n: usize,
    x: &mut [f64],
    incx: isize,
    y: &mut [f64],
    incy: isize,
) -> Result<(), BlasError> {
    check_vector(n, incx, x.len())?;
    check_vector(n, incy, y.len())?;

    let mut ix = offset(n, incx);
    let mut iy = offset(n, incy);
    for _ in 0..n {
        std::mem::swap(&mut x[ix as usize], &mut y[iy as usize]);
        ix += incx;
        iy += incy;
    }
    Ok(())
}

/// Copies `x` into `y`.
pub fn dcopy(n: usize, x: &[f64], incx: isize, y: &mut [f64], incy: isize) -> Result<(), BlasError> {
    check_vector(n, incx, x.len())?;
    check_vector(n, incy, y.len())?;

    let mut ix = offset(n, incx);
    let mut iy = offset(n, incy);
    for _ in 0..n {
        y[iy as usize] = x[ix as usize];
        ix += incx;
        iy += incy;
    }
    Ok(())
}

/// Applies the plane rotation `x' = c x + s y`, `y' = -s x + c y` in place.
pub fn drot(
    n: usize,
    x: &mut [f64],
    incx: isize,
    y: &mut [f64],
    incy: isize,
    c: f64,
    s: f64,
) -> Result<(), BlasError> {
    check_vector(n, incx, x.len())?;
    check_vector(n, incy, y.len())?;

    let mut ix = offset(n, incx);
    let mut iy = offset(n, incy);
    for _ in 0..n {
        let xi = x[ix as usize];
        let yi = y[iy as usize];
        x[ix as usize] = c * xi + s * yi;
        y[iy as usize] = -s * xi + c * yi;
        ix += incx;
        iy += incy;
    }
    Ok(())
}

/// Constructs the Givens rotation that maps `(a, b)` onto `(r, 0)`.
///
/// Example:
/// ```
/// use lumen_blas::level1::drotg;
///
/// let rot = drotg(3.0, 4.0);
/// assert!((rot.r - 5.0).abs() < 1e-12);
/// assert!((rot.c - 0.6).abs() < 1e-12);
/// assert!((rot.s - 0.8).abs() < 1e-12);
/// ```
pub fn drotg(a: f64, b: f64) -> Rotation {
    let roe = if a.abs() > b.abs() { a } else { b };
    let scale = a.abs() + b.abs();

    if scale == 0.0 {
        return Rotation {
            r: 0.0,
            z: 0.0,
            c: 1.0,
            s: 0.0,
        };
    }

    let aos = a / scale;
    let bos = b / scale;
    let r = (scale * (aos * aos + bos * bos).sqrt()).copysign(roe);
    let c = a / r;
    let s = b / r;
    let z = if a.abs() > b.abs() {
        s
    } else if c != 0.0 {
        1.0 / c
    } else {
        1.0
    };
    Rotation { r, z, c, s }
}
