use crate::error::BlasError;

/// Index of the first visited element of a strided vector of `n` elements.
///
/// Vectors with a negative increment are walked from the far end of the
/// buffer, so logical element 0 sits at `(n - 1) * |inc|`.
#[inline]
pub(crate) fn offset(n: usize, inc: isize) -> isize {
    if inc > 0 || n == 0 {
        0
    } else {
        (n as isize - 1) * -inc
    }
}

/// Validates a strided vector argument of `n` elements over a buffer of `len`.
pub(crate) fn check_vector(n: usize, inc: isize, len: usize) -> Result<(), BlasError> {
    if inc == 0 {
        return Err(BlasError::InvalidIncrement(inc));
    }
    if n == 0 {
        return Ok(());
    }
    let required = (n - 1) * inc.unsigned_abs() + 1;
    if required > len {
        return Err(BlasError::BufferTooSmall {
            required,
            available: len,
        });
    }
    Ok(())
}

/// Validates a `rows x cols` matrix argument stored with leading dimension `ld`.
pub(crate) fn check_matrix(rows: usize, cols: usize, ld: usize, len: usize) -> Result<(), BlasError> {
    let min = cols.max(1);
    if ld < min {
        return Err(BlasError::InvalidLeadingDimension { lda: ld, min });
    }
    if rows == 0 || cols == 0 {
        return Ok(());
    }
    let required = (rows - 1) * ld + cols;
    if required > len {
        return Err(BlasError::BufferTooSmall {
            required,
            available: len,
        });
    }
    Ok(())
}
