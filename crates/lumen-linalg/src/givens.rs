//! Givens rotations.

use lumen_core::{CoreError, MatrixViewMut};

/// Computes `(c, s)` such that `[c -s; s c]ᵀ [a; b] = [r; 0]`, i.e. `s a + c b = 0`.
///
/// Example:
/// ```
/// use lumen_linalg::givens::create_givens;
///
/// let (c, s) = create_givens(3.0, 4.0);
/// assert!((s * 3.0 + c * 4.0).abs() < 1e-15);
/// assert!((c * c + s * s - 1.0).abs() < 1e-15);
/// ```
pub fn create_givens(a: f64, b: f64) -> (f64, f64) {
    if b == 0.0 {
        (1.0, 0.0)
    } else if b.abs() > a.abs() {
        let t = -a / b;
        let s = 1.0 / (1.0 + t * t).sqrt();
        (s * t, s)
    } else {
        let t = -b / a;
        let c = 1.0 / (1.0 + t * t).sqrt();
        (c, c * t)
    }
}

/// Rotates columns `p` and `q` of `m`: `m[:,p] ← c m[:,p] - s m[:,q]` and
/// `m[:,q] ← s m[:,p] + c m[:,q]`.
///
/// # Errors
///
/// Returns [`CoreError::IndexOutOfBounds`] if a column index is out of range.
pub fn rotate_columns(
    m: &mut MatrixViewMut<'_>,
    p: usize,
    q: usize,
    c: f64,
    s: f64,
) -> Result<(), CoreError> {
    let cols = m.size2();
    if p >= cols {
        return Err(CoreError::index_out_of_bounds(p, cols));
    }
    if q >= cols {
        return Err(CoreError::index_out_of_bounds(q, cols));
    }
    for i in 0..m.size1() {
        let mp = m.get(i, p);
        let mq = m.get(i, q);
        m.set(i, p, c * mp - s * mq);
        m.set(i, q, s * mp + c * mq);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lumen_core::Matrix;

    #[test]
    fn test_create_givens_zeroes_second_component() {
        for (a, b) in [(3.0, 4.0), (4.0, 3.0), (-1.0, 1e-8), (1e-300, -2.0), (0.0, 5.0)] {
            let (c, s) = create_givens(a, b);
            assert_relative_eq!(c * c + s * s, 1.0, max_relative = 1e-15);
            assert_relative_eq!(s * a + c * b, 0.0, epsilon = 1e-14);
        }
        assert_eq!(create_givens(2.0, 0.0), (1.0, 0.0));
    }

    #[test]
    fn test_rotate_columns() -> Result<(), CoreError> {
        let mut m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        rotate_columns(&mut m.view_mut(), 0, 2, 0.0, 1.0)?;
        // column 0 becomes -column 2, column 2 becomes column 0
        assert_eq!(m.to_vec(), vec![-3.0, 2.0, 1.0, -6.0, 5.0, 4.0]);
        assert!(rotate_columns(&mut m.view_mut(), 0, 3, 1.0, 0.0).is_err());
        Ok(())
    }
}
