use approx::assert_relative_eq;
use lumen_blas::{
    level1::{daxpy, ddot, dnrm2, drot, dscal},
    level2::dtrsv,
    BlasError, Diag, Order, Transpose, Uplo,
};

#[test]
fn daxpy_zero_alpha_is_noop() -> Result<(), BlasError> {
    let x = [0.071];
    let mut y = [-0.888];
    daxpy(1, 0.0, &x, 1, &mut y, -1)?;
    assert_eq!(y, [-0.888]);
    Ok(())
}

#[test]
fn daxpy_zero_alpha_is_bitwise_identity() -> Result<(), BlasError> {
    let x = [f64::NAN, 1.0, -3.5];
    let original = [0.1, f64::INFINITY, -0.0];
    let mut y = original;
    daxpy(3, 0.0, &x, 1, &mut y, 1)?;
    for (a, b) in y.iter().zip(original.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
    Ok(())
}

#[test]
fn ddot_negative_increment() -> Result<(), BlasError> {
    let x = [0.79];
    let y = [-0.679];
    let r = ddot(1, &x, 1, &y, -1)?;
    assert_relative_eq!(r, -0.53641, max_relative = 1e-6);
    Ok(())
}

#[test]
fn dnrm2_two_elements() -> Result<(), BlasError> {
    let x = [0.696, -0.804];
    assert_relative_eq!(dnrm2(2, &x, 1)?, 1.06340584915, max_relative = 1e-10);
    Ok(())
}

#[test]
fn drot_single_element() -> Result<(), BlasError> {
    let mut x = [-0.493];
    let mut y = [-0.014];
    drot(1, &mut x, 1, &mut y, 1, 0.866025403784, 0.5)?;
    assert_relative_eq!(x[0], -0.433950524066, max_relative = 1e-10);
    assert_relative_eq!(y[0], 0.234375644347, max_relative = 1e-10);
    Ok(())
}

#[test]
fn dscal_unit_alpha_is_bitwise_identity() -> Result<(), BlasError> {
    let original = [0.3, -1e-310, 7.25e100];
    let mut x = original;
    dscal(3, 1.0, &mut x, 1)?;
    for (a, b) in x.iter().zip(original.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
    Ok(())
}

#[test]
fn dtrsv_upper_single_element() -> Result<(), BlasError> {
    let a = [-0.21];
    let mut x = [0.473];
    dtrsv(
        Order::RowMajor,
        Uplo::Upper,
        Transpose::NoTrans,
        Diag::NonUnit,
        1,
        &a,
        1,
        &mut x,
        1,
    )?;
    assert_relative_eq!(x[0], -2.25238095238, max_relative = 1e-10);
    Ok(())
}

#[test]
fn dtrsv_col_major_matches_row_major_transpose() -> Result<(), BlasError> {
    // a column-major upper matrix has the buffer of its row-major transpose
    let a = [1.5, 0.0, 0.0, -0.25, 2.0, 0.0, 0.75, 0.5, -1.0];
    let b = [0.3, -0.7, 1.1];

    let mut x_col = b;
    dtrsv(
        Order::ColMajor,
        Uplo::Upper,
        Transpose::NoTrans,
        Diag::NonUnit,
        3,
        &a,
        3,
        &mut x_col,
        1,
    )?;

    let mut x_row = b;
    dtrsv(
        Order::RowMajor,
        Uplo::Lower,
        Transpose::Trans,
        Diag::NonUnit,
        3,
        &a,
        3,
        &mut x_row,
        1,
    )?;

    assert_eq!(x_col, x_row);
    Ok(())
}
