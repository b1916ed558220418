use approx::assert_relative_eq;
use lumen_core::{Matrix, Permutation, Vector};
use lumen_linalg::{
    lu::{lu_decomp, lu_solve},
    svd::sv_decomp,
    LinalgError, LuDecomposition, SvDecomposition,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix {
    let data = (0..rows * cols)
        .map(|_| rng.random_range(-1.0..1.0))
        .collect();
    Matrix::from_vec(rows, cols, data).unwrap()
}

fn hilbert(n: usize) -> Matrix {
    let data = (0..n * n)
        .map(|k| 1.0 / ((k / n + k % n + 1) as f64))
        .collect();
    Matrix::from_vec(n, n, data).unwrap()
}

fn mat_vec(a: &Matrix, x: &Vector) -> Vec<f64> {
    (0..a.size1())
        .map(|i| (0..a.size2()).map(|j| a.get(i, j) * x.get(j)).sum())
        .collect()
}

fn assert_orthonormal_columns(q: &Matrix, tol: f64) {
    for i in 0..q.size2() {
        for j in 0..q.size2() {
            let qq: f64 = (0..q.size1()).map(|k| q.get(k, i) * q.get(k, j)).sum();
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_relative_eq!(qq, expected, epsilon = tol);
        }
    }
}

#[test]
fn lu_solves_random_systems() -> Result<(), LinalgError> {
    init_logger();
    let mut rng = StdRng::seed_from_u64(42);

    for n in [1, 2, 3, 5, 8, 16] {
        let a = random_matrix(&mut rng, n, n);
        let x_true = Vector::from_vec((0..n).map(|i| i as f64 - 2.0).collect())?;
        let b = Vector::from_vec(mat_vec(&a, &x_true))?;

        let lu = LuDecomposition::new(&a)?;
        let x = lu.solve(&b)?;
        let ax = mat_vec(&a, &x);
        for (r, e) in ax.iter().zip(b.to_vec().iter()) {
            assert_relative_eq!(*r, *e, epsilon = 1e-10);
        }

        // |det A| is the product of the singular values
        let svd = SvDecomposition::new(&a)?;
        let prod: f64 = svd.singular_values().to_vec().iter().product();
        assert_relative_eq!(lu.det().abs(), prod, max_relative = 1e-10);
        assert_relative_eq!(lu.lndet(), prod.ln(), epsilon = 1e-10);
        assert_eq!(lu.sgndet() as f64, lu.det().signum());
    }
    Ok(())
}

#[test]
fn lu_inverse_of_random_matrix() -> Result<(), LinalgError> {
    let mut rng = StdRng::seed_from_u64(7);
    let a = random_matrix(&mut rng, 6, 6);
    let inv = LuDecomposition::new(&a)?.inverse()?;
    for i in 0..6 {
        for j in 0..6 {
            let x: f64 = (0..6).map(|k| inv.get(i, k) * a.get(k, j)).sum();
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_relative_eq!(x, expected, epsilon = 1e-10);
        }
    }
    Ok(())
}

#[test]
fn lu_on_submatrix_view_leaves_border_untouched() -> Result<(), LinalgError> {
    // factorize the inner 3x3 block of a 5x5 matrix through a view with tda 5
    let mut rng = StdRng::seed_from_u64(3);
    let outer = random_matrix(&mut rng, 5, 5);
    let inner = Matrix::from_vec(3, 3, outer.submatrix(1, 1, 3, 3)?.to_vec())?;

    let mut work = outer.clone();
    let mut p = Permutation::new(3)?;
    let mut view = work.submatrix_mut(1, 1, 3, 3)?;
    assert_eq!(view.tda(), 5);
    lu_decomp(&mut view, &mut p)?;

    let b = Vector::from_vec(vec![1.0, -1.0, 0.5])?;
    let mut x = Vector::<f64>::new(3)?;
    lu_solve(&view.as_view(), &p, &b.view(), &mut x.view_mut())?;
    for (r, e) in mat_vec(&inner, &x).iter().zip(b.to_vec().iter()) {
        assert_relative_eq!(*r, *e, epsilon = 1e-10);
    }

    for i in 0..5 {
        for j in 0..5 {
            if !(1..4).contains(&i) || !(1..4).contains(&j) {
                assert_eq!(work.get(i, j), outer.get(i, j));
            }
        }
    }
    Ok(())
}

#[test]
fn svd_reconstructs_random_matrices() -> Result<(), LinalgError> {
    init_logger();
    let mut rng = StdRng::seed_from_u64(1234);

    for (m, n) in [(1, 1), (2, 2), (4, 3), (7, 7), (10, 4), (12, 12)] {
        let a = random_matrix(&mut rng, m, n);
        let svd = SvDecomposition::new(&a)?;
        let (u, v, s) = (svd.u(), svd.v(), svd.singular_values());

        assert_orthonormal_columns(u, 1e-12);
        assert_orthonormal_columns(v, 1e-12);
        for i in 1..n {
            assert!(s.get(i - 1) >= s.get(i));
        }
        assert!(s.to_vec().iter().all(|&x| x >= 0.0));

        for i in 0..m {
            for j in 0..n {
                let x: f64 = (0..n).map(|k| u.get(i, k) * s.get(k) * v.get(j, k)).sum();
                assert_relative_eq!(x, a.get(i, j), epsilon = 1e-12);
            }
        }
    }
    Ok(())
}

#[test]
fn svd_of_hilbert_matrix() -> Result<(), LinalgError> {
    // ill conditioned but well within the convergence bound
    let a = hilbert(8);
    let svd = SvDecomposition::new(&a)?;
    let s = svd.singular_values();
    assert_relative_eq!(s.get(0), 1.695_938_996_921_949, max_relative = 1e-10);
    assert!(svd.condition_number() > 1e9);
    assert_eq!(svd.rank(1e-7), 6);
    Ok(())
}

#[test]
fn svd_is_deterministic() -> Result<(), LinalgError> {
    let mut rng = StdRng::seed_from_u64(99);
    let a = random_matrix(&mut rng, 6, 4);

    let run = |a: &Matrix| -> Result<(Vec<f64>, Vec<f64>), LinalgError> {
        let mut u = a.clone();
        let mut v = Matrix::<f64>::new(4, 4)?;
        let mut s = Vector::<f64>::new(4)?;
        let mut work = Vector::<f64>::new(4)?;
        sv_decomp(
            &mut u.view_mut(),
            &mut v.view_mut(),
            &mut s.view_mut(),
            &mut work.view_mut(),
        )?;
        Ok((s.to_vec(), u.to_vec()))
    };

    let (s1, u1) = run(&a)?;
    let (s2, u2) = run(&a)?;
    let bits = |xs: &[f64]| xs.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&s1), bits(&s2));
    assert_eq!(bits(&u1), bits(&u2));
    Ok(())
}

#[test]
fn svd_ties_and_repeated_values() -> Result<(), LinalgError> {
    // orthogonal columns of equal norm give repeated singular values
    let a = Matrix::from_vec(3, 2, vec![1.0, 1.0, 1.0, -1.0, 0.0, 0.0])?;
    let svd = SvDecomposition::new(&a)?;
    let s = svd.singular_values();
    assert_relative_eq!(s.get(0), 2f64.sqrt(), max_relative = 1e-13);
    assert_relative_eq!(s.get(1), 2f64.sqrt(), max_relative = 1e-13);
    assert_eq!(svd.rank(1e-12), 2);
    Ok(())
}

#[test]
fn svd_keeps_column_order_of_equal_values() -> Result<(), LinalgError> {
    let diag = |d: [f64; 3]| {
        let mut a = Matrix::<f64>::new(3, 3)?;
        for (i, x) in d.into_iter().enumerate() {
            a.set(i, i, x);
        }
        Ok::<_, LinalgError>(a)
    };
    let assert_columns = |q: &Matrix, order: [usize; 3]| {
        for (j, &k) in order.iter().enumerate() {
            for i in 0..3 {
                let expected = if i == k { 1.0 } else { 0.0 };
                assert_relative_eq!(q.get(i, j), expected, epsilon = 1e-15);
            }
        }
    };

    // already sorted: nothing moves
    let svd = SvDecomposition::new(&diag([2.0, 2.0, 1.0])?)?;
    assert_eq!(svd.singular_values().to_vec(), vec![2.0, 2.0, 1.0]);
    assert_columns(svd.u(), [0, 1, 2]);
    assert_columns(svd.v(), [0, 1, 2]);

    // the two equal values keep their relative order after sorting
    let svd = SvDecomposition::new(&diag([1.0, 2.0, 2.0])?)?;
    assert_eq!(svd.singular_values().to_vec(), vec![2.0, 2.0, 1.0]);
    assert_columns(svd.u(), [1, 2, 0]);
    assert_columns(svd.v(), [1, 2, 0]);

    let svd = SvDecomposition::new(&Matrix::identity(3)?)?;
    assert_columns(svd.u(), [0, 1, 2]);
    assert_columns(svd.v(), [0, 1, 2]);
    Ok(())
}
