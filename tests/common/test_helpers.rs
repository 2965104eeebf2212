//! Helper functions for integration tests

use varset_rs::prelude::*;

/// Assert that two matrices are close, relative to the largest entry of `expected`
pub fn assert_matrices_close(actual: &RealMatrix, expected: &RealMatrix, tolerance: f64, message: &str) {
    assert_eq!(actual.shape(), expected.shape(), "{}: shape mismatch", message);

    let scale = expected.amax().max(1e-300);
    for i in 0..expected.nrows() {
        for j in 0..expected.ncols() {
            let diff = (actual[(i, j)] - expected[(i, j)]).abs();
            assert!(
                diff <= tolerance * scale,
                "{}: entry ({}, {}) differs by {:e} (actual {:e}, expected {:e}, scale {:e})",
                message,
                i,
                j,
                diff,
                actual[(i, j)],
                expected[(i, j)],
                scale
            );
        }
    }
}

/// Central-difference Jacobian of the normal flux with respect to the state
pub fn finite_difference_jacobian(var_set: &dyn VarSet, state: &State, normal: &[f64]) -> RealMatrix {
    let n = state.len();
    let mut jacobian = RealMatrix::zeros(n, n);

    for j in 0..n {
        let h = 1e-6 * state[j].abs().max(1e-3);
        let mut plus = state.clone();
        let mut minus = state.clone();
        plus[j] += h;
        minus[j] -= h;

        let f_plus = var_set
            .compute_flux(&var_set.compute_physical_data(&plus).unwrap(), normal)
            .unwrap();
        let f_minus = var_set
            .compute_flux(&var_set.compute_physical_data(&minus).unwrap(), normal)
            .unwrap();
        jacobian.set_column(j, &((f_plus - f_minus) / (2.0 * h)));
    }
    jacobian
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
