//! Dense square-system solves.
//!
//! Every vertex candidate is the solution of an n × n system made of n
//! constraint rows held at equality. Those systems are tiny and dense, so a
//! full-pivoting LU is used: it is rank revealing, which lets linearly
//! dependent row subsets be rejected instead of producing garbage points.
//!
//! Rows are equilibrated to unit max-norm before factoring, so the rank test
//! sees the geometry of the hyperplanes rather than the units of each row.

use nalgebra::{DMatrix, DVector};

/// Solve `a x = b` for square `a`.
///
/// Returns `None` when `a` is singular, i.e. when a row is zero or, after
/// row equilibration, the smallest LU pivot is at most `singular_rtol` times
/// the largest one. Also `None` when the solve produces non-finite values.
pub fn solve_square(a: &DMatrix<f64>, b: &DVector<f64>, singular_rtol: f64) -> Option<DVector<f64>> {
    assert!(a.is_square(), "solve_square needs a square matrix, got {}×{}", a.nrows(), a.ncols());
    assert_eq!(a.nrows(), b.len(), "rhs length does not match matrix");

    if a.nrows() == 0 {
        return Some(DVector::zeros(0));
    }

    let (scaled_a, scaled_b) = equilibrate_rows(a, b)?;
    let lu = scaled_a.full_piv_lu();
    if !pivots_well_conditioned(&lu.u(), singular_rtol) {
        return None;
    }

    let x = lu.solve(&scaled_b)?;
    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}

/// Divide each row of `a` and its entry of `b` by the row's largest
/// magnitude. `None` if some row is identically zero.
fn equilibrate_rows(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<(DMatrix<f64>, DVector<f64>)> {
    let mut a = a.clone();
    let mut b = b.clone();
    for i in 0..a.nrows() {
        let scale = a.row(i).amax();
        if scale == 0.0 || !scale.is_finite() {
            return None;
        }
        a.row_mut(i).unscale_mut(scale);
        b[i] /= scale;
    }
    Some((a, b))
}

/// Rank test on the diagonal of the U factor.
fn pivots_well_conditioned(u: &DMatrix<f64>, singular_rtol: f64) -> bool {
    let diag = u.diagonal();
    let max_pivot = diag.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if max_pivot == 0.0 || !max_pivot.is_finite() {
        return false;
    }
    let min_pivot = diag.iter().fold(f64::INFINITY, |acc, v| acc.min(v.abs()));
    min_pivot > singular_rtol * max_pivot
}
