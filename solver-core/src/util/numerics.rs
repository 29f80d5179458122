//! Numerical tolerance helpers.
//!
//! Every feasibility and integrality decision in the workspace goes through
//! these functions so that a single ε governs both.

/// Default tolerance ε for feasibility and integrality checks.
pub const DEFAULT_TOL: f64 = 1e-10;

/// Default relative pivot threshold below which a square subsystem is singular.
pub const DEFAULT_SINGULAR_RTOL: f64 = 1e-12;

/// Dot product of two equal-length slices.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// `lhs <= rhs + tol`.
#[inline]
pub fn approx_le(lhs: f64, rhs: f64, tol: f64) -> bool {
    lhs <= rhs + tol
}

/// Distance from `value` to its nearest integer.
#[inline]
pub fn fractionality(value: f64) -> f64 {
    (value - value.round()).abs()
}

/// Whether `value` lies within `tol` of an integer.
#[inline]
pub fn is_integral(value: f64, tol: f64) -> bool {
    fractionality(value) <= tol
}

/// Index of the first coordinate that is fractional beyond `tol`.
pub fn first_fractional(x: &[f64], tol: f64) -> Option<usize> {
    x.iter().position(|&v| !is_integral(v, tol))
}

/// Snap coordinates that are within `tol` of an integer onto that integer.
///
/// Coordinates further away are left untouched.
pub fn snap_integral(x: &mut [f64], tol: f64) {
    for v in x.iter_mut() {
        if is_integral(*v, tol) {
            *v = v.round();
        }
    }
}
