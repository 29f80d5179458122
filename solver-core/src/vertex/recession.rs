//! Boundedness check.
//!
//! `min c·x` over a nonempty `{x : A x <= b}` is unbounded exactly when some
//! direction d with `A d <= 0` has `c·d < 0`. Restricting d to the box
//! `[-1, 1]^n` keeps the auxiliary problem a bounded polytope containing
//! the origin, so the same enumerator solves it exactly.

use crate::error::LpResult;
use crate::problem::{ConstraintSystem, SolverSettings};

use super::enumerate_best;

/// Whether an improving recession direction exists for `cost`.
///
/// Only meaningful when the region itself is nonempty.
pub fn has_improving_ray(
    system: &ConstraintSystem,
    cost: &[f64],
    settings: &SolverSettings,
) -> LpResult<bool> {
    let cone = system.recession_box();
    match enumerate_best(&cone, cost, settings) {
        Ok(sol) => Ok(sol.obj_val < -settings.tol),
        Err(e) if e.is_infeasible() => Ok(false),
        Err(e) => Err(e),
    }
}
