//! Exact LP solve by vertex enumeration.
//!
//! For a system `A x <= b` with n variables and m rows, every vertex of the
//! feasible polytope is the unique solution of some n rows held at equality.
//! The solver walks all C(m, n) row subsets in lexicographic order, solves
//! each square subsystem, keeps the points that satisfy every row within ε,
//! and returns the cheapest one.
//!
//! # Limitations
//!
//! The cost is O(C(m, n) · n³) and grows exponentially in m for fixed n.
//! This is an exact, correctness-first method meant for small instances; a
//! 12-variable problem with 31 rows already needs about 1.4 × 10⁸ subset
//! solves. Use [`SolverSettings::max_combinations`] to refuse such inputs.
//!
//! A nonempty region with no vertex (one containing a whole line) is
//! reported as infeasible. An unbounded region that still has vertices
//! returns its cheapest vertex unless
//! [`SolverSettings::detect_unbounded`] is set.

mod iter;
mod recession;

pub use iter::{feasible_vertices, Vertex, VertexIter};
pub use recession::has_improving_ray;

use std::time::Instant;

use crate::error::{LpError, LpResult};
use crate::problem::{ConstraintSystem, LpSolution, SolverSettings};
use crate::util::combinations::binomial;
use crate::util::numerics;

/// Find `argmin c·x` over `{x : A x <= b}`.
///
/// Ties between equal-cost vertices go to the first one in lexicographic
/// row-subset order, so repeated calls on identical input return
/// bit-identical results.
///
/// # Errors
///
/// - [`LpError::DimensionMismatch`] / [`LpError::InvalidData`] if `cost`
///   does not fit the system.
/// - [`LpError::CombinationLimit`] if C(m, n) exceeds the configured limit.
/// - [`LpError::Infeasible`] if no row subset yields a feasible vertex.
/// - [`LpError::Unbounded`] if `detect_unbounded` is set and an improving
///   recession direction exists.
pub fn solve_lp(
    system: &ConstraintSystem,
    cost: &[f64],
    settings: &SolverSettings,
) -> LpResult<LpSolution> {
    let solution = enumerate_best(system, cost, settings)?;

    if settings.detect_unbounded && has_improving_ray(system, cost, settings)? {
        log::debug!("LP has an improving recession direction");
        return Err(LpError::Unbounded);
    }

    if settings.verbose {
        log::info!(
            "LP optimum {:.6e} at rows {:?} ({} subsets, {} singular, {} vertices, {} ms)",
            solution.obj_val,
            solution.active_set,
            solution.info.combinations,
            solution.info.singular,
            solution.info.feasible_vertices,
            solution.info.solve_time_ms,
        );
    }

    Ok(solution)
}

/// Cheapest feasible vertex, without the boundedness proof.
pub(crate) fn enumerate_best(
    system: &ConstraintSystem,
    cost: &[f64],
    settings: &SolverSettings,
) -> LpResult<LpSolution> {
    system.check_cost(cost)?;
    check_combination_limit(system, settings)?;

    let start = Instant::now();
    let mut vertices = feasible_vertices(system, settings);

    let mut best: Option<(Vertex, f64)> = None;
    for vertex in vertices.by_ref() {
        let obj = numerics::dot(&vertex.x, cost);
        log::trace!("vertex {:?} at rows {:?}, obj={:.6e}", vertex.x, vertex.active_set, obj);

        // Strict comparison keeps the earliest vertex on ties.
        let improves = best.as_ref().map_or(true, |(_, best_obj)| obj < *best_obj);
        if improves {
            best = Some((vertex, obj));
        }
    }

    let mut info = vertices.info();
    info.solve_time_ms = start.elapsed().as_millis() as u64;

    log::debug!(
        "vertex enumeration m={} n={}: {} subsets, {} singular, {} feasible",
        system.num_constraints(),
        system.num_vars(),
        info.combinations,
        info.singular,
        info.feasible_vertices,
    );

    let (vertex, obj_val) = best.ok_or(LpError::Infeasible)?;
    Ok(LpSolution {
        x: vertex.x,
        obj_val,
        active_set: vertex.active_set,
        info,
    })
}

fn check_combination_limit(system: &ConstraintSystem, settings: &SolverSettings) -> LpResult<()> {
    let Some(limit) = settings.max_combinations else {
        return Ok(());
    };
    let combinations = binomial(system.num_constraints(), system.num_vars());
    if combinations > limit as u128 {
        return Err(LpError::CombinationLimit { combinations, limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SolverSettings {
        SolverSettings::default().with_tol(1e-10)
    }

    /// 6x + 4y <= 24, x + 2y <= 6, x >= 0, y >= 0
    fn textbook() -> ConstraintSystem {
        ConstraintSystem::from_rows(
            &[
                vec![6.0, 4.0],
                vec![1.0, 2.0],
                vec![-1.0, 0.0],
                vec![0.0, -1.0],
            ],
            &[24.0, 6.0, 0.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_textbook_lp() {
        // max 5x + 4y  =>  min -5x - 4y, optimum (3, 1.5) with value -21
        let sol = solve_lp(&textbook(), &[-5.0, -4.0], &settings()).unwrap();
        assert!((sol.x[0] - 3.0).abs() < 1e-9);
        assert!((sol.x[1] - 1.5).abs() < 1e-9);
        assert!((sol.obj_val + 21.0).abs() < 1e-9);
        assert_eq!(sol.active_set, vec![0, 1]);
        assert_eq!(sol.info.combinations, 6);
        assert_eq!(sol.info.feasible_vertices, 4);
    }

    #[test]
    fn test_tie_break_is_first_subset() {
        // min x + y on the triangle x + y >= 1, x <= 1, y <= 1: the whole edge
        // from (1, 0) to (0, 1) is optimal. Rows: [-x-y<=-1, x<=1, y<=1]
        let sys = ConstraintSystem::from_rows(
            &[vec![-1.0, -1.0], vec![1.0, 0.0], vec![0.0, 1.0]],
            &[-1.0, 1.0, 1.0],
        )
        .unwrap();
        let sol = solve_lp(&sys, &[1.0, 1.0], &settings()).unwrap();
        // Subset {0, 1} gives (1, 0) and comes first.
        assert_eq!(sol.active_set, vec![0, 1]);
        assert!((sol.x[0] - 1.0).abs() < 1e-12);
        assert!(sol.x[1].abs() < 1e-12);
    }

    #[test]
    fn test_infeasible() {
        // x <= 1 and x >= 2
        let sys = ConstraintSystem::from_rows(&[vec![1.0], vec![-1.0]], &[1.0, -2.0]).unwrap();
        assert_eq!(solve_lp(&sys, &[1.0], &settings()), Err(LpError::Infeasible));
    }

    #[test]
    fn test_fewer_rows_than_vars() {
        let sys = ConstraintSystem::from_rows(&[vec![1.0, 1.0]], &[1.0]).unwrap();
        assert_eq!(solve_lp(&sys, &[1.0, 1.0], &settings()), Err(LpError::Infeasible));
    }

    #[test]
    fn test_cost_length_checked() {
        let err = solve_lp(&textbook(), &[1.0], &settings()).unwrap_err();
        assert!(matches!(err, LpError::DimensionMismatch(_)));
    }

    #[test]
    fn test_combination_limit() {
        let err = solve_lp(&textbook(), &[1.0, 1.0], &settings().with_max_combinations(5)).unwrap_err();
        assert_eq!(err, LpError::CombinationLimit { combinations: 6, limit: 5 });

        assert!(solve_lp(&textbook(), &[1.0, 1.0], &settings().with_max_combinations(6)).is_ok());
    }

    #[test]
    fn test_unbounded_detected_only_when_enabled() {
        // x >= 0, y >= 0, min -x: has the vertex (0, 0) but is unbounded.
        let sys = ConstraintSystem::from_rows(&[vec![-1.0, 0.0], vec![0.0, -1.0]], &[0.0, 0.0]).unwrap();

        let sol = solve_lp(&sys, &[-1.0, 0.0], &settings()).unwrap();
        assert_eq!(sol.x, vec![0.0, 0.0]);

        let err = solve_lp(&sys, &[-1.0, 0.0], &settings().with_unbounded_check()).unwrap_err();
        assert_eq!(err, LpError::Unbounded);

        // Minimizing +x over the same cone is bounded.
        let sol = solve_lp(&sys, &[1.0, 1.0], &settings().with_unbounded_check()).unwrap();
        assert_eq!(sol.obj_val, 0.0);
    }

    #[test]
    fn test_badly_scaled_rows_keep_their_vertices() {
        // 1e6 x <= 1e6, 1e-6 y <= 1e-6, x >= 0, y >= 0
        let sys = ConstraintSystem::from_rows(
            &[vec![1e6, 0.0], vec![0.0, 1e-6], vec![-1.0, 0.0], vec![0.0, -1.0]],
            &[1e6, 1e-6, 0.0, 0.0],
        )
        .unwrap();

        let sol = solve_lp(&sys, &[-1.0, -1.0], &settings()).unwrap();
        assert!((sol.x[0] - 1.0).abs() < 1e-12);
        assert!((sol.x[1] - 1.0).abs() < 1e-12);
        assert!((sol.obj_val + 2.0).abs() < 1e-12);
        assert_eq!(sol.active_set, vec![0, 1]);
        assert_eq!(sol.info.combinations, 6);
        assert_eq!(sol.info.singular, 2);
        assert_eq!(sol.info.feasible_vertices, 4);
    }
}
