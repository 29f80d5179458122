//! Relaxation backend trait.

use solver_core::{solve_lp, ConstraintSystem, LpResult, LpSolution, SolverSettings};

/// Solver for the LP relaxation at each search node.
///
/// Branch-and-Bound only needs `argmin c·x` over `A x <= b` with an
/// infeasibility signal. Backends must be `Sync` so the parallel search can
/// share one across worker threads.
pub trait RelaxationBackend: Sync {
    /// Solve `min c·x s.t. A x <= b`.
    ///
    /// Must return `Err(LpError::Infeasible)` for an empty region; any other
    /// error aborts the search.
    fn solve_relaxation(
        &self,
        system: &ConstraintSystem,
        cost: &[f64],
        settings: &SolverSettings,
    ) -> LpResult<LpSolution>;

    /// Short name for logging.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Exact vertex-enumeration backend from `solver-core`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexBackend;

impl RelaxationBackend for VertexBackend {
    fn solve_relaxation(
        &self,
        system: &ConstraintSystem,
        cost: &[f64],
        settings: &SolverSettings,
    ) -> LpResult<LpSolution> {
        solve_lp(system, cost, settings)
    }

    fn name(&self) -> &'static str {
        "vertex-enumeration"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solver_core::LpError;

    #[test]
    fn test_vertex_backend_delegates() {
        let sys = ConstraintSystem::from_rows(&[vec![1.0], vec![-1.0]], &[3.5, 0.0]).unwrap();
        let settings = SolverSettings::default();

        let sol = VertexBackend.solve_relaxation(&sys, &[-1.0], &settings).unwrap();
        assert_eq!(sol.x, vec![3.5]);
        assert_eq!(sol.obj_val, -3.5);
        assert_eq!(VertexBackend.name(), "vertex-enumeration");

        let empty = ConstraintSystem::from_rows(&[vec![1.0], vec![-1.0]], &[1.0, -2.0]).unwrap();
        assert_eq!(
            VertexBackend.solve_relaxation(&empty, &[1.0], &settings),
            Err(LpError::Infeasible)
        );
    }
}
