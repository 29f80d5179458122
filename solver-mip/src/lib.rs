//! Integer layer for the pilgrim allocation solver.
//!
//! Finds the minimum-cost integer point of `{x : A x <= b}` by
//! Branch-and-Bound over LP relaxations solved by `solver-core`:
//!
//! 1. **Relax**: solve the node LP. Infeasible nodes contribute nothing;
//!    nodes whose relaxation cannot beat the incumbent are pruned.
//! 2. **Integrality test**: an LP point within ε of integral on every
//!    coordinate becomes the incumbent if it improves on it.
//! 3. **Branch**: on the first fractional coordinate `x_i = v`, recurse into
//!    `x_i <= floor(v)` and then `x_i >= ceil(v)`.
//!
//! # Example
//!
//! ```
//! use solver_core::ConstraintSystem;
//! use solver_mip::{solve_ip, MipSettings};
//!
//! // max x + y  s.t.  2x + 2y <= 7,  0 <= x, y <= 3
//! let system = ConstraintSystem::from_rows(
//!     &[
//!         vec![2.0, 2.0],
//!         vec![1.0, 0.0],
//!         vec![0.0, 1.0],
//!         vec![-1.0, 0.0],
//!         vec![0.0, -1.0],
//!     ],
//!     &[7.0, 3.0, 3.0, 0.0, 0.0],
//! )?;
//!
//! let sol = solve_ip(&system, &[-1.0, -1.0], &MipSettings::default())?;
//! assert_eq!(sol.obj_val, -3.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod master;
pub mod model;
pub mod search;
pub mod settings;

pub use error::{MipError, MipResult};
pub use master::{RelaxationBackend, VertexBackend};
pub use model::{Incumbent, MipSolution, MipStatus, SharedIncumbent};
pub use search::{BranchAndBound, TreeStats};
pub use settings::{BranchingRule, MipSettings, SearchMode};

use solver_core::ConstraintSystem;

/// Solve `min c·x s.t. A x <= b, x integral` with the vertex-enumeration
/// relaxation.
pub fn solve_ip(system: &ConstraintSystem, cost: &[f64], settings: &MipSettings) -> MipResult<MipSolution> {
    solve_ip_with(&VertexBackend, system, cost, settings)
}

/// Solve with a caller-supplied relaxation backend.
pub fn solve_ip_with<B: RelaxationBackend>(
    backend: &B,
    system: &ConstraintSystem,
    cost: &[f64],
    settings: &MipSettings,
) -> MipResult<MipSolution> {
    BranchAndBound::new(backend, cost, settings).solve(system.clone())
}
