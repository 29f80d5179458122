//! Pilgrim: exact solvers for small transportation-type programs.
//!
//! This crate provides the continuous core: an LP solver that finds the
//! minimum-cost vertex of `{x : A x <= b}` by enumerating every set of n
//! tight constraints. The integer layer (`solver-mip`) builds on it.
//!
//! # Algorithm
//!
//! For m rows and n variables, each of the C(m, n) row subsets is solved as
//! a square system with a rank-revealing LU. Singular subsets are skipped,
//! points violating any row by more than ε are discarded, and the cheapest
//! survivor is returned. See [`vertex`] for the complexity caveats.
//!
//! # Example
//!
//! ```
//! use solver_core::{solve_lp, ConstraintSystem, SolverSettings};
//!
//! // min -x - y  s.t.  x + 2y <= 4,  3x + y <= 6,  x, y >= 0
//! let system = ConstraintSystem::from_rows(
//!     &[
//!         vec![1.0, 2.0],
//!         vec![3.0, 1.0],
//!         vec![-1.0, 0.0],
//!         vec![0.0, -1.0],
//!     ],
//!     &[4.0, 6.0, 0.0, 0.0],
//! )?;
//!
//! let sol = solve_lp(&system, &[-1.0, -1.0], &SolverSettings::default())?;
//! assert!((sol.obj_val + 2.8).abs() < 1e-9);
//! # Ok::<(), solver_core::LpError>(())
//! ```

#![warn(clippy::all)]

pub mod error;
pub mod linalg;
pub mod problem;
pub mod util;
pub mod vertex;

// Re-export main types
pub use error::{LpError, LpResult};
pub use problem::{ConstraintSystem, LpInfo, LpSolution, SolverSettings};
pub use util::numerics::{DEFAULT_SINGULAR_RTOL, DEFAULT_TOL};
pub use vertex::{feasible_vertices, solve_lp, Vertex, VertexIter};
