//! Problem data structures and validation.
//!
//! This module defines the inequality-system representation shared by the
//! LP and IP layers, the solver settings, and the LP result types.

use nalgebra::{DMatrix, DVector};

use crate::error::{LpError, LpResult};
use crate::linalg::sparse::{self, SparseCsc};
use crate::util::numerics::{self, DEFAULT_SINGULAR_RTOL, DEFAULT_TOL};

/// Inequality system `A x <= b`.
///
/// # Dimensions
///
/// - `n`: number of decision variables (columns of A)
/// - `m`: number of inequalities (rows of A, length of b)
///
/// `n` is fixed for the lifetime of a system. Branching never mutates a
/// system in place; [`ConstraintSystem::with_row`] returns an extended copy,
/// so parent and child nodes never alias.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSystem {
    a: DMatrix<f64>,
    b: DVector<f64>,
}

impl ConstraintSystem {
    /// Create a system from a dense matrix and right-hand side.
    pub fn new(a: DMatrix<f64>, b: DVector<f64>) -> LpResult<Self> {
        if a.ncols() == 0 {
            return Err(LpError::DimensionMismatch(
                "A must have at least one column".to_string(),
            ));
        }
        if a.nrows() != b.len() {
            return Err(LpError::DimensionMismatch(format!(
                "A has {} rows but b has length {}",
                a.nrows(),
                b.len()
            )));
        }
        if let Some(pos) = a.iter().position(|v| !v.is_finite()) {
            // nalgebra storage is column-major
            let (row, col) = (pos % a.nrows(), pos / a.nrows());
            return Err(LpError::InvalidData(format!(
                "A[{}, {}] is not finite",
                row, col
            )));
        }
        if let Some(row) = b.iter().position(|v| !v.is_finite()) {
            return Err(LpError::InvalidData(format!("b[{}] is not finite", row)));
        }

        Ok(Self { a, b })
    }

    /// Create a system from row vectors.
    pub fn from_rows(rows: &[Vec<f64>], b: &[f64]) -> LpResult<Self> {
        let n = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(LpError::DimensionMismatch(format!(
                "row {} has length {}, expected {}",
                i,
                row.len(),
                n
            )));
        }
        let flat: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        let a = DMatrix::from_row_slice(rows.len(), n, &flat);
        Self::new(a, DVector::from_column_slice(b))
    }

    /// Create a system from (row, col, value) triplets.
    ///
    /// Duplicate entries are summed.
    pub fn from_triplets<I>(nrows: usize, ncols: usize, triplets: I, b: &[f64]) -> LpResult<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut entries = Vec::new();
        for (i, j, v) in triplets {
            if i >= nrows || j >= ncols {
                return Err(LpError::DimensionMismatch(format!(
                    "triplet ({}, {}) outside {}×{} matrix",
                    i, j, nrows, ncols
                )));
            }
            entries.push((i, j, v));
        }
        Self::from_csc(&sparse::from_triplets(nrows, ncols, entries), b)
    }

    /// Create a system from a sparse CSC matrix.
    pub fn from_csc(a: &SparseCsc, b: &[f64]) -> LpResult<Self> {
        Self::new(sparse::to_dense(a), DVector::from_column_slice(b))
    }

    /// Number of decision variables (n).
    pub fn num_vars(&self) -> usize {
        self.a.ncols()
    }

    /// Number of inequalities (m).
    pub fn num_constraints(&self) -> usize {
        self.a.nrows()
    }

    /// Coefficient matrix A.
    pub fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    /// Right-hand side b.
    pub fn b(&self) -> &DVector<f64> {
        &self.b
    }

    /// Coefficients of row `i` as an owned vector.
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.a.row(i).iter().copied().collect()
    }

    /// Return a copy of this system with the row `coefs · x <= rhs` appended.
    ///
    /// # Panics
    ///
    /// Panics if `coefs.len() != n`.
    pub fn with_row(&self, coefs: &[f64], rhs: f64) -> Self {
        let n = self.num_vars();
        let m = self.num_constraints();
        assert_eq!(coefs.len(), n, "appended row has wrong length");

        let mut a = self.a.clone().insert_row(m, 0.0);
        for (j, &v) in coefs.iter().enumerate() {
            a[(m, j)] = v;
        }
        let b = self.b.clone().insert_row(m, rhs);

        Self { a, b }
    }

    /// Return a copy of this system with `-1 <= d_j <= 1` box rows appended
    /// and the right-hand side zeroed.
    ///
    /// This is the bounded slice of the recession cone `{d : A d <= 0}`.
    pub fn recession_box(&self) -> Self {
        let n = self.num_vars();
        let m = self.num_constraints();

        let mut a = DMatrix::zeros(m + 2 * n, n);
        a.rows_mut(0, m).copy_from(&self.a);
        for j in 0..n {
            a[(m + j, j)] = 1.0;
            a[(m + n + j, j)] = -1.0;
        }

        let mut b = DVector::zeros(m + 2 * n);
        b.rows_mut(m, 2 * n).fill(1.0);

        Self { a, b }
    }

    /// Compute `A x`.
    pub fn activity(&self, x: &[f64]) -> DVector<f64> {
        assert_eq!(x.len(), self.num_vars(), "point has wrong dimension");
        &self.a * DVector::from_column_slice(x)
    }

    /// Check `A x <= b + tol` on every row.
    pub fn is_feasible(&self, x: &[f64], tol: f64) -> bool {
        let ax = self.activity(x);
        ax.iter()
            .zip(self.b.iter())
            .all(|(&lhs, &rhs)| numerics::approx_le(lhs, rhs, tol))
    }

    /// Validate a cost vector against this system.
    pub fn check_cost(&self, cost: &[f64]) -> LpResult<()> {
        if cost.len() != self.num_vars() {
            return Err(LpError::DimensionMismatch(format!(
                "c has length {}, expected {}",
                cost.len(),
                self.num_vars()
            )));
        }
        if let Some(j) = cost.iter().position(|v| !v.is_finite()) {
            return Err(LpError::InvalidData(format!("c[{}] is not finite", j)));
        }
        Ok(())
    }
}

/// Solver settings and parameters.
#[derive(Debug, Clone)]
pub struct SolverSettings {
    /// Tolerance ε for feasibility checks (and, in the IP layer, integrality).
    pub tol: f64,

    /// Relative pivot threshold below which an n-row subset is singular.
    pub singular_rtol: f64,

    /// Prove boundedness before reporting an optimum.
    ///
    /// Costs one extra enumeration over `m + 2n` rows.
    pub detect_unbounded: bool,

    /// Refuse to enumerate when C(m, n) exceeds this (None = no limit).
    pub max_combinations: Option<u64>,

    /// Enable verbose logging.
    pub verbose: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        // Allow environment variable override for the feasibility tolerance
        let tol = std::env::var("PILGRIM_TOL")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|t| t.is_finite() && *t >= 0.0)
            .unwrap_or(DEFAULT_TOL);

        Self {
            tol,
            singular_rtol: DEFAULT_SINGULAR_RTOL,
            detect_unbounded: false,
            max_combinations: None,
            verbose: false,
        }
    }
}

impl SolverSettings {
    /// Set the feasibility tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Enable the recession-direction check.
    pub fn with_unbounded_check(mut self) -> Self {
        self.detect_unbounded = true;
        self
    }

    /// Cap the number of row subsets examined.
    pub fn with_max_combinations(mut self, limit: u64) -> Self {
        self.max_combinations = Some(limit);
        self
    }
}

/// Optimal vertex returned by the LP solver.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// Optimal point x (length n).
    pub x: Vec<f64>,

    /// Objective value c·x.
    pub obj_val: f64,

    /// Row indices held at equality to produce `x`.
    pub active_set: Vec<usize>,

    /// Enumeration statistics.
    pub info: LpInfo,
}

/// Enumeration statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LpInfo {
    /// Row subsets examined.
    pub combinations: u64,

    /// Subsets skipped because their rows were linearly dependent.
    pub singular: u64,

    /// Subsets whose point satisfied every row.
    pub feasible_vertices: u64,

    /// Total solve time (milliseconds).
    pub solve_time_ms: u64,
}
