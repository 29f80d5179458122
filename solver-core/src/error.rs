//! Error types for the LP solver.

use thiserror::Error;

/// Errors that can occur while building or solving an LP.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LpError {
    /// No vertex of the feasible region satisfies every constraint.
    #[error("Problem is infeasible")]
    Infeasible,

    /// The objective decreases without bound along a recession direction.
    #[error("Problem is unbounded")]
    Unbounded,

    /// Shapes of A, b and c do not agree.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Non-finite or otherwise unusable problem data.
    #[error("Invalid problem data: {0}")]
    InvalidData(String),

    /// Vertex enumeration would examine more subsets than allowed.
    #[error("{combinations} row subsets exceed the configured limit of {limit}")]
    CombinationLimit {
        /// Number of n-row subsets C(m, n).
        combinations: u128,
        /// Configured maximum.
        limit: u64,
    },
}

impl LpError {
    /// Returns true if the error means "no point to report" rather than a misuse.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, LpError::Infeasible)
    }
}

/// Result type for LP operations.
pub type LpResult<T> = Result<T, LpError>;
