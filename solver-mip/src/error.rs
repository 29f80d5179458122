//! Error types for the MIP solver.

use solver_core::LpError;
use thiserror::Error;

/// Errors that can occur during MIP solving.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MipError {
    /// No integer point satisfies the constraints.
    #[error("Problem is infeasible")]
    Infeasible,

    /// The root relaxation is unbounded below.
    #[error("Problem is unbounded")]
    Unbounded,

    /// Problem validation failed
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// A relaxation solve failed for a reason other than infeasibility.
    #[error("Relaxation solve failed: {0}")]
    Relaxation(#[from] LpError),

    /// Time limit exceeded before any integer point was found
    #[error("Time limit exceeded")]
    TimeLimit,

    /// Node limit exceeded before any integer point was found
    #[error("Node limit exceeded")]
    NodeLimit,
}

impl MipError {
    /// Classify the outcome of the root relaxation.
    ///
    /// At the root, LP infeasibility or unboundedness is a verdict on the
    /// whole problem rather than a solver failure.
    pub fn from_root(err: LpError) -> Self {
        match err {
            LpError::Infeasible => MipError::Infeasible,
            LpError::Unbounded => MipError::Unbounded,
            LpError::DimensionMismatch(msg) | LpError::InvalidData(msg) => MipError::InvalidProblem(msg),
            other => MipError::Relaxation(other),
        }
    }
}

/// Result type for MIP operations.
pub type MipResult<T> = Result<T, MipError>;
