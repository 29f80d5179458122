//! MIP solution types.

/// Status of a successful MIP solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MipStatus {
    /// The search tree was exhausted; the incumbent is optimal.
    Optimal,

    /// Node limit reached, best solution returned.
    NodeLimit,

    /// Time limit reached, best solution returned.
    TimeLimit,
}

impl MipStatus {
    /// Returns true if optimality was proven.
    pub fn is_optimal(&self) -> bool {
        matches!(self, MipStatus::Optimal)
    }
}

/// Complete MIP solution with diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct MipSolution {
    /// Solve status.
    pub status: MipStatus,

    /// Integer point (every coordinate snapped to its integer).
    pub x: Vec<f64>,

    /// Objective value c·x.
    pub obj_val: f64,

    /// Best proven lower bound: `obj_val` when optimal, otherwise the root
    /// relaxation value.
    pub bound: f64,

    /// Relative optimality gap: (obj_val - bound) / |obj_val|.
    pub gap: f64,

    /// Value of the root LP relaxation.
    pub root_bound: f64,

    /// Number of B&B nodes whose relaxation was solved.
    pub nodes_explored: u64,

    /// Nodes discarded because their relaxation could not beat the incumbent.
    pub nodes_pruned: u64,

    /// Nodes whose relaxation was infeasible.
    pub nodes_infeasible: u64,

    /// Number of times incumbent was updated.
    pub incumbent_updates: u64,

    /// Deepest node reached (root = 0).
    pub max_depth: u64,

    /// Total solve time in milliseconds.
    pub solve_time_ms: u64,
}

impl MipSolution {
    /// Compute relative gap.
    pub fn compute_gap(primal: f64, dual: f64) -> f64 {
        if primal.is_infinite() || dual.is_infinite() {
            return f64::INFINITY;
        }
        let denom = primal.abs().max(1e-10);
        (primal - dual).abs() / denom
    }
}

/// Best integer-feasible point found so far.
///
/// The sequential search owns exactly one of these at a time and passes it
/// down and back up the recursion by value.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    /// Current best solution (if any).
    pub solution: Option<Vec<f64>>,

    /// Objective value of incumbent (primal bound).
    /// Initialized to +∞ for minimization.
    pub obj_val: f64,

    /// Number of times incumbent was updated.
    pub update_count: u64,
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl Incumbent {
    /// Create an empty incumbent with value +∞.
    pub fn new() -> Self {
        Self {
            solution: None,
            obj_val: f64::INFINITY,
            update_count: 0,
        }
    }

    /// Check if we have an incumbent.
    pub fn has_incumbent(&self) -> bool {
        self.solution.is_some()
    }

    /// Try to replace the incumbent with a new point.
    ///
    /// Only strict improvements are accepted, which keeps the sequence of
    /// incumbent values monotone. Returns true if the incumbent changed.
    pub fn update(&mut self, x: &[f64], obj: f64) -> bool {
        if obj < self.obj_val {
            self.solution = Some(x.to_vec());
            self.obj_val = obj;
            self.update_count += 1;
            true
        } else {
            false
        }
    }

    /// Compute relative gap to a dual bound.
    pub fn gap(&self, dual_bound: f64) -> f64 {
        MipSolution::compute_gap(self.obj_val, dual_bound)
    }
}
