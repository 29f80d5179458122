//! Configuration settings for the MIP solver.

use solver_core::SolverSettings;

/// Branching variable selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchingRule {
    /// Lowest-index variable whose value is fractional beyond ε.
    #[default]
    FirstFractional,

    /// Variable with fractional part closest to 0.5 (lowest index on ties).
    MostFractional,
}

/// How the search tree is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Depth-first recursion, floor child before ceil child. The incumbent
    /// is threaded through the calls by value.
    #[default]
    Sequential,

    /// Sibling subtrees explored concurrently on the rayon pool, sharing
    /// one atomically updated incumbent.
    ///
    /// Reaches the same optimal value as `Sequential`; among equal-cost
    /// optima the reported point may differ between runs.
    Parallel,
}

/// MIP solver settings.
#[derive(Debug, Clone)]
pub struct MipSettings {
    // === Relaxation ===
    /// Settings for every LP relaxation.
    ///
    /// `lp.tol` is the single ε used for both feasibility and integrality.
    /// `lp.detect_unbounded` is honored at the root only.
    pub lp: SolverSettings,

    // === Search strategy ===
    /// Branching variable selection rule.
    pub branching_rule: BranchingRule,

    /// Tree traversal mode.
    pub search: SearchMode,

    // === Termination criteria ===
    /// Maximum number of nodes to explore (None = unlimited).
    pub max_nodes: Option<u64>,

    /// Time limit in milliseconds (None = unlimited).
    pub time_limit_ms: Option<u64>,

    // === Output ===
    /// Print progress information.
    pub verbose: bool,

    /// Log frequency (print every N nodes).
    pub log_freq: u64,
}

impl Default for MipSettings {
    fn default() -> Self {
        // Allow environment variable to switch on the parallel search
        let search = match std::env::var("PILGRIM_PARALLEL").ok().as_deref() {
            Some("1") | Some("true") => SearchMode::Parallel,
            _ => SearchMode::Sequential,
        };

        Self {
            lp: SolverSettings::default(),
            branching_rule: BranchingRule::default(),
            search,
            max_nodes: None,
            time_limit_ms: None,
            verbose: false,
            log_freq: 100,
        }
    }
}

impl MipSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        let mut s = Self::default();
        s.verbose = true;
        s.log_freq = 1;
        s
    }

    /// Tolerance ε shared by feasibility and integrality checks.
    pub fn tol(&self) -> f64 {
        self.lp.tol
    }

    /// Set ε.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.lp.tol = tol;
        self
    }

    /// Set time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_ms = Some((seconds * 1000.0) as u64);
        self
    }

    /// Set maximum nodes.
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    /// Set the branching rule.
    pub fn with_branching_rule(mut self, rule: BranchingRule) -> Self {
        self.branching_rule = rule;
        self
    }

    /// Set the traversal mode.
    pub fn with_search(mut self, search: SearchMode) -> Self {
        self.search = search;
        self
    }

    /// Settings for relaxations below the root.
    ///
    /// Appending rows cannot turn a bounded region unbounded, so the
    /// recession check is skipped there.
    pub(crate) fn node_lp(&self) -> SolverSettings {
        let mut lp = self.lp.clone();
        lp.detect_unbounded = false;
        lp.verbose = false;
        lp
    }
}
