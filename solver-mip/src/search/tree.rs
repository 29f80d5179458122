//! Branch-and-bound tree controller.
//!
//! The search is a depth-first call tree: each node solves its relaxation,
//! then either stops (infeasible, pruned by bound, integral) or recurses
//! into its floor child and then its ceil child. There is no node queue;
//! the call stack is the frontier.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use solver_core::util::numerics::{dot, snap_integral};
use solver_core::{ConstraintSystem, LpError, LpSolution, SolverSettings};

use super::{BranchDecision, BranchingSelector, SearchNode};
use crate::error::{MipError, MipResult};
use crate::master::RelaxationBackend;
use crate::model::{Incumbent, MipSolution, MipStatus, SharedIncumbent};
use crate::settings::{MipSettings, SearchMode};

/// Branch-and-bound tree controller.
///
/// Holds only configuration and counters; nodes and the incumbent flow
/// through the recursion. All counters are atomic so the same controller
/// serves the sequential and the parallel traversal.
pub struct BranchAndBound<'a, B: RelaxationBackend> {
    /// Relaxation solver.
    backend: &'a B,

    /// Objective coefficients.
    cost: &'a [f64],

    /// Settings.
    settings: &'a MipSettings,

    /// LP settings for non-root nodes.
    node_lp: SolverSettings,

    /// Branching variable selector.
    branching: BranchingSelector,

    /// Counters.
    stats: SearchStats,

    /// Next node ID to assign.
    next_node_id: AtomicU64,

    /// Set once a node or time limit stops the search.
    node_limit_hit: AtomicBool,
    time_limit_hit: AtomicBool,

    /// Start time.
    start_time: Instant,
}

impl<'a, B: RelaxationBackend> BranchAndBound<'a, B> {
    /// Create a new B&B controller.
    pub fn new(backend: &'a B, cost: &'a [f64], settings: &'a MipSettings) -> Self {
        Self {
            backend,
            cost,
            settings,
            node_lp: settings.node_lp(),
            branching: BranchingSelector::new(settings.branching_rule),
            stats: SearchStats::default(),
            next_node_id: AtomicU64::new(1), // 0 reserved for root
            node_limit_hit: AtomicBool::new(false),
            time_limit_hit: AtomicBool::new(false),
            start_time: Instant::now(),
        }
    }

    /// Run the search from `system`.
    ///
    /// # Errors
    ///
    /// - [`MipError::Infeasible`] if the root relaxation is infeasible or the
    ///   tree is exhausted without an integer point.
    /// - [`MipError::Unbounded`] if the root relaxation is proven unbounded.
    /// - [`MipError::NodeLimit`] / [`MipError::TimeLimit`] if a limit stops
    ///   the search before any integer point is found.
    /// - [`MipError::InvalidProblem`] / [`MipError::Relaxation`] on bad input
    ///   or a failing relaxation.
    pub fn solve(&self, system: ConstraintSystem) -> MipResult<MipSolution> {
        let root_lp = self
            .backend
            .solve_relaxation(&system, self.cost, &self.settings.lp)
            .map_err(MipError::from_root)?;
        let root_bound = root_lp.obj_val;

        if self.settings.verbose {
            log::info!(
                "B&B start: n={} m={} backend={} root bound={:.6e}",
                system.num_vars(),
                system.num_constraints(),
                self.backend.name(),
                root_bound,
            );
        }

        let root = SearchNode::root(system);
        let incumbent = match self.settings.search {
            SearchMode::Sequential => self.process(root, root_lp, Incumbent::new())?,
            SearchMode::Parallel => {
                let shared = SharedIncumbent::new();
                self.process_shared(root, root_lp, &shared)?;
                shared.into_inner()
            }
        };

        self.finalize(incumbent, root_bound)
    }

    /// Solve a node's relaxation and continue the sequential search.
    fn explore(&self, node: SearchNode, incumbent: Incumbent) -> MipResult<Incumbent> {
        if self.limit_reached() {
            return Ok(incumbent);
        }
        match self.relax(&node)? {
            Some(relaxed) => self.process(node, relaxed, incumbent),
            None => Ok(incumbent),
        }
    }

    /// Sequential node processing with a solved relaxation.
    fn process(&self, node: SearchNode, relaxed: LpSolution, mut incumbent: Incumbent) -> MipResult<Incumbent> {
        self.stats.node_explored(node.depth);
        self.log_progress(incumbent.obj_val);

        // Prune by bound
        if relaxed.obj_val >= incumbent.obj_val {
            self.node_pruned(&node, relaxed.obj_val, incumbent.obj_val);
            return Ok(incumbent);
        }

        let Some(decision) = self.branching.select(&relaxed.x, self.settings.tol()) else {
            let (x, obj) = self.integral_point(relaxed.x);
            if incumbent.update(&x, obj) {
                self.incumbent_found(&node, obj);
            }
            return Ok(incumbent);
        };

        let (down, up) = self.branch(&node, &decision);
        let incumbent = self.explore(down, incumbent)?;
        self.explore(up, incumbent)
    }

    /// Solve a node's relaxation and continue the parallel search.
    fn explore_shared(&self, node: SearchNode, shared: &SharedIncumbent) -> MipResult<()> {
        if self.limit_reached() {
            return Ok(());
        }
        match self.relax(&node)? {
            Some(relaxed) => self.process_shared(node, relaxed, shared),
            None => Ok(()),
        }
    }

    /// Parallel node processing: children run under `rayon::join`.
    fn process_shared(&self, node: SearchNode, relaxed: LpSolution, shared: &SharedIncumbent) -> MipResult<()> {
        self.stats.node_explored(node.depth);
        let bound = shared.bound();
        self.log_progress(bound);

        if relaxed.obj_val >= bound {
            self.node_pruned(&node, relaxed.obj_val, bound);
            return Ok(());
        }

        let Some(decision) = self.branching.select(&relaxed.x, self.settings.tol()) else {
            let (x, obj) = self.integral_point(relaxed.x);
            if shared.try_install(&x, obj) {
                self.incumbent_found(&node, obj);
            }
            return Ok(());
        };

        let (down, up) = self.branch(&node, &decision);
        let (down_result, up_result) = rayon::join(
            || self.explore_shared(down, shared),
            || self.explore_shared(up, shared),
        );
        down_result?;
        up_result
    }

    /// Solve the relaxation at a non-root node. `None` means infeasible.
    fn relax(&self, node: &SearchNode) -> MipResult<Option<LpSolution>> {
        match self.backend.solve_relaxation(&node.system, self.cost, &self.node_lp) {
            Ok(sol) => Ok(Some(sol)),
            Err(LpError::Infeasible) => {
                self.stats.nodes_infeasible.fetch_add(1, Ordering::Relaxed);
                log::debug!("node {} (depth {}) infeasible", node.id, node.depth);
                Ok(None)
            }
            Err(e) => Err(MipError::Relaxation(e)),
        }
    }

    /// Create the floor and ceil children of `node`.
    fn branch(&self, node: &SearchNode, decision: &BranchDecision) -> (SearchNode, SearchNode) {
        let down_id = self.next_node_id.fetch_add(2, Ordering::Relaxed);
        let up_id = down_id + 1;

        log::debug!(
            "node {} branches on x[{}] = {:.6} (children {}, {})",
            node.id,
            decision.var,
            decision.value,
            down_id,
            up_id,
        );

        (
            node.child(down_id, decision.down_branch),
            node.child(up_id, decision.up_branch),
        )
    }

    /// Snap an integral relaxation point and re-evaluate its cost.
    fn integral_point(&self, mut x: Vec<f64>) -> (Vec<f64>, f64) {
        snap_integral(&mut x, self.settings.tol());
        let obj = dot(&x, self.cost);
        (x, obj)
    }

    fn node_pruned(&self, node: &SearchNode, relaxed: f64, incumbent: f64) {
        self.stats.nodes_pruned.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "node {} pruned: bound {:.6e} >= incumbent {:.6e}",
            node.id,
            relaxed,
            incumbent,
        );
    }

    fn incumbent_found(&self, node: &SearchNode, obj: f64) {
        if self.settings.verbose {
            log::info!("New incumbent: obj={:.6e} at node {} (depth {})", obj, node.id, node.depth);
        }
    }

    /// Get elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Check node and time limits, latching the first one hit.
    fn limit_reached(&self) -> bool {
        if self.node_limit_hit.load(Ordering::Relaxed) || self.time_limit_hit.load(Ordering::Relaxed) {
            return true;
        }

        if let Some(limit) = self.settings.max_nodes {
            if self.stats.nodes_explored.load(Ordering::Relaxed) >= limit {
                if !self.node_limit_hit.swap(true, Ordering::Relaxed) {
                    log::warn!("Node limit of {} reached, stopping search", limit);
                }
                return true;
            }
        }

        if let Some(limit) = self.settings.time_limit_ms {
            if self.elapsed_ms() >= limit {
                if !self.time_limit_hit.swap(true, Ordering::Relaxed) {
                    log::warn!("Time limit of {} ms reached, stopping search", limit);
                }
                return true;
            }
        }

        false
    }

    /// Log progress (if verbose).
    fn log_progress(&self, incumbent_obj: f64) {
        if !self.settings.verbose || self.settings.log_freq == 0 {
            return;
        }

        let explored = self.stats.nodes_explored.load(Ordering::Relaxed);
        if explored % self.settings.log_freq != 0 {
            return;
        }

        log::info!(
            "Nodes: {} | Pruned: {} | Infeasible: {} | Incumbent: {:.6e} | Depth: {} | Time: {:.1}s",
            explored,
            self.stats.nodes_pruned.load(Ordering::Relaxed),
            self.stats.nodes_infeasible.load(Ordering::Relaxed),
            incumbent_obj,
            self.stats.max_depth.load(Ordering::Relaxed),
            self.elapsed_ms() as f64 / 1000.0,
        );
    }

    /// Turn the final incumbent into a solution or an error.
    fn finalize(&self, incumbent: Incumbent, root_bound: f64) -> MipResult<MipSolution> {
        let status = if self.time_limit_hit.load(Ordering::Relaxed) {
            MipStatus::TimeLimit
        } else if self.node_limit_hit.load(Ordering::Relaxed) {
            MipStatus::NodeLimit
        } else {
            MipStatus::Optimal
        };

        let Some(x) = incumbent.solution else {
            return Err(match status {
                MipStatus::Optimal => MipError::Infeasible,
                MipStatus::NodeLimit => MipError::NodeLimit,
                MipStatus::TimeLimit => MipError::TimeLimit,
            });
        };

        let obj_val = incumbent.obj_val;
        let bound = if status.is_optimal() { obj_val } else { root_bound };
        let stats = self.stats();

        if self.settings.verbose {
            log::info!(
                "B&B done: status={:?} obj={:.6e} nodes={} pruned={} infeasible={} time={}ms",
                status,
                obj_val,
                stats.nodes_explored,
                stats.nodes_pruned,
                stats.nodes_infeasible,
                stats.elapsed_ms,
            );
        }

        Ok(MipSolution {
            status,
            x,
            obj_val,
            bound,
            gap: MipSolution::compute_gap(obj_val, bound),
            root_bound,
            nodes_explored: stats.nodes_explored,
            nodes_pruned: stats.nodes_pruned,
            nodes_infeasible: stats.nodes_infeasible,
            incumbent_updates: incumbent.update_count,
            max_depth: stats.max_depth,
            solve_time_ms: stats.elapsed_ms,
        })
    }

    /// Get statistics for display.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            nodes_explored: self.stats.nodes_explored.load(Ordering::Relaxed),
            nodes_pruned: self.stats.nodes_pruned.load(Ordering::Relaxed),
            nodes_infeasible: self.stats.nodes_infeasible.load(Ordering::Relaxed),
            max_depth: self.stats.max_depth.load(Ordering::Relaxed),
            elapsed_ms: self.elapsed_ms(),
        }
    }
}

/// Shared search counters.
#[derive(Debug, Default)]
struct SearchStats {
    nodes_explored: AtomicU64,
    nodes_pruned: AtomicU64,
    nodes_infeasible: AtomicU64,
    max_depth: AtomicU64,
}

impl SearchStats {
    fn node_explored(&self, depth: usize) {
        self.nodes_explored.fetch_add(1, Ordering::Relaxed);
        self.max_depth.fetch_max(depth as u64, Ordering::Relaxed);
    }
}

/// Statistics from the B&B tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    /// Nodes whose relaxation was solved.
    pub nodes_explored: u64,
    /// Nodes pruned by bound.
    pub nodes_pruned: u64,
    /// Nodes with an infeasible relaxation.
    pub nodes_infeasible: u64,
    /// Deepest node reached.
    pub max_depth: u64,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::master::VertexBackend;
    use solver_core::LpResult;

    /// 6x + 4y <= 24, x + 2y <= 6, x, y >= 0
    fn textbook() -> ConstraintSystem {
        ConstraintSystem::from_rows(
            &[vec![6.0, 4.0], vec![1.0, 2.0], vec![-1.0, 0.0], vec![0.0, -1.0]],
            &[24.0, 6.0, 0.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_textbook_ip() {
        // max 5x + 4y over the integers: LP optimum (3, 1.5) = -21,
        // integer optimum (4, 0) = -20.
        let settings = MipSettings::default().with_search(SearchMode::Sequential);
        let cost = [-5.0, -4.0];
        let bb = BranchAndBound::new(&VertexBackend, &cost, &settings);
        let sol = bb.solve(textbook()).unwrap();

        assert_eq!(sol.status, MipStatus::Optimal);
        assert_eq!(sol.x, vec![4.0, 0.0]);
        assert_eq!(sol.obj_val, -20.0);
        assert!((sol.root_bound + 21.0).abs() < 1e-9);
        assert_eq!(sol.gap, 0.0);

        // root, y<=1, y<=1&x<=3, y<=1&x>=4, y>=2
        assert_eq!(sol.nodes_explored, 5);
        assert_eq!(sol.nodes_pruned, 1);
        assert_eq!(sol.incumbent_updates, 2);
        assert_eq!(sol.max_depth, 2);
    }

    #[test]
    fn test_parallel_matches_sequential_value() {
        let cost = [-5.0, -4.0];
        let settings = MipSettings::default().with_search(SearchMode::Parallel);
        let sol = BranchAndBound::new(&VertexBackend, &cost, &settings)
            .solve(textbook())
            .unwrap();
        assert_eq!(sol.obj_val, -20.0);
        assert_eq!(sol.x, vec![4.0, 0.0]);
    }

    #[test]
    fn test_node_limit_without_incumbent() {
        let cost = [-5.0, -4.0];
        let settings = MipSettings::default()
            .with_search(SearchMode::Sequential)
            .with_max_nodes(1);
        let result = BranchAndBound::new(&VertexBackend, &cost, &settings).solve(textbook());
        assert_eq!(result, Err(MipError::NodeLimit));
    }

    #[test]
    fn test_node_limit_with_incumbent() {
        // The third node explored (y<=1, x<=3) yields the first incumbent (3, 1).
        let cost = [-5.0, -4.0];
        let settings = MipSettings::default()
            .with_search(SearchMode::Sequential)
            .with_max_nodes(3);
        let sol = BranchAndBound::new(&VertexBackend, &cost, &settings)
            .solve(textbook())
            .unwrap();
        assert_eq!(sol.status, MipStatus::NodeLimit);
        assert_eq!(sol.x, vec![3.0, 1.0]);
        assert_eq!(sol.obj_val, -19.0);
        assert!((sol.bound + 21.0).abs() < 1e-9);
        assert!(sol.gap > 0.0);
    }

    #[test]
    fn test_node_limit_parallel() {
        let cost = [-5.0, -4.0];
        let settings = MipSettings::default()
            .with_search(SearchMode::Parallel)
            .with_max_nodes(1);
        let result = BranchAndBound::new(&VertexBackend, &cost, &settings).solve(textbook());
        assert_eq!(result, Err(MipError::NodeLimit));
    }

    #[test]
    fn test_zero_time_limit() {
        // The root is always solved; its children hit the limit.
        let cost = [-5.0, -4.0];
        for search in [SearchMode::Sequential, SearchMode::Parallel] {
            let settings = MipSettings::default().with_search(search).with_time_limit(0.0);
            let bb = BranchAndBound::new(&VertexBackend, &cost, &settings);
            assert_eq!(bb.solve(textbook()), Err(MipError::TimeLimit), "{:?}", search);
            assert_eq!(bb.stats().nodes_explored, 1);
        }
    }

    /// Backend that fails every non-root solve.
    struct FailingBelowRoot;

    impl RelaxationBackend for FailingBelowRoot {
        fn solve_relaxation(
            &self,
            system: &ConstraintSystem,
            cost: &[f64],
            settings: &SolverSettings,
        ) -> LpResult<LpSolution> {
            if system.num_constraints() > 4 {
                Err(LpError::CombinationLimit { combinations: 10, limit: 6 })
            } else {
                solver_core::solve_lp(system, cost, settings)
            }
        }
    }

    #[test]
    fn test_relaxation_error_aborts() {
        let cost = [-5.0, -4.0];
        let settings = MipSettings::default().with_search(SearchMode::Sequential);
        let result = BranchAndBound::new(&FailingBelowRoot, &cost, &settings).solve(textbook());
        assert!(matches!(result, Err(MipError::Relaxation(LpError::CombinationLimit { .. }))));
    }
}
