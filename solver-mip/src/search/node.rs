//! Search node representation.

use solver_core::ConstraintSystem;

/// Direction of a branching cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchDirection {
    /// `x_i <= floor(v)`.
    Down,

    /// `x_i >= ceil(v)`.
    Up,
}

/// A single-variable cut added by branching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchCut {
    /// Variable index.
    pub var: usize,

    /// Which side of the fractional value is kept.
    pub direction: BranchDirection,

    /// Integer bound: floor(v) for `Down`, ceil(v) for `Up`.
    pub bound: f64,
}

impl BranchCut {
    /// Create a "down" branch: x <= floor(value).
    pub fn down(var: usize, value: f64) -> Self {
        Self {
            var,
            direction: BranchDirection::Down,
            bound: value.floor(),
        }
    }

    /// Create an "up" branch: x >= ceil(value).
    pub fn up(var: usize, value: f64) -> Self {
        Self {
            var,
            direction: BranchDirection::Up,
            bound: value.ceil(),
        }
    }

    /// The cut as a `<=` row over `n` variables.
    ///
    /// The up cut `x_i >= c` is stored as `-x_i <= -c`: both the unit row
    /// and the bound are negated.
    pub fn as_row(&self, n: usize) -> (Vec<f64>, f64) {
        let mut coefs = vec![0.0; n];
        match self.direction {
            BranchDirection::Down => {
                coefs[self.var] = 1.0;
                (coefs, self.bound)
            }
            BranchDirection::Up => {
                coefs[self.var] = -1.0;
                (coefs, -self.bound)
            }
        }
    }

    /// Return a copy of `system` with this cut appended.
    pub fn apply(&self, system: &ConstraintSystem) -> ConstraintSystem {
        let (coefs, rhs) = self.as_row(system.num_vars());
        system.with_row(&coefs, rhs)
    }
}

/// A node in the B&B search tree.
///
/// Each node owns its constraint system outright. Children are built by
/// copying the parent's rows and appending one cut, so no two nodes share
/// or mutate a matrix.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Unique node identifier.
    pub id: u64,

    /// Parent node ID (None for root).
    pub parent_id: Option<u64>,

    /// Depth in the tree (0 for root).
    pub depth: usize,

    /// Cut that created this node (None for root).
    pub cut: Option<BranchCut>,

    /// Constraint system of this node.
    pub system: ConstraintSystem,
}

impl SearchNode {
    /// Create the root node.
    pub fn root(system: ConstraintSystem) -> Self {
        Self {
            id: 0,
            parent_id: None,
            depth: 0,
            cut: None,
            system,
        }
    }

    /// Create a child node from a branching cut.
    pub fn child(&self, id: u64, cut: BranchCut) -> Self {
        Self {
            id,
            parent_id: Some(self.id),
            depth: self.depth + 1,
            cut: Some(cut),
            system: cut.apply(&self.system),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_system() -> ConstraintSystem {
        ConstraintSystem::from_rows(
            &[vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0], vec![0.0, -1.0]],
            &[5.0, 5.0, 0.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_root_node() {
        let root = SearchNode::root(box_system());
        assert_eq!(root.id, 0);
        assert!(root.parent_id.is_none());
        assert_eq!(root.depth, 0);
        assert!(root.cut.is_none());
    }

    #[test]
    fn test_cut_rows() {
        // Down branch on x1 with value 2.7: x1 <= 2
        let (row, rhs) = BranchCut::down(1, 2.7).as_row(3);
        assert_eq!(row, vec![0.0, 1.0, 0.0]);
        assert_eq!(rhs, 2.0);

        // Up branch on x1 with value 2.7: -x1 <= -3
        let (row, rhs) = BranchCut::up(1, 2.7).as_row(3);
        assert_eq!(row, vec![0.0, -1.0, 0.0]);
        assert_eq!(rhs, -3.0);
    }

    #[test]
    fn test_child_node() {
        let root = SearchNode::root(box_system());
        let child = root.child(1, BranchCut::up(0, 2.5));

        assert_eq!(child.id, 1);
        assert_eq!(child.parent_id, Some(0));
        assert_eq!(child.depth, 1);
        assert_eq!(child.system.num_constraints(), 5);
        assert_eq!(root.system.num_constraints(), 4);

        // x0 >= 3 excludes 2.9 and admits 3.0
        assert!(!child.system.is_feasible(&[2.9, 0.0], 1e-10));
        assert!(child.system.is_feasible(&[3.0, 0.0], 1e-10));
    }

    #[test]
    fn test_grandchild_keeps_both_cuts() {
        let root = SearchNode::root(box_system());
        let child = root.child(1, BranchCut::down(0, 3.5));
        let grandchild = child.child(2, BranchCut::up(1, 1.2));

        assert_eq!(grandchild.depth, 2);
        assert_eq!(grandchild.system.num_constraints(), 6);
        assert!(grandchild.system.is_feasible(&[3.0, 2.0], 1e-10));
        assert!(!grandchild.system.is_feasible(&[4.0, 2.0], 1e-10));
        assert!(!grandchild.system.is_feasible(&[3.0, 1.0], 1e-10));
    }
}
