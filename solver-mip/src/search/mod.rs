//! Branch-and-bound search tree management.

mod branching;
mod node;
mod tree;

pub use branching::{BranchDecision, BranchingSelector};
pub use node::{BranchCut, BranchDirection, SearchNode};
pub use tree::{BranchAndBound, TreeStats};
