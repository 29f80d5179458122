//! Branching variable selection.

use solver_core::util::numerics::{first_fractional, fractionality};

use super::BranchCut;
use crate::settings::BranchingRule;

/// A branching decision.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchDecision {
    /// Variable to branch on.
    pub var: usize,

    /// Current (fractional) value.
    pub value: f64,

    /// Cut for the "down" child (x <= floor(value)).
    pub down_branch: BranchCut,

    /// Cut for the "up" child (x >= ceil(value)).
    pub up_branch: BranchCut,
}

impl BranchDecision {
    fn new(var: usize, value: f64) -> Self {
        Self {
            var,
            value,
            down_branch: BranchCut::down(var, value),
            up_branch: BranchCut::up(var, value),
        }
    }
}

/// Branching variable selector.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchingSelector {
    rule: BranchingRule,
}

impl BranchingSelector {
    /// Create a new branching selector.
    pub fn new(rule: BranchingRule) -> Self {
        Self { rule }
    }

    /// Select a branching variable.
    ///
    /// Returns None if every coordinate of `x` is within `tol` of an integer.
    pub fn select(&self, x: &[f64], tol: f64) -> Option<BranchDecision> {
        let var = match self.rule {
            BranchingRule::FirstFractional => first_fractional(x, tol)?,
            BranchingRule::MostFractional => {
                let (var, _) = x
                    .iter()
                    .map(|&v| fractionality(v))
                    .enumerate()
                    .filter(|&(_, frac)| frac > tol)
                    // Strict comparison keeps the lowest index on ties.
                    .fold(None, |best: Option<(usize, f64)>, cand| match best {
                        Some(b) if b.1 >= cand.1 => Some(b),
                        _ => Some(cand),
                    })?;
                var
            }
        };

        Some(BranchDecision::new(var, x[var]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_first_fractional() {
        let selector = BranchingSelector::new(BranchingRule::FirstFractional);

        let d = selector.select(&[1.0, 0.3, 2.5], TOL).unwrap();
        assert_eq!(d.var, 1);
        assert_eq!(d.value, 0.3);
        assert_eq!(d.down_branch.bound, 0.0);
        assert_eq!(d.up_branch.bound, 1.0);
    }

    #[test]
    fn test_most_fractional() {
        let selector = BranchingSelector::new(BranchingRule::MostFractional);

        // Fractionalities 0.3, 0.5, 0.5: first 0.5 wins.
        let d = selector.select(&[0.3, 2.5, 4.5], TOL).unwrap();
        assert_eq!(d.var, 1);
    }

    #[test]
    fn test_integer_feasible() {
        let selector = BranchingSelector::new(BranchingRule::FirstFractional);
        assert!(selector.select(&[1.0, 0.0, -3.0], TOL).is_none());

        // Within ε counts as integral.
        assert!(selector.select(&[1.0 + 1e-12, 2.0 - 1e-11], TOL).is_none());

        let selector = BranchingSelector::new(BranchingRule::MostFractional);
        assert!(selector.select(&[1.0, 0.0], TOL).is_none());
    }

    #[test]
    fn test_negative_value() {
        let selector = BranchingSelector::default();
        let d = selector.select(&[-1.5], TOL).unwrap();
        assert_eq!(d.down_branch.bound, -2.0);
        assert_eq!(d.up_branch.bound, -1.0);
    }
}
