//! # Solver settings
//!
//! One settings value is shared by all algorithms. The numeric tolerances are fixed and live in
//! `data::number_types`.
use crate::algorithm::branch_and_bound::branching::BranchingRule;

/// Column selection rule used by the simplex core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotRuleKind {
    /// Enter the column with the most negative reduced cost, lowest index on ties.
    #[default]
    SteepestDescentAlongVariable,
    /// Enter the first column with a negative reduced cost.
    FirstProfitable,
}

/// Settings for the simplex core and the algorithms built on top of it.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverSettings {
    /// Entering variable rule.
    pub pivot_rule: PivotRuleKind,
    /// Switch to Bland's rule after this many consecutive degenerate pivots.
    ///
    /// `None` never switches.
    pub anti_cycling_after: Option<usize>,
    /// Branching variable selection for branch-and-bound.
    pub branching_rule: BranchingRule,
    /// Maximum number of Gomory cuts appended by the cutting plane loop.
    pub max_cuts: usize,
    /// Recursion ceiling of the knapsack sub-problem tree.
    pub knapsack_max_depth: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            pivot_rule: PivotRuleKind::default(),
            anti_cycling_after: Some(50),
            branching_rule: BranchingRule::default(),
            max_cuts: 50,
            knapsack_max_depth: 32,
        }
    }
}

impl SolverSettings {
    /// Set the entering variable rule.
    pub fn with_pivot_rule(mut self, pivot_rule: PivotRuleKind) -> Self {
        self.pivot_rule = pivot_rule;
        self
    }

    /// Set the branching rule.
    pub fn with_branching_rule(mut self, branching_rule: BranchingRule) -> Self {
        self.branching_rule = branching_rule;
        self
    }

    /// Set the Gomory cut ceiling.
    pub fn with_max_cuts(mut self, max_cuts: usize) -> Self {
        self.max_cuts = max_cuts;
        self
    }

    /// Set the knapsack recursion ceiling.
    pub fn with_knapsack_max_depth(mut self, depth: usize) -> Self {
        self.knapsack_max_depth = depth;
        self
    }

    /// Set or disable the degenerate pivot count after which Bland's rule takes over.
    pub fn with_anti_cycling_after(mut self, pivots: Option<usize>) -> Self {
        self.anti_cycling_after = pivots;
        self
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::branch_and_bound::branching::BranchingRule;
    use crate::settings::{PivotRuleKind, SolverSettings};

    #[test]
    fn defaults() {
        let settings = SolverSettings::default();
        assert_eq!(settings.pivot_rule, PivotRuleKind::SteepestDescentAlongVariable);
        assert_eq!(settings.branching_rule, BranchingRule::ClosestToHalf);
        assert_eq!(settings.max_cuts, 50);
        assert_eq!(settings.knapsack_max_depth, 32);
    }

    #[test]
    fn builders() {
        let settings = SolverSettings::default()
            .with_max_cuts(3)
            .with_pivot_rule(PivotRuleKind::FirstProfitable)
            .with_anti_cycling_after(None);
        assert_eq!(settings.max_cuts, 3);
        assert_eq!(settings.pivot_rule, PivotRuleKind::FirstProfitable);
        assert_eq!(settings.anti_cycling_after, None);
    }
}
