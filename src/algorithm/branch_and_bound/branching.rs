//! # Branching rules
//!
//! Which fractional integer variable to branch on. The rules agree on the optimal value, but not
//! on the path through the tree.
use crate::data::linear_program::model::Model;
use crate::data::number_types::{fractional_part, is_integral, INTEGRALITY_TOLERANCE};

/// Selection rule for the branching variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchingRule {
    /// The variable whose fractional part is closest to one half.
    #[default]
    ClosestToHalf,
    /// The variable with the largest fractional part.
    LargestFractionalPart,
    /// The fractional variable with the lowest index.
    FirstFractional,
}

/// A variable to branch on, with its value in the relaxation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchDecision {
    /// Index of the variable.
    pub variable: usize,
    /// Fractional value in the relaxation.
    pub value: f64,
}

impl BranchingRule {
    /// Select a branching variable.
    ///
    /// # Arguments
    ///
    /// * `model`: Determines which variables should be integral.
    /// * `solution`: Relaxation solution, one value per variable.
    ///
    /// # Return value
    ///
    /// `None` if all integer and binary variables are integral within the tolerance. Ties are
    /// broken by the lowest variable index.
    pub fn select(self, model: &Model, solution: &[f64]) -> Option<BranchDecision> {
        let mut candidates = model.integer_variables()
            .map(|variable| (variable, solution[variable]))
            .filter(|&(_, value)| !is_integral(value, INTEGRALITY_TOLERANCE))
            .map(|(variable, value)| {
                (BranchDecision { variable, value }, fractional_part(value, INTEGRALITY_TOLERANCE))
            });

        let score = |fraction: f64| match self {
            BranchingRule::ClosestToHalf => -(fraction - 0.5).abs(),
            BranchingRule::LargestFractionalPart => fraction,
            BranchingRule::FirstFractional => 0f64,
        };

        let first = candidates.next()?;
        let best = candidates.fold(first, |best, candidate| {
            if score(candidate.1) > score(best.1) { candidate } else { best }
        });
        Some(best.0)
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::branch_and_bound::branching::{BranchDecision, BranchingRule};
    use crate::data::linear_program::elements::{Objective, SignRestriction};
    use crate::data::linear_program::model::Model;

    fn model() -> Model {
        Model::new(Objective::Maximize, vec![1f64; 5])
            .with_sign_restrictions(vec![
                SignRestriction::NonNegative,
                SignRestriction::Integer,
                SignRestriction::Integer,
                SignRestriction::Binary,
                SignRestriction::Integer,
            ])
    }

    #[test]
    fn select() {
        let solution = [0.5, 1.2, 2.9, 0.4, 7f64];
        let select = |rule: BranchingRule| rule.select(&model(), &solution).map(|d| d.variable);

        assert_eq!(select(BranchingRule::ClosestToHalf), Some(3));
        assert_eq!(select(BranchingRule::LargestFractionalPart), Some(2));
        assert_eq!(select(BranchingRule::FirstFractional), Some(1));
    }

    #[test]
    fn ties_to_lowest_index() {
        let solution = [0f64, 1.25, 3.75, 0f64, 2.25];
        assert_eq!(
            BranchingRule::ClosestToHalf.select(&model(), &solution),
            Some(BranchDecision { variable: 1, value: 1.25 }),
        );
    }

    #[test]
    fn integral() {
        let solution = [0.5, 1f64, 2.0000001, 1f64, 0f64];
        assert_eq!(BranchingRule::ClosestToHalf.select(&model(), &solution), None);
    }
}
