//! # Sub-problems
//!
//! A sub-problem fixes some items to be taken or left out. Its relaxation takes the fixed items,
//! then fills the remaining capacity greedily in ratio order until the first item that only fits
//! partially.
use std::fmt;

use itertools::Itertools;

use crate::algorithm::knapsack::label::SubProblemLabel;
use crate::algorithm::knapsack::KnapsackProblem;
use crate::data::linear_program::model::Model;
use crate::data::number_types::FEASIBILITY_TOLERANCE;

/// A node of the knapsack tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SubProblem {
    label: SubProblemLabel,
    /// Item index and whether it is taken, in the order of fixing.
    fixed: Vec<(usize, bool)>,
}

impl SubProblem {
    /// The root: nothing fixed.
    pub fn root() -> Self {
        Self { label: SubProblemLabel::root(), fixed: Vec::new() }
    }

    /// Child `k` of this sub-problem, with one more item fixed.
    pub fn child(&self, k: usize, item: usize, take: bool) -> Self {
        debug_assert!(self.fixed.iter().all(|&(i, _)| i != item));

        let mut fixed = self.fixed.clone();
        fixed.push((item, take));
        Self { label: self.label.child(k), fixed }
    }

    /// Path label.
    pub fn label(&self) -> &SubProblemLabel {
        &self.label
    }

    /// Distance to the root.
    pub fn depth(&self) -> usize {
        self.label.depth()
    }

    /// Fixed items, in the order of fixing.
    pub fn fixed(&self) -> &[(usize, bool)] {
        &self.fixed
    }

    /// Solve the relaxation of this sub-problem.
    ///
    /// # Arguments
    ///
    /// * `problem`: Item data.
    /// * `order`: Item indices by decreasing ratio.
    pub fn relax(&self, problem: &KnapsackProblem, order: &[usize]) -> Relaxation {
        let mut take = vec![0f64; problem.nr_items()];
        let mut remaining = problem.capacity();
        let mut profit = 0f64;

        for &(item, taken) in &self.fixed {
            if taken {
                take[item] = 1f64;
                remaining -= problem.weights()[item];
                profit += problem.values()[item];
            }
        }
        if remaining < -FEASIBILITY_TOLERANCE {
            return Relaxation::Abandoned;
        }

        let free = order.iter().filter(|&&item| self.fixed.iter().all(|&(i, _)| i != item));
        for &item in free {
            let weight = problem.weights()[item];
            if weight <= remaining + FEASIBILITY_TOLERANCE {
                take[item] = 1f64;
                remaining -= weight;
                profit += problem.values()[item];
            } else {
                let fraction = remaining / weight;
                if fraction <= FEASIBILITY_TOLERANCE {
                    // Nothing fits anymore
                    break;
                }
                take[item] = fraction;
                profit += fraction * problem.values()[item];
                return Relaxation::Fractional { bound: profit, item, take, remaining: 0f64 };
            }
        }

        Relaxation::Integral { profit, take, remaining: remaining.max(0f64) }
    }
}

impl fmt::Display for SubProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fixed.is_empty() {
            f.write_str("nothing fixed")
        } else {
            let fixed = self.fixed.iter()
                .map(|&(item, take)| format!("{} = {}", Model::variable_name(item), u8::from(take)))
                .join(", ");
            f.write_str(&fixed)
        }
    }
}

/// Outcome of the greedy relaxation.
#[derive(Debug, Clone, PartialEq)]
pub enum Relaxation {
    /// The fixed items exceed the capacity.
    Abandoned,
    /// Every item is taken fully or not at all.
    Integral {
        /// Total value of the taken items.
        profit: f64,
        /// 0/1 per item, in input order.
        take: Vec<f64>,
        /// Capacity left over.
        remaining: f64,
    },
    /// One item is taken partially.
    Fractional {
        /// Value of the relaxation, bounds every integral plan of the sub-problem.
        bound: f64,
        /// The partially taken item.
        item: usize,
        /// Fraction taken per item, in input order.
        take: Vec<f64>,
        /// Capacity left over, always zero.
        remaining: f64,
    },
}

impl Relaxation {
    /// Upper bound on the profit of the sub-problem, if it is feasible.
    pub fn bound(&self) -> Option<f64> {
        match self {
            Relaxation::Abandoned => None,
            Relaxation::Integral { profit, .. } => Some(*profit),
            Relaxation::Fractional { bound, .. } => Some(*bound),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::knapsack::sub_problem::{Relaxation, SubProblem};
    use crate::algorithm::knapsack::KnapsackProblem;

    fn problem() -> KnapsackProblem {
        KnapsackProblem::new(vec![10f64, 40f64, 30f64, 50f64], vec![5f64, 4f64, 6f64, 3f64], 10f64).unwrap()
    }

    #[test]
    fn root_is_fractional() {
        let problem = problem();
        let order = problem.ratio_order();
        assert_eq!(order, vec![3, 1, 2, 0]);

        let relaxation = SubProblem::root().relax(&problem, &order);
        assert_eq!(relaxation, Relaxation::Fractional {
            bound: 105f64,
            item: 2,
            take: vec![0f64, 1f64, 0.5, 1f64],
            remaining: 0f64,
        });
    }

    #[test]
    fn fixed_items() {
        let problem = problem();
        let order = problem.ratio_order();
        let sub_problem = SubProblem::root().child(1, 2, false).child(1, 0, false);
        assert_eq!(sub_problem.label().to_string(), "1.1");
        assert_eq!(sub_problem.to_string(), "x3 = 0, x1 = 0");
        assert_eq!(sub_problem.relax(&problem, &order), Relaxation::Integral {
            profit: 90f64,
            take: vec![0f64, 1f64, 0f64, 1f64],
            remaining: 3f64,
        });
    }

    #[test]
    fn over_capacity() {
        let problem = problem();
        let order = problem.ratio_order();
        let sub_problem = SubProblem::root().child(2, 2, true).child(2, 0, true);
        assert_eq!(sub_problem.relax(&problem, &order), Relaxation::Abandoned);
        assert_eq!(Relaxation::Abandoned.bound(), None);
    }
}
