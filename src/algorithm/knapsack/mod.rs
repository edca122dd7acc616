//! # 0/1 knapsack
//!
//! A dedicated branch-and-bound for problems with a single capacity constraint and binary
//! variables. Items are sorted once by value per unit of weight; every sub-problem is bounded by
//! its greedy fractional relaxation and branches on the one item that is taken partially.
//!
//! Two engines are available: the recursive sub-problem tree in this module, which traces every
//! sub-problem with its path label, and the stack based depth first search in `depth_first`.
use std::cmp::Ordering;
use std::convert::TryFrom;

use itertools::Itertools;
use log::{debug, info, warn};

use crate::algorithm::knapsack::label::candidate_label;
use crate::algorithm::knapsack::sub_problem::{Relaxation, SubProblem};
use crate::data::linear_program::elements::{ConstraintType, Objective, SignRestriction};
use crate::data::linear_program::model::Model;
use crate::data::number_types::INTEGRALITY_TOLERANCE;
use crate::error::KnapsackStructureError;
use crate::settings::SolverSettings;
use crate::trace::Trace;

pub mod depth_first;
pub mod label;
pub mod sub_problem;

/// Item data of a 0/1 knapsack problem.
#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackProblem {
    values: Vec<f64>,
    weights: Vec<f64>,
    capacity: f64,
}

impl KnapsackProblem {
    /// Create a new problem.
    ///
    /// # Errors
    ///
    /// If the lengths differ, or if a value, weight or the capacity is negative.
    pub fn new(values: Vec<f64>, weights: Vec<f64>, capacity: f64) -> Result<Self, KnapsackStructureError> {
        if values.len() != weights.len() {
            return Err(KnapsackStructureError::LengthMismatch { values: values.len(), weights: weights.len() });
        }
        if let Some(item) = values.iter().position(|&value| value < 0f64) {
            return Err(KnapsackStructureError::Negative { what: "value", item });
        }
        if let Some(item) = weights.iter().position(|&weight| weight < 0f64) {
            return Err(KnapsackStructureError::Negative { what: "weight", item });
        }
        if capacity < 0f64 {
            return Err(KnapsackStructureError::Negative { what: "capacity", item: values.len() });
        }

        Ok(Self { values, weights, capacity })
    }

    /// Value per item.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Weight per item.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Total weight that can be taken.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Number of items.
    pub fn nr_items(&self) -> usize {
        self.values.len()
    }

    /// Value per unit of weight; items without weight have an infinite ratio.
    pub fn ratio(&self, item: usize) -> f64 {
        if self.weights[item] == 0f64 {
            f64::INFINITY
        } else {
            self.values[item] / self.weights[item]
        }
    }

    /// Item indices by decreasing ratio, lowest index first on ties.
    pub fn ratio_order(&self) -> Vec<usize> {
        (0..self.nr_items())
            .sorted_by(|&a, &b| self.ratio(b).partial_cmp(&self.ratio(a)).unwrap_or(Ordering::Equal))
            .collect()
    }

    /// Total value of a 0/1 plan.
    pub fn profit(&self, take: &[f64]) -> f64 {
        self.values.iter().zip(take).map(|(value, take)| value * take).sum()
    }

    /// Total weight of a 0/1 plan.
    pub fn weight(&self, take: &[f64]) -> f64 {
        self.weights.iter().zip(take).map(|(weight, take)| weight * take).sum()
    }

    fn item_names(&self, items: impl Iterator<Item = usize>) -> Vec<String> {
        items.map(Model::variable_name).collect()
    }
}

impl TryFrom<&Model> for KnapsackProblem {
    type Error = KnapsackStructureError;

    /// Read a model of the form `max <v, x>` subject to `<w, x> <= c`, with `x` binary.
    fn try_from(model: &Model) -> Result<Self, Self::Error> {
        if model.objective() != Objective::Maximize {
            return Err(KnapsackStructureError::NotMaximization);
        }
        let constraint = match model.constraints() {
            [constraint] => constraint,
            constraints => return Err(KnapsackStructureError::ConstraintCount(constraints.len())),
        };
        if constraint.constraint_type() != ConstraintType::Less {
            return Err(KnapsackStructureError::NotUpperBounded);
        }
        if let Some(j) = (0..model.nr_variables()).find(|&j| model.sign_restriction(j) != SignRestriction::Binary) {
            return Err(KnapsackStructureError::NotBinary(j + 1));
        }

        let weights = (0..model.nr_variables()).map(|j| constraint.coefficient(j)).collect();
        Self::new(model.cost().to_vec(), weights, constraint.rhs())
    }
}

/// An integral plan found during the search.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Letter label, in order of discovery.
    pub label: String,
    /// Total value.
    pub profit: f64,
    /// 0/1 per item, in input order.
    pub take: Vec<f64>,
}

/// Result of a knapsack search.
#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackOutcome {
    /// The first candidate of maximal profit, if any.
    pub best: Option<Candidate>,
    /// All candidates in order of discovery.
    pub candidates: Vec<Candidate>,
    /// Number of sub-problems visited.
    pub sub_problems: usize,
}

impl KnapsackOutcome {
    fn new(candidates: Vec<Candidate>, sub_problems: usize) -> Self {
        let best = candidates.iter()
            .fold(None::<&Candidate>, |best, candidate| match best {
                Some(best) if best.profit >= candidate.profit => Some(best),
                _ => Some(candidate),
            })
            .cloned();

        Self { best, candidates, sub_problems }
    }
}

/// Solve with the recursive sub-problem tree.
///
/// # Arguments
///
/// * `problem`: Item data.
/// * `settings`: Sub-problems deeper than `knapsack_max_depth` are abandoned.
/// * `trace`: Receives a section per sub-problem.
pub fn solve(problem: &KnapsackProblem, settings: &SolverSettings, trace: &mut dyn Trace) -> KnapsackOutcome {
    let order = problem.ratio_order();
    trace.title("Knapsack");
    trace.note(&format!("Capacity: {}", problem.capacity()));
    trace.note(&format!(
        "Ratio order: {}",
        order.iter().map(|&item| Model::variable_name(item)).join(", "),
    ));

    let mut search = SubProblemSearch {
        problem,
        order,
        max_depth: settings.knapsack_max_depth,
        candidates: Vec::new(),
        best_profit: None,
        visited: 0,
    };
    search.visit(&SubProblem::root(), trace);

    let outcome = KnapsackOutcome::new(search.candidates, search.visited);
    info!("knapsack: {} candidates in {} sub-problems", outcome.candidates.len(), outcome.sub_problems);
    trace.title("Knapsack result");
    match &outcome.best {
        Some(best) => {
            trace.note(&format!("Best candidate {} with profit {}", best.label, best.profit));
            trace.print_vector("Take", &problem.item_names(0..problem.nr_items()), &best.take);
        },
        None => trace.note("No feasible integral solution"),
    }

    outcome
}

struct SubProblemSearch<'a> {
    problem: &'a KnapsackProblem,
    order: Vec<usize>,
    max_depth: usize,
    candidates: Vec<Candidate>,
    best_profit: Option<f64>,
    visited: usize,
}

impl SubProblemSearch<'_> {
    fn visit(&mut self, sub_problem: &SubProblem, trace: &mut dyn Trace) {
        self.visited += 1;
        trace.title(&format!("Sub-problem {}", sub_problem.label()));
        trace.note(&format!("Fixed: {}", sub_problem));

        if sub_problem.depth() > self.max_depth {
            warn!("knapsack sub-problem {} exceeds the depth limit {}", sub_problem.label(), self.max_depth);
            trace.note("Depth limit reached, abandoned");
            return;
        }

        let relaxation = sub_problem.relax(self.problem, &self.order);
        self.print(&relaxation, trace);

        let Some(bound) = relaxation.bound() else {
            trace.note("Capacity exceeded, abandoned");
            return;
        };
        if let Some(best) = self.best_profit {
            if bound <= best + INTEGRALITY_TOLERANCE {
                trace.note(&format!("Bound {} does not improve on {}, fathomed", bound, best));
                return;
            }
        }

        match relaxation {
            Relaxation::Integral { profit, take, .. } => {
                let label = candidate_label(self.candidates.len());
                debug!("knapsack candidate {} with profit {}", label, profit);
                trace.note(&format!("Candidate {} with profit {}", label, profit));
                self.best_profit = Some(profit);
                self.candidates.push(Candidate { label, profit, take });
            },
            Relaxation::Fractional { item, .. } => {
                trace.note(&format!("Branching on {}", Model::variable_name(item)));
                self.visit(&sub_problem.child(1, item, false), trace);
                self.visit(&sub_problem.child(2, item, true), trace);
            },
            Relaxation::Abandoned => {},
        }
    }

    /// The items in ratio order with their weight, value and the fraction taken.
    ///
    /// The right hand side column holds the capacity, the bound and the capacity left over.
    fn print(&self, relaxation: &Relaxation, trace: &mut dyn Trace) {
        let (take, bound, remaining) = match relaxation {
            Relaxation::Abandoned => return,
            Relaxation::Integral { take, profit, remaining } => (take, *profit, *remaining),
            Relaxation::Fractional { take, bound, remaining, .. } => (take, *bound, *remaining),
        };
        let row = |data: &[f64], last: f64| {
            self.order.iter().map(|&item| data[item]).chain(std::iter::once(last)).collect::<Vec<_>>()
        };
        let matrix = [
            row(self.problem.weights(), self.problem.capacity()),
            row(self.problem.values(), bound),
            row(take.as_slice(), remaining),
        ];
        let row_names = ["weight", "value", "take"].map(String::from);

        trace.print_tableau(
            &self.problem.item_names(self.order.iter().copied()),
            &row_names,
            &matrix,
            self.visited,
            "",
        );
    }
}
