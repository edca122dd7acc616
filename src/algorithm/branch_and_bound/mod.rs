//! # Branch and bound
//!
//! Solves models with integer and binary variables by a depth first search over linear
//! relaxations. Nodes are kept on an explicit stack. Each node adds bounds on branching variables
//! to a copy of the base model, which itself is never changed.
use enum_map::{Enum, EnumMap};
use log::{debug, info};

use crate::algorithm::{LpResult, OptimizationStatus, SolveRelaxation};
use crate::algorithm::branch_and_bound::node::SearchNode;
use crate::data::linear_program::elements::BoundDirection;
use crate::data::linear_program::model::Model;
use crate::data::number_types::INTEGRALITY_TOLERANCE;
use crate::error::ModelStructureError;
use crate::settings::SolverSettings;
use crate::trace::Trace;

pub mod branching;
pub mod node;

/// Whether an integral solution was found.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SearchStatus {
    /// The incumbent is optimal.
    Optimal,
    /// No node yielded an integral solution.
    ///
    /// This includes models of which the root relaxation is unbounded, see the root relaxation
    /// in the outcome for the difference.
    Infeasible,
}

/// Reason for discarding a node.
#[derive(Enum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum Fathom {
    /// The relaxation, or the bounds of the node, are infeasible.
    Infeasible,
    /// The relaxation is unbounded.
    Unbounded,
    /// The relaxation can't improve on the incumbent.
    Bound,
    /// The relaxation solution is integral.
    Integral,
}

/// Best integral solution found.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    /// Objective value in the sense of the model.
    pub objective_value: f64,
    /// Value of every variable, integer variables rounded to the nearest integer.
    pub solution: Vec<f64>,
}

/// Result of a branch-and-bound search.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchAndBoundOutcome {
    /// Whether an integral solution exists.
    pub status: SearchStatus,
    /// The best integral solution, if any.
    pub incumbent: Option<Incumbent>,
    /// Relaxation of the base model; its objective value bounds that of the incumbent.
    pub root_relaxation: LpResult,
    /// Number of nodes taken from the stack, the root included.
    ///
    /// Nodes with contradicting bounds are counted, although no relaxation is solved for them.
    pub nodes_explored: usize,
    /// Number of relaxations solved, the root included.
    pub relaxations_solved: usize,
    /// Number of nodes discarded per reason.
    pub fathomed: EnumMap<Fathom, usize>,
}

/// Solve a model with integer variables.
///
/// # Arguments
///
/// * `model`: Base model, only read.
/// * `settings`: Branching rule, and the simplex settings for every relaxation.
/// * `trace`: Receives a section per node and every relaxation.
///
/// # Return value
///
/// The best integral solution with search statistics, or an error if the model has no variables
/// or constraints.
pub fn solve(
    model: &Model,
    settings: &SolverSettings,
    trace: &mut dyn Trace,
) -> Result<BranchAndBoundOutcome, ModelStructureError> {
    let mut search = Search::new(model, settings);

    let root = SearchNode::root();
    search.enter(&root, trace);
    let root_relaxation = model.solve_relaxation(settings, trace)?;
    search.relaxations_solved += 1;
    search.process(&root, &root_relaxation, trace);

    while let Some(node) = search.stack.pop() {
        search.enter(&node, trace);
        if node.has_empty_domain() {
            trace.note("Bounds contradict each other, fathomed");
            search.fathomed[Fathom::Infeasible] += 1;
            continue;
        }

        let relaxation = node.apply(model).solve_relaxation(settings, trace)?;
        search.relaxations_solved += 1;
        search.process(&node, &relaxation, trace);
    }

    let status = match search.incumbent {
        Some(_) => SearchStatus::Optimal,
        None => SearchStatus::Infeasible,
    };
    info!(
        "branch and bound: {:?} after {} nodes ({} pruned by bound)",
        status, search.nodes_explored, search.fathomed[Fathom::Bound],
    );
    match &search.incumbent {
        Some(incumbent) => {
            trace.title("Branch and bound result");
            trace.note(&format!("Best integral objective value: {}", incumbent.objective_value));
            trace.print_vector("Solution", &model.variable_names(), &incumbent.solution);
        },
        None => {
            trace.title("Branch and bound result");
            trace.note("No integral solution");
        },
    }

    Ok(BranchAndBoundOutcome {
        status,
        incumbent: search.incumbent,
        root_relaxation,
        nodes_explored: search.nodes_explored,
        relaxations_solved: search.relaxations_solved,
        fathomed: search.fathomed,
    })
}

/// State of the search.
struct Search<'a> {
    model: &'a Model,
    settings: &'a SolverSettings,
    stack: Vec<SearchNode>,
    incumbent: Option<Incumbent>,
    nodes_explored: usize,
    relaxations_solved: usize,
    fathomed: EnumMap<Fathom, usize>,
}

impl<'a> Search<'a> {
    fn new(model: &'a Model, settings: &'a SolverSettings) -> Self {
        Self {
            model,
            settings,
            stack: Vec::new(),
            incumbent: None,
            nodes_explored: 0,
            relaxations_solved: 0,
            fathomed: EnumMap::default(),
        }
    }

    fn enter(&mut self, node: &SearchNode, trace: &mut dyn Trace) {
        self.nodes_explored += 1;
        trace.title(&format!("Node {} (depth {})", self.nodes_explored, node.depth()));
        trace.note(&format!("Restrictions: {}", node));
    }

    /// Fathom the node, update the incumbent or branch.
    fn process(&mut self, node: &SearchNode, relaxation: &LpResult, trace: &mut dyn Trace) {
        let objective = self.model.objective();

        let value = match (relaxation.status(), relaxation.objective_value()) {
            (OptimizationStatus::Optimal, Some(value)) => value,
            (OptimizationStatus::Unbounded, _) => {
                trace.note("Relaxation unbounded, fathomed");
                self.fathomed[Fathom::Unbounded] += 1;
                return;
            },
            _ => {
                trace.note("Relaxation infeasible, fathomed");
                self.fathomed[Fathom::Infeasible] += 1;
                return;
            },
        };

        if let Some(incumbent) = &self.incumbent {
            if objective.internal(value) <= objective.internal(incumbent.objective_value) + INTEGRALITY_TOLERANCE {
                trace.note(&format!(
                    "Bound {} does not improve on incumbent {}, fathomed",
                    value, incumbent.objective_value,
                ));
                self.fathomed[Fathom::Bound] += 1;
                return;
            }
        }

        match self.settings.branching_rule.select(self.model, relaxation.solution()) {
            None => {
                let solution = relaxation.solution().iter()
                    .enumerate()
                    .map(|(j, &x)| if self.model.sign_restriction(j).is_integral() { x.round() + 0f64 } else { x })
                    .collect::<Vec<_>>();
                let objective_value = self.model.evaluate(&solution);
                debug!("new incumbent with objective value {} at depth {}", objective_value, node.depth());
                trace.note(&format!("Integral solution, new incumbent {}", objective_value));
                self.fathomed[Fathom::Integral] += 1;
                self.incumbent = Some(Incumbent { objective_value, solution });
            },
            Some(decision) => {
                let floor = decision.value.floor();
                let ceil = decision.value.ceil();
                trace.note(&format!(
                    "Branching on {} = {}: {} <= {} or {} >= {}",
                    Model::variable_name(decision.variable), decision.value,
                    Model::variable_name(decision.variable), floor,
                    Model::variable_name(decision.variable), ceil,
                ));
                // The up branch is pushed last, so it is explored first
                self.stack.push(node.child(decision.variable, BoundDirection::Upper, floor));
                self.stack.push(node.child(decision.variable, BoundDirection::Lower, ceil));
            },
        }
    }
}
