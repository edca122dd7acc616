//! # Depth first search on a stack
//!
//! Items are decided one at a time in ratio order. A node is pruned when the greedy fractional
//! bound over the undecided items does not exceed the incumbent.
use log::info;

use crate::algorithm::knapsack::label::candidate_label;
use crate::algorithm::knapsack::{Candidate, KnapsackOutcome, KnapsackProblem};
use crate::data::linear_program::model::Model;
use crate::data::number_types::{FEASIBILITY_TOLERANCE, INTEGRALITY_TOLERANCE};
use crate::trace::Trace;

#[derive(Debug, Clone)]
struct Node {
    /// Number of items decided, in ratio order.
    level: usize,
    profit: f64,
    weight: f64,
    take: Vec<f64>,
}

/// Solve by depth first inclusion and exclusion of items.
///
/// Every improvement of the incumbent is recorded as a candidate.
pub fn solve_depth_first(problem: &KnapsackProblem, trace: &mut dyn Trace) -> KnapsackOutcome {
    let order = problem.ratio_order();
    trace.title("Knapsack, depth first");

    let mut candidates: Vec<Candidate> = Vec::new();
    let mut nodes = 0;
    let mut stack = vec![Node { level: 0, profit: 0f64, weight: 0f64, take: vec![0f64; problem.nr_items()] }];

    while let Some(node) = stack.pop() {
        nodes += 1;

        let bound = bound(problem, &order, &node);
        if let Some(best) = candidates.last() {
            if bound <= best.profit + INTEGRALITY_TOLERANCE {
                continue;
            }
        }

        let Some(&item) = order.get(node.level) else {
            let label = candidate_label(candidates.len());
            trace.note(&format!("Candidate {} with profit {}", label, node.profit));
            trace.print_vector(
                "Take",
                &(0..problem.nr_items()).map(Model::variable_name).collect::<Vec<_>>(),
                &node.take,
            );
            candidates.push(Candidate { label, profit: node.profit, take: node.take });
            continue;
        };

        let mut exclude = node.clone();
        exclude.level += 1;
        stack.push(exclude);

        let weight = node.weight + problem.weights()[item];
        if weight <= problem.capacity() + FEASIBILITY_TOLERANCE {
            let mut include = node;
            include.level += 1;
            include.weight = weight;
            include.profit += problem.values()[item];
            include.take[item] = 1f64;
            // Pushed last, explored first
            stack.push(include);
        }
    }

    info!("knapsack depth first: {} candidates in {} nodes", candidates.len(), nodes);
    KnapsackOutcome::new(candidates, nodes)
}

/// Profit of the decided items plus the greedy fractional fill of the undecided ones.
fn bound(problem: &KnapsackProblem, order: &[usize], node: &Node) -> f64 {
    let mut remaining = problem.capacity() - node.weight;
    let mut bound = node.profit;

    for &item in &order[node.level..] {
        let weight = problem.weights()[item];
        if weight <= remaining {
            remaining -= weight;
            bound += problem.values()[item];
        } else {
            bound += problem.values()[item] * remaining / weight;
            break;
        }
    }

    bound
}
