//! # Search nodes
//!
//! A node is described by the bounds it adds to the base model. Nodes never share or mutate a
//! model: the model of a node is derived from the base model when the node is solved.
use std::fmt;

use itertools::Itertools;

use crate::data::linear_program::elements::BoundDirection;
use crate::data::linear_program::model::{Constraint, Model};
use crate::data::number_types::INTEGRALITY_TOLERANCE;

/// Bounds on a single variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundRestriction {
    variable: usize,
    lower: Option<f64>,
    upper: Option<f64>,
}

impl BoundRestriction {
    /// A restriction without bounds.
    pub fn new(variable: usize) -> Self {
        Self { variable, lower: None, upper: None }
    }

    /// Index of the restricted variable.
    pub fn variable(&self) -> usize {
        self.variable
    }

    /// Lower bound, if any.
    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    /// Upper bound, if any.
    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    /// Add a bound, keeping the tightest of the existing and the new one.
    pub fn tighten(&mut self, direction: BoundDirection, value: f64) {
        match direction {
            BoundDirection::Lower => {
                self.lower = Some(self.lower.map_or(value, |lower| lower.max(value)));
            },
            BoundDirection::Upper => {
                self.upper = Some(self.upper.map_or(value, |upper| upper.min(value)));
            },
        }
    }

    /// Whether no value satisfies both bounds.
    pub fn is_empty(&self) -> bool {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => lower > upper + INTEGRALITY_TOLERANCE,
            _ => false,
        }
    }

    /// The bounds as constraints of a model with `nr_variables` variables, lower bound first.
    pub fn constraints(&self, nr_variables: usize) -> impl Iterator<Item = Constraint> + '_ {
        let lower = self.lower
            .map(|value| Constraint::bound(nr_variables, self.variable, BoundDirection::Lower, value));
        let upper = self.upper
            .map(|value| Constraint::bound(nr_variables, self.variable, BoundDirection::Upper, value));
        lower.into_iter().chain(upper)
    }
}

impl fmt::Display for BoundRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = Model::variable_name(self.variable);
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => write!(f, "{} <= {} <= {}", lower, name, upper),
            (Some(lower), None) => write!(f, "{} >= {}", name, lower),
            (None, Some(upper)) => write!(f, "{} <= {}", name, upper),
            (None, None) => write!(f, "{} free", name),
        }
    }
}

/// A node of the branch-and-bound tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    /// At most one restriction per variable, in the order in which the variables were branched on.
    restrictions: Vec<BoundRestriction>,
    depth: usize,
}

impl SearchNode {
    /// The root of the tree: no restrictions, depth zero.
    pub fn root() -> Self {
        Self { restrictions: Vec::new(), depth: 0 }
    }

    /// A child node with one more bound.
    ///
    /// # Arguments
    ///
    /// * `variable`: Variable to bound.
    /// * `direction`: Whether the bound is a lower or upper bound.
    /// * `value`: The bound. If this variable is restricted already, the tightest bound is kept.
    pub fn child(&self, variable: usize, direction: BoundDirection, value: f64) -> Self {
        let mut restrictions = self.restrictions.clone();
        match restrictions.iter_mut().find(|restriction| restriction.variable == variable) {
            Some(restriction) => restriction.tighten(direction, value),
            None => {
                let mut restriction = BoundRestriction::new(variable);
                restriction.tighten(direction, value);
                restrictions.push(restriction);
            },
        }

        Self { restrictions, depth: self.depth + 1 }
    }

    /// All restrictions.
    pub fn restrictions(&self) -> &[BoundRestriction] {
        &self.restrictions
    }

    /// Distance to the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the bounds on some variable contradict each other.
    pub fn has_empty_domain(&self) -> bool {
        self.restrictions.iter().any(BoundRestriction::is_empty)
    }

    /// The model of this node: the base model with one constraint appended per bound.
    pub fn apply(&self, model: &Model) -> Model {
        let nr_variables = model.nr_variables();
        model.with_constraints(
            self.restrictions.iter().flat_map(|restriction| restriction.constraints(nr_variables)),
        )
    }
}

impl fmt::Display for SearchNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.restrictions.is_empty() {
            f.write_str("no restrictions")
        } else {
            write!(f, "{}", self.restrictions.iter().join(", "))
        }
    }
}
