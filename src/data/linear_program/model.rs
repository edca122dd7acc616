//! # Models as entered by the user
//!
//! A `Model` is the description of a linear or integer program before any transformation: an
//! objective, an ordered list of constraints and a sign restriction for every variable.
//!
//! Constraints are never changed once they are part of a model. Algorithms that need more
//! constraints (branching bounds, cuts) derive a new model from an existing one, so that the
//! original can be reused as a read-only template.
use std::fmt;

use itertools::Itertools;

use crate::data::linear_program::elements::{BoundDirection, ConstraintType, Objective, SignRestriction};

/// A single linear constraint `<a, x> (relation) b`.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    coefficients: Vec<f64>,
    constraint_type: ConstraintType,
    rhs: f64,
}

impl Constraint {
    /// Create a new constraint.
    ///
    /// # Arguments
    ///
    /// * `coefficients`: One coefficient per variable. Shorter vectors are read as if padded with
    /// zeros.
    /// * `constraint_type`: Relation between the left and right hand side.
    /// * `rhs`: Right hand side.
    pub fn new(coefficients: Vec<f64>, constraint_type: ConstraintType, rhs: f64) -> Self {
        Self { coefficients, constraint_type, rhs }
    }

    /// A bound `x_variable >= value` or `x_variable <= value` written as a constraint.
    pub fn bound(nr_variables: usize, variable: usize, direction: BoundDirection, value: f64) -> Self {
        debug_assert!(variable < nr_variables);

        let mut coefficients = vec![0f64; nr_variables];
        coefficients[variable] = 1f64;
        Self::new(coefficients, direction.into(), value)
    }

    /// Coefficients of the left hand side.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Coefficient of variable `j`, zero if the vector is shorter.
    pub fn coefficient(&self, j: usize) -> f64 {
        self.coefficients.get(j).copied().unwrap_or(0f64)
    }

    /// Relation between left and right hand side.
    pub fn constraint_type(&self) -> ConstraintType {
        self.constraint_type
    }

    /// Right hand side.
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Value of the left hand side at `x`.
    pub fn lhs(&self, x: &[f64]) -> f64 {
        self.coefficients.iter().zip(x).map(|(a, x)| a * x).sum()
    }

    /// Whether `x` satisfies this constraint, allowing a violation of `tolerance`.
    pub fn is_satisfied_by(&self, x: &[f64], tolerance: f64) -> bool {
        self.constraint_type.is_satisfied(self.lhs(x), self.rhs, tolerance)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self.coefficients.iter()
            .enumerate()
            .filter(|&(_, &a)| a != 0f64)
            .map(|(j, a)| format!("{:+} x{}", a, j + 1))
            .join(" ");
        let lhs = if terms.is_empty() { "0".to_string() } else { terms };
        write!(f, "{} {} {}", lhs, self.constraint_type, self.rhs)
    }
}

/// A linear program, possibly with integer and binary variables.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    objective: Objective,
    /// Objective coefficients, one per variable. Determines the number of variables.
    cost: Vec<f64>,
    constraints: Vec<Constraint>,
    sign_restrictions: Vec<SignRestriction>,
}

impl Model {
    /// Create a model without constraints in which all variables are non negative.
    pub fn new(objective: Objective, cost: Vec<f64>) -> Self {
        let sign_restrictions = vec![SignRestriction::default(); cost.len()];
        Self { objective, cost, constraints: Vec::new(), sign_restrictions }
    }

    /// Replace the sign restrictions of all variables.
    ///
    /// Missing entries are treated as `NonNegative`.
    #[must_use]
    pub fn with_sign_restrictions(mut self, sign_restrictions: Vec<SignRestriction>) -> Self {
        self.sign_restrictions = sign_restrictions;
        self
    }

    /// Append a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// A copy of this model with one more constraint appended.
    #[must_use]
    pub fn with_constraint(&self, constraint: Constraint) -> Self {
        self.with_constraints(std::iter::once(constraint))
    }

    /// A copy of this model with constraints appended, in order.
    #[must_use]
    pub fn with_constraints(&self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        let mut model = self.clone();
        model.constraints.extend(constraints);
        model
    }

    /// Direction of optimization.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Objective coefficients.
    pub fn cost(&self) -> &[f64] {
        &self.cost
    }

    /// All constraints, in the order they were added.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Number of variables.
    pub fn nr_variables(&self) -> usize {
        self.cost.len()
    }

    /// Number of constraints.
    pub fn nr_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Sign restriction of variable `j`.
    pub fn sign_restriction(&self, j: usize) -> SignRestriction {
        self.sign_restrictions.get(j).copied().unwrap_or_default()
    }

    /// Sign restrictions as given, possibly shorter than the number of variables.
    pub fn sign_restrictions(&self) -> &[SignRestriction] {
        &self.sign_restrictions
    }

    /// Indices of all variables flagged `Integer` or `Binary`.
    pub fn integer_variables(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nr_variables()).filter(|&j| self.sign_restriction(j).is_integral())
    }

    /// Display name of variable `j`.
    pub fn variable_name(j: usize) -> String {
        format!("x{}", j + 1)
    }

    /// Display names of all variables.
    pub fn variable_names(&self) -> Vec<String> {
        (0..self.nr_variables()).map(Self::variable_name).collect()
    }

    /// Objective function value at `x`.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.cost.iter().zip(x).map(|(c, x)| c * x).sum()
    }

    /// Whether `x` satisfies all constraints and sign restrictions (integrality is not checked).
    pub fn is_feasible(&self, x: &[f64], tolerance: f64) -> bool {
        x.len() == self.nr_variables()
            && x.iter().enumerate().all(|(j, &v)| self.sign_restriction(j).admits(v, tolerance))
            && self.constraints.iter().all(|constraint| constraint.is_satisfied_by(x, tolerance))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.objective, self.cost.iter().map(|c| format!("{:+}", c)).join(" "))?;
        for constraint in &self.constraints {
            writeln!(f, "{}", constraint)?;
        }
        let restrictions = (0..self.nr_variables())
            .map(|j| format!("{}: {:?}", Self::variable_name(j), self.sign_restriction(j)))
            .join(", ");
        write!(f, "{}", restrictions)
    }
}
