//! # Building blocks to describe linear programs.
use std::fmt;
use std::ops::Not;

use enum_map::Enum;

/// A `Constraint` is a type of (in)equality.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConstraintType {
    Equal,
    Greater,
    Less,
}

impl ConstraintType {
    /// The relation obtained when both sides of the constraint are multiplied by `-1`.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            ConstraintType::Equal => ConstraintType::Equal,
            ConstraintType::Greater => ConstraintType::Less,
            ConstraintType::Less => ConstraintType::Greater,
        }
    }

    /// Whether `lhs (relation) rhs` holds, allowing a violation of at most `tolerance`.
    pub fn is_satisfied(self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            ConstraintType::Equal => (lhs - rhs).abs() <= tolerance,
            ConstraintType::Greater => lhs >= rhs - tolerance,
            ConstraintType::Less => lhs <= rhs + tolerance,
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintType::Equal => "=",
            ConstraintType::Greater => ">=",
            ConstraintType::Less => "<=",
        })
    }
}

/// Direction of a bound.
///
/// Used when branching: the down branch adds an upper bound, the up branch a lower bound.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BoundDirection {
    /// In the case of a variable, x >= b.
    Lower,
    /// In the case of a variable, x <= b.
    Upper,
}

impl Not for BoundDirection {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Lower => Self::Upper,
            Self::Upper => Self::Lower,
        }
    }
}

impl From<BoundDirection> for ConstraintType {
    fn from(direction: BoundDirection) -> Self {
        match direction {
            BoundDirection::Lower => ConstraintType::Greater,
            BoundDirection::Upper => ConstraintType::Less,
        }
    }
}

/// Sign and integrality restriction of a single variable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SignRestriction {
    /// x >= 0.
    #[default]
    NonNegative,
    /// x <= 0.
    NonPositive,
    /// No sign restriction.
    Unrestricted,
    /// x >= 0 and integer.
    Integer,
    /// x in {0, 1}.
    Binary,
}

impl SignRestriction {
    /// Whether the variable should take an integer value in a solution.
    pub fn is_integral(self) -> bool {
        matches!(self, SignRestriction::Integer | SignRestriction::Binary)
    }

    /// Whether `value` respects the sign part of this restriction.
    pub fn admits(self, value: f64, tolerance: f64) -> bool {
        match self {
            SignRestriction::NonNegative | SignRestriction::Integer => value >= -tolerance,
            SignRestriction::NonPositive => value <= tolerance,
            SignRestriction::Unrestricted => true,
            SignRestriction::Binary => value >= -tolerance && value <= 1f64 + tolerance,
        }
    }
}

/// Role of a column in the canonical form.
///
/// Columns are grouped by kind, in the order of the variants.
#[derive(Enum, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ColumnKind {
    /// Represents (part of) a variable of the original model.
    Decision,
    /// Coefficient `+1` in a `<=` row, part of the initial basis.
    Slack,
    /// Coefficient `-1` in a `>=` row.
    Surplus,
    /// Coefficient `+1` in a `>=` or `=` row, part of the initial basis during phase one.
    Artificial,
}

/// Direction of optimization.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    Maximize,
    Minimize,
}

impl Objective {
    /// Factor applied to the cost vector: the simplex core always maximizes.
    pub fn internal_sign(self) -> f64 {
        match self {
            Objective::Maximize => 1f64,
            Objective::Minimize => -1f64,
        }
    }

    /// Map an objective value to the internal maximization scale, where larger is better.
    pub fn internal(self, value: f64) -> f64 {
        self.internal_sign() * value
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Objective::Maximize => "max",
            Objective::Minimize => "min",
        })
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::elements::{BoundDirection, ConstraintType, Objective, SignRestriction};

    #[test]
    fn flip() {
        assert_eq!(ConstraintType::Less.flipped(), ConstraintType::Greater);
        assert_eq!(ConstraintType::Equal.flipped(), ConstraintType::Equal);
        assert_eq!(!BoundDirection::Lower, BoundDirection::Upper);
        assert_eq!(ConstraintType::from(BoundDirection::Upper), ConstraintType::Less);
    }

    #[test]
    fn satisfied() {
        assert!(ConstraintType::Less.is_satisfied(4.0000001, 4f64, 1e-6));
        assert!(!ConstraintType::Greater.is_satisfied(3.9, 4f64, 1e-6));
        assert!(ConstraintType::Equal.is_satisfied(2f64, 2f64, 0f64));
    }

    #[test]
    fn restrictions() {
        assert!(SignRestriction::Binary.is_integral());
        assert!(!SignRestriction::Unrestricted.is_integral());
        assert!(SignRestriction::NonPositive.admits(-3f64, 1e-9));
        assert!(!SignRestriction::Binary.admits(2f64, 1e-9));
        assert_eq!(Objective::Minimize.internal(5f64), -5f64);
    }
}
