//! # A line based model format
//!
//! ```text
//! # comment
//! max +3 +2
//! +1 +1 <= 4
//! +1 +3 <= 6
//! + int
//! ```
//!
//! The first line holds the direction of optimization and the objective coefficients, which
//! determine the number of variables. Every following line is a constraint, with at most one
//! coefficient per variable, a relation and a right hand side. An optional line of sign
//! restrictions, one per variable, may follow: `+` (non negative), `-` (non positive), `urs`
//! (unrestricted), `int` (integer) or `bin` (binary).
use itertools::Itertools;

use crate::data::linear_program::elements::{ConstraintType, Objective, SignRestriction};
use crate::data::linear_program::model::{Constraint, Model};
use crate::io::error::{FileLocation, ParseError};

/// Everything on a line after this character is ignored.
const COMMENT_INDICATOR: char = '#';

/// An element of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Atom<'a> {
    Number(f64),
    Word(&'a str),
}

/// Parse a model.
///
/// # Errors
///
/// If a line can't be read as an objective, constraint or sign restriction line, or if their
/// lengths don't match the number of variables.
pub fn parse(text: &str) -> Result<Model, ParseError> {
    let mut lines = into_lines(text);

    let Some((location, atoms)) = lines.next() else {
        return Err(ParseError::new("the model is empty, expected an objective line"));
    };
    let (objective, cost) = parse_objective(&atoms)
        .map_err(|description| ParseError::with_file_location(description, location))?;
    let nr_variables = cost.len();

    let mut model = Model::new(objective, cost);
    let mut sign_restrictions = None;
    for (location, atoms) in lines {
        if sign_restrictions.is_some() {
            return Err(ParseError::with_file_location(
                "no lines are allowed after the sign restrictions",
                location,
            ));
        }

        let result = if atoms.iter().all(|atom| matches!(atom, Atom::Word(_))) {
            parse_sign_restrictions(&atoms, nr_variables).map(|restrictions| sign_restrictions = Some(restrictions))
        } else {
            parse_constraint(&atoms, nr_variables).map(|constraint| model.add_constraint(constraint))
        };
        result.map_err(|description| ParseError::with_file_location(description, location))?;
    }

    Ok(match sign_restrictions {
        Some(sign_restrictions) => model.with_sign_restrictions(sign_restrictions),
        None => model,
    })
}

/// Write a model in the format read by `parse`.
pub fn write(model: &Model) -> String {
    let mut lines = Vec::with_capacity(model.nr_constraints() + 2);

    lines.push(format!("{} {}", model.objective(), model.cost().iter().map(|c| format!("{:+}", c)).join(" ")));
    for constraint in model.constraints() {
        let coefficients = (0..model.nr_variables())
            .map(|j| format!("{:+}", constraint.coefficient(j)))
            .join(" ");
        lines.push(format!("{} {} {}", coefficients, constraint.constraint_type(), constraint.rhs()));
    }
    let restrictions = (0..model.nr_variables())
        .map(|j| match model.sign_restriction(j) {
            SignRestriction::NonNegative => "+",
            SignRestriction::NonPositive => "-",
            SignRestriction::Unrestricted => "urs",
            SignRestriction::Integer => "int",
            SignRestriction::Binary => "bin",
        })
        .join(" ");
    lines.push(restrictions);

    lines.join("\n") + "\n"
}

/// Split a model into numbered lines of atoms, skipping comments and blank lines.
fn into_lines(text: &str) -> impl Iterator<Item = (FileLocation<'_>, Vec<Atom<'_>>)> {
    text.lines()
        .enumerate()
        .map(|(number, line)| (number + 1, line)) // Count from 1
        .map(|(number, line)| {
            let content = line.split(COMMENT_INDICATOR).next().unwrap_or_default();
            ((number, line), into_atoms(content))
        })
        .filter(|(_, atoms)| !atoms.is_empty())
}

/// Convert a line into `Atom`s by testing whether an atom is a number.
fn into_atoms(line: &str) -> Vec<Atom<'_>> {
    line.split_whitespace()
        .map(|atom| match atom.parse::<f64>() {
            Ok(value) if value.is_finite() => Atom::Number(value),
            _ => Atom::Word(atom),
        })
        .collect()
}

fn parse_objective(atoms: &[Atom]) -> Result<(Objective, Vec<f64>), String> {
    let objective = match atoms.first().copied() {
        Some(Atom::Word("max" | "maximize" | "MAX")) => Objective::Maximize,
        Some(Atom::Word("min" | "minimize" | "MIN")) => Objective::Minimize,
        _ => return Err("expected `max` or `min` followed by the objective coefficients".to_string()),
    };

    let cost = atoms[1..].iter()
        .map(|atom| match atom {
            Atom::Number(value) => Ok(*value),
            Atom::Word(word) => Err(format!("objective coefficient \"{}\" is not a number", word)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    if cost.is_empty() {
        return Err("the objective has no coefficients".to_string());
    }

    Ok((objective, cost))
}

fn parse_constraint(atoms: &[Atom], nr_variables: usize) -> Result<Constraint, String> {
    let (coefficients, relation, rhs) = match atoms {
        [coefficients @ .., Atom::Word(relation), Atom::Number(rhs)] => (coefficients, *relation, *rhs),
        _ => return Err("expected coefficients, a relation and a right hand side".to_string()),
    };

    let constraint_type = match relation {
        "<=" | "=<" => ConstraintType::Less,
        ">=" | "=>" => ConstraintType::Greater,
        "=" | "==" => ConstraintType::Equal,
        other => return Err(format!("unknown relation \"{}\"", other)),
    };

    let coefficients = coefficients.iter()
        .map(|atom| match atom {
            Atom::Number(value) => Ok(*value),
            Atom::Word(word) => Err(format!("coefficient \"{}\" is not a number", word)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    if coefficients.len() > nr_variables {
        return Err(format!(
            "constraint has {} coefficients, but the objective only has {}",
            coefficients.len(), nr_variables,
        ));
    }

    Ok(Constraint::new(coefficients, constraint_type, rhs))
}

fn parse_sign_restrictions(atoms: &[Atom], nr_variables: usize) -> Result<Vec<SignRestriction>, String> {
    if atoms.len() != nr_variables {
        return Err(format!("expected {} sign restrictions, found {}", nr_variables, atoms.len()));
    }

    atoms.iter()
        .map(|atom| match *atom {
            Atom::Word("+" | ">=0") => Ok(SignRestriction::NonNegative),
            Atom::Word("-" | "<=0") => Ok(SignRestriction::NonPositive),
            Atom::Word("urs" | "free") => Ok(SignRestriction::Unrestricted),
            Atom::Word("int") => Ok(SignRestriction::Integer),
            Atom::Word("bin") => Ok(SignRestriction::Binary),
            Atom::Word(word) => Err(format!("unknown sign restriction \"{}\"", word)),
            Atom::Number(value) => Err(format!("unexpected number {} among the sign restrictions", value)),
        })
        .collect()
}
