//! # Canonical form
//!
//! A linear program in `CanonicalForm` has only equality constraints, a non negative right hand
//! side and non negative variables. It is derived from a `Model` by the canonicalizer in this
//! module, and is what the simplex core operates on.
//!
//! The columns are grouped by kind:
//!
//! /               || Decision columns | Slack | Surplus | Artificial || b |
//! ================||==================||=======|=========|============||===|
//! Inequality (<=) ||   coefficients   |   I   |    0    |     0      ||   |
//! Inequality (>=) ||   coefficients   |   0   |   -I    |     I      ||   |
//! Equality   (==) ||   coefficients   |   0   |    0    |     I      ||   |
//!
//! (rows appear in model order, the identity blocks are spread out accordingly). Artificial
//! columns are always last, so that dropping them after phase one keeps all other indices.
use std::ops::Range;

use cumsum::cumsum_array_owned;
use enum_map::{EnumMap, enum_map};
use log::debug;

use crate::data::linear_program::elements::{ColumnKind, ConstraintType, Objective, SignRestriction};
use crate::data::linear_program::model::Model;
use crate::error::ModelStructureError;

/// Where a row of the canonical form comes from.
///
/// Rows are not always in a one to one correspondence with the constraints of the model, so the
/// origin is stored explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowOrigin {
    /// The constraint with this index in the model.
    Constraint(usize),
    /// The `x <= 1` bound of the binary variable with this index.
    BinaryBound(usize),
}

/// Describes a single column of the canonical form.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalColumn {
    kind: ColumnKind,
    name: String,
    /// Variable index for decision columns, row index otherwise.
    owner: usize,
    /// For decision columns: the column value times `sign` contributes to the variable value. For
    /// the other columns: the coefficient in the owning row.
    sign: f64,
}

impl CanonicalColumn {
    /// Role of this column.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Display name, only used for tracing.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variable index (decision columns) or row index (all other columns).
    pub fn owner(&self) -> usize {
        self.owner
    }

    /// See the field documentation.
    pub fn sign(&self) -> f64 {
        self.sign
    }
}

/// A linear program with equality constraints only, and an initial basis.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalForm {
    objective: Objective,
    nr_variables: usize,
    /// Dense coefficient matrix, rows of length `nr_columns`.
    data: Vec<Vec<f64>>,
    /// Right hand side, non negative.
    b: Vec<f64>,
    /// Objective coefficients of the maximization problem that is solved internally.
    cost: Vec<f64>,
    columns: Vec<CanonicalColumn>,
    /// Index of the initial basic column for each row.
    basis: Vec<usize>,
    row_origins: Vec<RowOrigin>,
    /// The slack or surplus column of each row, if it has one.
    slack_columns: Vec<Option<usize>>,
    /// Indices that separate the column groups.
    column_group_end: EnumMap<ColumnKind, usize>,
}

/// A row before slack columns are added, expressed in decision columns.
struct Row {
    origin: RowOrigin,
    coefficients: Vec<f64>,
    constraint_type: ConstraintType,
    rhs: f64,
}

impl CanonicalForm {
    /// Bring a model into canonical form.
    ///
    /// # Arguments
    ///
    /// * `model`: Model to transform. Coefficient vectors and sign restrictions that are shorter
    /// than the number of variables are padded with zeros and `NonNegative` respectively.
    ///
    /// # Return value
    ///
    /// The canonical form, or an error if the model has no variables or constraints.
    pub fn from_model(model: &Model) -> Result<Self, ModelStructureError> {
        let nr_variables = model.nr_variables();
        if nr_variables == 0 {
            return Err(ModelStructureError::NoVariables);
        }
        if model.nr_constraints() == 0 {
            return Err(ModelStructureError::NoConstraints);
        }

        let decision_columns = decision_columns(model);
        let rows = rows(model, &decision_columns);

        let count = |constraint_type| rows.iter()
            .filter(|row| row.constraint_type == constraint_type)
            .count();
        let nr_less = count(ConstraintType::Less);
        let nr_greater = count(ConstraintType::Greater);
        let nr_equal = count(ConstraintType::Equal);

        let cumulative = cumsum_array_owned([
            decision_columns.len(),
            nr_less,
            nr_greater,
            nr_greater + nr_equal,
        ]);
        let column_group_end = enum_map! {
            ColumnKind::Decision   => cumulative[0],
            ColumnKind::Slack      => cumulative[1],
            ColumnKind::Surplus    => cumulative[2],
            ColumnKind::Artificial => cumulative[3],
        };
        let nr_columns = cumulative[3];

        let mut groups: EnumMap<ColumnKind, Vec<CanonicalColumn>> = EnumMap::default();
        let mut data = Vec::with_capacity(rows.len());
        let mut b = Vec::with_capacity(rows.len());
        let mut basis = Vec::with_capacity(rows.len());
        let mut row_origins = Vec::with_capacity(rows.len());
        let mut slack_columns = Vec::with_capacity(rows.len());

        for (i, row) in rows.into_iter().enumerate() {
            let mut coefficients = row.coefficients;
            coefficients.resize(nr_columns, 0f64);

            let mut add = |kind: ColumnKind, prefix: &str, sign: f64| {
                let group_start = match kind {
                    ColumnKind::Decision => 0,
                    ColumnKind::Slack => column_group_end[ColumnKind::Decision],
                    ColumnKind::Surplus => column_group_end[ColumnKind::Slack],
                    ColumnKind::Artificial => column_group_end[ColumnKind::Surplus],
                };
                let j = group_start + groups[kind].len();
                groups[kind].push(CanonicalColumn {
                    kind,
                    name: format!("{}{}", prefix, i + 1),
                    owner: i,
                    sign,
                });
                coefficients[j] = sign;
                j
            };

            let (basic, slack) = match row.constraint_type {
                ConstraintType::Less => {
                    let slack = add(ColumnKind::Slack, "s", 1f64);
                    (slack, Some(slack))
                },
                ConstraintType::Greater => {
                    let surplus = add(ColumnKind::Surplus, "e", -1f64);
                    (add(ColumnKind::Artificial, "a", 1f64), Some(surplus))
                },
                ConstraintType::Equal => (add(ColumnKind::Artificial, "a", 1f64), None),
            };

            data.push(coefficients);
            b.push(row.rhs);
            basis.push(basic);
            row_origins.push(row.origin);
            slack_columns.push(slack);
        }

        let mut cost = decision_columns.iter()
            .map(|column| {
                model.objective().internal_sign() * model.cost()[column.owner] * column.sign
            })
            .collect::<Vec<_>>();
        cost.resize(nr_columns, 0f64);

        let mut columns = decision_columns;
        for (_, group) in groups {
            columns.extend(group);
        }
        debug_assert_eq!(columns.len(), nr_columns);

        debug!(
            "canonical form: {} rows, {} columns ({} slack, {} surplus, {} artificial)",
            data.len(), nr_columns, nr_less, nr_greater, nr_greater + nr_equal,
        );

        Ok(Self {
            objective: model.objective(),
            nr_variables,
            data,
            b,
            cost,
            columns,
            basis,
            row_origins,
            slack_columns,
            column_group_end,
        })
    }

    /// Direction of optimization of the model this form was derived from.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Number of variables in the original model.
    pub fn nr_variables(&self) -> usize {
        self.nr_variables
    }

    /// Number of rows `m`.
    pub fn nr_rows(&self) -> usize {
        self.data.len()
    }

    /// Number of columns `n`, including slack, surplus and artificial columns.
    pub fn nr_columns(&self) -> usize {
        self.columns.len()
    }

    /// Coefficient matrix `A`, row by row.
    pub fn data(&self) -> &[Vec<f64>] {
        &self.data
    }

    /// Right hand side `b`.
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Maximization cost vector `c`, sign flipped if the model minimizes.
    pub fn cost(&self) -> &[f64] {
        &self.cost
    }

    /// Phase one cost vector: maximize minus the sum of the artificial variables.
    pub fn artificial_cost(&self) -> Vec<f64> {
        let artificial = self.column_range(ColumnKind::Artificial);
        (0..self.nr_columns())
            .map(|j| if artificial.contains(&j) { -1f64 } else { 0f64 })
            .collect()
    }

    /// All columns.
    pub fn columns(&self) -> &[CanonicalColumn] {
        &self.columns
    }

    /// Column `j`.
    pub fn column(&self, j: usize) -> &CanonicalColumn {
        &self.columns[j]
    }

    /// Display names of all columns.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|column| column.name.clone()).collect()
    }

    /// Range of column indices of a given kind.
    pub fn column_range(&self, kind: ColumnKind) -> Range<usize> {
        let start = match kind {
            ColumnKind::Decision => 0,
            ColumnKind::Slack => self.column_group_end[ColumnKind::Decision],
            ColumnKind::Surplus => self.column_group_end[ColumnKind::Slack],
            ColumnKind::Artificial => self.column_group_end[ColumnKind::Surplus],
        };
        start..self.column_group_end[kind]
    }

    /// Whether phase one is needed.
    pub fn has_artificial_variables(&self) -> bool {
        !self.column_range(ColumnKind::Artificial).is_empty()
    }

    /// Initial basic column for each row.
    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    /// Where row `i` comes from.
    pub fn row_origin(&self, i: usize) -> RowOrigin {
        self.row_origins[i]
    }

    /// Slack or surplus column of row `i`; equality rows have none.
    pub fn slack_column(&self, i: usize) -> Option<usize> {
        self.slack_columns[i]
    }

    /// Translate values of the canonical columns into values of the model variables.
    pub fn solution_from_column_values(&self, values: &[f64]) -> Vec<f64> {
        debug_assert_eq!(values.len(), self.nr_columns());

        let mut solution = vec![0f64; self.nr_variables];
        for j in self.column_range(ColumnKind::Decision) {
            let column = &self.columns[j];
            solution[column.owner] += column.sign * values[j];
        }
        solution
    }
}

/// Decision columns for all variables, according to their sign restrictions.
fn decision_columns(model: &Model) -> Vec<CanonicalColumn> {
    let mut columns = Vec::with_capacity(model.nr_variables());
    for j in 0..model.nr_variables() {
        let name = Model::variable_name(j);
        let column = |suffix: &str, sign| CanonicalColumn {
            kind: ColumnKind::Decision,
            name: format!("{}{}", name, suffix),
            owner: j,
            sign,
        };
        match model.sign_restriction(j) {
            SignRestriction::NonNegative | SignRestriction::Integer | SignRestriction::Binary => {
                columns.push(column("", 1f64));
            },
            SignRestriction::NonPositive => columns.push(column("-", -1f64)),
            SignRestriction::Unrestricted => {
                columns.push(column("+", 1f64));
                columns.push(column("-", -1f64));
            },
        }
    }
    columns
}

/// All rows in decision column space, with a non negative right hand side.
///
/// These are the model constraints in order, followed by the upper bounds of binary variables.
fn rows(model: &Model, decision_columns: &[CanonicalColumn]) -> Vec<Row> {
    let nr_variables = model.nr_variables();

    let constraints = model.constraints().iter()
        .enumerate()
        .map(|(index, constraint)| {
            if constraint.coefficients().len() != nr_variables {
                debug!(
                    "constraint {} has {} coefficients for {} variables, padding",
                    index + 1, constraint.coefficients().len(), nr_variables,
                );
            }
            let coefficients = (0..nr_variables).map(|j| constraint.coefficient(j)).collect::<Vec<_>>();
            (RowOrigin::Constraint(index), coefficients, constraint.constraint_type(), constraint.rhs())
        });
    let binary_bounds = (0..nr_variables)
        .filter(|&j| model.sign_restriction(j) == SignRestriction::Binary)
        .map(|j| {
            let mut coefficients = vec![0f64; nr_variables];
            coefficients[j] = 1f64;
            (RowOrigin::BinaryBound(j), coefficients, ConstraintType::Less, 1f64)
        });

    constraints.chain(binary_bounds)
        .map(|(origin, variable_coefficients, constraint_type, rhs)| {
            let coefficients = decision_columns.iter()
                .map(|column| variable_coefficients[column.owner] * column.sign)
                .collect::<Vec<_>>();
            if rhs < 0f64 {
                Row {
                    origin,
                    coefficients: coefficients.into_iter().map(|a| -a).collect(),
                    constraint_type: constraint_type.flipped(),
                    rhs: -rhs,
                }
            } else {
                Row { origin, coefficients, constraint_type, rhs }
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::canonical_form::{CanonicalForm, RowOrigin};
    use crate::data::linear_program::elements::{ColumnKind, ConstraintType, Objective, SignRestriction};
    use crate::data::linear_program::model::{Constraint, Model};
    use crate::error::ModelStructureError;

    #[test]
    fn only_slacks() {
        let mut model = Model::new(Objective::Maximize, vec![3f64, 2f64]);
        model.add_constraint(Constraint::new(vec![1f64, 1f64], ConstraintType::Less, 4f64));
        model.add_constraint(Constraint::new(vec![1f64, 3f64], ConstraintType::Less, 6f64));

        let canonical = CanonicalForm::from_model(&model).unwrap();
        assert_eq!(canonical.nr_rows(), 2);
        assert_eq!(canonical.nr_columns(), 4);
        assert_eq!(canonical.data(), &[vec![1f64, 1f64, 1f64, 0f64], vec![1f64, 3f64, 0f64, 1f64]]);
        assert_eq!(canonical.b(), &[4f64, 6f64]);
        assert_eq!(canonical.cost(), &[3f64, 2f64, 0f64, 0f64]);
        assert_eq!(canonical.basis(), &[2, 3]);
        assert_eq!(canonical.column_names(), vec!["x1", "x2", "s1", "s2"]);
        assert!(!canonical.has_artificial_variables());
        assert_eq!(canonical.slack_column(1), Some(3));
    }

    #[test]
    fn surplus_and_artificial() {
        let mut model = Model::new(Objective::Minimize, vec![2f64, 1f64]);
        model.add_constraint(Constraint::new(vec![1f64, 1f64], ConstraintType::Greater, 2f64));
        model.add_constraint(Constraint::new(vec![1f64, -1f64], ConstraintType::Equal, 0f64));
        model.add_constraint(Constraint::new(vec![1f64, 0f64], ConstraintType::Less, 5f64));

        let canonical = CanonicalForm::from_model(&model).unwrap();
        // x1 x2 | s3 | e1 | a1 a2
        assert_eq!(canonical.nr_columns(), 6);
        assert_eq!(canonical.column_range(ColumnKind::Slack), 2..3);
        assert_eq!(canonical.column_range(ColumnKind::Surplus), 3..4);
        assert_eq!(canonical.column_range(ColumnKind::Artificial), 4..6);
        assert_eq!(canonical.column_names(), vec!["x1", "x2", "s3", "e1", "a1", "a2"]);
        assert_eq!(canonical.data()[0], vec![1f64, 1f64, 0f64, -1f64, 1f64, 0f64]);
        assert_eq!(canonical.data()[1], vec![1f64, -1f64, 0f64, 0f64, 0f64, 1f64]);
        assert_eq!(canonical.basis(), &[4, 5, 2]);
        assert_eq!(canonical.cost(), &[-2f64, -1f64, 0f64, 0f64, 0f64, 0f64]);
        assert_eq!(canonical.artificial_cost(), vec![0f64, 0f64, 0f64, 0f64, -1f64, -1f64]);
        assert_eq!(canonical.slack_column(0), Some(3));
        assert_eq!(canonical.slack_column(1), None);
    }

    #[test]
    fn negative_right_hand_side_is_flipped() {
        let mut model = Model::new(Objective::Maximize, vec![1f64]);
        model.add_constraint(Constraint::new(vec![1f64], ConstraintType::Less, -1f64));

        let canonical = CanonicalForm::from_model(&model).unwrap();
        assert_eq!(canonical.b(), &[1f64]);
        assert_eq!(canonical.data()[0], vec![-1f64, -1f64, 1f64]);
        assert_eq!(canonical.column(1).kind(), ColumnKind::Surplus);
        assert!(canonical.has_artificial_variables());
    }

    #[test]
    fn sign_restrictions() {
        let mut model = Model::new(Objective::Maximize, vec![1f64, 2f64, 3f64])
            .with_sign_restrictions(vec![
                SignRestriction::NonPositive,
                SignRestriction::Unrestricted,
                SignRestriction::Binary,
            ]);
        model.add_constraint(Constraint::new(vec![1f64, 1f64, 1f64], ConstraintType::Less, 10f64));

        let canonical = CanonicalForm::from_model(&model).unwrap();
        assert_eq!(
            &canonical.column_names()[..4],
            &["x1-".to_string(), "x2+".to_string(), "x2-".to_string(), "x3".to_string()],
        );
        assert_eq!(canonical.nr_rows(), 2);
        assert_eq!(canonical.row_origin(1), RowOrigin::BinaryBound(2));
        assert_eq!(&canonical.data()[0][..4], &[-1f64, 1f64, -1f64, 1f64]);
        assert_eq!(&canonical.cost()[..4], &[-1f64, 2f64, -2f64, 3f64]);

        let values = vec![2f64, 0f64, 3f64, 1f64, 0f64, 0f64];
        assert_eq!(canonical.solution_from_column_values(&values), vec![-2f64, -3f64, 1f64]);
    }

    #[test]
    fn padding() {
        let mut model = Model::new(Objective::Maximize, vec![1f64, 1f64]);
        model.add_constraint(Constraint::new(vec![1f64], ConstraintType::Less, 1f64));

        let canonical = CanonicalForm::from_model(&model).unwrap();
        assert_eq!(canonical.data()[0], vec![1f64, 0f64, 1f64]);
    }

    #[test]
    fn structure_errors() {
        let model = Model::new(Objective::Maximize, vec![]);
        assert_eq!(CanonicalForm::from_model(&model), Err(ModelStructureError::NoVariables));

        let model = Model::new(Objective::Maximize, vec![1f64]);
        assert_eq!(CanonicalForm::from_model(&model), Err(ModelStructureError::NoConstraints));
    }
}
