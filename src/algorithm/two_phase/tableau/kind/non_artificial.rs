//! # Non-Artificial Tableau
//!
//! Contains a tableau `Kind` type without artificial columns and `Tableau` logic that is only
//! relevant in the second phase.
use std::collections::HashSet;
use std::marker::PhantomData;

use index_utils::remove_indices;

use crate::algorithm::two_phase::tableau::kind::artificial::Artificial;
use crate::algorithm::two_phase::tableau::kind::Kind;
use crate::algorithm::two_phase::tableau::{objective_row, Tableau};
use crate::data::linear_program::canonical_form::CanonicalForm;
use crate::data::linear_program::elements::ColumnKind;

/// The `Kind` in case the `Tableau` does not contain any artificial variables.
///
/// This `Tableau` variant should only be constructed with a known feasible basis.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct NonArtificial;

impl Kind for NonArtificial {
    const PHASE: &'static str = "Phase II";

    fn nr_columns(canonical: &CanonicalForm) -> usize {
        canonical.column_range(ColumnKind::Artificial).start
    }

    fn cost(canonical: &CanonicalForm) -> Vec<f64> {
        canonical.cost()[..Self::nr_columns(canonical)].to_vec()
    }

    fn may_enter(column_kind: ColumnKind) -> bool {
        debug_assert_ne!(column_kind, ColumnKind::Artificial);

        true
    }
}

impl Tableau<NonArtificial> {
    /// Create the phase two tableau from a phase one tableau that has no artificial variables left
    /// in the basis.
    ///
    /// # Arguments
    ///
    /// * `artificial`: Phase one tableau at a feasible basis.
    /// * `rows_to_remove`: Sorted indices of redundant rows, each with an artificial basic
    /// variable at zero level.
    /// * `canonical`: Form that both tableaus are derived from, provides the cost.
    ///
    /// # Return value
    ///
    /// A tableau with the same basis (without artificial columns and redundant rows) and an
    /// objective row of reduced costs w.r.t. that basis.
    pub(crate) fn from_artificial(
        artificial: Tableau<Artificial>,
        rows_to_remove: &[usize],
        canonical: &CanonicalForm,
    ) -> Self {
        debug_assert!(rows_to_remove.is_sorted());

        let nr_columns = NonArtificial::nr_columns(canonical);
        let Tableau {
            mut rows,
            mut basis_indices,
            mut column_names,
            mut column_kinds,
            mut canonical_rows,
            step,
            ..
        } = artificial;

        // Drop the objective row, it is replaced
        rows.pop();
        remove_indices(&mut rows, rows_to_remove);
        remove_indices(&mut basis_indices, rows_to_remove);
        remove_indices(&mut canonical_rows, rows_to_remove);
        for row in &mut rows {
            let rhs = row[row.len() - 1];
            row.truncate(nr_columns);
            row.push(rhs);
        }
        column_names.truncate(nr_columns);
        column_kinds.truncate(nr_columns);
        debug_assert!(basis_indices.iter().all(|&j| j < nr_columns));

        let cost = NonArtificial::cost(canonical);
        let objective = objective_row(&rows, &basis_indices, &cost);
        rows.push(objective);
        let basis_columns = basis_indices.iter().copied().collect::<HashSet<_>>();

        Self {
            rows,
            basis_indices,
            basis_columns,
            column_names,
            column_kinds,
            canonical_rows,
            step,
            kind: PhantomData,
        }
    }
}
