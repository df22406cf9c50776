// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use roster_domain::{RawRow, ValidatedRow, validate_row};

use crate::chain::refresh_chain_of_command;
use crate::reconcile::{ReconciledRow, reconcile_row};
use crate::store::DirectoryStore;
use crate::summary::ImportSummary;

/// Validates, reconciles, and refreshes the chain for one well-shaped row.
///
/// Returns the reconciliation result, or `None` if the row was skipped
/// because its email was invalid.
///
/// # Errors
///
/// Returns an error if any store call fails.
pub fn import_row<S: DirectoryStore>(
    store: &mut S,
    row: &RawRow,
    summary: &mut ImportSummary,
) -> Result<Option<ReconciledRow>, S::Error> {
    let validated: ValidatedRow = validate_row(row);

    let Some(reconciled) = reconcile_row(store, &validated, summary)? else {
        return Ok(None);
    };

    refresh_chain_of_command(store, reconciled.user_id, reconciled.resolved_manager)?;

    Ok(Some(reconciled))
}

/// Imports well-shaped rows strictly in order.
///
/// # Errors
///
/// Returns the first store failure. Rows before it stay committed.
pub fn import_rows<'a, S, I>(
    store: &mut S,
    rows: I,
    summary: &mut ImportSummary,
) -> Result<(), S::Error>
where
    S: DirectoryStore,
    I: IntoIterator<Item = &'a RawRow>,
{
    for row in rows {
        import_row(store, row, summary)?;
    }
    Ok(())
}
