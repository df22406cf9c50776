// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Record reconciliation: validated row in, merged user record out.

use roster_domain::{ManagerRef, NormalizedEmail, UserId, Validated, ValidatedRow};
use tracing::{info, warn};

use crate::issue::{ImportIssue, UpdateField};
use crate::store::{DirectoryStore, UpsertOutcome, UserUpdate};
use crate::summary::ImportSummary;

/// What reconciliation did for a processable row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciledRow {
    /// Identity of the upserted user.
    pub user_id: UserId,
    /// True if an existing user was matched.
    pub matched: bool,
    /// The manager resolved from this row, if any.
    pub resolved_manager: Option<UserId>,
}

/// Records an invalid non-email field and returns the valid value, if any.
fn take_valid<T: Clone>(
    field: UpdateField,
    value: &Validated<T>,
    summary: &mut ImportSummary,
) -> Option<T> {
    match value {
        Validated::Valid(v) => Some(v.clone()),
        Validated::Invalid { raw } => {
            summary.record_issue(&ImportIssue::InvalidField {
                field,
                raw: raw.clone(),
            });
            None
        }
    }
}

/// Resolves the Manager column against the store.
///
/// A blank cell resolves to `None` without touching the store. A malformed
/// address or an address with no matching user records an issue and also
/// resolves to `None`; the row carries on. A row naming itself as manager
/// is looked up like any other address and only logged.
///
/// # Errors
///
/// Returns an error if the store lookup fails.
pub fn resolve_manager<S: DirectoryStore>(
    store: &mut S,
    email: &NormalizedEmail,
    manager: &Validated<ManagerRef>,
    summary: &mut ImportSummary,
) -> Result<Option<UserId>, S::Error> {
    let (manager_email, manager_raw): (&NormalizedEmail, &str) = match manager {
        Validated::Valid(ManagerRef::Unchanged) => return Ok(None),
        Validated::Valid(ManagerRef::Email { email: address, raw }) => (address, raw.as_str()),
        Validated::Invalid { raw } => {
            summary.record_issue(&ImportIssue::InvalidManager { raw: raw.clone() });
            return Ok(None);
        }
    };

    if manager_email == email {
        warn!(%email, "User listed as their own manager");
    }

    let found: Option<UserId> = store.find_user(manager_email)?.map(|user| user.user_id);

    if found.is_none() {
        summary.record_issue(&ImportIssue::InvalidManager {
            raw: manager_raw.to_string(),
        });
    }

    Ok(found)
}

/// Reconciles one validated row against the store.
///
/// Returns `Ok(None)` when the row's email is invalid; in that case nothing
/// is written. Otherwise the user is upserted with every field that
/// validated, and the summary counts it as created or updated.
///
/// # Errors
///
/// Returns an error if any store call fails. Writes made before the
/// failure are not rolled back.
pub fn reconcile_row<S: DirectoryStore>(
    store: &mut S,
    row: &ValidatedRow,
    summary: &mut ImportSummary,
) -> Result<Option<ReconciledRow>, S::Error> {
    let email: &NormalizedEmail = match &row.email {
        Validated::Valid(email) => email,
        Validated::Invalid { raw } => {
            summary.record_issue(&ImportIssue::InvalidEmail { raw: raw.clone() });
            return Ok(None);
        }
    };

    let mut update: UserUpdate = UserUpdate {
        name: take_valid(UpdateField::Name, &row.name, summary),
        salary: take_valid(UpdateField::Salary, &row.salary, summary),
        hire_date: take_valid(UpdateField::HireDate, &row.hire_date, summary),
        manager_id: None,
    };

    let resolved_manager: Option<UserId> = resolve_manager(store, email, &row.manager, summary)?;
    update.manager_id = resolved_manager;

    let outcome: UpsertOutcome = store.upsert_user(email, &update)?;
    summary.record_upsert(outcome.matched);

    info!(
        row_number = row.row_number,
        user_id = %outcome.user_id,
        matched = outcome.matched,
        "Reconciled user {}",
        email
    );

    Ok(Some(ReconciledRow {
        user_id: outcome.user_id,
        matched: outcome.matched,
        resolved_manager,
    }))
}
