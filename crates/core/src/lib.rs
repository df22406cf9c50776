// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row reconciliation and chain-of-command maintenance.
//!
//! Rows arrive here already split into named fields. Each row is validated,
//! merged into the store, and the acting user's chain of command is
//! recomputed, one row at a time, in input order.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod chain;
mod import;
mod issue;
mod reconcile;
mod store;
mod summary;

#[cfg(test)]
mod tests;

pub use chain::{extend_chain, refresh_chain_of_command};
pub use import::{import_row, import_rows};
pub use issue::{ImportIssue, UpdateField};
pub use reconcile::{ReconciledRow, reconcile_row, resolve_manager};
pub use store::{DirectoryStore, StoredUser, UpsertOutcome, UserUpdate};
pub use summary::ImportSummary;
