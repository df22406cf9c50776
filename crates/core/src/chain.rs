// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chain-of-command maintenance.
//!
//! A user's chain is the ordered list of their ancestors, root first, ending
//! with the immediate manager. It is cached per user so hierarchy queries
//! never have to walk manager links.
//!
//! Recomputation is local to one user. Descendants whose cached chains pass
//! through that user are not revisited, so a change to a manager's ancestry
//! leaves their reports' chains stale until those reports are imported again.

use roster_domain::UserId;
use tracing::{debug, warn};

use crate::store::DirectoryStore;

/// Builds a user's chain from their manager's chain.
///
/// A manager with no cached chain is treated as a root.
#[must_use]
pub fn extend_chain(manager_chain: Option<Vec<UserId>>, manager_id: UserId) -> Vec<UserId> {
    let mut chain: Vec<UserId> = manager_chain.unwrap_or_default();
    chain.push(manager_id);
    chain
}

/// Recomputes and stores the chain of command for one user.
///
/// With a manager resolved in the current row the chain becomes
/// `chain(manager) ++ [manager]`; otherwise it is empty.
///
/// # Errors
///
/// Returns an error if any store call fails.
pub fn refresh_chain_of_command<S: DirectoryStore>(
    store: &mut S,
    user_id: UserId,
    resolved_manager: Option<UserId>,
) -> Result<Vec<UserId>, S::Error> {
    let chain: Vec<UserId> = match resolved_manager {
        Some(manager_id) => extend_chain(store.find_chain(manager_id)?, manager_id),
        None => Vec::new(),
    };

    let previous: Option<Vec<UserId>> = store.find_chain(user_id)?;
    store.upsert_chain(user_id, &chain)?;

    debug!(%user_id, depth = chain.len(), "Stored chain of command");

    if previous.is_some_and(|previous| previous != chain) {
        let reports: u64 = store.count_direct_reports(user_id)?;
        if reports > 0 {
            warn!(
                %user_id,
                reports,
                "Chain of command changed for a user with reports; their cached chains were not refreshed"
            );
        }
    }

    Ok(chain)
}
