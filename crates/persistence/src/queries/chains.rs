// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chain-of-command queries.
//!
//! Chains are stored as a JSON array of user ids, root first.

use diesel::prelude::*;
use roster_domain::UserId;

use crate::diesel_schema::chains_of_command;
use crate::error::PersistenceError;

backend_fn! {
/// Returns the cached chain of command for a user.
///
/// # Errors
///
/// Returns an error if the query fails or the stored chain is not a JSON
/// array of ids.
pub fn find_chain(conn: &mut _, user_id: i64) -> Result<Option<Vec<UserId>>, PersistenceError> {
    let stored: Option<String> = chains_of_command::table
        .find(user_id)
        .select(chains_of_command::chain_of_command)
        .first::<String>(conn)
        .optional()?;

    stored
        .map(|json| serde_json::from_str::<Vec<UserId>>(&json))
        .transpose()
        .map_err(PersistenceError::from)
}
}

backend_fn! {
/// Counts stored chains.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_chains_of_command(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(chains_of_command::table.count().get_result(conn)?)
}
}
