// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chain-of-command mutations.

use diesel::prelude::*;
use roster_domain::UserId;
use tracing::debug;

use crate::diesel_schema::chains_of_command;
use crate::error::PersistenceError;

backend_fn! {
/// Creates or replaces the cached chain for a user.
///
/// # Errors
///
/// Returns an error if the chain cannot be serialized, the user does not
/// exist, or the write fails.
pub fn upsert_chain(conn: &mut _, user_id: i64, chain: &[UserId]) -> Result<(), PersistenceError> {
    let json: String = serde_json::to_string(chain)?;

    conn.transaction::<(), PersistenceError, _>(|conn| {
        let exists: bool = diesel::select(diesel::dsl::exists(
            chains_of_command::table.filter(chains_of_command::user_id.eq(user_id)),
        ))
        .get_result(conn)?;

        if exists {
            diesel::update(chains_of_command::table.find(user_id))
                .set(chains_of_command::chain_of_command.eq(&json))
                .execute(conn)?;
        } else {
            diesel::insert_into(chains_of_command::table)
                .values((
                    chains_of_command::user_id.eq(user_id),
                    chains_of_command::chain_of_command.eq(&json),
                ))
                .execute(conn)?;
        }

        debug!(user_id, exists, "Wrote chain_of_command row");
        Ok(())
    })
}
}
