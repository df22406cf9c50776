// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User mutations.

use diesel::prelude::*;
use roster::{UpsertOutcome, UserUpdate};
use roster_domain::{NormalizedEmail, UserId};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::UserChangeset;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

backend_fn! {
/// Creates or merges a user keyed by normalized email.
///
/// An existing user gets only the supplied columns overwritten. A new user
/// is inserted with exactly the supplied columns; the rest stay `NULL` and
/// `is_active` defaults to 1.
///
/// # Errors
///
/// Returns an error if the database write fails.
pub fn upsert_user(
    conn: &mut _,
    email: &NormalizedEmail,
    update: &UserUpdate,
) -> Result<UpsertOutcome, PersistenceError> {
    let changeset: UserChangeset = UserChangeset::from_update(update)?;

    conn.transaction::<UpsertOutcome, PersistenceError, _>(|conn| {
        let existing: Option<i64> = users::table
            .filter(users::normalized_email.eq(email.as_str()))
            .select(users::user_id)
            .first::<i64>(conn)
            .optional()?;

        if let Some(user_id) = existing {
            // Diesel rejects an UPDATE with no columns.
            if changeset.is_empty() {
                debug!(user_id, "Matched user with nothing to update");
            } else {
                diesel::update(users::table.find(user_id))
                    .set(&changeset)
                    .execute(conn)?;
                debug!(user_id, "Updated user");
            }

            return Ok(UpsertOutcome {
                user_id: UserId::new(user_id),
                matched: true,
            });
        }

        diesel::insert_into(users::table)
            .values((
                users::normalized_email.eq(email.as_str()),
                users::name.eq(changeset.name.as_deref()),
                users::salary.eq(changeset.salary),
                users::hire_date.eq(changeset.hire_date.as_deref()),
                users::manager_id.eq(changeset.manager_id),
                users::is_active.eq(1),
            ))
            .execute(conn)?;

        let user_id: i64 = conn.get_last_insert_rowid()?;
        debug!(user_id, "Inserted user");

        Ok(UpsertOutcome {
            user_id: UserId::new(user_id),
            matched: false,
        })
    })
}
}

backend_fn! {
/// Inserts a fixture user with a bcrypt-hashed password.
///
/// # Errors
///
/// Returns an error if a user with this email already exists, hashing
/// fails, or the insert fails.
pub fn seed_user(
    conn: &mut _,
    email: &NormalizedEmail,
    update: &UserUpdate,
    password: &str,
) -> Result<UserId, PersistenceError> {
    let changeset: UserChangeset = UserChangeset::from_update(update)?;
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    conn.transaction::<UserId, PersistenceError, _>(|conn| {
        let exists: bool = diesel::select(diesel::dsl::exists(
            users::table.filter(users::normalized_email.eq(email.as_str())),
        ))
        .get_result(conn)?;

        if exists {
            return Err(PersistenceError::DuplicateUser(email.to_string()));
        }

        diesel::insert_into(users::table)
            .values((
                users::normalized_email.eq(email.as_str()),
                users::name.eq(changeset.name.as_deref()),
                users::salary.eq(changeset.salary),
                users::hire_date.eq(changeset.hire_date.as_deref()),
                users::manager_id.eq(changeset.manager_id),
                users::is_active.eq(1),
                users::hashed_password.eq(Some(password_hash.as_str())),
            ))
            .execute(conn)?;

        let user_id: i64 = conn.get_last_insert_rowid()?;
        info!(user_id, %email, "Seeded user");

        Ok(UserId::new(user_id))
    })
}
}
