// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User queries.

use diesel::prelude::*;
use roster::StoredUser;
use tracing::debug;

use crate::data_models::UserRow;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

backend_fn! {
/// Looks up a user by normalized email.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
/// Returns `Ok(None)` if no user has this email.
pub fn find_user_by_email(
    conn: &mut _,
    normalized_email: &str,
) -> Result<Option<StoredUser>, PersistenceError> {
    debug!(normalized_email, "Looking up user by email");

    let row: Option<UserRow> = users::table
        .filter(users::normalized_email.eq(normalized_email))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    row.map(UserRow::into_stored_user).transpose()
}
}

backend_fn! {
/// Looks up a user by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
/// Returns `Ok(None)` if no user has this id.
pub fn find_user_by_id(conn: &mut _, user_id: i64) -> Result<Option<StoredUser>, PersistenceError> {
    let row: Option<UserRow> = users::table
        .find(user_id)
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    row.map(UserRow::into_stored_user).transpose()
}
}

backend_fn! {
/// Returns the stored password hash for an email.
///
/// The outer `Option` is `None` when the user does not exist; the inner one
/// is `None` when the user has no password.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_password_hash(
    conn: &mut _,
    normalized_email: &str,
) -> Result<Option<Option<String>>, PersistenceError> {
    Ok(users::table
        .filter(users::normalized_email.eq(normalized_email))
        .select(users::hashed_password)
        .first::<Option<String>>(conn)
        .optional()?)
}
}

backend_fn! {
/// Counts all users.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_users(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(users::table.count().get_result(conn)?)
}
}

backend_fn! {
/// Counts users whose manager is the given user.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_direct_reports(conn: &mut _, manager_id: i64) -> Result<i64, PersistenceError> {
    Ok(users::table
        .filter(users::manager_id.eq(manager_id))
        .count()
        .get_result(conn)?)
}
}
