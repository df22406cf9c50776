// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use roster::{StoredUser, UserUpdate};
use roster_domain::{NormalizedEmail, UserId, format_stored_date_time, parse_stored_date_time};
use time::PrimitiveDateTime;

use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
///
/// The password hash is deliberately not selected here.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct UserRow {
    pub user_id: i64,
    pub normalized_email: String,
    pub name: Option<String>,
    pub salary: Option<i64>,
    pub hire_date: Option<String>,
    pub manager_id: Option<i64>,
    pub is_active: i32,
}

impl UserRow {
    /// Converts a database row into the store-facing record.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored email or hire date is malformed.
    pub fn into_stored_user(self) -> Result<StoredUser, PersistenceError> {
        let hire_date: Option<PrimitiveDateTime> = self
            .hire_date
            .as_deref()
            .map(parse_stored_date_time)
            .transpose()?;

        Ok(StoredUser {
            user_id: UserId::new(self.user_id),
            normalized_email: NormalizedEmail::parse(&self.normalized_email)?,
            name: self.name,
            salary: self.salary,
            hire_date,
            manager_id: self.manager_id.map(UserId::new),
            is_active: self.is_active != 0,
        })
    }
}

/// Partial update for an existing user.
///
/// `None` fields are skipped by Diesel, so only the supplied columns are
/// written.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangeset {
    pub name: Option<String>,
    pub salary: Option<i64>,
    pub hire_date: Option<String>,
    pub manager_id: Option<i64>,
}

impl UserChangeset {
    /// Builds a changeset from a merge update.
    ///
    /// # Errors
    ///
    /// Returns an error if the hire date cannot be formatted.
    pub fn from_update(update: &UserUpdate) -> Result<Self, PersistenceError> {
        Ok(Self {
            name: update.name.clone(),
            salary: update.salary,
            hire_date: update
                .hire_date
                .map(format_stored_date_time)
                .transpose()?,
            manager_id: update.manager_id.map(UserId::value),
        })
    }

    /// Returns true if no column would be written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.salary.is_none()
            && self.hire_date.is_none()
            && self.manager_id.is_none()
    }
}
