// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The store capability consumed by the import pipeline.
//!
//! The pipeline never reaches for a global handle. The caller constructs a
//! store once and passes it in; every read and write goes through this trait.

use roster_domain::{NormalizedEmail, UserId};
use time::PrimitiveDateTime;

/// A user record as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub user_id: UserId,
    pub normalized_email: NormalizedEmail,
    pub name: Option<String>,
    pub salary: Option<i64>,
    pub hire_date: Option<PrimitiveDateTime>,
    pub manager_id: Option<UserId>,
    pub is_active: bool,
}

/// A partial user update with merge semantics.
///
/// `Some` fields overwrite the stored value; `None` fields leave it
/// untouched. When the user does not exist yet, it is created with exactly
/// the `Some` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub salary: Option<i64>,
    pub hire_date: Option<PrimitiveDateTime>,
    pub manager_id: Option<UserId>,
}

/// Result of a user upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Identity of the created or updated user.
    pub user_id: UserId,
    /// True if an existing record was matched, false if one was created.
    pub matched: bool,
}

/// Keyed access to users and their cached chains of command.
///
/// Each method is a single blocking round-trip. Implementations decide
/// their own error type; the pipeline treats any error as fatal and hands
/// it back to the caller untouched.
pub trait DirectoryStore {
    /// Error type for store failures.
    type Error: std::error::Error;

    /// Looks up a user by normalized email.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_user(&mut self, email: &NormalizedEmail) -> Result<Option<StoredUser>, Self::Error>;

    /// Creates or merges a user keyed by normalized email.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn upsert_user(
        &mut self,
        email: &NormalizedEmail,
        update: &UserUpdate,
    ) -> Result<UpsertOutcome, Self::Error>;

    /// Returns the cached chain of command for a user, root first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the stored chain is
    /// malformed.
    fn find_chain(&mut self, user_id: UserId) -> Result<Option<Vec<UserId>>, Self::Error>;

    /// Creates or replaces the cached chain of command for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn upsert_chain(&mut self, user_id: UserId, chain: &[UserId]) -> Result<(), Self::Error>;

    /// Counts users whose `manager_id` is the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn count_direct_reports(&mut self, manager_id: UserId) -> Result<u64, Self::Error>;
}
