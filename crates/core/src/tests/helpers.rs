// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use roster_domain::{NormalizedEmail, RawRow, UserId};

use crate::{DirectoryStore, StoredUser, UpsertOutcome, UserUpdate};

#[derive(Debug)]
pub struct MemoryStoreError(pub String);

impl std::fmt::Display for MemoryStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "memory store failure: {}", self.0)
    }
}

impl std::error::Error for MemoryStoreError {}

/// A `HashMap`-backed store for exercising the pipeline without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub users: HashMap<NormalizedEmail, StoredUser>,
    pub chains: HashMap<UserId, Vec<UserId>>,
    pub next_id: i64,
    /// When set, every write fails.
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    pub fn user(&self, email: &str) -> &StoredUser {
        self.users
            .get(&NormalizedEmail::parse(email).unwrap())
            .expect("user should exist")
    }

    pub fn chain_of(&self, email: &str) -> Option<&Vec<UserId>> {
        self.chains.get(&self.user(email).user_id)
    }
}

impl DirectoryStore for MemoryStore {
    type Error = MemoryStoreError;

    fn find_user(&mut self, email: &NormalizedEmail) -> Result<Option<StoredUser>, Self::Error> {
        Ok(self.users.get(email).cloned())
    }

    fn upsert_user(
        &mut self,
        email: &NormalizedEmail,
        update: &UserUpdate,
    ) -> Result<UpsertOutcome, Self::Error> {
        if self.fail_writes {
            return Err(MemoryStoreError(String::from("write refused")));
        }

        if let Some(existing) = self.users.get_mut(email) {
            if let Some(name) = &update.name {
                existing.name = Some(name.clone());
            }
            if let Some(salary) = update.salary {
                existing.salary = Some(salary);
            }
            if let Some(hire_date) = update.hire_date {
                existing.hire_date = Some(hire_date);
            }
            if let Some(manager_id) = update.manager_id {
                existing.manager_id = Some(manager_id);
            }
            return Ok(UpsertOutcome {
                user_id: existing.user_id,
                matched: true,
            });
        }

        let user_id: UserId = UserId::new(self.next_id);
        self.next_id += 1;
        self.users.insert(
            email.clone(),
            StoredUser {
                user_id,
                normalized_email: email.clone(),
                name: update.name.clone(),
                salary: update.salary,
                hire_date: update.hire_date,
                manager_id: update.manager_id,
                is_active: true,
            },
        );
        Ok(UpsertOutcome {
            user_id,
            matched: false,
        })
    }

    fn find_chain(&mut self, user_id: UserId) -> Result<Option<Vec<UserId>>, Self::Error> {
        Ok(self.chains.get(&user_id).cloned())
    }

    fn upsert_chain(&mut self, user_id: UserId, chain: &[UserId]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MemoryStoreError(String::from("write refused")));
        }
        self.chains.insert(user_id, chain.to_vec());
        Ok(())
    }

    fn count_direct_reports(&mut self, manager_id: UserId) -> Result<u64, Self::Error> {
        Ok(self
            .users
            .values()
            .filter(|user| user.manager_id == Some(manager_id))
            .count() as u64)
    }
}

pub fn create_test_row(
    row_number: usize,
    name: &str,
    email: &str,
    manager: &str,
    salary: &str,
    hire_date: &str,
) -> RawRow {
    RawRow {
        row_number,
        name: name.to_string(),
        email: email.to_string(),
        manager: manager.to_string(),
        salary: salary.to_string(),
        hire_date: hire_date.to_string(),
    }
}

/// Seeds a store with Brad (root) and Ted (reports to Brad).
pub fn create_test_store() -> MemoryStore {
    let mut store: MemoryStore = MemoryStore::new();
    let brad: UpsertOutcome = store
        .upsert_user(
            &NormalizedEmail::parse("brad@example.com").unwrap(),
            &UserUpdate {
                name: Some(String::from("Brad Jones")),
                salary: Some(100_000),
                ..UserUpdate::default()
            },
        )
        .unwrap();
    store.upsert_chain(brad.user_id, &[]).unwrap();

    let ted: UpsertOutcome = store
        .upsert_user(
            &NormalizedEmail::parse("ted@example.com").unwrap(),
            &UserUpdate {
                name: Some(String::from("Ted Smith")),
                salary: Some(80_000),
                manager_id: Some(brad.user_id),
                ..UserUpdate::default()
            },
        )
        .unwrap();
    store.upsert_chain(ted.user_id, &[brad.user_id]).unwrap();

    store
}
