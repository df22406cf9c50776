// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use roster::{DirectoryStore, UserUpdate};
use roster_domain::{NormalizedEmail, UserId};
use time::macros::datetime;

use crate::SqlitePersistence;

pub fn email(raw: &str) -> NormalizedEmail {
    NormalizedEmail::parse(raw).unwrap()
}

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().unwrap()
}

/// Seeds Brad (root, 90000) and Ted (reports to Brad) with their chains.
pub fn seed_brad_and_ted(persistence: &mut SqlitePersistence) -> (UserId, UserId) {
    let brad: UserId = persistence
        .seed_user(
            &email("brad@example.com"),
            &UserUpdate {
                name: Some(String::from("Brad Jones")),
                salary: Some(90_000),
                hire_date: Some(datetime!(2010-02-10 0:00)),
                manager_id: None,
            },
            "brad-password",
        )
        .unwrap();
    persistence.upsert_chain(brad, &[]).unwrap();

    let ted: UserId = persistence
        .seed_user(
            &email("ted@example.com"),
            &UserUpdate {
                name: Some(String::from("Ted Smith")),
                salary: Some(75_000),
                hire_date: None,
                manager_id: Some(brad),
            },
            "ted-password",
        )
        .unwrap();
    persistence.upsert_chain(ted, &[brad]).unwrap();

    (brad, ted)
}
