// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use roster::{DirectoryStore, StoredUser, UserUpdate};
use roster_domain::{NormalizedEmail, UserId};
use roster_persistence::SqlitePersistence;
use time::macros::datetime;

pub const HEADER: &str = "Name,Email,Manager,Salary,Hire Date";

pub fn email(raw: &str) -> NormalizedEmail {
    NormalizedEmail::parse(raw).unwrap()
}

pub struct Fixture {
    pub persistence: SqlitePersistence,
    pub brad: UserId,
    pub ted: UserId,
}

/// Brad (90000, no manager) and Ted (reports to Brad), both with chains.
pub fn create_test_fixture() -> Fixture {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();

    let brad: UserId = persistence
        .seed_user(
            &email("brad@example.com"),
            &UserUpdate {
                name: Some(String::from("Brad Jones")),
                salary: Some(90_000),
                hire_date: Some(datetime!(2010-02-10 0:00)),
                manager_id: None,
            },
            "brad-fixture-password",
        )
        .unwrap();
    persistence.upsert_chain(brad, &[]).unwrap();

    let ted: UserId = persistence
        .seed_user(
            &email("ted@example.com"),
            &UserUpdate {
                name: Some(String::from("Ted Smith")),
                salary: Some(70_000),
                hire_date: Some(datetime!(2015-05-01 0:00)),
                manager_id: Some(brad),
            },
            "ted-fixture-password",
        )
        .unwrap();
    persistence.upsert_chain(ted, &[brad]).unwrap();

    Fixture {
        persistence,
        brad,
        ted,
    }
}

pub fn find(persistence: &mut SqlitePersistence, raw_email: &str) -> StoredUser {
    persistence.find_user(&email(raw_email)).unwrap().unwrap()
}

pub fn csv(lines: &[&str]) -> String {
    lines.join("\n")
}
