// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end uploads against a seeded `SQLite` store.

use roster::{DirectoryStore, StoredUser};
use time::macros::datetime;

use crate::tests::helpers::{Fixture, HEADER, create_test_fixture, csv, email, find};
use crate::{InvocationContext, UploadResponse, handle_csv_upload};

#[test]
fn test_update_existing_and_create_report() {
    let Fixture {
        mut persistence,
        brad,
        ted: _,
    } = create_test_fixture();
    let body: String = csv(&[
        HEADER,
        "Brad Jones,brad@example.com,,100000,02/10/2010",
        "John Doe,john@example.com,brad@example.com,80000,07/16/2018",
    ]);

    let response: UploadResponse =
        handle_csv_upload(&mut persistence, &body, &InvocationContext::default()).unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body.num_created, 1);
    assert_eq!(response.body.num_updated, 1);
    assert!(response.body.errors.is_empty());

    let brad_row: StoredUser = find(&mut persistence, "brad@example.com");
    assert_eq!(brad_row.salary, Some(100_000));
    assert_eq!(persistence.find_chain(brad).unwrap(), Some(Vec::new()));

    let john: StoredUser = find(&mut persistence, "john@example.com");
    assert_eq!(john.name.as_deref(), Some("John Doe"));
    assert_eq!(john.manager_id, Some(brad));
    assert_eq!(john.hire_date, Some(datetime!(2018-07-16 0:00)));
    assert_eq!(persistence.find_chain(john.user_id).unwrap(), Some(vec![brad]));

    assert_eq!(persistence.count_users().unwrap(), 3);
    assert_eq!(persistence.count_chains_of_command().unwrap(), 3);
}

#[test]
fn test_invalid_salary_keeps_stored_salary() {
    let Fixture {
        mut persistence,
        brad,
        ted: _,
    } = create_test_fixture();
    let body: String = csv(&[
        HEADER,
        "Bradley Jones,brad@example.com,,NOT A NUMBER,02/10/2010",
        "John Doe,john@example.com,brad@example.com,80000,07/16/2018",
    ]);

    let response: UploadResponse =
        handle_csv_upload(&mut persistence, &body, &InvocationContext::default()).unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body.num_created, 1);
    assert_eq!(response.body.num_updated, 1);
    assert_eq!(
        response.body.errors,
        vec![String::from("Invalid salary: NOT A NUMBER\nContinuing update")]
    );

    let brad_row: StoredUser = find(&mut persistence, "brad@example.com");
    assert_eq!(brad_row.salary, Some(90_000));
    assert_eq!(brad_row.name.as_deref(), Some("Bradley Jones"));

    let john: StoredUser = find(&mut persistence, "john@example.com");
    assert_eq!(john.manager_id, Some(brad));
    assert_eq!(persistence.find_chain(john.user_id).unwrap(), Some(vec![brad]));
}

#[test]
fn test_fixture_passwords_are_hashed() {
    let Fixture {
        mut persistence, ..
    } = create_test_fixture();

    assert!(
        persistence
            .verify_password(&email("brad@example.com"), "brad-fixture-password")
            .unwrap()
    );
    assert!(
        persistence
            .verify_password(&email("ted@example.com"), "ted-fixture-password")
            .unwrap()
    );
    assert!(
        !persistence
            .verify_password(&email("ted@example.com"), "brad-fixture-password")
            .unwrap()
    );
}

#[test]
fn test_deep_chain_built_from_earlier_rows() {
    let Fixture {
        mut persistence,
        brad,
        ted,
    } = create_test_fixture();
    let body: String = csv(&[
        HEADER,
        "Amy Lee,amy@example.com,ted@example.com,60000,2020-01-06",
        "Bo Chen,bo@example.com,amy@example.com,50000,2022-09-12",
    ]);

    let response: UploadResponse =
        handle_csv_upload(&mut persistence, &body, &InvocationContext::default()).unwrap();

    assert_eq!(response.body.num_created, 2);
    assert!(response.body.errors.is_empty());
    let amy: StoredUser = find(&mut persistence, "amy@example.com");
    let bo: StoredUser = find(&mut persistence, "bo@example.com");
    assert_eq!(
        persistence.find_chain(bo.user_id).unwrap(),
        Some(vec![brad, ted, amy.user_id])
    );
}

#[test]
fn test_existing_user_naming_themselves_as_manager_is_linked() {
    let Fixture {
        mut persistence,
        brad,
        ted: _,
    } = create_test_fixture();
    let body: String = csv(&[
        HEADER,
        "Brad Jones,brad@example.com,brad@example.com,90000,02/10/2010",
    ]);

    let response: UploadResponse =
        handle_csv_upload(&mut persistence, &body, &InvocationContext::default()).unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body.num_updated, 1);
    assert!(response.body.errors.is_empty());

    let brad_row: StoredUser = find(&mut persistence, "brad@example.com");
    assert_eq!(brad_row.manager_id, Some(brad));
    assert_eq!(persistence.find_chain(brad).unwrap(), Some(vec![brad]));
}
