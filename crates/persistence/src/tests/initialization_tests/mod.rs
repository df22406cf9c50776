// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test goes through `new_in_memory()`, so
//! connection setup and migrations are exercised widely. These tests pin
//! the properties the rest rely on.

use roster::{DirectoryStore, UserUpdate};

use crate::error::PersistenceError;
use crate::tests::{create_test_persistence, email};
use crate::SqlitePersistence;

#[test]
fn test_persistence_initialization() {
    let result: Result<SqlitePersistence, PersistenceError> = SqlitePersistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_new_database_is_empty() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    assert_eq!(persistence.count_users().unwrap(), 0);
    assert_eq!(persistence.count_chains_of_command().unwrap(), 0);
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: SqlitePersistence = create_test_persistence();
    let mut db2: SqlitePersistence = create_test_persistence();

    db1.upsert_user(&email("one@example.com"), &UserUpdate::default())
        .unwrap();

    assert_eq!(db1.count_users().unwrap(), 1, "db1 should have 1 user");
    assert_eq!(db2.count_users().unwrap(), 0, "db2 should have 0 users (isolated)");
}

#[test]
fn test_file_database_persists_across_connections() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "roster_persistence_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: SqlitePersistence = SqlitePersistence::new_with_file(&path).unwrap();
        persistence
            .upsert_user(&email("kept@example.com"), &UserUpdate::default())
            .unwrap();
    }

    let mut reopened: SqlitePersistence = SqlitePersistence::new_with_file(&path).unwrap();
    assert_eq!(reopened.count_users().unwrap(), 1);
    assert!(reopened.find_user(&email("kept@example.com")).unwrap().is_some());

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
