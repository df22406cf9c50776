// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! - `cargo xtask ci` runs lint, build, test and migration verification
//! - `cargo xtask verify-migrations` checks that the `SQLite` and `MySQL`
//!   migration trees stay in step
//!
//! The `MySQL` backend is behind the `mysql` feature of `roster-persistence`
//! and needs the `MySQL` client library to build, so migration verification
//! here does not start a database server. It checks that both trees carry the
//! same migrations and that the `SQLite` tree applies cleanly and creates the
//! tables the `MySQL` tree declares.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{collections::BTreeSet, io, path::Path, process::Output};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use diesel::sql_types::Text;
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const SQLITE_MIGRATIONS_DIR: &str = "crates/persistence/migrations";
const MYSQL_MIGRATIONS_DIR: &str = "crates/persistence/migrations_mysql";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, migrations)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Lint formatting, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Verify the `SQLite` and `MySQL` migration trees match
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test, migrations)
fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets"])
}

/// Lint formatting, clippy, and docs
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec!["clippy", "--all-targets", "--", "-D", "warnings"])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    cmd!("cargo", "doc", "--no-deps", "--workspace", "--exclude", "xtask")
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Run tests for libs and docs
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // run last because it's slow
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Verify the `SQLite` and `MySQL` migration trees
///
/// Fails when:
/// - a migration directory exists in one tree but not the other
/// - a migration is missing its `up.sql` or `down.sql`
/// - the `SQLite` migrations fail to apply to an in-memory database
/// - the tables created by `SQLite` differ from those the `MySQL` tree creates
fn verify_migrations() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{embed_migrations, MigrationHarness};

    tracing::info!("Starting migration parity verification");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .ok_or_else(|| color_eyre::eyre::eyre!("xtask has no parent directory"))?;

    let sqlite_dir = workspace_root.join(SQLITE_MIGRATIONS_DIR);
    let mysql_dir = workspace_root.join(MYSQL_MIGRATIONS_DIR);

    let sqlite_names = migration_names(&sqlite_dir)?;
    let mysql_names = migration_names(&mysql_dir)?;

    if sqlite_names != mysql_names {
        let mut errors = Vec::new();

        for name in sqlite_names.difference(&mysql_names) {
            errors.push(format!("  - Migration '{name}' exists in SQLite but not in MySQL"));
        }

        for name in mysql_names.difference(&sqlite_names) {
            errors.push(format!("  - Migration '{name}' exists in MySQL but not in SQLite"));
        }

        return Err(color_eyre::eyre::eyre!(
            "❌ Migration parity check FAILED\n{}",
            errors.join("\n")
        ));
    }

    for name in &sqlite_names {
        for dir in [&sqlite_dir, &mysql_dir] {
            for file in ["up.sql", "down.sql"] {
                let path = dir.join(name).join(file);
                if !path.is_file() {
                    return Err(color_eyre::eyre::eyre!(
                        "❌ Migration parity check FAILED: missing {}",
                        path.display()
                    ));
                }
            }
        }
    }

    tracing::info!("Applying SQLite migrations");
    #[allow(clippy::items_after_statements)]
    const SQLITE_MIGRATIONS: diesel_migrations::EmbeddedMigrations =
        embed_migrations!("../crates/persistence/migrations");

    let mut sqlite_conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut sqlite_conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    sqlite_conn
        .run_pending_migrations(SQLITE_MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply SQLite migrations: {}", e))?;

    let sqlite_tables = sqlite_table_names(&mut sqlite_conn)?;

    let mut mysql_tables = BTreeSet::new();
    for name in &mysql_names {
        let up = std::fs::read_to_string(mysql_dir.join(name).join("up.sql"))
            .wrap_err_with(|| format!("Failed to read MySQL migration {name}"))?;
        mysql_tables.extend(created_tables(&up));
    }

    if sqlite_tables != mysql_tables {
        return Err(color_eyre::eyre::eyre!(
            "❌ Migration parity check FAILED: Table mismatch\n  SQLite: {:?}\n  MySQL: {:?}",
            sqlite_tables,
            mysql_tables
        ));
    }

    tracing::info!("✓ Migration parity verification passed");
    Ok(())
}

/// Lists migration directory names under `dir`.
fn migration_names(dir: &Path) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for entry in
        std::fs::read_dir(dir).wrap_err_with(|| format!("Failed to read {}", dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Lists user tables in the `SQLite` database, excluding diesel's bookkeeping.
fn sqlite_table_names(conn: &mut SqliteConnection) -> Result<BTreeSet<String>> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' \
         AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations'",
    )
    .load(conn)
    .wrap_err("Failed to list SQLite tables")?;

    Ok(tables.into_iter().map(|table| table.name).collect())
}

/// Extracts table names from `CREATE TABLE` statements.
fn created_tables(sql: &str) -> BTreeSet<String> {
    sql.lines()
        .filter_map(|line| {
            let upper = line.trim_start().to_uppercase();
            let rest = upper.strip_prefix("CREATE TABLE")?;
            let rest = rest.trim_start();
            let rest = rest.strip_prefix("IF NOT EXISTS").unwrap_or(rest).trim_start();
            let start = line.len() - rest.len();
            let name: String = line[start..]
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '`')
                .filter(|c| *c != '`')
                .collect();
            (!name.is_empty()).then_some(name)
        })
        .collect()
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
