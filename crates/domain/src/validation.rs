// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-field validation for CSV rows.
//!
//! Every validator is a pure function that returns either a normalized value
//! or an explicit invalid marker. None of them fail for expected bad input,
//! and the result of one field never affects another.

use crate::dates::parse_hire_date;
use crate::types::{ManagerRef, NormalizedEmail, RawRow, Validated, ValidatedRow};
use regex::Regex;
use std::sync::LazyLock;
use time::PrimitiveDateTime;

/// `local-part@domain.tld` with no whitespace and a single `@`.
#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// Returns true if the (already trimmed) address matches the email pattern.
#[must_use]
pub fn is_well_formed_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate)
}

/// Validates the Email column.
#[must_use]
pub fn validate_email(raw: &str) -> Validated<NormalizedEmail> {
    NormalizedEmail::parse(raw).map_or_else(|_| Validated::invalid(raw), Validated::Valid)
}

/// Validates the Name column.
///
/// A name must contain at least one non-whitespace character, and every
/// character must be alphabetic or whitespace.
#[must_use]
pub fn validate_name(raw: &str) -> Validated<String> {
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return Validated::invalid(raw);
    }

    if trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace())
    {
        Validated::Valid(trimmed.to_string())
    } else {
        Validated::invalid(raw)
    }
}

/// Validates the Salary column.
///
/// Thousands separators are stripped and anything after the decimal point
/// is dropped. The remaining integer must be non-negative.
#[must_use]
pub fn validate_salary(raw: &str) -> Validated<i64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();

    let whole: &str = cleaned
        .split_once('.')
        .map_or(cleaned.as_str(), |(whole, _)| whole);

    match whole.parse::<i64>() {
        Ok(salary) if salary >= 0 => Validated::Valid(salary),
        _ => Validated::invalid(raw),
    }
}

/// Validates the Manager column.
///
/// A blank cell is valid and means "leave the manager as it is".
#[must_use]
pub fn validate_manager(raw: &str) -> Validated<ManagerRef> {
    if raw.trim().is_empty() {
        return Validated::Valid(ManagerRef::Unchanged);
    }

    NormalizedEmail::parse(raw).map_or_else(
        |_| Validated::invalid(raw),
        |email| {
            Validated::Valid(ManagerRef::Email {
                email,
                raw: raw.to_string(),
            })
        },
    )
}

/// Validates the Hire Date column.
#[must_use]
pub fn validate_hire_date(raw: &str) -> Validated<PrimitiveDateTime> {
    parse_hire_date(raw).map_or_else(|_| Validated::invalid(raw), Validated::Valid)
}

/// Validates all five fields of a row independently.
#[must_use]
pub fn validate_row(row: &RawRow) -> ValidatedRow {
    ValidatedRow {
        row_number: row.row_number,
        email: validate_email(&row.email),
        name: validate_name(&row.name),
        salary: validate_salary(&row.salary),
        hire_date: validate_hire_date(&row.hire_date),
        manager: validate_manager(&row.manager),
    }
}
