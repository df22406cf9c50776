// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and field validation for the roster import.
//!
//! This crate has no knowledge of storage or transport. It defines the
//! values a CSV row is turned into and the pure validators that produce them.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod dates;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use dates::{format_stored_date_time, parse_hire_date, parse_stored_date_time};
pub use error::DomainError;
pub use types::{Column, ManagerRef, NormalizedEmail, RawRow, UserId, Validated, ValidatedRow};
pub use validation::{
    is_well_formed_email, validate_email, validate_hire_date, validate_manager, validate_name,
    validate_row, validate_salary,
};
