// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::is_well_formed_email;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::PrimitiveDateTime;

/// An email address in canonical form.
///
/// The canonical form is the trimmed, lower-cased address. It is the unique
/// identity key for a user and never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedEmail(String);

impl NormalizedEmail {
    /// Normalizes and validates an email address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if the trimmed address does not
    /// match `local-part@domain.tld`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed: &str = raw.trim();
        if !is_well_formed_email(trimmed) {
            return Err(DomainError::InvalidEmail(raw.to_string()));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Returns the canonical address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned identity of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of CSV columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Name,
    Email,
    Manager,
    Salary,
    HireDate,
}

impl Column {
    /// All columns in canonical (headerless) order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Manager,
        Self::Salary,
        Self::HireDate,
    ];

    /// Returns the header text for this column.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Manager => "Manager",
            Self::Salary => "Salary",
            Self::HireDate => "Hire Date",
        }
    }

    /// Returns the position of this column in canonical order.
    #[must_use]
    pub const fn canonical_index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Manager => 2,
            Self::Salary => 3,
            Self::HireDate => 4,
        }
    }
}

impl FromStr for Column {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.header() == s.trim())
            .ok_or_else(|| DomainError::UnknownColumn(s.to_string()))
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// One input row with its cells mapped to named fields.
///
/// Cells are kept exactly as they appeared in the input; validators do
/// their own trimming.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    pub name: String,
    pub email: String,
    pub manager: String,
    pub salary: String,
    pub hire_date: String,
}

/// Outcome of validating a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validated<T> {
    /// The field is valid; carries the normalized value.
    Valid(T),
    /// The field is invalid; carries the raw cell text.
    Invalid {
        /// The cell as it appeared in the input.
        raw: String,
    },
}

impl<T> Validated<T> {
    /// Builds an invalid marker for the given cell text.
    #[must_use]
    pub fn invalid(raw: &str) -> Self {
        Self::Invalid {
            raw: raw.to_string(),
        }
    }

    /// Returns true if the field validated.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Returns the normalized value, if any.
    #[must_use]
    pub const fn valid(&self) -> Option<&T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid { .. } => None,
        }
    }

    /// Returns the raw cell text if the field is invalid.
    #[must_use]
    pub fn invalid_raw(&self) -> Option<&str> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid { raw } => Some(raw),
        }
    }
}

/// A manager reference from the Manager column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerRef {
    /// Blank cell: leave the stored manager untouched.
    Unchanged,
    /// A well-formed manager address to resolve against the store.
    Email {
        /// The normalized address.
        email: NormalizedEmail,
        /// The cell as it appeared in the input.
        raw: String,
    },
}

/// Per-row validation result; every field is validated independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRow {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    pub email: Validated<NormalizedEmail>,
    pub name: Validated<String>,
    pub salary: Validated<i64>,
    pub hire_date: Validated<PrimitiveDateTime>,
    pub manager: Validated<ManagerRef>,
}
