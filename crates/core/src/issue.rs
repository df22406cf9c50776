// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-band import problems.
//!
//! None of these abort the invocation by themselves; each one is flattened
//! into a human-readable string in the response's `errors` list.

/// A non-email field that can be dropped from an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateField {
    Name,
    Salary,
    HireDate,
}

impl UpdateField {
    /// Returns the label used in error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Salary => "salary",
            Self::HireDate => "hire date",
        }
    }
}

/// A problem found while importing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportIssue {
    /// Expected columns absent from a declared header.
    MissingColumns(Vec<String>),
    /// Declared header columns outside the expected schema.
    UnexpectedColumns(Vec<String>),
    /// A row whose cell count differs from the header count.
    RowShape {
        /// The row number (1-based, excluding header).
        row_number: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of cells in the row.
        found: usize,
    },
    /// A row the CSV reader could not decode.
    UnreadableRow {
        /// The row number (1-based, excluding header).
        row_number: usize,
        /// Reader error message.
        reason: String,
    },
    /// The row's email is invalid; the row is skipped.
    InvalidEmail {
        /// The cell as it appeared in the input.
        raw: String,
    },
    /// A field was invalid and left out of the update.
    InvalidField {
        /// The dropped field.
        field: UpdateField,
        /// The cell as it appeared in the input.
        raw: String,
    },
    /// The manager cell is malformed or names no known user.
    InvalidManager {
        /// The cell as it appeared in the input.
        raw: String,
    },
}

fn sorted_list(columns: &[String]) -> String {
    let mut sorted: Vec<&str> = columns.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(", ")
}

impl std::fmt::Display for ImportIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColumns(columns) => {
                write!(f, "Missing Columns: {}", sorted_list(columns))
            }
            Self::UnexpectedColumns(columns) => {
                write!(f, "Unexpected Columns: {}", sorted_list(columns))
            }
            Self::RowShape {
                row_number,
                expected,
                found,
            } => write!(
                f,
                "Row {row_number}: expected {expected} cells, found {found}\nEntry unprocessable"
            ),
            Self::UnreadableRow { row_number, reason } => {
                write!(f, "Row {row_number}: {reason}\nEntry unprocessable")
            }
            Self::InvalidEmail { raw } => write!(f, "Invalid email: {raw}\nEntry unprocessable"),
            Self::InvalidField { field, raw } => {
                write!(f, "Invalid {}: {raw}\nContinuing update", field.label())
            }
            Self::InvalidManager { raw } => write!(f, "Invalid manager email: {raw}"),
        }
    }
}
