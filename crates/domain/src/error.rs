// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while constructing domain values.
///
/// Per-field CSV validation never produces these; it yields
/// [`crate::Validated::Invalid`] instead. These errors cover the typed
/// constructors used by callers that must reject bad input outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Email address does not match `local-part@domain.tld`.
    InvalidEmail(String),
    /// Column header is not part of the expected schema.
    UnknownColumn(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{email}'"),
            Self::UnknownColumn(column) => write!(f, "Unknown column: '{column}'"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
