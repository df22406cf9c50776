// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::issue::ImportIssue;

/// Running totals for one import.
///
/// Errors are kept in the order they were discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Users created by this import.
    pub num_created: u64,
    /// Existing users matched and merged by this import.
    pub num_updated: u64,
    /// Human-readable problems, in discovery order.
    pub errors: Vec<String>,
}

impl ImportSummary {
    /// Creates an empty summary.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            num_created: 0,
            num_updated: 0,
            errors: Vec::new(),
        }
    }

    /// Appends an issue to the error list.
    pub fn record_issue(&mut self, issue: &ImportIssue) {
        self.errors.push(issue.to_string());
    }

    /// Counts one upsert as an update (matched) or a creation.
    pub const fn record_upsert(&mut self, matched: bool) {
        if matched {
            self.num_updated += 1;
        } else {
            self.num_created += 1;
        }
    }

    /// Returns true if no issue was recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
