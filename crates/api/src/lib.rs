// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invocation boundary for the roster CSV import.
//!
//! `handle_csv_upload` takes the raw CSV body and a store, and returns the
//! status code plus summary that the transport sends back.

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

mod csv_upload;
mod error;
mod request_response;

#[cfg(test)]
mod tests;

pub use csv_upload::{ColumnLayout, HeaderResolution, ParsedUpload, parse_upload, resolve_header};
pub use error::UploadError;
pub use request_response::{InvocationContext, STATUS_BAD_REQUEST, STATUS_OK, UploadResponse};

use roster::{DirectoryStore, ImportSummary, import_rows};
use tracing::{info, warn};

/// Imports a CSV upload into the store.
///
/// A rejected header yields a `400` response with the column errors and
/// zero counts. Otherwise shape errors are recorded first, then each
/// well-shaped row is validated and reconciled in input order, and a `200`
/// response carries the totals.
///
/// # Errors
///
/// Returns `UploadError::Store` if the store fails. Rows processed before
/// the failure remain committed.
pub fn handle_csv_upload<S: DirectoryStore>(
    store: &mut S,
    body: &str,
    context: &InvocationContext,
) -> Result<UploadResponse, UploadError<S::Error>>
where
    S::Error: 'static,
{
    let request_id: &str = context.request_id_or_default();

    let parsed: ParsedUpload = match parse_upload(body) {
        Ok(parsed) => parsed,
        Err(issues) => {
            let mut summary: ImportSummary = ImportSummary::new();
            for issue in &issues {
                summary.record_issue(issue);
            }
            warn!(request_id, errors = ?summary.errors, "Rejected CSV header");
            return Ok(UploadResponse::bad_request(summary));
        }
    };

    info!(
        request_id,
        rows = parsed.rows.len(),
        dropped = parsed.issues.len(),
        "Processing CSV upload"
    );

    let mut summary: ImportSummary = ImportSummary::new();
    for issue in &parsed.issues {
        summary.record_issue(issue);
    }

    import_rows(store, &parsed.rows, &mut summary).map_err(UploadError::Store)?;

    info!(
        request_id,
        num_created = summary.num_created,
        num_updated = summary.num_updated,
        errors = summary.errors.len(),
        "CSV upload complete"
    );

    Ok(UploadResponse::ok(summary))
}
