// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV parsing and header resolution for the upload endpoint.
//!
//! This is the only place that knows column order. Everything downstream
//! sees `RawRow` values with named fields.

use csv::StringRecord;
use roster::ImportIssue;
use roster_domain::{Column, RawRow};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::debug;

/// How a blank header cell is named in an unexpected-columns message.
const BLANK_COLUMN: &str = "(blank)";

/// Where each expected column lives in a record, and how wide records are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Record position of each column, indexed by `Column::canonical_index`.
    positions: [usize; 5],
    /// Number of header cells, repeats included.
    width: usize,
}

impl ColumnLayout {
    /// The layout used when the input has no header row.
    #[must_use]
    pub const fn canonical() -> Self {
        Self {
            positions: [0, 1, 2, 3, 4],
            width: Column::ALL.len(),
        }
    }

    /// Returns the record position of a column.
    #[must_use]
    pub const fn position(&self, column: Column) -> usize {
        self.positions[column.canonical_index()]
    }

    /// Returns the number of cells every data row must have.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    fn cell<'a>(&self, record: &'a StringRecord, column: Column) -> &'a str {
        record.get(self.position(column)).unwrap_or_default()
    }

    /// Maps a correctly-shaped record to named fields.
    #[must_use]
    pub fn to_raw_row(&self, row_number: usize, record: &StringRecord) -> RawRow {
        RawRow {
            row_number,
            name: self.cell(record, Column::Name).to_string(),
            email: self.cell(record, Column::Email).to_string(),
            manager: self.cell(record, Column::Manager).to_string(),
            salary: self.cell(record, Column::Salary).to_string(),
            hire_date: self.cell(record, Column::HireDate).to_string(),
        }
    }
}

/// How the first record of the input was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderResolution {
    /// The first record shares no tokens with the schema and is data.
    Headerless,
    /// The first record is a valid header.
    Declared(ColumnLayout),
    /// The first record is a header with missing or unexpected columns.
    Rejected(Vec<ImportIssue>),
}

/// Classifies the first record as data, a valid header, or a bad header.
#[must_use]
pub fn resolve_header(first: &StringRecord) -> HeaderResolution {
    let declared: Vec<Option<Column>> = first
        .iter()
        .map(|token| Column::from_str(token).ok())
        .collect();

    if declared.iter().all(Option::is_none) {
        return HeaderResolution::Headerless;
    }

    let mut positions: [Option<usize>; 5] = [None; 5];
    for (index, column) in declared.iter().enumerate() {
        if let Some(column) = column {
            let slot: &mut Option<usize> = &mut positions[column.canonical_index()];
            if slot.is_none() {
                *slot = Some(index);
            }
        }
    }

    let missing: Vec<String> = Column::ALL
        .into_iter()
        .filter(|column| positions[column.canonical_index()].is_none())
        .map(|column| column.header().to_string())
        .collect();

    let extra: BTreeSet<String> = first
        .iter()
        .zip(&declared)
        .filter(|(_, column)| column.is_none())
        .map(|(token, _)| match token.trim() {
            "" => BLANK_COLUMN.to_string(),
            trimmed => trimmed.to_string(),
        })
        .collect();

    let mut issues: Vec<ImportIssue> = Vec::new();
    if !missing.is_empty() {
        issues.push(ImportIssue::MissingColumns(missing));
    }
    if !extra.is_empty() {
        issues.push(ImportIssue::UnexpectedColumns(extra.into_iter().collect()));
    }
    if !issues.is_empty() {
        return HeaderResolution::Rejected(issues);
    }

    let mut resolved: [usize; 5] = [0; 5];
    for (slot, position) in resolved.iter_mut().zip(positions) {
        *slot = position.unwrap_or_default();
    }

    HeaderResolution::Declared(ColumnLayout {
        positions: resolved,
        width: first.len(),
    })
}

/// Rows ready for validation plus the rows that were dropped for shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUpload {
    /// Correctly-shaped rows, in input order.
    pub rows: Vec<RawRow>,
    /// One issue per dropped row, in input order.
    pub issues: Vec<ImportIssue>,
}

/// Parses the upload body into typed rows.
///
/// # Errors
///
/// Returns the header issues if the input has a header that does not match
/// the schema. No row is interpreted in that case.
pub fn parse_upload(body: &str) -> Result<ParsedUpload, Vec<ImportIssue>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut records = reader.records().peekable();

    let resolution: Option<HeaderResolution> = match records.peek() {
        None => return Ok(ParsedUpload::default()),
        Some(Ok(first)) => Some(resolve_header(first)),
        Some(Err(_)) => None,
    };

    let layout: ColumnLayout = match resolution {
        None | Some(HeaderResolution::Headerless) => ColumnLayout::canonical(),
        Some(HeaderResolution::Declared(layout)) => {
            records.next();
            layout
        }
        Some(HeaderResolution::Rejected(issues)) => return Err(issues),
    };

    debug!(width = layout.width(), "Resolved CSV column layout");

    let mut parsed: ParsedUpload = ParsedUpload::default();
    for (index, result) in records.enumerate() {
        let row_number: usize = index + 1;
        match result {
            Ok(record) if record.len() == layout.width() => {
                parsed.rows.push(layout.to_raw_row(row_number, &record));
            }
            Ok(record) => parsed.issues.push(ImportIssue::RowShape {
                row_number,
                expected: layout.width(),
                found: record.len(),
            }),
            Err(e) => parsed.issues.push(ImportIssue::UnreadableRow {
                row_number,
                reason: e.to_string(),
            }),
        }
    }

    Ok(parsed)
}
