// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flexible hire-date parsing and the canonical storage format.
//!
//! Hire dates arrive in whatever shape a spreadsheet export produces:
//! `07/16/2018`, `2018-07-16`, `July 16, 2018`, `16 Jul 2018`, or a full
//! RFC 3339 timestamp. Inputs without a time component resolve to midnight.
//! Ordinal days (`Feb 10th, 2010`) and two-digit years (`02/10/10`) are
//! accepted too.

use crate::error::DomainError;
use regex::Regex;
use std::sync::LazyLock;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// A day of the month followed by an ordinal suffix, as in `10th`.
#[allow(clippy::expect_used)]
static ORDINAL_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("ordinal pattern is a valid regex")
});

/// Two-digit years below this land in the 2000s, the rest in the 1900s.
const CENTURY_PIVOT: i32 = 69;

/// Canonical storage format for hire dates.
const STORED_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Accepted date-and-time layouts, tried in order.
const DATE_TIME_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month padding:none]-[day padding:none]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month padding:none]-[day padding:none]T[hour]:[minute]"),
    format_description!("[year]-[month padding:none]-[day padding:none] [hour]:[minute]:[second]"),
    format_description!("[year]-[month padding:none]-[day padding:none] [hour]:[minute]"),
    format_description!(
        "[month padding:none]/[day padding:none]/[year] [hour padding:none]:[minute]:[second]"
    ),
    format_description!("[month padding:none]/[day padding:none]/[year] [hour padding:none]:[minute]"),
];

/// Accepted date-only layouts, tried in order.
///
/// Numeric dates with slashes or dashes are month-first.
const DATE_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[month padding:none]/[day padding:none]/[year]"),
    format_description!("[month padding:none]-[day padding:none]-[year]"),
    format_description!("[year]-[month padding:none]-[day padding:none]"),
    format_description!("[year]/[month padding:none]/[day padding:none]"),
    format_description!("[year].[month padding:none].[day padding:none]"),
    format_description!("[year][month][day]"),
    format_description!("[month repr:long case_sensitive:false] [day padding:none], [year]"),
    format_description!("[month repr:short case_sensitive:false] [day padding:none], [year]"),
    format_description!("[month repr:long case_sensitive:false] [day padding:none] [year]"),
    format_description!("[month repr:short case_sensitive:false] [day padding:none] [year]"),
    format_description!("[day padding:none] [month repr:long case_sensitive:false] [year]"),
    format_description!("[day padding:none] [month repr:short case_sensitive:false] [year]"),
    format_description!("[day padding:none]-[month repr:short case_sensitive:false]-[year]"),
];

/// Parses a hire date from free-form input.
///
/// Internal whitespace runs are collapsed before matching, so
/// `"Feb  10,   2010"` parses the same as `"Feb 10, 2010"`.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if no accepted layout matches.
pub fn parse_hire_date(raw: &str) -> Result<PrimitiveDateTime, DomainError> {
    let collapsed: String = raw.split_whitespace().collect::<Vec<&str>>().join(" ");
    let candidate: String = ORDINAL_DAY.replace_all(&collapsed, "$1").into_owned();

    if candidate.is_empty() {
        return Err(DomainError::DateParseError {
            date_string: raw.to_string(),
            error: String::from("empty value"),
        });
    }

    if let Ok(timestamp) = OffsetDateTime::parse(&candidate, &Rfc3339) {
        let utc: OffsetDateTime = timestamp.to_offset(UtcOffset::UTC);
        return Ok(PrimitiveDateTime::new(utc.date(), utc.time()));
    }

    if let Some(date_time) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(&candidate, format).ok())
    {
        return Ok(date_time);
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| Date::parse(&candidate, format).ok())
        .or_else(|| parse_two_digit_year(&candidate))
        .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT))
        .ok_or_else(|| DomainError::DateParseError {
            date_string: raw.to_string(),
            error: String::from("unrecognized date format"),
        })
}

/// Parses a month-first numeric date with a two-digit year, such as
/// `02/10/10` or `7-16-18`.
fn parse_two_digit_year(candidate: &str) -> Option<Date> {
    let parts: Vec<&str> = candidate.split(['/', '-']).collect();
    let &[month, day, year] = parts.as_slice() else {
        return None;
    };

    let numeric = |part: &str, max_len: usize| {
        !part.is_empty() && part.len() <= max_len && part.bytes().all(|b| b.is_ascii_digit())
    };
    if !numeric(month, 2) || !numeric(day, 2) || year.len() != 2 || !numeric(year, 2) {
        return None;
    }

    let short_year: i32 = year.parse().ok()?;
    let full_year: i32 = if short_year < CENTURY_PIVOT {
        2000 + short_year
    } else {
        1900 + short_year
    };
    let month: Month = Month::try_from(month.parse::<u8>().ok()?).ok()?;

    Date::from_calendar_date(full_year, month, day.parse().ok()?).ok()
}

/// Formats a hire date in the canonical storage format.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the value cannot be formatted
/// (years outside `0000..=9999`).
pub fn format_stored_date_time(value: PrimitiveDateTime) -> Result<String, DomainError> {
    value
        .format(STORED_FORMAT)
        .map_err(|e| DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        })
}

/// Parses a hire date previously written with [`format_stored_date_time`].
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the stored text is not in the
/// canonical format.
pub fn parse_stored_date_time(stored: &str) -> Result<PrimitiveDateTime, DomainError> {
    PrimitiveDateTime::parse(stored, STORED_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: stored.to_string(),
        error: e.to_string(),
    })
}
