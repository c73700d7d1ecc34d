//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual
//! timestamp format (`SQLite`'s `CURRENT_TIMESTAMP` in legacy rows vs the
//! RFC 3339 written by this crate).

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};

use civic_core::dates::ISO_FORMAT;
use civic_core::enums::Department;

use crate::error::DatabaseError;

/// Current time at the precision stored in the database.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Current time, strictly after `previous`.
///
/// Keeps `updated_at` advancing even when two writes land in the same microsecond.
#[must_use]
pub fn now_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

/// Fixed-width RFC 3339 so timestamps sort lexically.
#[must_use]
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00.000000Z"`) and `SQLite`'s
/// default format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a stored ISO date.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the column holds anything else.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, ISO_FORMAT)
        .map_err(|e| DatabaseError::InvalidState(format!("Stored date '{s}' is not ISO: {e}")))
}

/// Parse an optional TEXT column as `Option<NaiveDate>`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if a non-empty string is not an ISO date.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_date(s)?)),
        _ => Ok(None),
    }
}

/// # Errors
///
/// Returns `DatabaseError::InvalidState` for a department outside the known set.
pub fn parse_department(s: &str) -> Result<Department, DatabaseError> {
    s.parse()
        .map_err(|_| DatabaseError::InvalidState(format!("Unrecognized department '{s}'")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a nullable INTEGER column.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_i64(row: &libsql::Row, idx: i32) -> Result<Option<i64>, DatabaseError> {
    Ok(row.get::<Option<i64>>(idx)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_and_sqlite_formats() {
        let a = parse_datetime("2025-06-01T08:30:00.000000Z").unwrap();
        let b = parse_datetime("2025-06-01 08:30:00").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn formatted_timestamps_roundtrip() {
        let ts = now();
        assert_eq!(parse_datetime(&format_timestamp(ts)).unwrap(), ts);
    }

    #[test]
    fn formatted_timestamps_sort_lexically() {
        let earlier = parse_datetime("2025-06-01T08:30:00Z").unwrap();
        let later = earlier + chrono::Duration::microseconds(1);
        assert!(format_timestamp(earlier) < format_timestamp(later));
    }

    #[test]
    fn now_after_is_strictly_later() {
        let future = Utc::now() + chrono::Duration::hours(1);
        assert!(now_after(future) > future);
    }

    #[test]
    fn legacy_dates_are_invalid_state() {
        assert!(matches!(
            parse_date("01-06-2025"),
            Err(DatabaseError::InvalidState(_))
        ));
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
    }

    #[test]
    fn stored_departments_parse() {
        assert_eq!(parse_department("Public Work").unwrap(), Department::PublicWork);
        assert!(parse_department("exploded").is_err());
    }
}
