//! Calendar date helpers.
//!
//! Work and availability dates are stored as ISO `YYYY-MM-DD`. The legacy
//! `DD-MM-YYYY` layout only appears at the compatibility edge: the normalizing
//! migration in `civic-db` and optional CLI display.

use chrono::NaiveDate;

use crate::errors::CoreError;

/// Canonical storage and input format.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Format used by databases created with the legacy layout.
pub const LEGACY_FORMAT: &str = "%d-%m-%Y";

/// Parse a caller-supplied `YYYY-MM-DD` date.
///
/// `field` names the argument in the error message.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `raw` is not a zero-padded ISO calendar date.
pub fn parse_iso_date(raw: &str, field: &str) -> Result<NaiveDate, CoreError> {
    let raw = raw.trim();
    if raw.len() != 10 {
        return Err(CoreError::Validation(format!(
            "{field} '{raw}' is not a YYYY-MM-DD date"
        )));
    }
    NaiveDate::parse_from_str(raw, ISO_FORMAT).map_err(|e| {
        CoreError::Validation(format!("{field} '{raw}' is not a YYYY-MM-DD date: {e}"))
    })
}

#[must_use]
pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

#[must_use]
pub fn format_legacy(date: NaiveDate) -> String {
    date.format(LEGACY_FORMAT).to_string()
}

/// The local calendar date, used for "available today" checks.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_iso_date() {
        let date = parse_iso_date("2025-06-01", "existing_date").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn rejects_legacy_layout_as_iso() {
        let err = parse_iso_date("01-06-2025", "existing_date").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("existing_date"));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(parse_iso_date("2025-02-30", "new_date").is_err());
        assert!(parse_iso_date("2025-13-01", "new_date").is_err());
        assert!(parse_iso_date("tomorrow", "new_date").is_err());
        assert!(parse_iso_date("2025-6-1", "new_date").is_err());
    }

    #[test]
    fn formats_both_layouts() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        assert_eq!(format_iso(date), "2025-06-05");
        assert_eq!(format_legacy(date), "05-06-2025");
    }
}
