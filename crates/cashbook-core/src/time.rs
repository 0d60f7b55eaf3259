//! Calendar dates in the `dd/mm/yyyy` form used by stored snapshots,
//! and the inclusive date ranges used for range views.
//!
//! Stored dates are human-formatted, so ordering must always go through
//! [`NaiveDate`]; comparing the strings would put `05/02/2026` before
//! `20/01/2026`.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Date format used for storage and labels
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a `dd/mm/yyyy` date. `dd-mm-yyyy` is accepted too since slashes
/// cannot appear in a URL path segment.
pub fn parse_date(input: &str) -> CoreResult<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d-%m-%Y"))
        .map_err(|_| CoreError::InvalidDate { input: input.to_string() })
}

/// Format a date as `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Serde adapter storing a [`NaiveDate`] as `dd/mm/yyyy`
pub mod dmy {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(with = "dmy")]
    pub start: NaiveDate,
    #[serde(with = "dmy")]
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, swapping the bounds if they arrive reversed
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// A range covering a single day
    pub fn single(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Check if a date is within the range, both ends included
    pub fn contains(&self, date: &NaiveDate) -> bool {
        *date >= self.start && *date <= self.end
    }

    /// Label shown for the range, e.g. `01/01/2026 - 31/01/2026`
    pub fn label(&self) -> String {
        if self.is_single_day() {
            format_date(self.start)
        } else {
            format!("{} - {}", format_date(self.start), format_date(self.end))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("16/01/2026").unwrap(), d(2026, 1, 16));
        assert_eq!(parse_date("16-01-2026").unwrap(), d(2026, 1, 16));
        assert_eq!(parse_date(" 01/12/2025 ").unwrap(), d(2025, 12, 1));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(parse_date("2026-01-16"), Err(CoreError::InvalidDate { .. })));
        assert!(parse_date("31/02/2026").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_calendar_order_differs_from_lexical() {
        let early = parse_date("20/01/2026").unwrap();
        let late = parse_date("05/02/2026").unwrap();
        assert!("05/02/2026" < "20/01/2026");
        assert!(early < late);
    }

    #[test]
    fn test_format_round_trip() {
        assert_eq!(format_date(d(2026, 3, 7)), "07/03/2026");
    }

    #[test]
    fn test_range_swaps_reversed_bounds() {
        let range = DateRange::new(d(2026, 1, 31), d(2026, 1, 1));
        assert_eq!(range.start, d(2026, 1, 1));
        assert_eq!(range.end, d(2026, 1, 31));
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = DateRange::new(d(2026, 1, 1), d(2026, 1, 31));
        assert!(range.contains(&d(2026, 1, 1)));
        assert!(range.contains(&d(2026, 1, 31)));
        assert!(!range.contains(&d(2025, 12, 31)));
        assert!(!range.contains(&d(2026, 2, 1)));
    }

    #[test]
    fn test_range_label() {
        assert_eq!(
            DateRange::new(d(2026, 1, 1), d(2026, 1, 3)).label(),
            "01/01/2026 - 03/01/2026"
        );
        assert_eq!(DateRange::single(d(2026, 1, 1)).label(), "01/01/2026");
    }
}
