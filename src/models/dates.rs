//! Collection date handling.
//!
//! Upstream timestamps are plain `YYYY-MM-DD` strings. Some records carry
//! partial dates (`YYYY-MM` or just `YYYY`), which still group into month
//! series but cannot take part in calendar range filtering.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default span of the map's date window, counted back from today.
pub const DEFAULT_MAP_WINDOW_DAYS: u64 = 180;

/// Parse a full `YYYY-MM-DD` collection date. Partial or malformed
/// dates yield `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Truncate a collection date to its month label (`2021-04-17` to
/// `2021-04`). Dates without a day component pass through unchanged.
pub fn month_label(raw: &str) -> &str {
    let mut dashes = raw.match_indices('-');
    dashes.next();
    match dashes.next() {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting windows that end before they start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Range covering the last `days` days up to and including `end`.
    pub fn last_days(days: u64, end: NaiveDate) -> Self {
        let start = end.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// Whether `date` lies inside the range. Both endpoints count.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_full_date() {
        assert_eq!(parse_date("2021-04-17"), Some(date(2021, 4, 17)));
    }

    #[test]
    fn test_parse_rejects_partial_and_invalid() {
        assert_eq!(parse_date("2021-04"), None);
        assert_eq!(parse_date("2021"), None);
        assert_eq!(parse_date("2021-02-30"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_month_label_truncates_day() {
        assert_eq!(month_label("2021-04-17"), "2021-04");
        assert_eq!(month_label("2020-12-01"), "2020-12");
    }

    #[test]
    fn test_month_label_passes_partial_dates() {
        assert_eq!(month_label("2021-04"), "2021-04");
        assert_eq!(month_label("2021"), "2021");
        assert_eq!(month_label(""), "");
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = DateRange::new(date(2021, 1, 10), date(2021, 1, 20)).unwrap();
        assert!(range.contains(date(2021, 1, 10)));
        assert!(range.contains(date(2021, 1, 15)));
        assert!(range.contains(date(2021, 1, 20)));
        assert!(!range.contains(date(2021, 1, 9)));
        assert!(!range.contains(date(2021, 1, 21)));
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert!(DateRange::new(date(2021, 2, 1), date(2021, 1, 1)).is_none());
        assert!(DateRange::new(date(2021, 1, 1), date(2021, 1, 1)).is_some());
    }

    #[test]
    fn test_last_days_window() {
        let today = date(2021, 6, 30);
        let range = DateRange::last_days(180, today);
        assert_eq!(range.end, today);
        assert_eq!(range.start, date(2021, 1, 1));
        assert!(range.contains(today));
        assert!(range.contains(range.start));
    }
}
