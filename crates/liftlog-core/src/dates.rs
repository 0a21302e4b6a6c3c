// ABOUTME: Inclusive calendar date ranges and their timestamp bounds
// ABOUTME: Provides the equal-length preceding range used for before/after comparisons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{AppError, AppResult};

/// Inclusive range of calendar days, interpreted in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day (inclusive)
    pub from: NaiveDate,
    /// Last day (inclusive)
    pub to: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `from` after `to`
    ///
    /// The day after `to` and the whole preceding range must also be
    /// representable, so [`Self::bounds`] and [`Self::preceding`] stay exact.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the range is reversed or too close to the
    /// calendar limits
    pub fn new(from: NaiveDate, to: NaiveDate) -> AppResult<Self> {
        if from > to {
            return Err(AppError::invalid_input(format!(
                "range start {from} is after range end {to}"
            )));
        }
        let range = Self { from, to };
        let span = Days::new(range.span_days());
        if to.checked_add_days(Days::new(1)).is_none() || from.checked_sub_days(span).is_none() {
            return Err(AppError::invalid_input(format!(
                "range {range} is outside the supported calendar"
            )));
        }
        Ok(range)
    }

    /// Parse two `YYYY-MM-DD` strings into a range
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for malformed dates or a reversed range
    pub fn parse(from: &str, to: &str) -> AppResult<Self> {
        Self::new(parse_day(from)?, parse_day(to)?)
    }

    /// The whole of one calendar year
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for years chrono cannot represent
    pub fn year(year: i32) -> AppResult<Self> {
        let from = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| AppError::invalid_input(format!("invalid year {year}")))?;
        let to = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| AppError::invalid_input(format!("invalid year {year}")))?;
        Self::new(from, to)
    }

    /// Number of days covered, counting both ends
    #[must_use]
    pub fn day_count(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    fn span_days(&self) -> u64 {
        u64::try_from(self.day_count()).unwrap_or(0)
    }

    /// Range of equal length ending the day before this one starts
    ///
    /// Saturates at [`NaiveDate::MIN`] for ranges built without [`Self::new`].
    #[must_use]
    pub fn preceding(&self) -> Self {
        let to = self.from.pred_opt().unwrap_or(NaiveDate::MIN);
        let from = self
            .from
            .checked_sub_days(Days::new(self.span_days()))
            .unwrap_or(NaiveDate::MIN);
        Self { from, to }
    }

    /// Half-open timestamp bounds `[from 00:00, to + 1 day 00:00)`
    #[must_use]
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.from.and_time(NaiveTime::MIN).and_utc();
        let end = self
            .to
            .succ_opt()
            .map_or(NaiveDateTime::MAX, |next| next.and_time(NaiveTime::MIN))
            .and_utc();
        (start, end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
}

/// Parse a `YYYY-MM-DD` day
///
/// # Errors
///
/// Returns `InvalidInput` when the string is not a calendar date
pub fn parse_day(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        AppError::invalid_input(format!("invalid date `{value}`, expected YYYY-MM-DD: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn day(value: &str) -> NaiveDate {
        parse_day(value).unwrap()
    }

    #[test]
    fn test_preceding_range_has_equal_length() {
        let range = DateRange::new(day("2024-03-10"), day("2024-03-16")).unwrap();
        let previous = range.preceding();
        assert_eq!(previous.from, day("2024-03-03"));
        assert_eq!(previous.to, day("2024-03-09"));
        assert_eq!(previous.day_count(), range.day_count());
    }

    #[test]
    fn test_single_day_preceding() {
        let range = DateRange::new(day("2024-01-01"), day("2024-01-01")).unwrap();
        let previous = range.preceding();
        assert_eq!(previous.from, day("2023-12-31"));
        assert_eq!(previous.to, day("2023-12-31"));
    }

    #[test]
    fn test_bounds_include_whole_last_day() {
        let range = DateRange::parse("2024-05-01", "2024-05-31").unwrap();
        let (start, end) = range.bounds();
        let late = day("2024-05-31").and_hms_opt(23, 59, 59).unwrap().and_utc();
        let next = day("2024-06-01").and_hms_opt(0, 0, 0).unwrap().and_utc();
        assert_eq!(start, day("2024-05-01").and_hms_opt(0, 0, 0).unwrap().and_utc());
        assert!(late < end);
        assert_eq!(next, end);
    }

    #[test]
    fn test_reversed_range_rejected() {
        assert!(DateRange::parse("2024-02-01", "2024-01-01").is_err());
        assert!(DateRange::parse("2024-02-30", "2024-03-01").is_err());
    }

    #[test]
    fn test_year_range() {
        let range = DateRange::year(2024).unwrap();
        assert_eq!(range.day_count(), 366);
        assert_eq!(range.from, day("2024-01-01"));
        assert_eq!(range.to, day("2024-12-31"));
    }

    #[test]
    fn test_ranges_at_calendar_limits_rejected() {
        let last = NaiveDate::MAX;
        let first = NaiveDate::MIN;
        assert!(DateRange::new(last - Days::new(30), last).is_err());
        assert!(DateRange::new(first, first + Days::new(4)).is_err());
        assert!(DateRange::year(last.year()).is_err());

        let edge = DateRange::new(first + Days::new(5), first + Days::new(9)).unwrap();
        let previous = edge.preceding();
        assert_eq!(previous.from, first);
        assert_eq!(previous.day_count(), edge.day_count());
        let (_, end) = DateRange::new(last - Days::new(3), last - Days::new(1))
            .unwrap()
            .bounds();
        assert_eq!(end.date_naive(), last);
    }

    #[test]
    fn test_unchecked_range_saturates_instead_of_panicking() {
        let range = DateRange {
            from: NaiveDate::MIN,
            to: NaiveDate::MAX,
        };
        assert_eq!(range.preceding().to, NaiveDate::MIN);
        assert_eq!(range.bounds().1.naive_utc(), NaiveDateTime::MAX);
    }
}
