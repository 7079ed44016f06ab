// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall-clock time intervals and the half-open overlap rule.
//!
//! All roster and ledger times are business-local wall clock with no
//! timezone: `YYYY-MM-DD` dates and `HH:MM` times. Intervals are
//! half-open (`[start, end)`): a booking that starts exactly when
//! another ends does not conflict with it.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::DomainError;

/// The date format used throughout the roster data.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The wall-clock formats accepted for times.
///
/// Legacy rows occasionally carry seconds; both forms are accepted,
/// `HH:MM` is what the system writes.
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// A half-open wall-clock interval `[start, end)`.
///
/// A zero-length interval (`start == end`) overlaps nothing, which is
/// exactly the legacy behavior for rows missing their end time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeInterval {
    /// Creates an interval from already-parsed endpoints.
    #[must_use]
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Builds an interval from wall-clock strings.
    ///
    /// `end_date` defaults to `start_date` and `end_time` defaults to
    /// `start_time` when absent, matching how legacy rows were stored.
    ///
    /// # Arguments
    ///
    /// * `start_date` - Start date, `YYYY-MM-DD`
    /// * `start_time` - Start time, `HH:MM`
    /// * `end_date` - Optional end date; same day when absent
    /// * `end_time` - Optional end time; zero-length interval when absent
    ///
    /// # Errors
    ///
    /// Returns a parse error naming the offending field.
    pub fn from_wall_clock(
        start_date: &str,
        start_time: &str,
        end_date: Option<&str>,
        end_time: Option<&str>,
    ) -> Result<Self, DomainError> {
        let start_day: NaiveDate = parse_date("start_date", start_date)?;
        let start_clock: NaiveTime = parse_time("start_time", start_time)?;

        let end_day: NaiveDate = match end_date {
            Some(d) if !d.trim().is_empty() => parse_date("end_date", d)?,
            _ => start_day,
        };
        let end_clock: NaiveTime = match end_time {
            Some(t) if !t.trim().is_empty() => parse_time("end_time", t)?,
            _ => start_clock,
        };

        Ok(Self {
            start: start_day.and_time(start_clock),
            end: end_day.and_time(end_clock),
        })
    }

    /// Returns the interval start.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the interval end.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Half-open intersection test.
    ///
    /// `[a, b)` overlaps `[c, d)` iff `a < d && c < b`. Touching
    /// intervals do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns the start as a wire string (`YYYY-MM-DDTHH:MM`).
    #[must_use]
    pub fn start_string(&self) -> String {
        self.start.format("%Y-%m-%dT%H:%M").to_string()
    }

    /// Returns the end as a wire string (`YYYY-MM-DDTHH:MM`).
    #[must_use]
    pub fn end_string(&self) -> String {
        self.end.format("%Y-%m-%dT%H:%M").to_string()
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` naming the field.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| DomainError::DateParseError {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parses an `HH:MM` (or legacy `HH:MM:SS`) time.
///
/// # Errors
///
/// Returns `DomainError::TimeParseError` naming the field.
pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime, DomainError> {
    let trimmed: &str = value.trim();
    for format in TIME_FORMATS {
        if let Ok(parsed) = NaiveTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    Err(DomainError::TimeParseError {
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(start_time: &str, end_time: &str) -> TimeInterval {
        TimeInterval::from_wall_clock("2025-06-01", start_time, None, Some(end_time))
            .expect("valid interval")
    }

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        let a = interval("10:00", "12:00");
        let b = interval("12:00", "14:00");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_one_minute_overlap_conflicts() {
        let a = interval("10:00", "12:00");
        let b = interval("11:59", "14:00");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = interval("08:00", "18:00");
        let inner = interval("10:00", "11:00");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_zero_length_interval_overlaps_nothing() {
        let point = interval("10:00", "10:00");
        let covering = interval("08:00", "12:00");
        assert!(!point.overlaps(&covering));
        assert!(!covering.overlaps(&point));
    }

    #[test]
    fn test_end_defaults_to_start() {
        let parsed = TimeInterval::from_wall_clock("2025-06-01", "08:30", None, None)
            .expect("valid interval");
        assert_eq!(parsed.start(), parsed.end());
    }

    #[test]
    fn test_end_date_defaults_to_start_date() {
        let parsed = TimeInterval::from_wall_clock("2025-06-01", "08:00", None, Some("12:00"))
            .expect("valid interval");
        assert_eq!(parsed.start_string(), "2025-06-01T08:00");
        assert_eq!(parsed.end_string(), "2025-06-01T12:00");
    }

    #[test]
    fn test_overnight_interval_spans_days() {
        let parsed = TimeInterval::from_wall_clock(
            "2025-06-01",
            "22:00",
            Some("2025-06-02"),
            Some("03:00"),
        )
        .expect("valid interval");
        assert!(parsed.start() < parsed.end());
        assert_eq!(parsed.end_string(), "2025-06-02T03:00");
    }

    #[test]
    fn test_legacy_seconds_form_accepted() {
        let parsed = TimeInterval::from_wall_clock("2025-06-01", "08:00:00", None, Some("12:00"))
            .expect("valid interval");
        assert_eq!(parsed.start_string(), "2025-06-01T08:00");
    }

    #[test]
    fn test_bad_date_names_the_field() {
        let result = TimeInterval::from_wall_clock("01/06/2025", "08:00", None, None);
        match result {
            Err(DomainError::DateParseError { field, .. }) => assert_eq!(field, "start_date"),
            other => panic!("Expected DateParseError, got: {other:?}"),
        }
    }

    #[test]
    fn test_bad_time_names_the_field() {
        let result = TimeInterval::from_wall_clock("2025-06-01", "8h00", None, None);
        match result {
            Err(DomainError::TimeParseError { field, .. }) => assert_eq!(field, "start_time"),
            other => panic!("Expected TimeParseError, got: {other:?}"),
        }
    }
}
