//! Calendar date type used throughout the period library.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - Start-of-day and end-of-day instants for inclusive period bounds
//!
//! # Examples
//!
//! ```
//! use period_core::types::time::Date;
//!
//! let date = Date::from_ymd(2018, 4, 30).unwrap();
//! assert!(date.is_last_day_of_month());
//! assert_eq!(date.end_of_day().to_string(), "2018-04-30 23:59:59.999999");
//! ```

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::PeriodError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Dates are naive calendar dates without time zone. The wrapper adds the
/// boundary instants a period needs: the first microsecond of the day for a
/// period start and the last microsecond for a period end.
///
/// # Examples
///
/// ```
/// use period_core::types::time::Date;
///
/// let date = Date::from_ymd(2018, 4, 2).unwrap();
/// assert_eq!(date.iso_weekday(), 1); // Monday
///
/// let parsed: Date = "2018-04-02".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let later = Date::from_ymd(2018, 4, 12).unwrap();
/// assert_eq!(later - date, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(PeriodError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2018, 4, 31).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, PeriodError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(PeriodError::InvalidDate {
                year,
                month: month as i32,
                day: day as i32,
            })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use period_core::types::time::Date;
    ///
    /// assert_eq!(Date::parse("2018-04-15").unwrap().day(), 15);
    /// assert!(Date::parse("not-a-date").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, PeriodError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| PeriodError::InvalidDateDefinition(format!("{s} ({e})")))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the ISO weekday number (Monday = 1, Sunday = 7).
    pub fn iso_weekday(&self) -> u32 {
        self.0.weekday().number_from_monday()
    }

    /// Returns true on the first day of a month.
    pub fn is_first_day_of_month(&self) -> bool {
        self.0.day() == 1
    }

    /// Returns true on the last day of a month.
    ///
    /// # Examples
    ///
    /// ```
    /// use period_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).unwrap().is_last_day_of_month());
    /// assert!(!Date::from_ymd(2023, 2, 27).unwrap().is_last_day_of_month());
    /// ```
    pub fn is_last_day_of_month(&self) -> bool {
        self.0
            .succ_opt()
            .map_or(true, |next| next.month() != self.0.month())
    }

    /// Returns the date shifted by a signed number of days.
    ///
    /// # Errors
    /// `PeriodError::InvalidArgument` if the result leaves chrono's date range.
    pub fn add_days(&self, days: i64) -> Result<Self, PeriodError> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| PeriodError::InvalidArgument(format!("{self} shifted by {days} days")))
    }

    /// First instant of the day (00:00:00.000000).
    pub fn start_of_day(&self) -> NaiveDateTime {
        self.0.and_time(NaiveTime::MIN)
    }

    /// Last representable instant of the day (23:59:59.999999).
    pub fn end_of_day(&self) -> NaiveDateTime {
        self.0.and_time(last_microsecond())
    }
}

fn last_microsecond() -> NaiveTime {
    // 23:59:59.999999 is always a valid time of day
    NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN)
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = PeriodError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, PeriodError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
