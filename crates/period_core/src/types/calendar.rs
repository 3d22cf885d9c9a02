//! Calendar arithmetic helpers.
//!
//! Stateless wrappers around chrono used by endpoint decoding and period
//! segmentation. Enumerations are inclusive of both ends and return an empty
//! sequence when the end precedes the start.

use chrono::NaiveDate;

use super::error::PeriodError;
use super::time::Date;

/// Returns the number of days in the given month.
///
/// # Errors
/// `PeriodError::InvalidDate` if `(year, month)` is not a valid month.
///
/// # Examples
///
/// ```
/// use period_core::types::calendar::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2).unwrap(), 29);
/// assert_eq!(days_in_month(2023, 2).unwrap(), 28);
/// assert_eq!(days_in_month(2018, 4).unwrap(), 30);
/// assert!(days_in_month(2018, 13).is_err());
/// ```
pub fn days_in_month(year: i32, month: u32) -> Result<u32, PeriodError> {
    let invalid = PeriodError::InvalidDate {
        year,
        month: month as i32,
        day: 1,
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(invalid.clone())?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(invalid)?;
    Ok((next_first - first).num_days() as u32)
}

/// Returns true if `(year, month, day)` is a real calendar date.
pub fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// ISO day of week: Monday = 1 ... Sunday = 7.
pub fn day_of_week(date: Date) -> u32 {
    date.iso_weekday()
}

/// All calendar dates from `start` through `end`.
///
/// # Examples
///
/// ```
/// use period_core::types::calendar::enumerate_days;
/// use period_core::types::time::Date;
///
/// let days = enumerate_days(
///     Date::from_ymd(2018, 2, 27).unwrap(),
///     Date::from_ymd(2018, 3, 2).unwrap(),
/// );
/// assert_eq!(days.len(), 4);
/// assert_eq!(days[2], Date::from_ymd(2018, 3, 1).unwrap());
/// ```
pub fn enumerate_days(start: Date, end: Date) -> Vec<Date> {
    let end = end.into_inner();
    start
        .into_inner()
        .iter_days()
        .take_while(|d| *d <= end)
        .map(Date::from)
        .collect()
}

/// All `(year, month)` pairs from the month of `start` through the month of `end`.
///
/// # Examples
///
/// ```
/// use period_core::types::calendar::enumerate_months;
/// use period_core::types::time::Date;
///
/// let months = enumerate_months(
///     Date::from_ymd(2018, 11, 15).unwrap(),
///     Date::from_ymd(2019, 2, 1).unwrap(),
/// );
/// assert_eq!(months, vec![(2018, 11), (2018, 12), (2019, 1), (2019, 2)]);
/// ```
pub fn enumerate_months(start: Date, end: Date) -> Vec<(i32, u32)> {
    let first = month_index(start.year(), start.month());
    let last = month_index(end.year(), end.month());
    (first..=last)
        .map(|index| {
            let year = index.div_euclid(12) as i32;
            let month = index.rem_euclid(12) as u32 + 1;
            (year, month)
        })
        .collect()
}

/// All years from `start_year` through `end_year`.
pub fn enumerate_years(start_year: i32, end_year: i32) -> Vec<i32> {
    (start_year..=end_year).collect()
}

fn month_index(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}
