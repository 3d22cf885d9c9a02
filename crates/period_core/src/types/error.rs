//! Error types for structured error handling.
//!
//! This module provides:
//! - `PeriodError`: Errors from date decoding, period construction,
//!   segmentation and numeric date conversion

use chrono::NaiveDateTime;
use thiserror::Error;

/// Categorised period errors.
///
/// Every failure is reported at the point where a precondition is violated.
/// No value is ever left in a partially constructed state.
///
/// # Variants
/// - `InvalidDateDefinition`: Input is not one of the recognised date shapes
/// - `InvalidComponentCount`: Date definition with zero or more than three components
/// - `InvalidMonth`: Month number outside 1..=12
/// - `InvalidDate`: Components do not form a real calendar date
/// - `InvertedRange`: End instant is not strictly after the start instant
/// - `InvalidSegmentDuration`: Unknown segmentation granularity
/// - `InvalidArgument`: Malformed argument (format pattern, role name)
/// - `UnsupportedCalendar`: Calendar name unknown to the numeric date converter
/// - `InvalidTimeUnit`: Unit string not of the form `<unit> since <epoch>`
///
/// # Examples
/// ```
/// use period_core::types::PeriodError;
///
/// let err = PeriodError::InvalidDate { year: 2018, month: 4, day: 31 };
/// assert_eq!(format!("{}", err), "Invalid date: 2018-4-31");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// Input shape is not a timestamp, date, integer sequence or `YYYY[-MM[-DD]]` string.
    #[error("Invalid date definition: {0} -> yyyy[-mm[-dd]]")]
    InvalidDateDefinition(String),

    /// Integer or string date definition with 0 or more than 3 components.
    #[error("Invalid number of date components: {count} (expected 1 to 3)")]
    InvalidComponentCount {
        /// Number of components supplied
        count: usize,
    },

    /// Month number outside 1..=12.
    #[error("Invalid month number: {month} [1, ..., 12]")]
    InvalidMonth {
        /// The offending month value
        month: i64,
    },

    /// Resolved components are not a real calendar date (e.g. April 31st).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component
        month: i32,
        /// Day component
        day: i32,
    },

    /// End instant not strictly after the start instant.
    #[error("Period end [{end}] is not after period start [{start}]")]
    InvertedRange {
        /// Start instant
        start: NaiveDateTime,
        /// End instant
        end: NaiveDateTime,
    },

    /// Segment granularity not one of day, isoweek, month, year.
    #[error("Invalid segment duration: {0} [day, isoweek, month, year]")]
    InvalidSegmentDuration(String),

    /// Malformed argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Calendar name not supported by the numeric date converter.
    #[error("Unsupported calendar: {0}")]
    UnsupportedCalendar(String),

    /// Time unit string could not be decoded.
    #[error("Invalid time unit: {0} (expected `<unit> since <epoch>`)")]
    InvalidTimeUnit(String),
}
