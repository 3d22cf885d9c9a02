//! Duration classification of a period.
//!
//! A [`Duration`] is derived from the two endpoints of a period. It reports
//! whether the span is exactly one day, isoweek, month or year and renders
//! the span as an ISO 8601 duration.

use std::fmt;

use chrono::{Datelike, Months, NaiveDateTime, TimeDelta};
use period_core::types::{DateEndpoint, PeriodError};

/// Classification of a span.
///
/// Checked in the order `Year`, `Month`, `IsoWeek`, `Day`; the first match
/// wins and anything else is `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DurationType {
    /// One calendar day.
    Day,
    /// Monday through the following Sunday.
    IsoWeek,
    /// One full calendar month.
    Month,
    /// One full calendar year.
    Year,
    /// Any other span.
    Custom,
}

impl DurationType {
    /// Returns the lowercase name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            DurationType::Day => "day",
            DurationType::IsoWeek => "isoweek",
            DurationType::Month => "month",
            DurationType::Year => "year",
            DurationType::Custom => "custom",
        }
    }
}

impl fmt::Display for DurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Calendar-aware field-by-field span, rendered as `P[nY][nM][nD][T[nH][nM][nS]]`.
///
/// Months carry over into years, and days are counted after adding whole
/// months (clamped to the end of the month).
///
/// # Examples
///
/// ```
/// use period_models::periods::IsoDuration;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2018, 10, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(2019, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
///
/// let delta = IsoDuration::between(start, end);
/// assert_eq!(delta.months(), 7);
/// assert_eq!(delta.to_string(), "P7M");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IsoDuration {
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl IsoDuration {
    /// Field-by-field span from `from` to `to` (`to >= from`).
    ///
    /// Sub-second remainders are dropped. A reversed pair yields the zero
    /// duration.
    pub fn between(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        if to <= from {
            return Self::default();
        }

        let mut total_months = i64::from(to.year() - from.year()) * 12
            + i64::from(to.month()) - i64::from(from.month());
        let mut anchor = shift_months(from, total_months);
        while total_months > 0 && anchor.map_or(true, |a| a > to) {
            total_months -= 1;
            anchor = shift_months(from, total_months);
        }
        let anchor = anchor.unwrap_or(from);

        let rest = (to - anchor).num_seconds();
        Self {
            years: total_months / 12,
            months: total_months % 12,
            days: rest / 86_400,
            hours: rest % 86_400 / 3_600,
            minutes: rest % 3_600 / 60,
            seconds: rest % 60,
        }
    }

    /// Whole years.
    pub fn years(&self) -> i64 {
        self.years
    }

    /// Months beyond whole years.
    pub fn months(&self) -> i64 {
        self.months
    }

    /// Days beyond whole months.
    pub fn days(&self) -> i64 {
        self.days
    }

    /// Hours beyond whole days.
    pub fn hours(&self) -> i64 {
        self.hours
    }

    /// Minutes beyond whole hours.
    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    /// Seconds beyond whole minutes.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// True if every field is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

fn shift_months(instant: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let months = u32::try_from(months).ok()?;
    instant.checked_add_months(Months::new(months))
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "P0D");
        }
        write!(f, "P")?;
        for (value, designator) in [(self.years, 'Y'), (self.months, 'M'), (self.days, 'D')] {
            if value != 0 {
                write!(f, "{value}{designator}")?;
            }
        }
        if self.hours != 0 || self.minutes != 0 || self.seconds != 0 {
            write!(f, "T")?;
            for (value, designator) in [(self.hours, 'H'), (self.minutes, 'M'), (self.seconds, 'S')]
            {
                if value != 0 {
                    write!(f, "{value}{designator}")?;
                }
            }
        }
        Ok(())
    }
}

/// Duration of a period between its start and end endpoint.
///
/// # Examples
///
/// ```
/// use period_core::types::{DateEndpoint, Role};
/// use period_models::periods::{Duration, DurationType};
///
/// let start = DateEndpoint::new([2018, 4, 1], Role::Start).unwrap();
/// let end = DateEndpoint::new([2018, 4, 2], Role::End).unwrap();
/// let duration = Duration::new(start, end).unwrap();
///
/// assert_eq!(duration.total_days(), 2);
/// assert_eq!(duration.duration_type(), DurationType::Custom);
/// assert_eq!(duration.isoformat(), "P2D");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Duration {
    start: DateEndpoint,
    end: DateEndpoint,
}

impl Duration {
    /// Creates the duration between two endpoints.
    ///
    /// # Errors
    /// `PeriodError::InvertedRange` unless the end instant is strictly after
    /// the start instant.
    pub fn new(start: DateEndpoint, end: DateEndpoint) -> Result<Self, PeriodError> {
        if end.instant() <= start.instant() {
            return Err(PeriodError::InvertedRange {
                start: start.instant(),
                end: end.instant(),
            });
        }
        Ok(Self { start, end })
    }

    /// The start endpoint.
    #[inline]
    pub fn start(&self) -> DateEndpoint {
        self.start
    }

    /// The end endpoint.
    #[inline]
    pub fn end(&self) -> DateEndpoint {
        self.end
    }

    /// Number of calendar days covered (1 for a single day).
    pub fn total_days(&self) -> i64 {
        (self.end.instant() - self.start.instant()).num_days() + 1
    }

    /// Length in seconds, counting the end instant as exclusive.
    pub fn total_seconds(&self) -> f64 {
        let span = self.end_exclusive() - self.start.instant();
        span.num_microseconds()
            .map(|us| us as f64 / 1e6)
            .unwrap_or_else(|| span.num_seconds() as f64)
    }

    /// True if start and end fall on the same date.
    pub fn is_day(&self) -> bool {
        self.start.date() == self.end.date()
    }

    /// True for Monday through the following Sunday.
    pub fn is_isoweek(&self) -> bool {
        self.start.is_monday() && self.end.is_sunday() && self.total_days() == 7
    }

    /// True for the first through the last day of one month.
    pub fn is_month(&self) -> bool {
        (self.start.year(), self.start.month()) == (self.end.year(), self.end.month())
            && self.start.day() == 1
            && self.end.is_last_day_of_month()
    }

    /// True for January 1st through December 31st of one year.
    pub fn is_year(&self) -> bool {
        (self.start.month(), self.start.day()) == (1, 1)
            && (self.end.month(), self.end.day()) == (12, 31)
            && self.start.year() == self.end.year()
    }

    /// Classification of the span.
    pub fn duration_type(&self) -> DurationType {
        if self.is_year() {
            DurationType::Year
        } else if self.is_month() {
            DurationType::Month
        } else if self.is_isoweek() {
            DurationType::IsoWeek
        } else if self.is_day() {
            DurationType::Day
        } else {
            DurationType::Custom
        }
    }

    /// Field-by-field span up to the instant after the end.
    pub fn iso_duration(&self) -> IsoDuration {
        IsoDuration::between(self.start.instant(), self.end_exclusive())
    }

    /// ISO 8601 duration string, e.g. `P1M` or `P7D`.
    pub fn isoformat(&self) -> String {
        self.iso_duration().to_string()
    }

    fn end_exclusive(&self) -> NaiveDateTime {
        self.end.instant() + TimeDelta::microseconds(1)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} days)",
            self.isoformat(),
            self.duration_type(),
            self.total_days()
        )
    }
}
