//! Conversion of instants to numbers under CF-convention time units.
//!
//! A time unit reads `<interval> since <epoch>`, e.g.
//! `"seconds since 1970-01-01"` or `"days since 2000-01-01 12:00:00"`.
//! The epoch is interpreted in the proleptic Gregorian calendar.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::types::error::PeriodError;

/// Converts an instant into a number under a unit and calendar.
///
/// Implement this to plug a different calendar system into
/// `center_datenum` and `datenum`.
pub trait DateNumberConverter {
    /// Returns `instant` expressed as a number of `unit` under `calendar`.
    ///
    /// # Errors
    /// Implementations return `PeriodError::InvalidTimeUnit` or
    /// `PeriodError::UnsupportedCalendar` for inputs they cannot handle.
    fn date_to_number(
        &self,
        instant: NaiveDateTime,
        unit: &str,
        calendar: &str,
    ) -> Result<f64, PeriodError>;
}

/// Interval of a CF time unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeInterval {
    /// 86400 seconds.
    Days,
    /// 3600 seconds.
    Hours,
    /// 60 seconds.
    Minutes,
    /// One second.
    Seconds,
    /// 1e-3 seconds.
    Milliseconds,
    /// 1e-6 seconds.
    Microseconds,
}

impl TimeInterval {
    /// Length of one interval in microseconds.
    pub fn microseconds(&self) -> i64 {
        match self {
            TimeInterval::Days => 86_400_000_000,
            TimeInterval::Hours => 3_600_000_000,
            TimeInterval::Minutes => 60_000_000,
            TimeInterval::Seconds => 1_000_000,
            TimeInterval::Milliseconds => 1_000,
            TimeInterval::Microseconds => 1,
        }
    }

    /// Canonical CF name.
    pub fn name(&self) -> &'static str {
        match self {
            TimeInterval::Days => "days",
            TimeInterval::Hours => "hours",
            TimeInterval::Minutes => "minutes",
            TimeInterval::Seconds => "seconds",
            TimeInterval::Milliseconds => "milliseconds",
            TimeInterval::Microseconds => "microseconds",
        }
    }
}

impl FromStr for TimeInterval {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "days" | "day" | "d" => Ok(TimeInterval::Days),
            "hours" | "hour" | "hrs" | "hr" | "h" => Ok(TimeInterval::Hours),
            "minutes" | "minute" | "mins" | "min" => Ok(TimeInterval::Minutes),
            "seconds" | "second" | "secs" | "sec" | "s" => Ok(TimeInterval::Seconds),
            "milliseconds" | "millisecond" | "msecs" | "msec" | "ms" => {
                Ok(TimeInterval::Milliseconds)
            }
            "microseconds" | "microsecond" | "usecs" | "usec" | "us" => {
                Ok(TimeInterval::Microseconds)
            }
            _ => Err(PeriodError::InvalidTimeUnit(s.to_string())),
        }
    }
}

/// A decoded `<interval> since <epoch>` unit.
///
/// # Examples
///
/// ```
/// use period_core::datenum::{TimeInterval, TimeUnit};
///
/// let unit: TimeUnit = "hours since 2000-01-01 06:00:00".parse().unwrap();
/// assert_eq!(unit.interval(), TimeInterval::Hours);
/// assert_eq!(unit.epoch().to_string(), "2000-01-01 06:00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeUnit {
    interval: TimeInterval,
    epoch: NaiveDateTime,
}

impl TimeUnit {
    /// The interval.
    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    /// The reference instant.
    pub fn epoch(&self) -> NaiveDateTime {
        self.epoch
    }
}

impl FromStr for TimeUnit {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PeriodError::InvalidTimeUnit(s.to_string());
        let lowered = s.trim().to_lowercase();
        let (interval, epoch) = lowered.split_once(" since ").ok_or_else(invalid)?;
        let interval = interval.parse::<TimeInterval>().map_err(|_| invalid())?;
        let epoch = parse_epoch(epoch.trim()).ok_or_else(invalid)?;
        Ok(Self { interval, epoch })
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} since {}",
            self.interval.name(),
            self.epoch.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

fn parse_epoch(text: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dt%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Calendars understood by [`CfTimeConverter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarKind {
    /// Julian before 1582-10-05, Gregorian from 1582-10-15 on.
    Standard,
    /// Alias of `Standard`.
    Gregorian,
    /// Gregorian rules extended to all dates.
    ProlepticGregorian,
}

impl CalendarKind {
    /// CF calendar name.
    pub fn name(&self) -> &'static str {
        match self {
            CalendarKind::Standard => "standard",
            CalendarKind::Gregorian => "gregorian",
            CalendarKind::ProlepticGregorian => "proleptic_gregorian",
        }
    }

    fn is_mixed(&self) -> bool {
        !matches!(self, CalendarKind::ProlepticGregorian)
    }
}

impl FromStr for CalendarKind {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(CalendarKind::Standard),
            "gregorian" => Ok(CalendarKind::Gregorian),
            "proleptic_gregorian" => Ok(CalendarKind::ProlepticGregorian),
            _ => Err(PeriodError::UnsupportedCalendar(s.to_string())),
        }
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Converter for Gregorian-family CF calendars.
///
/// # Examples
///
/// ```
/// use period_core::datenum::{CfTimeConverter, DateNumberConverter};
/// use chrono::NaiveDate;
///
/// let noon = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let days = CfTimeConverter
///     .date_to_number(noon, "days since 1970-01-01", "standard")
///     .unwrap();
/// assert_eq!(days, 0.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CfTimeConverter;

impl DateNumberConverter for CfTimeConverter {
    fn date_to_number(
        &self,
        instant: NaiveDateTime,
        unit: &str,
        calendar: &str,
    ) -> Result<f64, PeriodError> {
        let unit: TimeUnit = unit.parse()?;
        let calendar: CalendarKind = calendar.parse()?;

        let (instant, epoch) = if calendar.is_mixed() {
            (
                mixed_to_proleptic(instant, calendar)?,
                mixed_to_proleptic(unit.epoch(), calendar)?,
            )
        } else {
            (instant, unit.epoch())
        };

        let micros = (instant - epoch).num_microseconds().ok_or_else(|| {
            PeriodError::InvalidArgument(format!("{instant} too far from {epoch}"))
        })?;
        Ok(micros as f64 / unit.interval().microseconds() as f64)
    }
}

/// Julian day number of 0000-12-31 in the proleptic Gregorian calendar.
const JDN_CE_OFFSET: i64 = 1_721_425;

/// Maps a mixed-calendar instant onto the proleptic Gregorian time line.
///
/// Dates before 1582-10-05 are read as Julian calendar dates; the ten days
/// dropped by the reform do not exist.
fn mixed_to_proleptic(
    instant: NaiveDateTime,
    calendar: CalendarKind,
) -> Result<NaiveDateTime, PeriodError> {
    let date = instant.date();
    if date >= ymd(1582, 10, 15) {
        return Ok(instant);
    }
    if date >= ymd(1582, 10, 5) {
        return Err(PeriodError::UnsupportedCalendar(format!(
            "{date} does not exist in the {calendar} calendar"
        )));
    }
    i32::try_from(julian_day_number(date) - JDN_CE_OFFSET)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .map(|gregorian| gregorian.and_time(instant.time()))
        .ok_or_else(|| {
            PeriodError::UnsupportedCalendar(format!("{date} out of range for {calendar}"))
        })
}

/// Julian day number of a date read in the Julian calendar.
fn julian_day_number(date: NaiveDate) -> i64 {
    let month = i64::from(date.month());
    let a = (14 - month) / 12;
    let y = i64::from(date.year()) + 4800 - a;
    let m = month + 12 * a - 3;
    i64::from(date.day()) + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - 32_083
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
