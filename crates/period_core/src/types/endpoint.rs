//! Single-sided date definitions (period start or period end).
//!
//! This module provides:
//! - [`DateDefinition`]: The accepted input shapes for a date
//! - [`Role`]: Whether an endpoint opens or closes a period
//! - [`DefinitionGranularity`]: The finest unit the caller actually supplied
//! - [`DateEndpoint`]: A decoded, validated endpoint with its boundary instant
//!
//! Incomplete definitions are auto-completed depending on the role: a start
//! is completed to the first day of the month or year, an end to the last.
//!
//! # Examples
//!
//! ```
//! use period_core::types::endpoint::{DateEndpoint, DefinitionGranularity, Role};
//!
//! let start = DateEndpoint::new("2018-02", Role::Start).unwrap();
//! let end = DateEndpoint::new("2018-02", Role::End).unwrap();
//!
//! assert_eq!(start.day(), 1);
//! assert_eq!(end.day(), 28);
//! assert_eq!(end.granularity(), DefinitionGranularity::Month);
//! assert_eq!(end.isoformat(), "2018-02-28T23:59:59.999999");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use super::calendar::days_in_month;
use super::error::PeriodError;
use super::time::Date;
use crate::datenum::{CfTimeConverter, DateNumberConverter, NumericTimeConfig};

/// Smallest and largest year accepted in `YYYY[-MM[-DD]]` strings.
const TEXT_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1000..=2999;

/// Input shapes accepted for a date definition.
///
/// Conversions exist from chrono dates and timestamps, [`Date`], integer
/// arrays/slices/vectors of the form `[year, [month, [day]]]`, and strings
/// of the form `YYYY[-MM[-DD]]`.
///
/// # Examples
///
/// ```
/// use period_core::types::endpoint::DateDefinition;
/// use chrono::NaiveDate;
///
/// let a: DateDefinition = [2018, 4].into();
/// let b: DateDefinition = "2018-04".into();
/// let c: DateDefinition = NaiveDate::from_ymd_opt(2018, 4, 1).unwrap().into();
///
/// assert!(matches!(a, DateDefinition::Components(_)));
/// assert!(matches!(b, DateDefinition::Text(_)));
/// assert!(matches!(c, DateDefinition::Date(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateDefinition {
    /// A full timestamp; only the calendar date is used.
    DateTime(NaiveDateTime),
    /// A full calendar date.
    Date(NaiveDate),
    /// `[year]`, `[year, month]` or `[year, month, day]`.
    Components(Vec<i32>),
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    Text(String),
}

impl DateDefinition {
    /// Decodes the definition into `(date, granularity)` for the given role.
    ///
    /// # Errors
    /// - `InvalidDateDefinition` for a malformed string
    /// - `InvalidComponentCount` for zero or more than three components
    /// - `InvalidDate` if the resolved components are not a calendar date
    pub fn decode(&self, role: Role) -> Result<(Date, DefinitionGranularity), PeriodError> {
        match self {
            DateDefinition::DateTime(dt) => Ok((dt.date().into(), DefinitionGranularity::Day)),
            DateDefinition::Date(d) => Ok(((*d).into(), DefinitionGranularity::Day)),
            DateDefinition::Components(components) => decode_components(components, role),
            DateDefinition::Text(text) => decode_text(text, role),
        }
    }
}

fn decode_components(
    components: &[i32],
    role: Role,
) -> Result<(Date, DefinitionGranularity), PeriodError> {
    let granularity = match components.len() {
        1 => DefinitionGranularity::Year,
        2 => DefinitionGranularity::Month,
        3 => DefinitionGranularity::Day,
        count => return Err(PeriodError::InvalidComponentCount { count }),
    };

    let year = components[0];
    let month = match components.get(1) {
        Some(&month) => month,
        None => match role {
            Role::Start => 1,
            Role::End => 12,
        },
    };
    let invalid = |day: i32| PeriodError::InvalidDate { year, month, day };

    let month_u32 = u32::try_from(month)
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| invalid(components.get(2).copied().unwrap_or(1)))?;

    let day = match components.get(2) {
        Some(&day) => u32::try_from(day).map_err(|_| invalid(day))?,
        None => match role {
            Role::Start => 1,
            Role::End => days_in_month(year, month_u32)?,
        },
    };

    let date = Date::from_ymd(year, month_u32, day)?;
    Ok((date, granularity))
}

fn decode_text(text: &str, role: Role) -> Result<(Date, DefinitionGranularity), PeriodError> {
    let parts: Vec<&str> = text.split('-').collect();
    if parts.len() > 3 {
        return Err(PeriodError::InvalidComponentCount { count: parts.len() });
    }

    let widths = [4, 2, 2];
    let malformed = parts
        .iter()
        .zip(widths)
        .any(|(part, width)| part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()));
    if malformed {
        return Err(PeriodError::InvalidDateDefinition(text.to_string()));
    }

    let components = parts
        .iter()
        .map(|part| part.parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| PeriodError::InvalidDateDefinition(text.to_string()))?;

    if !TEXT_YEAR_RANGE.contains(&components[0]) {
        return Err(PeriodError::InvalidDateDefinition(text.to_string()));
    }

    decode_components(&components, role)
}

impl From<NaiveDateTime> for DateDefinition {
    fn from(dt: NaiveDateTime) -> Self {
        DateDefinition::DateTime(dt)
    }
}

impl From<NaiveDate> for DateDefinition {
    fn from(date: NaiveDate) -> Self {
        DateDefinition::Date(date)
    }
}

impl From<Date> for DateDefinition {
    fn from(date: Date) -> Self {
        DateDefinition::Date(date.into_inner())
    }
}

impl<const N: usize> From<[i32; N]> for DateDefinition {
    fn from(components: [i32; N]) -> Self {
        DateDefinition::Components(components.to_vec())
    }
}

impl From<&[i32]> for DateDefinition {
    fn from(components: &[i32]) -> Self {
        DateDefinition::Components(components.to_vec())
    }
}

impl From<Vec<i32>> for DateDefinition {
    fn from(components: Vec<i32>) -> Self {
        DateDefinition::Components(components)
    }
}

impl From<&str> for DateDefinition {
    fn from(text: &str) -> Self {
        DateDefinition::Text(text.to_string())
    }
}

impl From<String> for DateDefinition {
    fn from(text: String) -> Self {
        DateDefinition::Text(text)
    }
}

/// Whether an endpoint opens (time coverage start) or closes (time coverage end) a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Period start; resolves to 00:00:00.000000 of its date.
    Start,
    /// Period end; resolves to 23:59:59.999999 of its date.
    End,
}

impl Role {
    /// Short name used in metadata (`tcs` / `tce`).
    pub fn name(&self) -> &'static str {
        match self {
            Role::Start => "tcs",
            Role::End => "tce",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Role {
    type Err = PeriodError;

    /// Parses `tcs`/`start` or `tce`/`end` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tcs" | "start" => Ok(Role::Start),
            "tce" | "end" => Ok(Role::End),
            _ => Err(PeriodError::InvalidArgument(format!(
                "invalid endpoint role: {s} -> must be 'tcs' or 'tce'"
            ))),
        }
    }
}

/// The finest calendar unit given in a date definition.
///
/// Ordered from coarse to fine, so the finer of two granularities is their
/// maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefinitionGranularity {
    /// Only the year was given.
    Year,
    /// Year and month were given.
    Month,
    /// A full date was given.
    Day,
}

impl DefinitionGranularity {
    /// ISO 8601 duration token of one unit (`P1Y`, `P1M`, `P1D`).
    pub fn iso_token(&self) -> &'static str {
        match self {
            DefinitionGranularity::Year => "P1Y",
            DefinitionGranularity::Month => "P1M",
            DefinitionGranularity::Day => "P1D",
        }
    }
}

impl fmt::Display for DefinitionGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iso_token())
    }
}

/// A decoded period start or end.
///
/// Immutable after construction. The boundary instant is fixed by the role:
/// the first microsecond of the date for a start, the last for an end.
///
/// # Examples
///
/// ```
/// use period_core::types::endpoint::{DateEndpoint, DefinitionGranularity, Role};
///
/// let end = DateEndpoint::new([2018], Role::End).unwrap();
/// assert_eq!((end.month(), end.day()), (12, 31));
/// assert_eq!(end.granularity(), DefinitionGranularity::Year);
/// assert!(end.is_end());
///
/// assert!(DateEndpoint::new([2018, 4, 31], Role::Start).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "EndpointParts", from = "EndpointParts")
)]
pub struct DateEndpoint {
    date: Date,
    role: Role,
    granularity: DefinitionGranularity,
    instant: NaiveDateTime,
}

/// Serialized form; the instant is always recomputed from date and role.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct EndpointParts {
    date: Date,
    role: Role,
    granularity: DefinitionGranularity,
}

#[cfg(feature = "serde")]
impl From<EndpointParts> for DateEndpoint {
    fn from(parts: EndpointParts) -> Self {
        Self::from_parts(parts.date, parts.role, parts.granularity)
    }
}

#[cfg(feature = "serde")]
impl From<DateEndpoint> for EndpointParts {
    fn from(endpoint: DateEndpoint) -> Self {
        Self {
            date: endpoint.date,
            role: endpoint.role,
            granularity: endpoint.granularity,
        }
    }
}

impl DateEndpoint {
    /// Decodes a date definition for the given role.
    ///
    /// # Errors
    /// See [`DateDefinition::decode`].
    pub fn new(def: impl Into<DateDefinition>, role: Role) -> Result<Self, PeriodError> {
        let (date, granularity) = def.into().decode(role)?;
        Ok(Self::from_parts(date, role, granularity))
    }

    /// Endpoint for a full calendar date (day granularity).
    pub fn from_date(date: Date, role: Role) -> Self {
        Self::from_parts(date, role, DefinitionGranularity::Day)
    }

    fn from_parts(date: Date, role: Role, granularity: DefinitionGranularity) -> Self {
        let instant = match role {
            Role::Start => date.start_of_day(),
            Role::End => date.end_of_day(),
        };
        Self {
            date,
            role,
            granularity,
            instant,
        }
    }

    /// The calendar date.
    #[inline]
    pub fn date(&self) -> Date {
        self.date
    }

    /// The boundary instant (start or end of the day depending on the role).
    #[inline]
    pub fn instant(&self) -> NaiveDateTime {
        self.instant
    }

    /// Year component.
    #[inline]
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Month component (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Day component (1-31).
    #[inline]
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// The endpoint role.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// The finest unit given in the definition before completion.
    #[inline]
    pub fn granularity(&self) -> DefinitionGranularity {
        self.granularity
    }

    /// True for a period start.
    pub fn is_start(&self) -> bool {
        self.role == Role::Start
    }

    /// True for a period end.
    pub fn is_end(&self) -> bool {
        self.role == Role::End
    }

    /// True if the date is a Monday.
    pub fn is_monday(&self) -> bool {
        self.date.iso_weekday() == 1
    }

    /// True if the date is a Sunday.
    pub fn is_sunday(&self) -> bool {
        self.date.iso_weekday() == 7
    }

    /// True if the date is the first of its month.
    pub fn is_first_day_of_month(&self) -> bool {
        self.date.is_first_day_of_month()
    }

    /// True if the date is the last of its month.
    pub fn is_last_day_of_month(&self) -> bool {
        self.date.is_last_day_of_month()
    }

    /// ISO 8601 timestamp of the boundary instant.
    pub fn isoformat(&self) -> String {
        self.instant.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }

    /// The boundary instant as a number under the given unit and calendar.
    ///
    /// # Errors
    /// Propagates converter errors for unsupported units or calendars.
    pub fn datenum(&self, config: &NumericTimeConfig) -> Result<f64, PeriodError> {
        self.datenum_with(&CfTimeConverter, config)
    }

    /// Like [`DateEndpoint::datenum`] with a caller-supplied converter.
    pub fn datenum_with(
        &self,
        converter: &dyn DateNumberConverter,
        config: &NumericTimeConfig,
    ) -> Result<f64, PeriodError> {
        converter.date_to_number(self.instant, config.unit(), config.calendar())
    }
}

impl fmt::Display for DateEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.isoformat(),
            self.role,
            self.granularity
        )
    }
}
