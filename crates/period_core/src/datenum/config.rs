//! Numeric time configuration.
//!
//! This module provides configuration types and builders for the unit and
//! calendar passed to the numeric date converter.

use super::converter::{CalendarKind, TimeUnit};
use crate::types::error::PeriodError;

/// Default numeric time unit.
pub const DEFAULT_TIME_UNIT: &str = "seconds since 1970-01-01";

/// Default calendar name.
pub const DEFAULT_CALENDAR: &str = "standard";

/// Unit and calendar used to express instants as numbers.
///
/// Immutable once built. Both strings are stored as given and only
/// interpreted by the converter that receives them; call
/// [`NumericTimeConfig::validate`] to check them against [`CfTimeConverter`].
///
/// [`CfTimeConverter`]: super::CfTimeConverter
///
/// # Examples
///
/// ```rust
/// use period_core::datenum::NumericTimeConfig;
///
/// let config = NumericTimeConfig::builder()
///     .unit("days since 2000-01-01")
///     .calendar("proleptic_gregorian")
///     .build();
///
/// assert_eq!(config.unit(), "days since 2000-01-01");
/// assert!(config.validate().is_ok());
/// assert_eq!(NumericTimeConfig::default().calendar(), "standard");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericTimeConfig {
    /// CF time unit (`<interval> since <epoch>`).
    unit: String,
    /// CF calendar name.
    calendar: String,
}

impl Default for NumericTimeConfig {
    fn default() -> Self {
        Self {
            unit: DEFAULT_TIME_UNIT.to_string(),
            calendar: DEFAULT_CALENDAR.to_string(),
        }
    }
}

impl NumericTimeConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> NumericTimeConfigBuilder {
        NumericTimeConfigBuilder::default()
    }

    /// Returns the time unit.
    #[inline]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the calendar name.
    #[inline]
    pub fn calendar(&self) -> &str {
        &self.calendar
    }

    /// Checks that [`CfTimeConverter`] understands the unit and calendar.
    ///
    /// [`CfTimeConverter`]: super::CfTimeConverter
    ///
    /// # Errors
    ///
    /// Returns `PeriodError` if:
    /// - the unit is not of the form `<interval> since <epoch>`
    /// - the calendar is not supported
    pub fn validate(&self) -> Result<(), PeriodError> {
        self.unit.parse::<TimeUnit>()?;
        self.calendar.parse::<CalendarKind>()?;
        Ok(())
    }
}

/// Builder for [`NumericTimeConfig`].
///
/// Unset fields fall back to [`DEFAULT_TIME_UNIT`] and [`DEFAULT_CALENDAR`].
#[derive(Clone, Debug, Default)]
pub struct NumericTimeConfigBuilder {
    unit: Option<String>,
    calendar: Option<String>,
}

impl NumericTimeConfigBuilder {
    /// Sets the time unit.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the calendar name.
    pub fn calendar(mut self, calendar: impl Into<String>) -> Self {
        self.calendar = Some(calendar.into());
        self
    }

    /// Builds the configuration without interpreting either string.
    pub fn build(self) -> NumericTimeConfig {
        NumericTimeConfig {
            unit: self.unit.unwrap_or_else(|| DEFAULT_TIME_UNIT.to_string()),
            calendar: self
                .calendar
                .unwrap_or_else(|| DEFAULT_CALENDAR.to_string()),
        }
    }
}
